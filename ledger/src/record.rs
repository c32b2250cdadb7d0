//! Reputation records and slash events
//!
//! The data model both ledger files share. A provider's record tracks its
//! remaining stake and its agree/disagree history; its voting weight is
//! always derived from those two, never stored independently of them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stake every provider starts with.
pub const INITIAL_STAKE: f64 = 1000.0;

/// Voting weight every provider starts with.
pub const INITIAL_WEIGHT: f64 = 1.0;

/// One provider's standing in the stake ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReputationRecord {
    pub weight: f64,
    pub stake: f64,
    pub total_predictions: u64,
    pub successful_predictions: u64,
}

impl Default for ReputationRecord {
    fn default() -> Self {
        Self {
            weight: INITIAL_WEIGHT,
            stake: INITIAL_STAKE,
            total_predictions: 0,
            successful_predictions: 0,
        }
    }
}

impl ReputationRecord {
    /// Fraction of scored rounds this provider agreed with consensus.
    pub fn success_rate(&self) -> f64 {
        if self.total_predictions == 0 {
            return 0.0;
        }
        self.successful_predictions as f64 / self.total_predictions as f64
    }

    /// Rederive the voting weight from stake and track record.
    pub fn recompute_weight(&mut self) {
        self.weight = (self.stake / INITIAL_STAKE) * self.success_rate();
    }

    /// Deduct `amount` from the stake, never going below zero. Returns the
    /// remaining stake.
    pub fn slash(&mut self, amount: f64) -> f64 {
        self.stake = (self.stake - amount).max(0.0);
        self.stake
    }
}

/// Record of one slashing event, appended to the ledger history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlashEvent {
    pub timestamp: String,
    pub model: String,
    pub action: String,
    pub amount: f64,
    pub reason: String,
    pub remaining_stake: f64,
}

impl SlashEvent {
    pub fn new(model: String, amount: f64, reason: String, remaining_stake: f64) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            model,
            action: "slash".to_string(),
            amount,
            reason,
            remaining_stake,
        }
    }
}

/// On-disk shape of the stake ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StakeDocument {
    pub models: HashMap<String, ReputationRecord>,
    pub history: Vec<SlashEvent>,
}

/// One provider's entry in the decay-weight ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub weight: f64,
}

impl Default for WeightEntry {
    fn default() -> Self {
        Self {
            weight: INITIAL_WEIGHT,
        }
    }
}

/// On-disk shape of the decay-weight ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeightsDocument {
    pub weights: HashMap<String, WeightEntry>,
}

/// Post-round snapshot of one provider, in client-facing field order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderStatus {
    pub endpoint: String,
    pub stake: f64,
    pub weight: f64,
    pub successful_predictions: u64,
    pub total_predictions: u64,
}
