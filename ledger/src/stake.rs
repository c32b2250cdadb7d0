//! Stake ledger with slashing
//!
//! Providers put up stake and lose a fixed slice of it every round their
//! prediction lands too far from consensus. Weight is rederived after every
//! scored round, so a provider that keeps diverging bleeds influence twice:
//! through its shrinking stake and through its falling success rate.
//!
//! All round updates go through one write lock, and the file is rewritten
//! before the lock is released, so concurrent rounds serialize instead of
//! overwriting each other's updates.

use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use crate::error::{LedgerError, Result};
use crate::record::{ProviderStatus, SlashEvent, StakeDocument, INITIAL_WEIGHT};

/// File the stake ledger persists to, under the node's data directory.
pub const STAKES_FILE: &str = "model_stakes.json";

/// Largest distance from consensus still counted as agreement.
pub const DEFAULT_AGREEMENT_THRESHOLD: f64 = 0.05;

/// Stake deducted per divergent round.
pub const DEFAULT_SLASH_AMOUNT: f64 = 200.0;

/// Tunable knobs for scoring a round.
#[derive(Debug, Clone, Copy)]
pub struct ScoringPolicy {
    pub agreement_threshold: f64,
    pub slash_amount: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            agreement_threshold: DEFAULT_AGREEMENT_THRESHOLD,
            slash_amount: DEFAULT_SLASH_AMOUNT,
        }
    }
}

/// Persistent stake and reputation ledger.
pub struct StakeLedger {
    path: PathBuf,
    policy: ScoringPolicy,
    state: RwLock<StakeDocument>,
}

impl StakeLedger {
    /// Open the ledger at `path`, creating fresh records for any roster
    /// provider not already present.
    ///
    /// An absent file starts a fresh ledger; a file that exists but does
    /// not parse is an error, so a corrupt ledger never silently resets
    /// provider stakes.
    pub async fn open(
        path: impl Into<PathBuf>,
        roster: &[String],
        policy: ScoringPolicy,
    ) -> Result<Self> {
        let path = path.into();

        let mut doc = match tokio::fs::read_to_string(&path).await {
            Ok(data) => serde_json::from_str(&data).map_err(|source| LedgerError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("📊 No stake ledger at {}, starting fresh", path.display());
                StakeDocument::default()
            }
            Err(source) => return Err(LedgerError::Unreadable { path, source }),
        };

        for endpoint in roster {
            doc.models.entry(endpoint.clone()).or_default();
        }

        Ok(Self {
            path,
            policy,
            state: RwLock::new(doc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current voting weights for the given providers, in the given order.
    pub async fn weights_for(&self, endpoints: &[&str]) -> Vec<f64> {
        let doc = self.state.read().await;
        endpoints
            .iter()
            .map(|endpoint| {
                doc.models
                    .get(*endpoint)
                    .map(|record| record.weight)
                    .unwrap_or(INITIAL_WEIGHT)
            })
            .collect()
    }

    /// Score one round. `distances` pairs each responder with its distance
    /// from the round's consensus vector.
    ///
    /// Providers within the agreement threshold are credited; the rest are
    /// slashed and the event is appended to the history. Absent providers
    /// are untouched. Statuses come back in the same order as `distances`,
    /// and the updated ledger is flushed to disk before this returns.
    pub async fn apply_round(&self, distances: &[(&str, f64)]) -> Result<Vec<ProviderStatus>> {
        let mut guard = self.state.write().await;
        // Reborrow so models and history can be borrowed independently.
        let doc = &mut *guard;

        for &(endpoint, distance) in distances {
            let record = doc.models.entry(endpoint.to_string()).or_default();
            record.total_predictions += 1;

            if distance <= self.policy.agreement_threshold {
                record.successful_predictions += 1;
            } else {
                let remaining = record.slash(self.policy.slash_amount);
                let reason = format!("Distance from consensus: {:.3}", distance);
                tracing::warn!(
                    "⚠️  Slashing {} by {}: {} (stake now {})",
                    endpoint,
                    self.policy.slash_amount,
                    reason,
                    remaining
                );
                doc.history.push(SlashEvent::new(
                    endpoint.to_string(),
                    self.policy.slash_amount,
                    reason,
                    remaining,
                ));
            }

            record.recompute_weight();
        }

        let statuses = distances
            .iter()
            .map(|&(endpoint, _)| {
                let record = doc.models.get(endpoint).cloned().unwrap_or_default();
                ProviderStatus {
                    endpoint: endpoint.to_string(),
                    stake: record.stake,
                    weight: record.weight,
                    successful_predictions: record.successful_predictions,
                    total_predictions: record.total_predictions,
                }
            })
            .collect();

        self.flush(doc).await?;

        Ok(statuses)
    }

    /// Full copy of the current ledger state.
    pub async fn snapshot(&self) -> StakeDocument {
        self.state.read().await.clone()
    }

    async fn flush(&self, doc: &StakeDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| LedgerError::Persist {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}
