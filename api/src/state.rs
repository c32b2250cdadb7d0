//! API State Management

use std::sync::Arc;

use verdict_consensus::ProviderPool;
use verdict_ledger::{StakeLedger, WeightLedger};

/// Shared handles every handler needs: the provider roster with its HTTP
/// client, and the two reputation ledgers.
#[derive(Clone)]
pub struct ApiState {
    pub providers: Arc<ProviderPool>,
    pub stakes: Arc<StakeLedger>,
    pub weights: Arc<WeightLedger>,
}
