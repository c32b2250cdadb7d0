//! Verdict Ledger
//!
//! Persistent provider reputation, two flavors: a stake ledger that slashes
//! divergent providers and derives weight from remaining stake and track
//! record, and a decay ledger that blends each round's agreement into an
//! exponential moving average. Both live as whole-file JSON documents under
//! the node's data directory and serialize all updates through a write lock.

pub mod decay;
pub mod error;
pub mod record;
pub mod stake;

pub use decay::{WeightLedger, DECAY_ALPHA, WEIGHTS_FILE};
pub use error::{LedgerError, Result};
pub use record::{
    ProviderStatus, ReputationRecord, SlashEvent, StakeDocument, WeightEntry, WeightsDocument,
    INITIAL_STAKE, INITIAL_WEIGHT,
};
pub use stake::{
    ScoringPolicy, StakeLedger, DEFAULT_AGREEMENT_THRESHOLD, DEFAULT_SLASH_AMOUNT, STAKES_FILE,
};
