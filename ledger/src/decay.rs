//! Decay-weight ledger
//!
//! The softer of the two reputation schemes: no stake, no slashing, just an
//! exponential moving average that pulls each responder's weight toward
//! `exp(-distance)` after every round. Agreement drifts a weight toward 1,
//! divergence decays it toward 0, and either way old behavior fades instead
//! of being punished outright.

use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use crate::error::{LedgerError, Result};
use crate::record::{WeightsDocument, INITIAL_WEIGHT};

/// File the decay-weight ledger persists to, under the node's data directory.
pub const WEIGHTS_FILE: &str = "model_weights.json";

/// Blend factor for each round's observation. The remainder stays with the
/// provider's accumulated weight.
pub const DECAY_ALPHA: f64 = 0.3;

/// Persistent decay-weight ledger.
pub struct WeightLedger {
    path: PathBuf,
    state: RwLock<WeightsDocument>,
}

impl WeightLedger {
    /// Open the ledger at `path`, creating fresh entries for any roster
    /// provider not already present. Same file-handling contract as the
    /// stake ledger: absent starts fresh, corrupt is an error.
    pub async fn open(path: impl Into<PathBuf>, roster: &[String]) -> Result<Self> {
        let path = path.into();

        let mut doc = match tokio::fs::read_to_string(&path).await {
            Ok(data) => serde_json::from_str(&data).map_err(|source| LedgerError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("📊 No weight ledger at {}, starting fresh", path.display());
                WeightsDocument::default()
            }
            Err(source) => return Err(LedgerError::Unreadable { path, source }),
        };

        for endpoint in roster {
            doc.weights.entry(endpoint.clone()).or_default();
        }

        Ok(Self {
            path,
            state: RwLock::new(doc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current weights for the given providers, in the given order.
    pub async fn weights_for(&self, endpoints: &[&str]) -> Vec<f64> {
        let doc = self.state.read().await;
        endpoints
            .iter()
            .map(|endpoint| {
                doc.weights
                    .get(*endpoint)
                    .map(|entry| entry.weight)
                    .unwrap_or(INITIAL_WEIGHT)
            })
            .collect()
    }

    /// Fold one round's distances into the weights and flush to disk.
    /// Providers absent from `distances` keep their current weight.
    pub async fn apply_round(&self, distances: &[(&str, f64)]) -> Result<()> {
        let mut guard = self.state.write().await;
        let doc = &mut *guard;

        for &(endpoint, distance) in distances {
            let entry = doc.weights.entry(endpoint.to_string()).or_default();
            let observed = (-distance).exp();
            entry.weight = (1.0 - DECAY_ALPHA) * entry.weight + DECAY_ALPHA * observed;
        }

        let json = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| LedgerError::Persist {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }

    /// Full copy of the current ledger state.
    pub async fn snapshot(&self) -> WeightsDocument {
        self.state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn roster() -> Vec<String> {
        vec![
            "http://localhost:5000/predict".to_string(),
            "http://localhost:5001/predict".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_open_seeds_unit_weights() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(WEIGHTS_FILE);

        let ledger = WeightLedger::open(&path, &roster()).await.unwrap();
        let endpoints = roster();

        assert_eq!(ledger.path(), path.as_path());
        let weights = ledger
            .weights_for(&[endpoints[0].as_str(), endpoints[1].as_str()])
            .await;
        assert_eq!(weights, vec![1.0, 1.0]);
    }

    #[tokio::test]
    async fn test_blend_math() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(WEIGHTS_FILE);
        let endpoints = roster();

        let ledger = WeightLedger::open(&path, &endpoints).await.unwrap();
        ledger
            .apply_round(&[(endpoints[0].as_str(), 1.0)])
            .await
            .unwrap();

        // 0.7 * 1.0 + 0.3 * e^-1
        let expected = 0.7 + 0.3 * (-1.0_f64).exp();
        let weights = ledger.weights_for(&[endpoints[0].as_str()]).await;
        assert!((weights[0] - expected).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_perfect_agreement_holds_at_one() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(WEIGHTS_FILE);
        let endpoints = roster();

        let ledger = WeightLedger::open(&path, &endpoints).await.unwrap();
        for _ in 0..5 {
            ledger
                .apply_round(&[(endpoints[0].as_str(), 0.0)])
                .await
                .unwrap();
        }

        let weights = ledger.weights_for(&[endpoints[0].as_str()]).await;
        assert!((weights[0] - 1.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_absent_provider_keeps_weight() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(WEIGHTS_FILE);
        let endpoints = roster();

        let ledger = WeightLedger::open(&path, &endpoints).await.unwrap();
        ledger
            .apply_round(&[(endpoints[0].as_str(), 2.0)])
            .await
            .unwrap();

        let weights = ledger
            .weights_for(&[endpoints[0].as_str(), endpoints[1].as_str()])
            .await;
        assert!(weights[0] < 1.0);
        assert_eq!(weights[1], 1.0);
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(WEIGHTS_FILE);
        let endpoints = roster();

        let before = {
            let ledger = WeightLedger::open(&path, &endpoints).await.unwrap();
            ledger
                .apply_round(&[(endpoints[0].as_str(), 0.8), (endpoints[1].as_str(), 0.1)])
                .await
                .unwrap();
            ledger.snapshot().await
        };

        let reopened = WeightLedger::open(&path, &endpoints).await.unwrap();
        assert_eq!(reopened.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(WEIGHTS_FILE);
        tokio::fs::write(&path, "[1, 2, oops").await.unwrap();

        let result = WeightLedger::open(&path, &roster()).await;

        assert!(matches!(result, Err(LedgerError::Corrupt { .. })));
    }
}
