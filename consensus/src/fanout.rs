//! Concurrent round dispatch across the provider roster
//!
//! A round is a fork-join: one in-flight call per provider, joined before
//! anything downstream runs. A slow provider delays the round (up to the
//! client timeout) but never aborts it, and absences only fail the round
//! when nobody answered at all.

use futures::future::join_all;

use verdict_core::{Features, Prediction, ProviderId, ProviderOutcome};

use crate::client::ProviderClient;

/// The fixed set of providers a node queries, with the shared HTTP client.
pub struct ProviderPool {
    roster: Vec<ProviderId>,
    client: ProviderClient,
}

impl ProviderPool {
    pub fn new(roster: Vec<ProviderId>, client: ProviderClient) -> Self {
        Self { roster, client }
    }

    pub fn roster(&self) -> &[ProviderId] {
        &self.roster
    }

    /// Dispatch one query to every provider concurrently and wait for all
    /// of them. Outcomes come back in roster order, each still attached to
    /// its provider identity.
    pub async fn dispatch(&self, features: &Features) -> RoundOutcome {
        let calls = self
            .roster
            .iter()
            .map(|endpoint| self.client.fetch(endpoint, features));

        let results = join_all(calls).await;

        for (endpoint, outcome) in self.roster.iter().zip(&results) {
            if let ProviderOutcome::Absent(reason) = outcome {
                tracing::warn!("⚠️  Provider {} absent this round: {}", endpoint, reason);
            }
        }

        let outcomes: Vec<(ProviderId, ProviderOutcome)> =
            self.roster.iter().cloned().zip(results).collect();

        let round = RoundOutcome { outcomes };
        tracing::debug!(
            "Round dispatched: {}/{} providers responded",
            round.responders(),
            self.roster.len()
        );
        round
    }
}

/// Everything one fan-out round produced, in roster order.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    outcomes: Vec<(ProviderId, ProviderOutcome)>,
}

impl RoundOutcome {
    pub fn outcomes(&self) -> &[(ProviderId, ProviderOutcome)] {
        &self.outcomes
    }

    /// Providers that answered, paired with their predictions, roster order
    /// preserved.
    pub fn present(&self) -> Vec<(&str, &Prediction)> {
        self.outcomes
            .iter()
            .filter_map(|(endpoint, outcome)| {
                outcome.present().map(|p| (endpoint.as_str(), p))
            })
            .collect()
    }

    /// Number of providers that answered this round.
    pub fn responders(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_present()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::AbsenceReason;

    fn prediction(index: u32) -> Prediction {
        Prediction {
            prediction: index,
            probability: vec![0.5, 0.5],
            iris_type: "setosa".to_string(),
            model_accuracy: 0.9,
        }
    }

    #[test]
    fn test_present_preserves_roster_order_and_skips_absent() {
        let round = RoundOutcome {
            outcomes: vec![
                ("a".to_string(), ProviderOutcome::Present(prediction(0))),
                (
                    "b".to_string(),
                    ProviderOutcome::Absent(AbsenceReason::BadStatus(500)),
                ),
                ("c".to_string(), ProviderOutcome::Present(prediction(1))),
            ],
        };

        let present = round.present();
        assert_eq!(present.len(), 2);
        assert_eq!(present[0].0, "a");
        assert_eq!(present[1].0, "c");
        assert_eq!(round.responders(), 2);
    }

    #[test]
    fn test_empty_round_has_no_responders() {
        let round = RoundOutcome {
            outcomes: vec![(
                "a".to_string(),
                ProviderOutcome::Absent(AbsenceReason::Unreachable("refused".to_string())),
            )],
        };

        assert_eq!(round.responders(), 0);
        assert!(round.present().is_empty());
    }
}
