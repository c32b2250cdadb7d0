//! Single-provider prediction client
//!
//! One GET per provider per round. Every failure mode collapses into an
//! `Absent` outcome with its cause attached; nothing at this boundary can
//! abort a round.

use std::time::Duration;

use verdict_core::{AbsenceReason, Features, Prediction, ProviderOutcome};

/// Default per-call timeout when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl ProviderClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout,
        }
    }

    /// Request one prediction from one provider.
    ///
    /// Success requires a 2xx status and a body that decodes as a
    /// prediction document; anything else is an absence, not an error.
    pub async fn fetch(&self, endpoint: &str, features: &Features) -> ProviderOutcome {
        let request = self
            .http
            .get(endpoint)
            .query(&features.as_query())
            .timeout(self.timeout);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                return ProviderOutcome::Absent(AbsenceReason::Unreachable(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ProviderOutcome::Absent(AbsenceReason::BadStatus(status.as_u16()));
        }

        match response.json::<Prediction>().await {
            Ok(prediction) => ProviderOutcome::Present(prediction),
            Err(e) => ProviderOutcome::Absent(AbsenceReason::MalformedPayload(e.to_string())),
        }
    }
}

impl Default for ProviderClient {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}
