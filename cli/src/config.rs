//! Node configuration
//!
//! Loaded from a TOML file when one is given, with every section optional.
//! An absent file runs the node on defaults; a file that exists but does
//! not parse is a startup error rather than a silent fallback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProviderConfig,
    pub consensus: ConsensusConfig,
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the API server binds to.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5005".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Prediction endpoints queried every round.
    pub endpoints: Vec<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![
                "http://localhost:5000/predict".to_string(),
                "http://localhost:5001/predict".to_string(),
                "http://localhost:5002/predict".to_string(),
                "http://localhost:5006/predict".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Largest distance from consensus still counted as agreement.
    pub agreement_threshold: f64,
    /// Stake deducted per divergent round.
    pub slash_amount: f64,
    /// Per-provider request timeout, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            agreement_threshold: verdict_ledger::DEFAULT_AGREEMENT_THRESHOLD,
            slash_amount: verdict_ledger::DEFAULT_SLASH_AMOUNT,
            request_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LedgerConfig {
    /// Directory the ledger files live in.
    pub data_dir: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.consensus.request_timeout_secs)
    }
}
