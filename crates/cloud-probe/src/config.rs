use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::{ProbeError, parse_base_url};

pub const DEFAULT_CLOUD_BASE_URL: &str = "https://cloud.subsurface-divelog.org";
pub const DEFAULT_CLOUD_TIMEOUT: u64 = 5;

const ENV_BASE_URL: &str = "CLOUD_BASE_URL";
const ENV_TIMEOUT: &str = "CLOUD_TIMEOUT";
const ENV_VERBOSE: &str = "CLOUD_VERBOSE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("{var} must be a small non-negative integer, got {value:?}")]
    InvalidVerbosity { var: &'static str, value: String },
}

/// Settings the probe reads: where the cloud lives, how long to wait for
/// it and how chatty to be about failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeConfig {
    pub cloud_base_url: String,
    /// Budget in whole seconds.
    pub cloud_timeout: u64,
    pub verbose: u8,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            cloud_base_url: DEFAULT_CLOUD_BASE_URL.into(),
            cloud_timeout: DEFAULT_CLOUD_TIMEOUT,
            verbose: 0,
        }
    }
}

impl ProbeConfig {
    /// Load from CLOUD_BASE_URL / CLOUD_TIMEOUT / CLOUD_VERBOSE, keeping the
    /// default for every variable that is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            info!(%url, "loaded cloud base URL from env");
            config.cloud_base_url = url;
        }

        if let Ok(value) = std::env::var(ENV_TIMEOUT) {
            config.cloud_timeout = match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: ENV_TIMEOUT,
                        value,
                    });
                }
            };
        }

        if let Ok(value) = std::env::var(ENV_VERBOSE) {
            config.verbose = value.trim().parse().map_err(|_| ConfigError::InvalidVerbosity {
                var: ENV_VERBOSE,
                value: value.clone(),
            })?;
        }

        Ok(config)
    }

    /// Check the preconditions of a probe: a positive budget and an
    /// http(s) base URL.
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.cloud_timeout == 0 {
            return Err(ProbeError::ZeroTimeout);
        }
        parse_base_url(&self.cloud_base_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_waits_five_seconds() {
        let config = ProbeConfig::default();
        assert_eq!(config.cloud_timeout, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let config = ProbeConfig {
            cloud_timeout: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ProbeError::ZeroTimeout)));
    }

    #[test]
    fn relative_url_is_invalid() {
        let config = ProbeConfig {
            cloud_base_url: "cloud.example.org".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ProbeError::InvalidUrl(_))));
    }
}
