use cloud_probe::{ConfigError, Identity, ProbeConfig};

const ENV_CLIENT_ID: &str = "CLOUD_CLIENT_ID";

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("--timeout must be at least 1 second")]
    ZeroTimeout,
    #[error("--client-id must not be empty")]
    EmptyClientId,
}

/// Values given on the command line. `None` falls back to the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub client_id: Option<String>,
    pub verbose: u8,
}

/// Everything one probe run needs.
pub struct Context {
    pub config: ProbeConfig,
    pub identity: Identity,
}

impl Context {
    pub fn resolve(overrides: &Overrides) -> Result<Self, ContextError> {
        let mut config = ProbeConfig::from_env()?;

        if let Some(url) = &overrides.base_url {
            config.cloud_base_url = url.clone();
        }
        if let Some(timeout) = overrides.timeout {
            if timeout == 0 {
                return Err(ContextError::ZeroTimeout);
            }
            config.cloud_timeout = timeout;
        }
        config.verbose = config.verbose.max(overrides.verbose);

        if overrides
            .client_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            return Err(ContextError::EmptyClientId);
        }

        // An empty CLOUD_CLIENT_ID counts as unset.
        let identity = match overrides.client_id.clone().or_else(|| {
            std::env::var(ENV_CLIENT_ID)
                .ok()
                .filter(|id| !id.trim().is_empty())
        }) {
            Some(id) => Identity::with_client_id(id),
            None => Identity::generate(),
        };

        Ok(Self { config, identity })
    }
}
