use uuid::Uuid;

/// How this installation identifies itself to the cloud server.
///
/// `client_id` is expected to be stable per installation; callers that
/// persist one should pass it through [`Identity::with_client_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_agent: String,
    client_id: String,
}

impl Identity {
    pub fn new(user_agent: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            client_id: client_id.into(),
        }
    }

    /// Default user agent with a freshly generated v4 UUID.
    pub fn generate() -> Self {
        Self::with_client_id(Uuid::new_v4().to_string())
    }

    /// Default user agent with a caller-supplied client id.
    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Self::new(default_user_agent(), client_id)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// `cloud-probe/<version> (<os>; <arch>)`
pub fn default_user_agent() -> String {
    format!(
        "cloud-probe/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
