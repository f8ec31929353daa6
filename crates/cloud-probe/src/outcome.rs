use serde::Serialize;

/// Which storage backend the application should use after a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageMode {
    Cloud,
    LocalOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureReason {
    /// No response inside the budget; the request was aborted.
    Timeout,
    /// The server answered, but not with the teapot signature.
    SignatureMismatch,
    /// The exchange ended in a connection, TLS or protocol error.
    Transport,
    /// The probe could not be built from the configuration or identity.
    InvalidConfig,
}

/// Diagnostics of a failed probe. Logged, never needed for the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeFailure {
    pub reason: FailureReason,
    /// Whole seconds elapsed when the probe gave up.
    pub elapsed_secs: u64,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub error: Option<String>,
}

/// Result of one reachability probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ProbeOutcome {
    Reachable,
    Unreachable(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable)
    }

    pub fn storage_mode(&self) -> StorageMode {
        match self {
            Self::Reachable => StorageMode::Cloud,
            Self::Unreachable(_) => StorageMode::LocalOnly,
        }
    }

    pub fn failure(&self) -> Option<&ProbeFailure> {
        match self {
            Self::Reachable => None,
            Self::Unreachable(failure) => Some(failure),
        }
    }
}
