use crate::client::ProbeError;

/// Uniform health-check interface.
///
/// The cloud probe implements this so it can sit next to other readiness
/// checks of the application.
pub trait HealthCheck: Send + Sync {
    /// Returns `Ok(true)` if the service is reachable and genuine and
    /// `Ok(false)` if it is not. The cloud probe reports every failure as
    /// `Ok(false)`; `Err` is left to checks that can fail before they start.
    fn is_healthy(&self) -> impl std::future::Future<Output = Result<bool, ProbeError>> + Send;
}
