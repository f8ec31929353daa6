use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::{HttpClient, ProbeError, RawResponse, identity_headers};
use crate::config::ProbeConfig;
use crate::health::HealthCheck;
use crate::identity::Identity;
use crate::outcome::{FailureReason, ProbeFailure, ProbeOutcome};
use crate::progress::{FAILED_MESSAGE, ProgressReporter, waiting_message};

// A made-up endpoint only the real cloud server answers, and only this way.
pub const TEAPOT_PATH: &str = "/make-latte?number-of-shots=3";
pub const HTTP_I_AM_A_TEAPOT: u16 = 418;
pub const MILK: &[u8] = b"Linus does not like non-fat milk";

const POLL_SLICE: Duration = Duration::from_secs(1);

/// Checks that the configured cloud server is up and really is the cloud
/// server, not a captive portal or some other host answering on its name.
///
/// Each [`check`](Self::check) builds its own HTTP client and sends exactly
/// one request. While waiting, a progress message is reported once per
/// elapsed second except the last.
pub struct CloudReachabilityProbe {
    base_url: String,
    timeout_secs: u64,
    identity: Identity,
    reporter: Arc<dyn ProgressReporter>,
}

impl CloudReachabilityProbe {
    pub fn new(
        config: &ProbeConfig,
        identity: Identity,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Result<Self, ProbeError> {
        config.validate()?;
        identity_headers(&identity)?;
        Ok(Self {
            base_url: config.cloud_base_url.clone(),
            timeout_secs: config.cloud_timeout,
            identity,
            reporter,
        })
    }

    /// Run the probe. Blocks the calling task for at most the configured
    /// number of seconds.
    ///
    /// Any failure reports [`FAILED_MESSAGE`] exactly once and yields an
    /// outcome whose storage mode is local-only.
    pub async fn check(&self) -> ProbeOutcome {
        match self.exchange().await {
            Ok(()) => {
                debug!(url = %self.base_url, "successfully checked connection to cloud server");
                ProbeOutcome::Reachable
            }
            Err(failure) => {
                self.reporter.report(FAILED_MESSAGE);
                debug!(
                    reason = ?failure.reason,
                    error = failure.error.as_deref().unwrap_or(""),
                    status = failure.status,
                    body = failure.body.as_deref().unwrap_or(""),
                    "connection test to cloud server failed"
                );
                warn!(url = %self.base_url, "unable to connect to cloud server");
                ProbeOutcome::Unreachable(failure)
            }
        }
    }

    /// Send the request and race it against one-second slices.
    ///
    /// The request future lives only inside this function; returning drops
    /// it, which aborts a request still in flight.
    async fn exchange(&self) -> Result<(), ProbeFailure> {
        let http = HttpClient::new(&self.base_url, &self.identity)
            .map_err(|e| transport_failure(&e, 0))?;

        let exchange = http.get_raw(TEAPOT_PATH, MILK.len());
        tokio::pin!(exchange);

        for seconds in 1..=self.timeout_secs {
            tokio::select! {
                biased;
                result = &mut exchange => return verify(result, seconds - 1),
                () = tokio::time::sleep(POLL_SLICE) => {
                    if seconds < self.timeout_secs {
                        self.reporter.report(&waiting_message(seconds));
                    }
                }
            }
        }

        debug!(
            timeout_secs = self.timeout_secs,
            "no answer from cloud server, aborting request"
        );
        Err(ProbeFailure {
            reason: FailureReason::Timeout,
            elapsed_secs: self.timeout_secs,
            status: None,
            body: None,
            error: None,
        })
    }
}

impl HealthCheck for CloudReachabilityProbe {
    async fn is_healthy(&self) -> Result<bool, ProbeError> {
        Ok(self.check().await.is_reachable())
    }
}

impl std::fmt::Debug for CloudReachabilityProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudReachabilityProbe")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Build a probe and run it once.
///
/// An unusable configuration or identity counts as unreachable: the failure
/// message is reported like for any other failure.
pub async fn check_cloud_server(
    config: &ProbeConfig,
    identity: Identity,
    reporter: Arc<dyn ProgressReporter>,
) -> ProbeOutcome {
    debug!(url = %config.cloud_base_url, "checking connection to cloud server");
    match CloudReachabilityProbe::new(config, identity, reporter.clone()) {
        Ok(probe) => probe.check().await,
        Err(e) => {
            reporter.report(FAILED_MESSAGE);
            warn!(%e, "cannot check cloud server");
            ProbeOutcome::Unreachable(ProbeFailure {
                reason: FailureReason::InvalidConfig,
                elapsed_secs: 0,
                status: None,
                body: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// One-shot check for callers that only need the verdict.
pub async fn can_reach_cloud_server(
    config: &ProbeConfig,
    identity: Identity,
    reporter: Arc<dyn ProgressReporter>,
) -> bool {
    check_cloud_server(config, identity, reporter)
        .await
        .is_reachable()
}

/// Does this response carry the teapot signature?
pub fn is_teapot(response: &RawResponse) -> bool {
    response.status == HTTP_I_AM_A_TEAPOT && response.body == MILK
}

fn verify(result: Result<RawResponse, ProbeError>, elapsed_secs: u64) -> Result<(), ProbeFailure> {
    match result {
        Ok(response) if is_teapot(&response) => Ok(()),
        Ok(response) => Err(ProbeFailure {
            reason: FailureReason::SignatureMismatch,
            elapsed_secs,
            status: Some(response.status),
            body: Some(String::from_utf8_lossy(&response.body).into_owned()),
            error: None,
        }),
        Err(e) => Err(transport_failure(&e, elapsed_secs)),
    }
}

fn transport_failure(error: &ProbeError, elapsed_secs: u64) -> ProbeFailure {
    let chain = error_chain(error);
    debug!(error = %chain, "error response trying to set up connection with cloud storage backend");
    ProbeFailure {
        reason: FailureReason::Transport,
        elapsed_secs,
        status: None,
        body: None,
        error: Some(chain),
    }
}

/// `error: source: source...`, so TLS details buried in the chain are kept.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
