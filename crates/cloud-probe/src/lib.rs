//! Reachability and authenticity check for a cloud storage server.
//!
//! The probe sends `GET <base>/make-latte?number-of-shots=3` and only
//! accepts `418 I'm a teapot` with the exact body
//! `Linus does not like non-fat milk`. Anything else, or silence for the
//! configured number of seconds, means the application should keep its
//! data local.

pub mod client;
pub mod config;
pub mod health;
pub mod identity;
pub mod outcome;
pub mod probe;
pub mod progress;

pub use client::{HttpClient, ProbeError, RawResponse};
pub use config::{ConfigError, ProbeConfig};
pub use health::HealthCheck;
pub use identity::Identity;
pub use outcome::{FailureReason, ProbeFailure, ProbeOutcome, StorageMode};
pub use probe::{
    CloudReachabilityProbe, HTTP_I_AM_A_TEAPOT, MILK, TEAPOT_PATH, can_reach_cloud_server,
    check_cloud_server,
};
pub use progress::{
    FAILED_MESSAGE, LogReporter, NoopReporter, ProgressReporter, waiting_message,
};
