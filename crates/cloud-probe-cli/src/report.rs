use cloud_probe::{FailureReason, ProbeOutcome};

/// One-line verdict printed on stdout.
pub fn summary(outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Reachable => "cloud server reachable".to_string(),
        ProbeOutcome::Unreachable(failure) => {
            let why = match failure.reason {
                FailureReason::Timeout => "no answer",
                FailureReason::SignatureMismatch => "wrong answer",
                FailureReason::Transport => "connection error",
                FailureReason::InvalidConfig => "invalid configuration",
            };
            format!(
                "cloud server unreachable ({why} after {}s), using local storage only",
                failure.elapsed_secs
            )
        }
    }
}
