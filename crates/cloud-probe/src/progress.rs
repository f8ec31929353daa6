use tracing::info;

/// Message reported once when a probe ends without reaching the cloud.
pub const FAILED_MESSAGE: &str = "Cloud connection failed";

/// Receives human-readable progress while a probe is waiting.
///
/// Reporting is fire-and-forget; implementations must not block.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, message: &str);
}

impl<F> ProgressReporter for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Forwards progress messages to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&self, message: &str) {
        info!(target: "cloud_probe::progress", "{message}");
    }
}

/// Discards progress messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _message: &str) {}
}

/// `Waiting for cloud connection (N second(s) passed)`, pluralised.
pub fn waiting_message(seconds: u64) -> String {
    let unit = if seconds == 1 { "second" } else { "seconds" };
    format!("Waiting for cloud connection ({seconds} {unit} passed)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn waiting_message_is_singular_for_one_second() {
        assert_eq!(
            waiting_message(1),
            "Waiting for cloud connection (1 second passed)"
        );
    }

    #[test]
    fn waiting_message_is_plural_otherwise() {
        assert_eq!(
            waiting_message(3),
            "Waiting for cloud connection (3 seconds passed)"
        );
    }

    #[test]
    fn closures_are_reporters() {
        let seen = Mutex::new(Vec::new());
        let reporter = |msg: &str| seen.lock().unwrap().push(msg.to_string());
        reporter.report(FAILED_MESSAGE);
        assert_eq!(*seen.lock().unwrap(), vec![FAILED_MESSAGE.to_string()]);
    }
}
