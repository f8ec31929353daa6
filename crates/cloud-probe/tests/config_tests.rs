use cloud_probe::config::{DEFAULT_CLOUD_BASE_URL, DEFAULT_CLOUD_TIMEOUT};
use cloud_probe::{ConfigError, ProbeConfig};

const VARS: [&str; 3] = ["CLOUD_BASE_URL", "CLOUD_TIMEOUT", "CLOUD_VERBOSE"];

fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
    VARS.iter().map(|v| (*v, None)).collect()
}

#[test]
fn from_env_without_variables_uses_defaults() {
    temp_env::with_vars(unset_all(), || {
        let config = ProbeConfig::from_env().unwrap();
        assert_eq!(config, ProbeConfig::default());
        assert_eq!(config.cloud_base_url, DEFAULT_CLOUD_BASE_URL);
        assert_eq!(config.cloud_timeout, DEFAULT_CLOUD_TIMEOUT);
    });
}

#[test]
fn from_env_reads_all_variables() {
    temp_env::with_vars(
        [
            ("CLOUD_BASE_URL", Some("http://localhost:8080")),
            ("CLOUD_TIMEOUT", Some("12")),
            ("CLOUD_VERBOSE", Some("2")),
        ],
        || {
            let config = ProbeConfig::from_env().unwrap();
            assert_eq!(config.cloud_base_url, "http://localhost:8080");
            assert_eq!(config.cloud_timeout, 12);
            assert_eq!(config.verbose, 2);
        },
    );
}

#[test]
fn from_env_rejects_zero_timeout() {
    temp_env::with_vars(
        [
            ("CLOUD_BASE_URL", None),
            ("CLOUD_TIMEOUT", Some("0")),
            ("CLOUD_VERBOSE", None),
        ],
        || {
            let err = ProbeConfig::from_env().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidTimeout { ref value, .. } if value == "0"),
                "expected InvalidTimeout, got: {err}"
            );
        },
    );
}

#[test]
fn from_env_rejects_non_numeric_timeout() {
    temp_env::with_vars(
        [
            ("CLOUD_BASE_URL", None),
            ("CLOUD_TIMEOUT", Some("five")),
            ("CLOUD_VERBOSE", None),
        ],
        || {
            assert!(matches!(
                ProbeConfig::from_env(),
                Err(ConfigError::InvalidTimeout { .. })
            ));
        },
    );
}

#[test]
fn from_env_rejects_bad_verbosity() {
    temp_env::with_vars(
        [
            ("CLOUD_BASE_URL", None),
            ("CLOUD_TIMEOUT", None),
            ("CLOUD_VERBOSE", Some("-1")),
        ],
        || {
            assert!(matches!(
                ProbeConfig::from_env(),
                Err(ConfigError::InvalidVerbosity { .. })
            ));
        },
    );
}

#[test]
fn config_serializes_camel_case() {
    let json = serde_json::to_value(ProbeConfig::default()).unwrap();
    assert_eq!(json["cloudBaseUrl"], DEFAULT_CLOUD_BASE_URL);
    assert_eq!(json["cloudTimeout"], 5);
    assert_eq!(json["verbose"], 0);
}
