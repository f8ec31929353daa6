use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter for a given `-v` count. `RUST_LOG` overrides it.
///
/// The `cloud-probe` binary logs under the `cloud_probe` target too, so one
/// directive covers both the binary and the library.
pub fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "cloud_probe=info",
        1 => "cloud_probe=debug",
        _ => "cloud_probe=trace,reqwest=debug",
    }
}

pub fn init(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_library_level() {
        assert_eq!(default_directives(0), "cloud_probe=info");
        assert!(default_directives(1).contains("cloud_probe=debug"));
        assert!(default_directives(5).contains("cloud_probe=trace"));
    }
}
