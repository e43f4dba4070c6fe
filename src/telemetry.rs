//! Structured logging setup.
//!
//! Priority: `RUST_LOG` > `--verbose` (debug) > configured level > "info".
//! Output goes to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Pick the filter directive to use when `RUST_LOG` is absent.
pub fn fallback_directive(verbose: bool, config_level: Option<&str>) -> String {
    if verbose {
        "debug".to_string()
    } else {
        config_level
            .filter(|l| !l.trim().is_empty())
            .unwrap_or("info")
            .to_string()
    }
}

fn build_filter(verbose: bool, config_level: Option<&str>) -> Result<EnvFilter, ParseError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback_directive(verbose, config_level)),
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init(verbose: bool, config_level: Option<&str>) -> Result<(), ParseError> {
    let filter = build_filter(verbose, config_level)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
    }
    Ok(())
}
