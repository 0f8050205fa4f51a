//! `tracing` subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `ecolabel=debug`.
pub const LOG_ENV: &str = "ECOLABEL_LOG";

/// Map `-v` repetitions to a default filter directive.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "ecolabel=warn",
        1 => "ecolabel=info",
        2 => "ecolabel=debug",
        _ => "ecolabel=trace",
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `ECOLABEL_LOG` takes precedence over the verbosity level. Calling this
/// twice is harmless; the second installation is ignored.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
