//! Subscriber setup for hosts that do not install their own.
//!
//! The library only emits `tracing` events under the `cra_preset` target.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global subscriber writing to stderr.
///
/// * `verbosity` - 0 = INFO, 1 = DEBUG, 2+ = TRACE for `cra_preset`
/// * `json` - emit JSON lines instead of human-readable output
///
/// `RUST_LOG` is honored for other targets. Returns `false` if a global
/// subscriber was already set.
pub fn init(verbosity: u8, json: bool) -> bool {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Ok(directive) = format!("cra_preset={level}").parse() {
        filter = filter.add_directive(directive);
    }

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok()
    } else {
        subscriber
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .is_ok()
    }
}
