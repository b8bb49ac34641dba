//! Structured logging setup.
//!
//! Library crates only emit `tracing` events; binaries call one of the
//! initialisers below once at startup.
//!
//! | Level   | What is logged                                            |
//! |---------|-----------------------------------------------------------|
//! | `trace` | every dispatched event                                    |
//! | `debug` | pool grants and queueing, run completion, per-config means |
//! | `info`  | sweep progress, best configuration per staffing total      |
//! | `warn`  | leases force-released at exit, skipped configurations      |
//!
//! `RUST_LOG` always wins over the level passed in code:
//!
//! ```bash
//! RUST_LOG=vs_engine=trace cargo run -p theater
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise logging at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() -> bool {
    init_logging_with_level("info")
}

/// Initialise logging with a default `level` ("trace" … "error").
///
/// Returns `false` if a global subscriber was already installed (e.g. by an
/// earlier call, or by a test harness); the existing one is kept.
pub fn init_logging_with_level(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level, "logging initialised");
    }
    installed
}
