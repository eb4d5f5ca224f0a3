//! Tracing bootstrap for embedding applications
//!
//! The core library only emits `tracing` events; hosts call
//! [`init_tracing`] once to get them printed.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVES: &str = "taskboard_core=info";

/// Install a global fmt subscriber filtered by `RUST_LOG` or `default_directives`
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

