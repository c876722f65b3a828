//! One-shot `tracing` subscriber installation.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// Default filter when none is given.
pub const DEFAULT_LEVEL: &str = "info";

/// Install the global subscriber. `level` is an `EnvFilter` directive such as
/// `"debug"` or `"viska_core=trace"`; `None` means [`DEFAULT_LEVEL`].
///
/// Only the first call has an effect; later calls return `false`. A subscriber
/// installed by the embedding application is left in place.
pub fn init(level: Option<&str>) -> bool {
    let mut installed = false;
    LOGGER_INIT.get_or_init(|| {
        let filter = EnvFilter::builder().parse_lossy(level.unwrap_or(DEFAULT_LEVEL));
        installed = tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .try_init()
            .is_ok();
    });
    installed
}
