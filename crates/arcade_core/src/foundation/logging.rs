//! Logging setup
//!
//! Everything logs through the `log` facade; binaries and tests call one of
//! these to install `env_logger`. Both are safe to call more than once.

pub use log::{debug, error, info, trace, warn};

/// Initialize logging from `RUST_LOG`
pub fn init() {
    // A logger may already be installed (tests, embedding apps)
    let _ = env_logger::try_init();
}

/// Initialize logging with an explicit filter such as `"arcade_core=debug"`
///
/// `RUST_LOG` is ignored when a filter is given.
pub fn init_with_filter(filter: &str) {
    let _ = env_logger::Builder::new().parse_filters(filter).try_init();
}
