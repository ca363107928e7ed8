//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize logging at `Info`, overridable through `RUST_LOG`
pub fn init() {
    init_with_level(log::LevelFilter::Info);
}

/// Initialize logging with a default level that `RUST_LOG` can still override.
///
/// Calling it again after a logger is installed does nothing.
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
