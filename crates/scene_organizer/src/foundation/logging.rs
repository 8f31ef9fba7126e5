//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, ignoring double-initialization
///
/// Useful in tests where multiple entry points may race to initialize.
pub fn try_init() {
    let _ = env_logger::try_init();
}
