use log::{debug, info, log_enabled, Level};

/// Initializes the logger with the `env_logger` crate.
///
/// Call once at startup; log level is controlled via `RUST_LOG`.
pub fn init_logger() {
    env_logger::init();
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
///
/// Every skip path in the decode pipeline reports through here; nothing in
/// those messages may contain key material.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}
