//! Cross-platform logging module.
//!
//! Provides unified logging macros that dispatch to the appropriate backend:
//! - Web: `web_sys::console`, prefixed with the calling module
//! - Desktop: `tracing` events carrying the calling module as a field
//!
//! The macros are exported so `agora-client` logs through the same path.

#[cfg(target_arch = "wasm32")]
pub fn log_info_impl(module: &str, msg: &str) {
    web_sys::console::log_1(&format!("[{module}] {msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_info_impl(module: &str, msg: &str) {
    tracing::info!(module, "{}", msg);
}

#[cfg(target_arch = "wasm32")]
pub fn log_error_impl(module: &str, msg: &str) {
    web_sys::console::error_1(&format!("[{module}] {msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_error_impl(module: &str, msg: &str) {
    tracing::error!(module, "{}", msg);
}

#[cfg(target_arch = "wasm32")]
pub fn log_warn_impl(module: &str, msg: &str) {
    web_sys::console::warn_1(&format!("[{module}] {msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_warn_impl(module: &str, msg: &str) {
    tracing::warn!(module, "{}", msg);
}

#[cfg(target_arch = "wasm32")]
pub fn log_debug_impl(module: &str, msg: &str) {
    web_sys::console::debug_1(&format!("[{module}] {msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_debug_impl(module: &str, msg: &str) {
    tracing::debug!(module, "{}", msg);
}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log_info_impl(module_path!(), &format!($($arg)*))
    };
}

/// Log an error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log_error_impl(module_path!(), &format!($($arg)*))
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::log_warn_impl(module_path!(), &format!($($arg)*))
    };
}

/// Log a debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log_debug_impl(module_path!(), &format!($($arg)*))
    };
}
