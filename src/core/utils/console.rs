//! Console logging
//!
//! wasm32: routed to the browser console through `web_sys::console`
//! native: routed to stderr (tests, tools)
//!
//! Usage:
//! ```rust
//! use contraption_engine::{console_log, console_warn};
//!
//! console_log!("spawned contraption {} ({} components)", 1, 12);
//! console_warn!("rejected load: {}", "unknown rotation value 31");
//! ```

#[doc(hidden)]
pub fn log_str(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::log_1(&message.into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("[contraption] {}", message);
    }
}

#[doc(hidden)]
pub fn warn_str(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::warn_1(&message.into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("[contraption] warning: {}", message);
    }
}

/// Log an informational message (`format!` syntax)
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        $crate::core::utils::console::log_str(&format!($($arg)*));
    }};
}

/// Log a warning (`format!` syntax)
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        $crate::core::utils::console::warn_str(&format!($($arg)*));
    }};
}
