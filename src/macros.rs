//! Small crate-wide convenience macros.

/// Log a formatted message to the browser console, debug builds only.
///
/// ```rust,ignore
/// debug_log!("Loaded {} invitations", list.len());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::diagnostics::log(&format!($($arg)*));
        }
    };
}
