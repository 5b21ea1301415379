//! Console logging.
//!
//! In the browser everything lands in the devtools console through
//! `web_sys::console`.  Native builds (unit tests) fall back to stderr since
//! the JS imports are unavailable there.

#[cfg(test)]
use std::cell::RefCell;

use crate::error::FetchError;

#[cfg(test)]
thread_local! {
    static CAPTURED: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

pub fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{}", msg);
}

pub fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("warning: {}", msg);
}

pub fn error(msg: &str) {
    #[cfg(test)]
    CAPTURED.with(|c| c.borrow_mut().push(msg.to_string()));

    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("error: {}", msg);
}

/// Message logged when an operation swallows a failure.
pub fn failure_message(operation: &str, err: &FetchError) -> String {
    format!("{}: An error occurred: {}", operation, err)
}

/// Log a failure that is absorbed at an API boundary.
pub fn report_failure(operation: &str, err: &FetchError) {
    error(&failure_message(operation, err));
}

/// Drain the errors logged on this thread so far.
#[cfg(test)]
pub(crate) fn take_captured_errors() -> Vec<String> {
    CAPTURED.with(|c| std::mem::take(&mut *c.borrow_mut()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_is_prefixed_with_operation() {
        let msg = failure_message("fetchCore", &FetchError::Network("refused".into()));
        assert!(msg.starts_with("fetchCore: An error occurred"));
        assert!(msg.ends_with("refused"));
    }

    #[test]
    fn errors_are_captured_in_tests() {
        let _ = take_captured_errors();
        report_failure("fetchMedia", &FetchError::Timeout(5000));
        let logged = take_captured_errors();
        assert_eq!(logged.len(), 1);
        assert!(logged[0].starts_with("fetchMedia: An error occurred"));
    }
}
