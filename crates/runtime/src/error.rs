//! Runtime Error Handling
//!
//! Thread-local error state for words whose failure is a defined result
//! rather than a broken stack contract (integer division by zero pushes 0
//! and records an error here).
//!
//! Stack contract violations are never reported through this channel; they
//! are fatal in `flatstack_core`.
//!
//! # Usage
//!
//! ```
//! use flatstack_core::FlatStack;
//! use flatstack_runtime::{arithmetic, error};
//!
//! let mut stack = FlatStack::with_capacity(64, 16);
//! stack.push_i32(1);
//! stack.push_i32(0);
//! arithmetic::divide::<i32>(&mut stack);
//!
//! assert!(error::has_runtime_error());
//! let msg = error::take_runtime_error().unwrap();
//! assert!(msg.contains("division by zero"));
//! ```

use std::cell::RefCell;

thread_local! {
    /// Last runtime error message for this execution context
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Set the last runtime error message
pub fn set_runtime_error(msg: impl Into<String>) {
    let msg = msg.into();
    tracing::warn!(error = %msg, "runtime error");
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some(msg);
    });
}

/// Take (and clear) the last runtime error message
pub fn take_runtime_error() -> Option<String> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

/// Check if there's a pending runtime error
pub fn has_runtime_error() -> bool {
    LAST_ERROR.with(|e| e.borrow().is_some())
}

/// Clear any pending runtime error
pub fn clear_runtime_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_take_error() {
        clear_runtime_error();
        assert!(!has_runtime_error());

        set_runtime_error("test error");
        assert!(has_runtime_error());

        let error = take_runtime_error();
        assert_eq!(error, Some("test error".to_string()));
        assert!(!has_runtime_error());
    }

    #[test]
    fn test_clear_error() {
        set_runtime_error("another error");
        assert!(has_runtime_error());

        clear_runtime_error();
        assert!(!has_runtime_error());
        assert!(take_runtime_error().is_none());
    }

    #[test]
    fn test_errors_are_per_thread() {
        clear_runtime_error();
        std::thread::spawn(|| set_runtime_error("elsewhere"))
            .join()
            .unwrap();
        assert!(!has_runtime_error());
    }
}
