//! Stack contract violations
//!
//! Every failure the stack can detect is a broken caller contract, not a
//! recoverable condition. The checked `try_*` operations report a
//! [`StackError`] and leave both buffers untouched; the plain operations
//! hand the same error to [`fatal`], which logs it and halts the execution
//! context with a panic.

use std::fmt;

use crate::descriptor::TypeDesc;

/// Which of the two buffers ran out of room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    Data,
    Shape,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Buffer::Data => write!(f, "data"),
            Buffer::Shape => write!(f, "shape"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// A pop or destruct found a different descriptor than it asked for
    TypeMismatch { expected: TypeDesc, found: TypeDesc },

    /// An operation needed more logical values than the stack holds
    Underflow {
        op: &'static str,
        requested: usize,
        available: usize,
    },

    /// A push would write past the provisioned buffer
    CapacityExceeded {
        buffer: Buffer,
        requested: usize,
        capacity: usize,
    },

    /// An aggregate wider than a descriptor can record
    ArityTooLarge { arity: usize },
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            }
            StackError::Underflow {
                op,
                requested,
                available,
            } => write!(
                f,
                "{}: stack underflow (needs {} values, {} available)",
                op, requested, available
            ),
            StackError::CapacityExceeded {
                buffer,
                requested,
                capacity,
            } => write!(
                f,
                "{} buffer capacity exceeded ({} requested, capacity {})",
                buffer, requested, capacity
            ),
            StackError::ArityTooLarge { arity } => write!(
                f,
                "aggregate arity {} exceeds the maximum of {}",
                arity,
                crate::descriptor::MAX_STRUCT_LEN
            ),
        }
    }
}

impl std::error::Error for StackError {}

/// Halt the current execution context.
///
/// The buffers are still consistent when this runs (every check happens
/// before mutation), but callers hold no recovery path, so the stack must
/// not be used again by the context that triggered it.
#[cold]
#[track_caller]
pub fn fatal(err: StackError) -> ! {
    tracing::error!(error = %err, "fatal stack contract violation");
    panic!("{}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = StackError::TypeMismatch {
            expected: TypeDesc::F64,
            found: TypeDesc::I32,
        };
        assert_eq!(err.to_string(), "type mismatch: expected f64, found i32");

        let err = StackError::Underflow {
            op: "pop",
            requested: 1,
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "pop: stack underflow (needs 1 values, 0 available)"
        );

        let err = StackError::CapacityExceeded {
            buffer: Buffer::Shape,
            requested: 9,
            capacity: 8,
        };
        assert!(err.to_string().starts_with("shape buffer capacity exceeded"));
    }

    #[test]
    #[should_panic(expected = "stack underflow")]
    fn test_fatal_panics_with_message() {
        fatal(StackError::Underflow {
            op: "cut",
            requested: 3,
            available: 2,
        });
    }
}
