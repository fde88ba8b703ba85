//! Flatstack Runtime: operator words over the typed value stack
//!
//! Each word takes `&mut FlatStack` and documents its stack effect in the
//! usual `( before -- after )` notation, top of stack on the right.
//!
//! - `arithmetic`: binary arithmetic and comparisons, generic over i32/f64
//! - `float_ops`: unary float words and kind conversions
//! - `stack_ops`: shuffles built from grab and cut
//! - `error`: thread-local runtime error slot
//!
//! ```
//! use flatstack_core::FlatStack;
//! use flatstack_runtime::{add, dup, multiply};
//!
//! let mut stack = FlatStack::with_capacity(256, 64);
//! stack.push_i32(6);
//! dup(&mut stack);
//! multiply::<i32>(&mut stack);
//! stack.push_i32(6);
//! add::<i32>(&mut stack);
//! assert_eq!(stack.pop_i32(), 42);
//! ```

pub mod arithmetic;
pub mod error;
pub mod float_ops;
pub mod stack_ops;

pub use arithmetic::{
    Numeric, add, divide, eq, gt, gte, lt, lte, modulo, multiply, neq, pop_two, subtract,
};
pub use error::{clear_runtime_error, has_runtime_error, set_runtime_error, take_runtime_error};
pub use float_ops::{float_to_int, int_to_float, negate, sqrt};
pub use stack_ops::{dup, nip, over, pick, roll, rot, swap, tuck, two_drop, two_dup};

// `drop` would shadow the prelude for glob importers
pub use stack_ops::drop as drop_op;
