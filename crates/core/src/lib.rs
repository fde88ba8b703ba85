//! Flatstack Core: a typed, heap-free value stack
//!
//! Every value, scalar or aggregate, lives in one flat byte buffer. A
//! parallel shape buffer of one-byte type descriptors records enough to
//! check every access and to walk backward over variable-width entries.
//! Values never move once created except through explicit surgery.
//!
//! Key design principles:
//! - Two buffers, one logical stack: every push writes a descriptor and its
//!   payload bytes in lockstep.
//! - Aggregates are shape-only: `construct(n)` adds a `Struct(n)` marker over
//!   n values already on the stack and writes no data.
//! - Byte offsets are derived by scanning the shape stack, never stored.
//! - Contract violations are fatal, but every one is detected before a
//!   buffer is modified.
//!
//! # Modules
//!
//! - `descriptor`: packed type tags and the `Scalar` trait
//! - `raw`: the dual raw stack and its unchecked primitives (crate-private)
//! - `stack`: typed push/pop, construct/destruct, inspection
//! - `scan`: backward-scan addressing engine
//! - `surgery`: grab (copy by depth) and cut (range excision)
//! - `config`: buffer capacities from code, env, or TOML
//! - `error`: contract-violation taxonomy and the fatal path
//! - `stats`: high-water marks for capacity provisioning
//!
//! # Example
//!
//! ```
//! use flatstack_core::FlatStack;
//!
//! let mut stack = FlatStack::with_capacity(1024, 256);
//! stack.push_i32(3);
//! stack.push_i32(4);
//! stack.construct(2);
//! stack.push_f64(0.5);
//!
//! stack.grab(1); // copy the pair to the top
//! stack.destruct(2);
//! assert_eq!(stack.pop_i32(), 4);
//! assert_eq!(stack.pop_i32(), 3);
//! assert_eq!(stack.logical_value_count(), 2);
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
mod raw;
pub mod scan;
pub mod stack;
pub mod stats;
pub mod surgery;

pub use config::StackConfig;
pub use descriptor::{Kind, MAX_STRUCT_LEN, Scalar, TypeDesc};
pub use error::{Buffer, StackError, fatal};
pub use scan::{StackIndex, scan_back};
pub use stack::{Entry, FlatStack};
pub use stats::StackUsage;
