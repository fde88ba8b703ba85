//! Typed value stack
//!
//! [`FlatStack`] owns the dual raw stack plus the logical value count and is
//! the only way to reach the buffers. It layers:
//!
//! - **Typed safe layer**: `push`/`pop` for each scalar kind, keeping both
//!   buffers in lockstep and checking the popped tag.
//! - **Aggregate layer**: `construct`/`destruct`, which fold and unfold a run
//!   of logical values by touching the shape buffer only.
//!
//! Stack surgery (`grab`, `cut`) lives in [`crate::surgery`].
//!
//! ## Logical values vs. nodes
//!
//! ```text
//! push_f64(5.0); push_i32(4); push_i32(3); construct(3)
//!
//! shape: [undef][f64][i32][i32][s3]    4 nodes
//! data:         [5.0][ 4 ][ 3 ]        16 bytes
//! logical_value_count() == 1
//! ```
//!
//! ## Failure
//!
//! Each mutating operation has a `try_` form that validates everything up
//! front and returns a [`StackError`] with the stack unchanged. The plain
//! forms treat the same error as fatal.

use std::fmt;

use tracing::{debug, trace};

use crate::config::StackConfig;
use crate::descriptor::{Kind, Scalar, TypeDesc};
use crate::error::{Buffer, StackError, fatal};
use crate::raw::RawStack;
use crate::scan::{StackIndex, scan_back};
use crate::stats::{HighWater, StackUsage};

/// A typed, heap-free value stack for one execution context.
///
/// Not synchronized: concurrent contexts each own their own stack.
#[derive(Clone)]
pub struct FlatStack {
    pub(crate) raw: RawStack,
    pub(crate) values: usize,
    pub(crate) peak: HighWater,
}

/// Borrowed view of one logical value: its shape nodes and payload bytes,
/// bottom-to-top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<'a> {
    pub shape: &'a [TypeDesc],
    pub data: &'a [u8],
}

impl Entry<'_> {
    /// Outermost descriptor (the last node of the entry)
    pub fn desc(&self) -> TypeDesc {
        self.shape.last().copied().unwrap_or_default()
    }

    pub fn as_i32(&self) -> Option<i32> {
        (self.desc() == TypeDesc::I32).then(|| i32::read_bytes(self.data))
    }

    pub fn as_f64(&self) -> Option<f64> {
        (self.desc() == TypeDesc::F64).then(|| f64::read_bytes(self.data))
    }
}

impl FlatStack {
    /// Allocate both buffers at the configured capacities.
    pub fn new(config: StackConfig) -> Self {
        debug!(
            data_capacity = config.data_capacity,
            shape_capacity = config.shape_capacity,
            "allocating flat stack"
        );
        FlatStack {
            raw: RawStack::new(config.data_capacity, config.shape_capacity),
            values: 0,
            peak: HighWater::default(),
        }
    }

    pub fn with_capacity(data_capacity: usize, shape_capacity: usize) -> Self {
        Self::new(
            StackConfig::new()
                .with_data_capacity(data_capacity)
                .with_shape_capacity(shape_capacity),
        )
    }

    pub fn with_default_capacity() -> Self {
        Self::new(StackConfig::default())
    }

    /// Capacities from `FLATSTACK_DATA_CAPACITY` / `FLATSTACK_SHAPE_CAPACITY`
    pub fn from_env() -> Self {
        Self::new(StackConfig::from_env())
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Top-level entries, with every aggregate counted once
    #[inline]
    pub fn logical_value_count(&self) -> usize {
        self.values
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values == 0
    }

    /// Payload bytes in use
    #[inline]
    pub fn data_len(&self) -> usize {
        self.raw.data_bytes()
    }

    /// Shape nodes in use
    #[inline]
    pub fn shape_len(&self) -> usize {
        self.raw.shape_nodes()
    }

    #[inline]
    pub fn data_capacity(&self) -> usize {
        self.raw.data_capacity()
    }

    #[inline]
    pub fn shape_capacity(&self) -> usize {
        self.raw.shape_capacity()
    }

    /// Descriptor of the top value, `None` when empty
    pub fn top_desc(&self) -> Option<TypeDesc> {
        if self.values == 0 {
            None
        } else {
            Some(self.raw.peek_tag())
        }
    }

    /// View of the value `depth` steps below the top (0 = top).
    pub fn entry(&self, depth: usize) -> Option<Entry<'_>> {
        let (left, right) = self.span(depth).ok()?;
        Some(Entry {
            shape: &self.raw.shape()[left.shape..right.shape],
            data: &self.raw.data()[left.data..right.data],
        })
    }

    pub fn usage(&self) -> StackUsage {
        StackUsage::new(
            (self.raw.data_bytes(), self.raw.shape_nodes(), self.values),
            &self.peak,
            (self.raw.data_capacity(), self.raw.shape_capacity()),
        )
    }

    // =========================================================================
    // Typed safe layer
    // =========================================================================

    pub fn try_push<T: Scalar>(&mut self, v: T) -> Result<(), StackError> {
        self.require_shape(1)?;
        self.require_data(T::WIDTH)?;
        self.raw.push_tag(T::DESC);
        self.raw.push_data(v);
        self.values += 1;
        self.observe();
        Ok(())
    }

    pub fn try_pop<T: Scalar>(&mut self) -> Result<T, StackError> {
        self.require_values("pop", 1)?;
        let found = self.raw.peek_tag();
        if found != T::DESC {
            return Err(StackError::TypeMismatch {
                expected: T::DESC,
                found,
            });
        }
        self.raw.pop_tag();
        self.values -= 1;
        Ok(self.raw.pop_data())
    }

    #[track_caller]
    pub fn push<T: Scalar>(&mut self, v: T) {
        if let Err(e) = self.try_push(v) {
            fatal(e);
        }
    }

    #[track_caller]
    pub fn pop<T: Scalar>(&mut self) -> T {
        match self.try_pop() {
            Ok(v) => v,
            Err(e) => fatal(e),
        }
    }

    #[track_caller]
    pub fn push_i32(&mut self, v: i32) {
        self.push(v)
    }

    #[track_caller]
    pub fn push_f64(&mut self, v: f64) {
        self.push(v)
    }

    #[track_caller]
    pub fn pop_i32(&mut self) -> i32 {
        self.pop()
    }

    #[track_caller]
    pub fn pop_f64(&mut self) -> f64 {
        self.pop()
    }

    // =========================================================================
    // Aggregate layer
    // =========================================================================

    /// Fold the top `arity` logical values into one aggregate.
    ///
    /// Only the arity is recorded; the fields may be any mix of kinds.
    pub fn try_construct(&mut self, arity: usize) -> Result<(), StackError> {
        let desc = TypeDesc::aggregate(arity)?;
        self.require_values("construct", arity)?;
        self.require_shape(1)?;
        self.raw.push_tag(desc);
        self.values = self.values - arity + 1;
        self.observe();
        trace!(arity, values = self.values, "construct");
        Ok(())
    }

    /// Unfold the top aggregate, which must be exactly `Struct(arity)`.
    pub fn try_destruct(&mut self, arity: usize) -> Result<(), StackError> {
        let expected = TypeDesc::aggregate(arity)?;
        self.require_values("destruct", 1)?;
        let found = self.raw.peek_tag();
        if found != expected {
            return Err(StackError::TypeMismatch { expected, found });
        }
        self.raw.pop_tag();
        self.values = self.values - 1 + arity;
        self.observe();
        trace!(arity, values = self.values, "destruct");
        Ok(())
    }

    #[track_caller]
    pub fn construct(&mut self, arity: usize) {
        if let Err(e) = self.try_construct(arity) {
            fatal(e);
        }
    }

    #[track_caller]
    pub fn destruct(&mut self, arity: usize) {
        if let Err(e) = self.try_destruct(arity) {
            fatal(e);
        }
    }

    // =========================================================================
    // Shared checks
    // =========================================================================

    /// Cursor pairs bounding the value at `depth`: `(left, right)`.
    pub(crate) fn span(&self, depth: usize) -> Result<(StackIndex, StackIndex), StackError> {
        self.require_values("scan_back", depth.saturating_add(1))?;
        let shape = self.raw.shape();
        let right = scan_back(shape, self.raw.top(), depth)?;
        let left = scan_back(shape, right, 1)?;
        Ok((left, right))
    }

    pub(crate) fn require_values(&self, op: &'static str, n: usize) -> Result<(), StackError> {
        if self.values < n {
            return Err(StackError::Underflow {
                op,
                requested: n,
                available: self.values,
            });
        }
        Ok(())
    }

    pub(crate) fn require_shape(&self, nodes: usize) -> Result<(), StackError> {
        let requested = self.raw.shape_nodes() + nodes;
        if requested > self.raw.shape_capacity() {
            return Err(StackError::CapacityExceeded {
                buffer: Buffer::Shape,
                requested,
                capacity: self.raw.shape_capacity(),
            });
        }
        Ok(())
    }

    pub(crate) fn require_data(&self, bytes: usize) -> Result<(), StackError> {
        let requested = self.raw.data_bytes() + bytes;
        if requested > self.raw.data_capacity() {
            return Err(StackError::CapacityExceeded {
                buffer: Buffer::Data,
                requested,
                capacity: self.raw.data_capacity(),
            });
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn observe(&mut self) {
        self.peak.observe(self.raw.data_bytes(), self.raw.shape_nodes(), self.values);
    }
}

impl Default for FlatStack {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Renders bottom-to-top: `[i32 3][f64 5] s2`
impl fmt::Debug for FlatStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlatStack(values={}) ", self.values)?;
        let data = self.raw.data();
        let mut dp = 0;
        for desc in &self.raw.shape()[1..] {
            let width = desc.byte_width();
            let bytes = &data[dp..dp + width];
            match desc.kind() {
                Kind::I32 => write!(f, "[i32 {}]", i32::read_bytes(bytes))?,
                Kind::F64 => write!(f, "[f64 {}]", f64::read_bytes(bytes))?,
                Kind::Struct => write!(f, " {} ", desc)?,
                Kind::Uninitialized => write!(f, "[undef]")?,
            }
            dp += width;
        }
        Ok(())
    }
}
