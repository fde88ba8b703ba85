//! Dual Raw Stack
//!
//! Two co-indexed buffers, each with its own top cursor:
//!
//! ```text
//! shape: [undef][ i32 ][ i32 ][ f64 ][ s3 ]          ← shape_len
//! data:         [ 3  ][ 4  ][  5.0   ]               ← data_len
//! ```
//!
//! - Slot 0 of the shape buffer is the `Uninitialized` sentinel; it is never
//!   popped and stops backward scans.
//! - Aggregate nodes own no data bytes.
//!
//! Nothing here validates order, kind, or capacity. The typed layer in
//! `stack` checks every contract before calling in; an out-of-range index
//! that slips through is caught by slice bounds checks rather than
//! corrupting memory.

use crate::descriptor::{Scalar, TypeDesc};
use crate::scan::StackIndex;

#[derive(Clone)]
pub(crate) struct RawStack {
    data: Box<[u8]>,
    data_len: usize,
    shape: Box<[TypeDesc]>,
    shape_len: usize,
}

impl RawStack {
    /// Allocate both buffers. `shape_capacity` excludes the sentinel.
    pub(crate) fn new(data_capacity: usize, shape_capacity: usize) -> Self {
        RawStack {
            data: vec![0u8; data_capacity].into_boxed_slice(),
            data_len: 0,
            shape: vec![TypeDesc::UNINITIALIZED; shape_capacity + 1].into_boxed_slice(),
            shape_len: 1,
        }
    }

    /// Cursor pair pointing one past the top of each buffer
    #[inline]
    pub(crate) fn top(&self) -> StackIndex {
        StackIndex {
            shape: self.shape_len,
            data: self.data_len,
        }
    }

    #[inline]
    pub(crate) fn shape(&self) -> &[TypeDesc] {
        &self.shape[..self.shape_len]
    }

    #[inline]
    pub(crate) fn data(&self) -> &[u8] {
        &self.data[..self.data_len]
    }

    /// Occupied shape nodes, sentinel excluded
    #[inline]
    pub(crate) fn shape_nodes(&self) -> usize {
        self.shape_len - 1
    }

    #[inline]
    pub(crate) fn data_bytes(&self) -> usize {
        self.data_len
    }

    #[inline]
    pub(crate) fn shape_capacity(&self) -> usize {
        self.shape.len() - 1
    }

    #[inline]
    pub(crate) fn data_capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub(crate) fn push_data<T: Scalar>(&mut self, v: T) {
        let end = self.data_len + T::WIDTH;
        v.write_bytes(&mut self.data[self.data_len..end]);
        self.data_len = end;
    }

    #[inline]
    pub(crate) fn pop_data<T: Scalar>(&mut self) -> T {
        self.data_len -= T::WIDTH;
        T::read_bytes(&self.data[self.data_len..self.data_len + T::WIDTH])
    }

    #[inline]
    pub(crate) fn push_tag(&mut self, desc: TypeDesc) {
        self.shape[self.shape_len] = desc;
        self.shape_len += 1;
    }

    #[inline]
    pub(crate) fn pop_tag(&mut self) -> TypeDesc {
        self.shape_len -= 1;
        self.shape[self.shape_len]
    }

    /// Top shape node; the sentinel when nothing has been pushed.
    #[inline]
    pub(crate) fn peek_tag(&self) -> TypeDesc {
        self.shape[self.shape_len - 1]
    }

    /// Append a copy of the window `[left, right)` of both buffers.
    pub(crate) fn duplicate(&mut self, left: StackIndex, right: StackIndex) {
        let nodes = right.shape - left.shape;
        self.shape.copy_within(left.shape..right.shape, self.shape_len);
        self.shape_len += nodes;

        let bytes = right.data - left.data;
        self.data.copy_within(left.data..right.data, self.data_len);
        self.data_len += bytes;
    }

    /// Remove the window `[left, right)` from both buffers, sliding
    /// everything above it down.
    pub(crate) fn excise(&mut self, left: StackIndex, right: StackIndex) {
        self.shape.copy_within(right.shape..self.shape_len, left.shape);
        self.shape_len -= right.shape - left.shape;

        self.data.copy_within(right.data..self.data_len, left.data);
        self.data_len -= right.data - left.data;
    }
}
