//! Stack surgery: random access by depth
//!
//! Both operations locate their window with the scan engine, then move
//! whole runs of nodes and bytes at once:
//!
//! ```text
//! grab(1) on  A {B C} D            cut(1, 2) on  A B C D
//!
//!   left ──┐      ┌── right          left ─┐    ┌─ right
//!   shape: A  B C s2  D              shape: A  B C  D
//!                        ──► copy          └────┘ ◄── D slides down
//!   result: A {B C} D {B C}          result: A D
//! ```
//!
//! Everything is validated before either buffer changes.

use tracing::trace;

use crate::error::{StackError, fatal};
use crate::scan::scan_back;
use crate::stack::FlatStack;

impl FlatStack {
    /// Push a copy of the value `depth` steps below the top (0 = top).
    ///
    /// The copy keeps the source's internal aggregate structure node for
    /// node and byte for byte.
    pub fn try_grab(&mut self, depth: usize) -> Result<(), StackError> {
        if depth >= self.values {
            return Err(StackError::Underflow {
                op: "grab",
                requested: depth.saturating_add(1),
                available: self.values,
            });
        }
        let (left, right) = self.span(depth)?;
        let nodes = right.shape - left.shape;
        let bytes = right.data - left.data;
        self.require_shape(nodes)?;
        self.require_data(bytes)?;

        self.raw.duplicate(left, right);
        self.values += 1;
        self.observe();
        trace!(depth, nodes, bytes, values = self.values, "grab");
        Ok(())
    }

    /// Remove `count` values sitting `start` values below the top.
    ///
    /// Values above the window keep their order and structure; values below
    /// it are not touched.
    pub fn try_cut(&mut self, start: usize, count: usize) -> Result<(), StackError> {
        let requested = start.saturating_add(count);
        if requested > self.values {
            return Err(StackError::Underflow {
                op: "cut",
                requested,
                available: self.values,
            });
        }
        let shape = self.raw.shape();
        let right = scan_back(shape, self.raw.top(), start)?;
        let left = scan_back(shape, right, count)?;

        self.raw.excise(left, right);
        self.values -= count;
        trace!(
            start,
            count,
            nodes = right.shape - left.shape,
            bytes = right.data - left.data,
            values = self.values,
            "cut"
        );
        Ok(())
    }

    #[track_caller]
    pub fn grab(&mut self, depth: usize) {
        if let Err(e) = self.try_grab(depth) {
            fatal(e);
        }
    }

    #[track_caller]
    pub fn cut(&mut self, start: usize, count: usize) {
        if let Err(e) = self.try_cut(start, count) {
            fatal(e);
        }
    }
}
