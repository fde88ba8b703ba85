//! Backward-Scan Addressing Engine
//!
//! Converts a logical depth into exact offsets in both buffers. Byte offsets
//! are never stored per value; they are recovered by walking the shape stack
//! from the top and summing scalar widths.
//!
//! ## Skip credit
//!
//! The walk keeps one counter, `remaining`, of logical values still to be
//! stepped over:
//!
//! ```text
//! shape:  ... [i32][i32][ s2 ][i32][i32]  ← top
//!                                scan_back(3)
//!
//!   node   kind   remaining
//!   i32    I32    3 → 2
//!   i32    I32    2 → 1
//!   s2     Struct 1 → 0 + 2 = 2     (the aggregate counts as one,
//!   i32    I32    2 → 1              but its two fields lie behind it)
//!   i32    I32    1 → 0   stop
//! ```
//!
//! Nested aggregates fall out of the same rule with no recursion: every
//! `Struct(m)` just adds its `m` fields to the debt.

use crate::descriptor::{Kind, TypeDesc};
use crate::error::StackError;

/// A cursor pair: one position in the shape buffer and the matching
/// position in the data buffer. Both point one past the entry they bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackIndex {
    pub shape: usize,
    pub data: usize,
}

/// Step backward from `from` over exactly `count` logical values.
///
/// Returns the cursor pair sitting at the left edge of the last value
/// skipped. Reaching the sentinel first, or running the data cursor below
/// zero, is an `Underflow`.
pub fn scan_back(
    shape: &[TypeDesc],
    from: StackIndex,
    count: usize,
) -> Result<StackIndex, StackError> {
    let mut at = from;
    let mut remaining = count;

    while remaining > 0 {
        // anything outside the occupied shape reads as the sentinel
        let node = match at.shape.checked_sub(1).and_then(|i| shape.get(i)) {
            Some(node) => *node,
            None => TypeDesc::UNINITIALIZED,
        };
        match node.kind() {
            Kind::Uninitialized => {
                return Err(StackError::Underflow {
                    op: "scan_back",
                    requested: count,
                    // every aggregate behind the top is complete by now
                    available: count.saturating_sub(remaining),
                });
            }
            Kind::I32 | Kind::F64 => {
                // a data cursor out of step with the shape ends the walk too
                at.data = match at.data.checked_sub(node.byte_width()) {
                    Some(data) => data,
                    None => {
                        return Err(StackError::Underflow {
                            op: "scan_back",
                            requested: count,
                            available: count - remaining,
                        });
                    }
                };
                remaining -= 1;
            }
            Kind::Struct => {
                remaining = remaining - 1 + node.struct_len();
            }
        }
        at.shape -= 1;
    }

    Ok(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(n: usize) -> TypeDesc {
        TypeDesc::aggregate(n).unwrap()
    }

    /// Shape buffer with the sentinel in slot 0, plus its data extent
    fn layout(nodes: &[TypeDesc]) -> (Vec<TypeDesc>, StackIndex) {
        let mut shape = vec![TypeDesc::UNINITIALIZED];
        shape.extend_from_slice(nodes);
        let data = nodes.iter().map(|d| d.byte_width()).sum();
        let top = StackIndex {
            shape: shape.len(),
            data,
        };
        (shape, top)
    }

    #[test]
    fn test_scan_data_cursor_behind_shape() {
        let shape = [TypeDesc::UNINITIALIZED, TypeDesc::I32];
        let from = StackIndex { shape: 2, data: 0 };
        assert_eq!(
            scan_back(&shape, from, 1),
            Err(StackError::Underflow {
                op: "scan_back",
                requested: 1,
                available: 0,
            })
        );

        // short by one f64 partway down
        let shape = [TypeDesc::UNINITIALIZED, TypeDesc::F64, TypeDesc::I32];
        let from = StackIndex { shape: 3, data: 6 };
        assert!(matches!(
            scan_back(&shape, from, 2),
            Err(StackError::Underflow { available: 1, .. })
        ));
    }

    #[test]
    fn test_scan_zero_is_identity() {
        let (shape, top) = layout(&[TypeDesc::I32]);
        assert_eq!(scan_back(&shape, top, 0).unwrap(), top);
    }

    #[test]
    fn test_scan_scalars() {
        let (shape, top) = layout(&[TypeDesc::I32, TypeDesc::F64, TypeDesc::I32]);
        assert_eq!(
            scan_back(&shape, top, 1).unwrap(),
            StackIndex { shape: 3, data: 12 }
        );
        assert_eq!(
            scan_back(&shape, top, 2).unwrap(),
            StackIndex { shape: 2, data: 4 }
        );
        assert_eq!(
            scan_back(&shape, top, 3).unwrap(),
            StackIndex { shape: 1, data: 0 }
        );
    }

    #[test]
    fn test_scan_over_aggregate() {
        // i32 i32 s2 i32 i32: three logical values
        let (shape, top) = layout(&[
            TypeDesc::I32,
            TypeDesc::I32,
            s(2),
            TypeDesc::I32,
            TypeDesc::I32,
        ]);
        let right = scan_back(&shape, top, 2).unwrap();
        assert_eq!(right, StackIndex { shape: 4, data: 8 });

        let left = scan_back(&shape, right, 1).unwrap();
        assert_eq!(left, StackIndex { shape: 1, data: 0 });
    }

    #[test]
    fn test_scan_nested_aggregates() {
        // f64 { i32 { i32 i32 } } : s2 nested inside s2
        let (shape, top) = layout(&[
            TypeDesc::F64,
            TypeDesc::I32,
            TypeDesc::I32,
            TypeDesc::I32,
            s(2),
            s(2),
        ]);
        let left = scan_back(&shape, top, 1).unwrap();
        assert_eq!(left, StackIndex { shape: 2, data: 8 });

        let bottom = scan_back(&shape, top, 2).unwrap();
        assert_eq!(bottom, StackIndex { shape: 1, data: 0 });
    }

    #[test]
    fn test_scan_empty_aggregate() {
        let (shape, top) = layout(&[TypeDesc::I32, s(0)]);
        assert_eq!(
            scan_back(&shape, top, 1).unwrap(),
            StackIndex { shape: 2, data: 4 }
        );
        assert_eq!(
            scan_back(&shape, top, 2).unwrap(),
            StackIndex { shape: 1, data: 0 }
        );
    }

    #[test]
    fn test_scan_underflow() {
        let (shape, top) = layout(&[TypeDesc::I32, TypeDesc::I32]);
        match scan_back(&shape, top, 3) {
            Err(StackError::Underflow {
                op,
                requested,
                available,
            }) => {
                assert_eq!(op, "scan_back");
                assert_eq!(requested, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected Underflow, got {:?}", other),
        }
    }
}
