//! Type Descriptors
//!
//! Every node on the shape stack is a one-byte packed tag:
//!
//! ```text
//! ┌───────────────────────────┬──────────┐
//! │  bits 7..2                │ bits 1..0│
//! ├───────────────────────────┼──────────┤
//! │  struct_len (0..=63)      │   kind   │
//! └───────────────────────────┴──────────┘
//!
//! kind: 0 = Uninitialized, 1 = I32, 2 = F64, 3 = Struct
//! ```
//!
//! Two descriptors are equal iff their bytes are equal, so a `Struct(3)` never
//! matches a `Struct(4)` and a scalar never matches an aggregate.
//!
//! The textual notation used by `Display` writes a shape bottom-to-top, with the
//! aggregate marker after its fields: `struct { 3, 4, 5.0 }` pushed as
//! `5.0, 4, 3` then folded is shown as `f64 i32 i32 s3`.

use std::fmt;

use crate::error::StackError;

/// Largest arity a `Struct` descriptor can record (6 bits).
pub const MAX_STRUCT_LEN: usize = 63;

const KIND_MASK: u8 = 0b11;
const LEN_SHIFT: u32 = 2;

/// Kind portion of a [`TypeDesc`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Sentinel at the bottom of the shape stack
    Uninitialized,
    I32,
    F64,
    /// Aggregate of `struct_len` preceding logical values
    Struct,
}

/// A packed shape-stack node
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TypeDesc(u8);

// The shape buffer relies on one node per byte
const _: () = assert!(std::mem::size_of::<TypeDesc>() == 1);

impl TypeDesc {
    pub const UNINITIALIZED: TypeDesc = TypeDesc(0);
    pub const I32: TypeDesc = TypeDesc(1);
    pub const F64: TypeDesc = TypeDesc(2);

    /// Descriptor for an aggregate folding `arity` logical values.
    pub fn aggregate(arity: usize) -> Result<TypeDesc, StackError> {
        if arity > MAX_STRUCT_LEN {
            return Err(StackError::ArityTooLarge { arity });
        }
        Ok(TypeDesc(3 | ((arity as u8) << LEN_SHIFT)))
    }

    #[inline]
    pub fn kind(self) -> Kind {
        match self.0 & KIND_MASK {
            0 => Kind::Uninitialized,
            1 => Kind::I32,
            2 => Kind::F64,
            _ => Kind::Struct,
        }
    }

    /// Number of fields for an aggregate, 0 for everything else.
    #[inline]
    pub fn struct_len(self) -> usize {
        (self.0 >> LEN_SHIFT) as usize
    }

    /// Bytes this node owns in the data buffer.
    ///
    /// Aggregates own none: their fields' bytes were written by earlier pushes.
    #[inline]
    pub fn byte_width(self) -> usize {
        match self.kind() {
            Kind::I32 => size_of::<i32>(),
            Kind::F64 => size_of::<f64>(),
            Kind::Struct | Kind::Uninitialized => 0,
        }
    }

    #[inline]
    pub fn is_scalar(self) -> bool {
        matches!(self.kind(), Kind::I32 | Kind::F64)
    }

    /// Raw packed byte
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Kind::Uninitialized => write!(f, "undef"),
            Kind::I32 => write!(f, "i32"),
            Kind::F64 => write!(f, "f64"),
            Kind::Struct => write!(f, "s{}", self.struct_len()),
        }
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDesc({self})")
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for f64 {}
}

/// A flat scalar that can live in the data buffer.
///
/// Sealed: the scan engine only knows the widths of `i32` and `f64`.
pub trait Scalar: Copy + fmt::Debug + sealed::Sealed {
    const DESC: TypeDesc;
    const WIDTH: usize;

    fn write_bytes(self, out: &mut [u8]);
    fn read_bytes(bytes: &[u8]) -> Self;
}

impl Scalar for i32 {
    const DESC: TypeDesc = TypeDesc::I32;
    const WIDTH: usize = size_of::<i32>();

    #[inline]
    fn write_bytes(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_ne_bytes());
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; size_of::<i32>()];
        buf.copy_from_slice(bytes);
        i32::from_ne_bytes(buf)
    }
}

impl Scalar for f64 {
    const DESC: TypeDesc = TypeDesc::F64;
    const WIDTH: usize = size_of::<f64>();

    #[inline]
    fn write_bytes(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_ne_bytes());
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; size_of::<f64>()];
        buf.copy_from_slice(bytes);
        f64::from_ne_bytes(buf)
    }
}
