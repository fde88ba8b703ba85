//! Arithmetic and comparison words
//!
//! Every binary word is written once, generically over the two scalar kinds,
//! and takes its operands in stack order:
//!
//! ```text
//! ( a b -- a op b )
//! ```
//!
//! Both operands are checked before either is popped, so a kind mismatch is
//! fatal with the stack still intact.
//!
//! # Overflow Behavior
//!
//! `i32` arithmetic uses **wrapping semantics**:
//! - `add`: i32::MAX + 1 wraps to i32::MIN
//! - `divide`: i32::MIN / -1 wraps to i32::MIN
//!
//! Integer division or modulo by zero pushes 0 and records a runtime error.
//! `f64` division follows IEEE 754.
//!
//! Comparisons push an `i32` flag: 1 for true, 0 for false.

use flatstack_core::{FlatStack, Scalar, StackError, fatal};

use crate::error::set_runtime_error;

/// Scalar kinds the arithmetic words accept
pub trait Numeric: Scalar + PartialOrd {
    const ZERO: Self;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    /// `None` when the quotient is undefined
    fn div(self, rhs: Self) -> Option<Self>;
}

impl Numeric for i32 {
    const ZERO: Self = 0;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    fn div(self, rhs: Self) -> Option<Self> {
        if rhs == 0 {
            None
        } else {
            Some(self.wrapping_div(rhs))
        }
    }
}

impl Numeric for f64 {
    const ZERO: Self = 0.0;

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn div(self, rhs: Self) -> Option<Self> {
        Some(self / rhs)
    }
}

/// Pop two operands of kind `T`, returning `(a, b)` where `a` was below `b`.
///
/// Fatal if fewer than two values are present or either is not a `T`.
#[track_caller]
pub fn pop_two<T: Scalar>(stack: &mut FlatStack, op: &'static str) -> (T, T) {
    for depth in 0..2 {
        match stack.entry(depth) {
            Some(entry) if entry.desc() == T::DESC => {}
            Some(entry) => fatal(StackError::TypeMismatch {
                expected: T::DESC,
                found: entry.desc(),
            }),
            None => fatal(StackError::Underflow {
                op,
                requested: 2,
                available: stack.logical_value_count(),
            }),
        }
    }
    let b = stack.pop::<T>();
    let a = stack.pop::<T>();
    (a, b)
}

#[track_caller]
fn binary<T: Numeric, R: Scalar>(
    stack: &mut FlatStack,
    op: &'static str,
    f: impl FnOnce(T, T) -> R,
) {
    let (a, b) = pop_two::<T>(stack, op);
    stack.push(f(a, b));
}

#[track_caller]
fn compare<T: Numeric>(
    stack: &mut FlatStack,
    op: &'static str,
    f: impl FnOnce(&T, &T) -> bool,
) {
    binary::<T, i32>(stack, op, |a, b| f(&a, &b) as i32);
}

/// ( a b -- a+b )
#[track_caller]
pub fn add<T: Numeric>(stack: &mut FlatStack) {
    binary(stack, "add", T::add);
}

/// ( a b -- a-b )
#[track_caller]
pub fn subtract<T: Numeric>(stack: &mut FlatStack) {
    binary(stack, "subtract", T::sub);
}

/// ( a b -- a*b )
#[track_caller]
pub fn multiply<T: Numeric>(stack: &mut FlatStack) {
    binary(stack, "multiply", T::mul);
}

/// ( a b -- a/b )
#[track_caller]
pub fn divide<T: Numeric>(stack: &mut FlatStack) {
    binary(stack, "divide", |a: T, b: T| match a.div(b) {
        Some(q) => q,
        None => {
            set_runtime_error(format!("divide: division by zero (attempted {:?} / 0)", a));
            T::ZERO
        }
    });
}

/// ( a b -- a%b ), integers only
#[track_caller]
pub fn modulo(stack: &mut FlatStack) {
    binary(stack, "modulo", |a: i32, b: i32| {
        if b == 0 {
            set_runtime_error(format!("modulo: division by zero (attempted {} % 0)", a));
            0
        } else {
            a.wrapping_rem(b)
        }
    });
}

/// ( a b -- a<b )
#[track_caller]
pub fn lt<T: Numeric>(stack: &mut FlatStack) {
    compare::<T>(stack, "<", T::lt);
}

/// ( a b -- a<=b )
#[track_caller]
pub fn lte<T: Numeric>(stack: &mut FlatStack) {
    compare::<T>(stack, "<=", T::le);
}

/// ( a b -- a>b )
#[track_caller]
pub fn gt<T: Numeric>(stack: &mut FlatStack) {
    compare::<T>(stack, ">", T::gt);
}

/// ( a b -- a>=b )
#[track_caller]
pub fn gte<T: Numeric>(stack: &mut FlatStack) {
    compare::<T>(stack, ">=", T::ge);
}

/// ( a b -- a=b )
#[track_caller]
pub fn eq<T: Numeric>(stack: &mut FlatStack) {
    compare::<T>(stack, "=", T::eq);
}

/// ( a b -- a<>b )
#[track_caller]
pub fn neq<T: Numeric>(stack: &mut FlatStack) {
    compare::<T>(stack, "<>", T::ne);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{clear_runtime_error, has_runtime_error, take_runtime_error};

    fn pair_i32(a: i32, b: i32) -> FlatStack {
        let mut stack = FlatStack::with_capacity(256, 64);
        stack.push_i32(a);
        stack.push_i32(b);
        stack
    }

    fn pair_f64(a: f64, b: f64) -> FlatStack {
        let mut stack = FlatStack::with_capacity(256, 64);
        stack.push_f64(a);
        stack.push_f64(b);
        stack
    }

    #[test]
    fn test_integer_arithmetic() {
        let mut stack = pair_i32(7, 3);
        subtract::<i32>(&mut stack);
        assert_eq!(stack.pop_i32(), 4);

        let mut stack = pair_i32(7, 3);
        divide::<i32>(&mut stack);
        assert_eq!(stack.pop_i32(), 2);

        let mut stack = pair_i32(-7, 3);
        modulo(&mut stack);
        assert_eq!(stack.pop_i32(), -1);

        let mut stack = pair_i32(6, 7);
        multiply::<i32>(&mut stack);
        assert_eq!(stack.pop_i32(), 42);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_integer_overflow_wraps() {
        let mut stack = pair_i32(i32::MAX, 1);
        add::<i32>(&mut stack);
        assert_eq!(stack.pop_i32(), i32::MIN);

        let mut stack = pair_i32(i32::MIN, -1);
        divide::<i32>(&mut stack);
        assert_eq!(stack.pop_i32(), i32::MIN);
    }

    #[test]
    fn test_float_arithmetic() {
        let mut stack = pair_f64(1.5, 2.25);
        add::<f64>(&mut stack);
        assert_eq!(stack.pop_f64(), 3.75);

        let mut stack = pair_f64(1.0, 0.0);
        divide::<f64>(&mut stack);
        assert_eq!(stack.pop_f64(), f64::INFINITY);
    }

    #[test]
    fn test_division_by_zero_records_error() {
        clear_runtime_error();
        let mut stack = pair_i32(5, 0);
        divide::<i32>(&mut stack);
        assert_eq!(stack.pop_i32(), 0);
        assert!(has_runtime_error());
        assert_eq!(
            take_runtime_error().unwrap(),
            "divide: division by zero (attempted 5 / 0)"
        );

        let mut stack = pair_i32(5, 0);
        modulo(&mut stack);
        assert_eq!(stack.pop_i32(), 0);
        assert!(take_runtime_error().unwrap().starts_with("modulo"));
    }

    #[test]
    fn test_comparisons_push_i32_flags() {
        let cases: [(fn(&mut FlatStack), i32); 6] = [
            (lt::<f64>, 1),
            (lte::<f64>, 1),
            (gt::<f64>, 0),
            (gte::<f64>, 0),
            (eq::<f64>, 0),
            (neq::<f64>, 1),
        ];
        for (word, expected) in cases {
            let mut stack = pair_f64(1.0, 2.0);
            word(&mut stack);
            assert_eq!(stack.pop_i32(), expected);
            assert!(stack.is_empty());
        }

        let mut stack = pair_i32(3, 3);
        eq::<i32>(&mut stack);
        assert_eq!(stack.pop_i32(), 1);
    }

    #[test]
    #[should_panic(expected = "type mismatch: expected f64, found i32")]
    fn test_mixed_kinds_are_fatal() {
        let mut stack = FlatStack::with_capacity(256, 64);
        stack.push_f64(1.0);
        stack.push_i32(2);
        add::<f64>(&mut stack);
    }

    #[test]
    #[should_panic(expected = "add: stack underflow")]
    fn test_missing_operand_is_fatal() {
        let mut stack = FlatStack::with_capacity(256, 64);
        stack.push_i32(1);
        add::<i32>(&mut stack);
    }
}
