//! Unary float words and kind conversions

use flatstack_core::FlatStack;

/// Square root: ( f64 -- f64 )
///
/// Negative inputs yield NaN.
#[track_caller]
pub fn sqrt(stack: &mut FlatStack) {
    let x = stack.pop_f64();
    stack.push_f64(x.sqrt());
}

/// Negate: ( f64 -- f64 )
#[track_caller]
pub fn negate(stack: &mut FlatStack) {
    let x = stack.pop_f64();
    stack.push_f64(-x);
}

/// Convert i32 to f64: ( i32 -- f64 )
#[track_caller]
pub fn int_to_float(stack: &mut FlatStack) {
    let i = stack.pop_i32();
    stack.push_f64(f64::from(i));
}

/// Convert f64 to i32: ( f64 -- i32 )
///
/// Truncates toward zero. Values outside the i32 range clamp to
/// `i32::MIN`/`i32::MAX` and NaN becomes 0.
#[track_caller]
pub fn float_to_int(stack: &mut FlatStack) {
    let f = stack.pop_f64();
    stack.push_i32(f as i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> FlatStack {
        FlatStack::with_capacity(64, 16)
    }

    #[test]
    fn test_sqrt() {
        let mut stack = stack();
        stack.push_f64(2.25);
        sqrt(&mut stack);
        assert_eq!(stack.pop_f64(), 1.5);

        stack.push_f64(-1.0);
        sqrt(&mut stack);
        assert!(stack.pop_f64().is_nan());
    }

    #[test]
    fn test_negate() {
        let mut stack = stack();
        stack.push_f64(3.5);
        negate(&mut stack);
        assert_eq!(stack.pop_f64(), -3.5);
    }

    #[test]
    fn test_conversions() {
        let mut stack = stack();
        stack.push_i32(-7);
        int_to_float(&mut stack);
        assert_eq!(stack.pop_f64(), -7.0);

        stack.push_f64(-2.9);
        float_to_int(&mut stack);
        assert_eq!(stack.pop_i32(), -2);
    }

    #[test]
    fn test_float_to_int_clamps() {
        let mut stack = stack();
        for (input, expected) in [
            (1e12, i32::MAX),
            (-1e12, i32::MIN),
            (f64::NAN, 0),
            (f64::INFINITY, i32::MAX),
        ] {
            stack.push_f64(input);
            float_to_int(&mut stack);
            assert_eq!(stack.pop_i32(), expected);
        }
        assert!(stack.is_empty());
    }

    #[test]
    #[should_panic(expected = "type mismatch: expected f64, found i32")]
    fn test_sqrt_requires_float() {
        let mut stack = stack();
        stack.push_i32(4);
        sqrt(&mut stack);
    }
}
