//! Stack shuffle words
//!
//! Every shuffle is a composition of `grab` (copy an entry to the top) and
//! `cut` (remove a window of entries), so they work on aggregates of any
//! size exactly as on scalars. Depths count whole entries, top = 0.

use flatstack_core::FlatStack;

/// Duplicate the top value: ( a -- a a )
#[track_caller]
pub fn dup(stack: &mut FlatStack) {
    stack.grab(0);
}

/// Drop the top value: ( a -- )
#[track_caller]
pub fn drop(stack: &mut FlatStack) {
    stack.cut(0, 1);
}

/// Swap the top two values: ( a b -- b a )
#[track_caller]
pub fn swap(stack: &mut FlatStack) {
    stack.grab(1);
    stack.cut(2, 1);
}

/// Copy the second value to the top: ( a b -- a b a )
#[track_caller]
pub fn over(stack: &mut FlatStack) {
    stack.grab(1);
}

/// Rotate the top three values: ( a b c -- b c a )
#[track_caller]
pub fn rot(stack: &mut FlatStack) {
    stack.grab(2);
    stack.cut(3, 1);
}

/// Remove the second value: ( a b -- b )
#[track_caller]
pub fn nip(stack: &mut FlatStack) {
    stack.cut(1, 1);
}

/// Copy top value below second value: ( a b -- b a b )
#[track_caller]
pub fn tuck(stack: &mut FlatStack) {
    swap(stack);
    over(stack);
}

/// Duplicate top two values: ( a b -- a b a b )
#[track_caller]
pub fn two_dup(stack: &mut FlatStack) {
    stack.grab(1);
    stack.grab(1);
}

/// Drop top two values: ( a b -- )
#[track_caller]
pub fn two_drop(stack: &mut FlatStack) {
    stack.cut(0, 2);
}

/// Pick: copy the nth value to the top
/// ( xn ... x1 x0 n -- xn ... x1 x0 xn )
///
/// # Panics
/// - If the top value is not an i32
/// - If n is negative
/// - If n exceeds the current stack depth
#[track_caller]
pub fn pick(stack: &mut FlatStack) {
    let n = pop_index(stack, "pick");
    stack.grab(n);
}

/// Roll: bring the item at depth n to the top
/// ( xn x(n-1) ... x1 x0 n -- x(n-1) ... x1 x0 xn )
///
/// `0 roll` is a no-op, `1 roll` is `swap`, `2 roll` is `rot`.
///
/// # Panics
/// - If the top value is not an i32
/// - If n is negative
/// - If n exceeds the current stack depth
#[track_caller]
pub fn roll(stack: &mut FlatStack) {
    let n = pop_index(stack, "roll");
    if n == 0 {
        return;
    }
    stack.grab(n);
    stack.cut(n + 1, 1);
}

#[track_caller]
fn pop_index(stack: &mut FlatStack, op: &str) -> usize {
    let n = stack.pop_i32();
    match usize::try_from(n) {
        Ok(n) => n,
        Err(_) => {
            let msg = format!("{}: index must be non-negative, got {}", op, n);
            tracing::error!(error = %msg, "fatal stack contract violation");
            panic!("{}", msg)
        }
    }
}
