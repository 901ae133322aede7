//! Fixed-arity dispatch over an erased entry point.

use std::ffi::c_void;
use std::ptr::NonNull;

use tempo_value::Value;

/// Largest argument count a native snippet may declare.
pub const MAX_NATIVE_ARGS: usize = 4;

type Fn0 = unsafe extern "C" fn();
type Fn1 = unsafe extern "C" fn(*mut c_void);
type Fn2 = unsafe extern "C" fn(*mut c_void, *mut c_void);
type Fn3 = unsafe extern "C" fn(*mut c_void, *mut c_void, *mut c_void);
type Fn4 = unsafe extern "C" fn(*mut c_void, *mut c_void, *mut c_void, *mut c_void);

/// Argument count of a native snippet, one variant per supported C type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Zero,
    One,
    Two,
    Three,
    Four,
}

impl Arity {
    /// `None` above [`MAX_NATIVE_ARGS`].
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            0 => Some(Arity::Zero),
            1 => Some(Arity::One),
            2 => Some(Arity::Two),
            3 => Some(Arity::Three),
            4 => Some(Arity::Four),
            _ => None,
        }
    }

    pub fn count(self) -> usize {
        match self {
            Arity::Zero => 0,
            Arity::One => 1,
            Arity::Two => 2,
            Arity::Three => 3,
            Arity::Four => 4,
        }
    }
}

/// Call `entry` with one opaque pointer per value in `args`.
///
/// # Safety
///
/// `entry` must be the address of a C function `void f(void*, ...)` taking
/// exactly `arity.count()` pointer arguments, and `args.len()` must equal
/// `arity.count()`. The callee may read and write the pointed-to values for
/// the duration of the call only.
pub(crate) unsafe fn invoke(entry: NonNull<c_void>, arity: Arity, args: &mut [Value]) {
    debug_assert_eq!(args.len(), arity.count());
    let base = args.as_mut_ptr();
    let arg = |i: usize| -> *mut c_void { base.wrapping_add(i).cast() };
    let raw = entry.as_ptr();

    // SAFETY: the caller guarantees the C type matches the arity, and every
    // pointer produced by `arg` is in bounds of `args`.
    unsafe {
        match arity {
            Arity::Zero => std::mem::transmute::<*mut c_void, Fn0>(raw)(),
            Arity::One => std::mem::transmute::<*mut c_void, Fn1>(raw)(arg(0)),
            Arity::Two => std::mem::transmute::<*mut c_void, Fn2>(raw)(arg(0), arg(1)),
            Arity::Three => {
                std::mem::transmute::<*mut c_void, Fn3>(raw)(arg(0), arg(1), arg(2));
            }
            Arity::Four => {
                std::mem::transmute::<*mut c_void, Fn4>(raw)(arg(0), arg(1), arg(2), arg(3));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_round_trip_up_to_the_ceiling() {
        for count in 0..=MAX_NATIVE_ARGS {
            assert_eq!(Arity::from_count(count).map(Arity::count), Some(count));
        }
        assert_eq!(Arity::from_count(MAX_NATIVE_ARGS + 1), None);
    }
}
