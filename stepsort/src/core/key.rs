//! Integer keys for the distribution runners.
//!
//! Radix and bucket sort derive digit and bucket indices numerically, so they
//! only accept element types that widen losslessly into `i128`.

/// Primitive integer element usable by radix and bucket sort.
pub trait IntegerKey: Ord + Clone {
    fn to_i128(&self) -> i128;
}

macro_rules! impl_integer_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntegerKey for $ty {
                fn to_i128(&self) -> i128 {
                    i128::from(*self)
                }
            }
        )*
    };
}

impl_integer_key!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl IntegerKey for isize {
    fn to_i128(&self) -> i128 {
        *self as i128
    }
}

impl IntegerKey for usize {
    fn to_i128(&self) -> i128 {
        *self as i128
    }
}
