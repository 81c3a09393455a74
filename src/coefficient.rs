//! Numeric type of the quadratic coefficient matrix.
//!
//! Objective values and move deltas are computed in the same type as the
//! coefficients. Integral types give exact agreement between incremental and
//! full evaluation; floating point types agree up to accumulation error.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Scalar type usable as a MAX-SC-QBF coefficient.
pub trait Coefficient:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + Debug
    + Display
    + FromStr
    + Send
    + Sync
    + 'static
{
    /// Additive identity.
    fn zero() -> Self;
}

macro_rules! impl_coefficient {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Coefficient for $ty {
                #[inline]
                fn zero() -> Self {
                    $zero
                }
            }
        )*
    };
}

impl_coefficient! {
    i32 => 0,
    i64 => 0,
    f32 => 0.0,
    f64 => 0.0,
}
