//! Scalar capability and the constants derived from it.
//!
//! Every routine is generic over `T: BasisScalar`, i.e. any nalgebra
//! `RealField` that is `Copy` (`f64`, `f32`, and dual-number types that
//! implement the trait). Constants are free functions over that capability
//! rather than per-type specializations.

use nalgebra::RealField;

/// Numeric capability required by the basis computations.
pub trait BasisScalar: RealField + Copy {}

impl<T: RealField + Copy> BasisScalar for T {}

/// Convert an `f64` literal (or exact integer) into the scalar type.
#[inline]
pub fn lit<T: BasisScalar>(x: f64) -> T {
    nalgebra::convert(x)
}

/// Exact small integer as a scalar.
#[inline]
pub(crate) fn int<T: BasisScalar>(n: isize) -> T {
    lit(n as f64)
}

#[inline]
pub fn pi<T: BasisScalar>() -> T {
    T::pi()
}

/// `sqrt(pi)` in the scalar's own precision.
#[inline]
pub fn root_pi<T: BasisScalar>() -> T {
    T::pi().sqrt()
}

/// Machine epsilon of the scalar (for dual numbers: of the real part).
#[inline]
pub fn mach_eps<T: BasisScalar>() -> T {
    T::default_epsilon()
}

/// Default map normalization `2 / sqrt(pi)`: a unit-flux monopole.
#[inline]
pub fn default_norm<T: BasisScalar>() -> T {
    lit::<T>(2.0) / root_pi::<T>()
}
