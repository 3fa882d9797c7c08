//! Coefficient layout for degree/order pairs.
//!
//! Every vector and matrix in this crate stores the term `(l, m)`,
//! `-l <= m <= l`, at flat position `l² + l + m`. The map is strictly
//! increasing in `l`, then `m`, so the coefficients of degree `<= L` always
//! occupy the prefix `0..(L+1)²`. Slicing a basis to a lower degree relies on
//! that.

use crate::error::{BasisError, Result};

/// Flat position of `(l, m)`. Caller guarantees `|m| <= l`.
#[inline]
pub fn index(l: usize, m: isize) -> usize {
    debug_assert!(m.unsigned_abs() <= l, "order {m} out of range for degree {l}");
    ((l * l + l) as isize + m) as usize
}

/// Checked variant of [`index`].
#[inline]
pub fn try_index(l: usize, m: isize) -> Result<usize> {
    if m.unsigned_abs() > l {
        return Err(BasisError::InvalidOrder { l, m });
    }
    Ok(index(l, m))
}

/// Number of coefficients up to and including degree `lmax`: `(lmax+1)²`.
#[inline]
pub const fn ncoeff(lmax: usize) -> usize {
    (lmax + 1) * (lmax + 1)
}

/// Inverse of [`index`]: `n ↦ (l, m)`.
#[inline]
pub fn degree_order(n: usize) -> (usize, isize) {
    let mut l = (n as f64).sqrt() as usize;
    // Guard the float estimate at perfect-square boundaries.
    while l * l > n {
        l -= 1;
    }
    while (l + 1) * (l + 1) <= n {
        l += 1;
    }
    (l, n as isize - (l * l + l) as isize)
}
