//! Shape and bounds contracts.
//!
//! Two tiers
//! - `require_*`: always on. Used at linear solves and public entry points,
//!   where a mismatch must fail loudly instead of truncating.
//! - `check_*`: debug contracts. Active in debug/test builds or with the
//!   `strict-checks` feature, otherwise they compile to `Ok(())`.

use crate::error::{BasisError, Result};

/// Whether the debug contracts are evaluated in this build.
#[inline]
pub const fn checks_enabled() -> bool {
    cfg!(any(debug_assertions, feature = "strict-checks"))
}

#[inline]
pub fn require_shape(
    what: &'static str,
    found: (usize, usize),
    expected: (usize, usize),
) -> Result<()> {
    if found != expected {
        return Err(BasisError::ShapeMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

#[inline]
pub fn require_rows_at_least(what: &'static str, found: usize, needed: usize) -> Result<()> {
    if found < needed {
        return Err(BasisError::TooFewRows {
            what,
            needed,
            found,
        });
    }
    Ok(())
}

/// Debug contract: exact shape.
#[inline]
pub fn check_shape(
    what: &'static str,
    found: (usize, usize),
    expected: (usize, usize),
) -> Result<()> {
    if checks_enabled() {
        require_shape(what, found, expected)
    } else {
        Ok(())
    }
}

/// Debug contract: `lo <= index <= hi`.
#[inline]
pub fn check_bounds(what: &'static str, index: usize, lo: usize, hi: usize) -> Result<()> {
    if checks_enabled() && (index < lo || index > hi) {
        return Err(BasisError::IndexOutOfBounds { what, index, lo, hi });
    }
    Ok(())
}
