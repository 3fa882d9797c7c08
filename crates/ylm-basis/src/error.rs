//! Errors surfaced while building or applying a basis.
//!
//! All failures are deterministic functions of the inputs; nothing here is
//! retryable. Construction either fully succeeds or returns one of these.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasisError {
    /// Combined degree above the configured stability ceiling.
    #[error("degree {deg} exceeds the stability ceiling {max}")]
    DegreeTooHigh { deg: usize, max: usize },

    /// `(l, m)` with `|m| > l`.
    #[error("invalid order m={m} for degree l={l} (need |m| <= l)")]
    InvalidOrder { l: usize, m: isize },

    /// Normalization must be finite and non-zero.
    #[error("invalid normalization constant (must be finite and non-zero)")]
    InvalidNorm,

    /// A matrix or vector has the wrong shape for the operation.
    #[error("{what}: expected shape {expected:?}, found {found:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A buffer is too short to hold the coefficients of the requested degree.
    #[error("{what}: needs at least {needed} rows, found {found}")]
    TooFewRows {
        what: &'static str,
        needed: usize,
        found: usize,
    },

    /// Index outside `[lo, hi]`.
    #[error("{what}: index {index} out of bounds [{lo}, {hi}]")]
    IndexOutOfBounds {
        what: &'static str,
        index: usize,
        lo: usize,
        hi: usize,
    },

    /// Singular or near-singular system in a QR solve or inversion.
    #[error("{what} is singular or too ill-conditioned to invert")]
    InversionFailure { what: &'static str },
}

/// A specialized `Result` type for basis operations.
pub type Result<T> = std::result::Result<T, BasisError>;

impl BasisError {
    pub(crate) fn singular(what: &'static str) -> Self {
        Self::InversionFailure { what }
    }

    /// Returns `true` for buffer shape/size violations.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            BasisError::ShapeMismatch { .. } | BasisError::TooFewRows { .. }
        )
    }

    /// Returns `true` if a linear solve or inversion failed.
    pub fn is_inversion_failure(&self) -> bool {
        matches!(self, BasisError::InversionFailure { .. })
    }
}
