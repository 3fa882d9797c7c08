//! Construction parameters for `Basis`.

use tracing::warn;

use crate::consts::{ENFORCE_MAX_DEGREE, MAX_DEGREE};
use crate::error::{BasisError, Result};
use crate::scalar::{default_norm, BasisScalar};

/// Basis configuration (normalization and degree ceiling).
///
/// `max_degree` bounds `ydeg + udeg + fdeg`. Above it the recurrences lose
/// accuracy in double precision; with `enforce_max_degree = false` the build
/// proceeds and logs a warning instead.
#[derive(Clone, Copy, Debug)]
pub struct BasisCfg<T: BasisScalar> {
    pub norm: T,
    pub max_degree: usize,
    pub enforce_max_degree: bool,
}

impl<T: BasisScalar> Default for BasisCfg<T> {
    fn default() -> Self {
        Self {
            norm: default_norm(),
            max_degree: MAX_DEGREE,
            enforce_max_degree: ENFORCE_MAX_DEGREE,
        }
    }
}

impl<T: BasisScalar> BasisCfg<T> {
    /// Defaults with a custom normalization.
    pub fn with_norm(norm: T) -> Self {
        Self {
            norm,
            ..Self::default()
        }
    }

    /// Validate against the combined degree `deg`.
    pub(crate) fn check(&self, deg: usize) -> Result<()> {
        if !self.norm.is_finite() || self.norm.is_zero() {
            return Err(BasisError::InvalidNorm);
        }
        if deg > self.max_degree {
            if self.enforce_max_degree {
                return Err(BasisError::DegreeTooHigh {
                    deg,
                    max: self.max_degree,
                });
            }
            warn!(
                deg,
                max = self.max_degree,
                "degree above the stability ceiling; results may be inaccurate"
            );
        }
        Ok(())
    }
}
