//! Householder QR solves shared by the assembly routines.

use nalgebra::linalg::QR;
use nalgebra::{DMatrix, Dyn};
use tracing::debug;

use crate::contract::require_shape;
use crate::error::{BasisError, Result};
use crate::scalar::{lit, mach_eps, BasisScalar};

/// A factored square system `M · X = B`.
///
/// The factorization is rejected up front when some `|r_ii|` is at or below
/// `eps · n · ‖m_i‖`, with `m_i` the matching column of the input. The test is
/// per column, so matrices whose columns differ in scale by many orders of
/// magnitude (`YT` at high degree) are still accepted.
pub struct QrSolver<T: BasisScalar> {
    what: &'static str,
    n: usize,
    qr: QR<T, Dyn, Dyn>,
}

impl<T: BasisScalar> QrSolver<T> {
    pub fn new(what: &'static str, m: DMatrix<T>) -> Result<Self> {
        let n = m.nrows();
        require_shape(what, m.shape(), (n, n))?;
        let col_norms: Vec<T> = m.column_iter().map(|c| c.norm()).collect();
        let qr = m.qr();
        let r = qr.r();
        let tol = mach_eps::<T>() * lit::<T>(n as f64);
        if let Some(i) = (0..n).find(|&i| r[(i, i)].abs() <= tol * col_norms[i]) {
            debug!(what, n, column = i, "rejecting near-singular factorization");
            return Err(BasisError::singular(what));
        }
        Ok(Self { what, n, qr })
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    /// `M⁻¹ · b`; `b` must have exactly `n` rows.
    pub fn solve(&self, b: &DMatrix<T>) -> Result<DMatrix<T>> {
        require_shape(self.what, (b.nrows(), 1), (self.n, 1))?;
        self.qr.solve(b).ok_or_else(|| BasisError::singular(self.what))
    }
}
