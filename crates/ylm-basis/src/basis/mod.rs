//! The `Basis` container: every change-of-basis operator for one map size.
//!
//! Purpose
//! - Build A1, A1Inv, A2, A, rT, rTA1 and U1 once at the combined degree
//!   `deg = ydeg + udeg + fdeg`, then keep only the blocks consumers use.
//! - Expose them read-only, plus a few linear-operator helpers.
//!
//! Slicing
//! - Every operator here is block upper-triangular in degree (a degree-`l`
//!   term only ever touches rows of degree `<= l`), so the leading `Ny × Ny`
//!   block of a product or inverse at `deg` equals the same operator built at
//!   `ydeg`. `A1Inv`, `A2`, `A`, `rT` and `rTA1` are therefore stored at `Ny`.
//! - `A1_f` and `sp_A1` keep the `Nf × Nf` block for the filter operator;
//!   `sp_U1` keeps `(udeg+1)² × (udeg+1)`.
//!
//! References
//! - Code cross-refs: `assemble::{compute_a1, compute_a, compute_rt, compute_u}`,
//!   `map::MapCoeffs`

mod cfg;
mod ops;

pub use cfg::BasisCfg;

use std::time::Instant;

use nalgebra::{DMatrix, RowDVector};
use nalgebra_sparse::CscMatrix;
use tracing::debug;

use crate::assemble::{compute_a, compute_a1, compute_rt, compute_u};
use crate::contract::check_shape;
use crate::error::{BasisError, Result};
use crate::index::ncoeff;
use crate::scalar::BasisScalar;

/// Immutable set of change-of-basis operators for `(ydeg, udeg, fdeg)`.
#[derive(Clone, Debug)]
pub struct Basis<T: BasisScalar> {
    ydeg: usize,
    udeg: usize,
    fdeg: usize,
    norm: T,
    a1: DMatrix<T>,
    a1_f: DMatrix<T>,
    a1_inv: DMatrix<T>,
    a2: DMatrix<T>,
    a: DMatrix<T>,
    rt: RowDVector<T>,
    rta1: RowDVector<T>,
    sp_u1: CscMatrix<T>,
    sp_a1: CscMatrix<T>,
}

impl<T: BasisScalar> Basis<T> {
    /// Default configuration: `norm = 2/sqrt(pi)`, degree ceiling enforced.
    pub fn new(ydeg: usize, udeg: usize, fdeg: usize) -> Result<Self> {
        Self::with_cfg(ydeg, udeg, fdeg, BasisCfg::default())
    }

    pub fn with_norm(ydeg: usize, udeg: usize, fdeg: usize, norm: T) -> Result<Self> {
        Self::with_cfg(ydeg, udeg, fdeg, BasisCfg::with_norm(norm))
    }

    pub fn with_cfg(ydeg: usize, udeg: usize, fdeg: usize, cfg: BasisCfg<T>) -> Result<Self> {
        let deg = ydeg + udeg + fdeg;
        cfg.check(deg)?;
        let started = Instant::now();
        let norm = cfg.norm;

        let a1_full = compute_a1(deg, norm)?;
        let a1_inv_full = a1_full
            .clone()
            .try_inverse()
            .ok_or(BasisError::singular("A1"))?;
        let (a2_full, a_full) = compute_a(deg, &a1_full)?;
        let rt_full = compute_rt::<T>(deg);
        let rta1_full = &rt_full * &a1_full;
        let u1_full = compute_u(deg, &a1_full, norm)?;

        let n = ncoeff(deg);
        check_shape("A1Inv", a1_inv_full.shape(), (n, n))?;
        check_shape("A2", a2_full.shape(), (n, n))?;
        check_shape("A", a_full.shape(), (n, n))?;
        check_shape("rTA1", rta1_full.shape(), (1, n))?;
        check_shape("U1", u1_full.shape(), (n, deg + 1))?;

        let (ny, nf, nu) = (ncoeff(ydeg), ncoeff(fdeg), udeg + 1);
        let block = |m: &DMatrix<T>, n: usize| m.view((0, 0), (n, n)).into_owned();
        let basis = Self {
            ydeg,
            udeg,
            fdeg,
            norm,
            a1: block(&a1_full, ny),
            a1_f: block(&a1_full, nf),
            a1_inv: block(&a1_inv_full, ny),
            a2: block(&a2_full, ny),
            a: block(&a_full, ny),
            rt: rt_full.columns(0, ny).into_owned(),
            rta1: rta1_full.columns(0, ny).into_owned(),
            sp_u1: CscMatrix::from(&u1_full.view((0, 0), (ncoeff(udeg), nu))),
            sp_a1: CscMatrix::from(&a1_full.view((0, 0), (nf, nf))),
        };
        debug!(
            ydeg,
            udeg,
            fdeg,
            deg,
            n,
            sp_u1_nnz = basis.sp_u1.nnz(),
            sp_a1_nnz = basis.sp_a1.nnz(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "basis built"
        );
        Ok(basis)
    }

    pub fn ydeg(&self) -> usize {
        self.ydeg
    }
    pub fn udeg(&self) -> usize {
        self.udeg
    }
    pub fn fdeg(&self) -> usize {
        self.fdeg
    }
    /// Combined degree `ydeg + udeg + fdeg` the operators were built at.
    pub fn deg(&self) -> usize {
        self.ydeg + self.udeg + self.fdeg
    }
    pub fn norm(&self) -> T {
        self.norm
    }
    /// `(ydeg+1)²`
    pub fn ny(&self) -> usize {
        ncoeff(self.ydeg)
    }
    /// `udeg+1`
    pub fn nu(&self) -> usize {
        self.udeg + 1
    }
    /// `(fdeg+1)²`
    pub fn nf(&self) -> usize {
        ncoeff(self.fdeg)
    }

    /// Ylm → polynomial, `Ny × Ny`.
    pub fn a1(&self) -> &DMatrix<T> {
        &self.a1
    }
    /// Ylm → polynomial for the filter, `Nf × Nf`.
    pub fn a1_f(&self) -> &DMatrix<T> {
        &self.a1_f
    }
    /// Polynomial → Ylm, `Ny × Ny`.
    pub fn a1_inv(&self) -> &DMatrix<T> {
        &self.a1_inv
    }
    /// Polynomial → Green's, `Ny × Ny`.
    pub fn a2(&self) -> &DMatrix<T> {
        &self.a2
    }
    /// Ylm → Green's, `Ny × Ny`.
    pub fn a(&self) -> &DMatrix<T> {
        &self.a
    }
    /// Disk-integrated flux of each polynomial term, length `Ny`.
    pub fn rt(&self) -> &RowDVector<T> {
        &self.rt
    }
    /// `rT · A1`: disk-integrated flux of each Ylm term, length `Ny`.
    pub fn rta1(&self) -> &RowDVector<T> {
        &self.rta1
    }
    /// Limb darkening → polynomial, `(udeg+1)² × (udeg+1)`.
    pub fn sp_u1(&self) -> &CscMatrix<T> {
        &self.sp_u1
    }
    /// Sparse `A1_f`, `Nf × Nf`.
    pub fn sp_a1(&self) -> &CscMatrix<T> {
        &self.sp_a1
    }
}
