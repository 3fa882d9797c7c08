//! JSON views of a built basis and its self-check residuals.

use nalgebra::{DMatrix, RowDVector};
use nalgebra_sparse::CscMatrix;
use serde::Serialize;
use ylm_basis::Basis;

/// Dense matrix, row-major.
#[derive(Serialize, Debug)]
pub struct Dense {
    pub nrows: usize,
    pub ncols: usize,
    pub rows: Vec<Vec<f64>>,
}

impl From<&DMatrix<f64>> for Dense {
    fn from(m: &DMatrix<f64>) -> Self {
        Self {
            nrows: m.nrows(),
            ncols: m.ncols(),
            rows: m.row_iter().map(|r| r.iter().copied().collect()).collect(),
        }
    }
}

/// Compressed sparse column storage, as held by the basis.
#[derive(Serialize, Debug)]
pub struct Sparse {
    pub nrows: usize,
    pub ncols: usize,
    pub col_offsets: Vec<usize>,
    pub row_indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl From<&CscMatrix<f64>> for Sparse {
    fn from(m: &CscMatrix<f64>) -> Self {
        Self {
            nrows: m.nrows(),
            ncols: m.ncols(),
            col_offsets: m.col_offsets().to_vec(),
            row_indices: m.row_indices().to_vec(),
            values: m.values().to_vec(),
        }
    }
}

fn row(v: &RowDVector<f64>) -> Vec<f64> {
    v.iter().copied().collect()
}

#[derive(Serialize, Debug)]
pub struct BasisDump {
    pub ydeg: usize,
    pub udeg: usize,
    pub fdeg: usize,
    pub norm: f64,
    pub a1: Dense,
    pub a1_f: Dense,
    pub a1_inv: Dense,
    pub a2: Dense,
    pub a: Dense,
    pub rt: Vec<f64>,
    pub rta1: Vec<f64>,
    pub sp_u1: Sparse,
    pub sp_a1: Sparse,
}

pub fn dump(b: &Basis<f64>) -> BasisDump {
    BasisDump {
        ydeg: b.ydeg(),
        udeg: b.udeg(),
        fdeg: b.fdeg(),
        norm: b.norm(),
        a1: b.a1().into(),
        a1_f: b.a1_f().into(),
        a1_inv: b.a1_inv().into(),
        a2: b.a2().into(),
        a: b.a().into(),
        rt: row(b.rt()),
        rta1: row(b.rta1()),
        sp_u1: b.sp_u1().into(),
        sp_a1: b.sp_a1().into(),
    }
}

/// Dimensions and max-abs residuals of the defining identities.
#[derive(Serialize, Debug)]
pub struct Report {
    pub ydeg: usize,
    pub udeg: usize,
    pub fdeg: usize,
    pub deg: usize,
    pub ny: usize,
    pub nu: usize,
    pub nf: usize,
    pub sp_u1_nnz: usize,
    pub sp_a1_nnz: usize,
    /// `max|A1 · A1Inv - I|`
    pub a1_inverse_residual: f64,
    /// `max|A - A2 · A1| / max|A|`
    pub a_relative_residual: f64,
    /// `max|rTA1 - rT · A1|`
    pub rta1_residual: f64,
    /// `rTA1 · e_00`: flux of the monopole (1 with the default norm).
    pub monopole_flux: f64,
}

pub fn report(b: &Basis<f64>) -> Report {
    let n = b.ny();
    let a1_inverse_residual = (b.a1() * b.a1_inv() - DMatrix::identity(n, n)).amax();
    let a_relative_residual = (b.a() - b.a2() * b.a1()).amax() / b.a().amax().max(1.0);
    let rta1_residual = (b.rta1() - b.rt() * b.a1()).amax();
    Report {
        ydeg: b.ydeg(),
        udeg: b.udeg(),
        fdeg: b.fdeg(),
        deg: b.deg(),
        ny: n,
        nu: b.nu(),
        nf: b.nf(),
        sp_u1_nnz: b.sp_u1().nnz(),
        sp_a1_nnz: b.sp_a1().nnz(),
        a1_inverse_residual,
        a_relative_residual,
        rta1_residual,
        monopole_flux: b.rta1()[0],
    }
}
