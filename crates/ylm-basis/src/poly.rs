//! Polynomial algebra on solid-harmonic coefficient arrays.
//!
//! Layout
//! - Rows are polynomial terms in the `index(l, m)` layout; columns are
//!   independent polynomials, combined element-wise.
//! - A term with `l + m` even is the monomial `x^((l-m)/2) y^((l+m)/2)`.
//!   With `l + m` odd it is `z x^((l-m-1)/2) y^((l+m-1)/2)`: at most one
//!   power of `z` survives.
//! - When two odd terms meet, `z² = 1 - x² - y²` spreads the product over
//!   three rows of degree `l`: `+1` at `n - 4l + 2`, `-1` at `n - 2` and
//!   `-1` at `n + 2`.
//!
//! Both routines zero their output and then accumulate; they never update in
//! place.
//!
//! References
//! - Code cross-refs: `index::index`, `recur::legendre`, `assemble::compute_a1`

use nalgebra::{DMatrix, Dim, Matrix, RawStorage, RawStorageMut};

use crate::contract::{require_rows_at_least, require_shape};
use crate::error::Result;
use crate::index::ncoeff;
use crate::scalar::BasisScalar;

/// Add `v` to row `n` (even parity) or spread it with the `z²` identity.
#[inline]
fn scatter<T, R, C, S>(out: &mut Matrix<T, R, C, S>, l: usize, n: usize, col: usize, v: T, odd: bool)
where
    T: BasisScalar,
    R: Dim,
    C: Dim,
    S: RawStorageMut<T, R, C>,
{
    if odd {
        out[(n + 2 - 4 * l, col)] += v;
        out[(n - 2, col)] -= v;
        out[(n + 2, col)] -= v;
    } else {
        out[(n, col)] += v;
    }
}

#[inline]
fn row_is_zero<T, R, C, S>(p: &Matrix<T, R, C, S>, row: usize) -> bool
where
    T: BasisScalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    (0..p.ncols()).all(|c| p[(row, c)].is_zero())
}

/// Write `z · p` into `pz`.
///
/// `p` holds polynomials of degree `<= lmax` (extra rows are ignored);
/// `pz` needs at least `(lmax+2)²` rows and the same column count.
pub fn multiply_by_z_into<T, R1, C1, S1, R2, C2, S2>(
    lmax: usize,
    p: &Matrix<T, R1, C1, S1>,
    pz: &mut Matrix<T, R2, C2, S2>,
) -> Result<()>
where
    T: BasisScalar,
    R1: Dim,
    C1: Dim,
    S1: RawStorage<T, R1, C1>,
    R2: Dim,
    C2: Dim,
    S2: RawStorageMut<T, R2, C2>,
{
    require_rows_at_least("multiply_by_z input", p.nrows(), ncoeff(lmax))?;
    require_rows_at_least("multiply_by_z output", pz.nrows(), ncoeff(lmax + 1))?;
    require_shape(
        "multiply_by_z output columns",
        (1, pz.ncols()),
        (1, p.ncols()),
    )?;
    pz.fill(T::zero());
    let mut n = 0;
    for l in 0..=lmax {
        let lz = l + 1;
        for m in -(l as isize)..=(l as isize) {
            let odd = (l as isize + m).rem_euclid(2) == 1;
            let nz = ((lz * lz + lz) as isize + m) as usize;
            for c in 0..p.ncols() {
                scatter(pz, lz, nz, c, p[(n, c)], odd);
            }
            n += 1;
        }
    }
    Ok(())
}

/// Allocating form of [`multiply_by_z_into`]; output has `(lmax+2)²` rows.
pub fn multiply_by_z<T, R, C, S>(lmax: usize, p: &Matrix<T, R, C, S>) -> Result<DMatrix<T>>
where
    T: BasisScalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    let mut pz = DMatrix::zeros(ncoeff(lmax + 1), p.ncols());
    multiply_by_z_into(lmax, p, &mut pz)?;
    Ok(pz)
}

/// Write the row-wise product `p1 · p2` into `out`, keeping degrees `<= lmax12`.
///
/// Products with `l1 + l2 > lmax12` are dropped, so `lmax12` must cover every
/// degree the caller needs. Rows that are zero in every column of either
/// input are skipped.
pub fn multiply_polynomials_into<T, R1, C1, S1, R2, C2, S2, R3, C3, S3>(
    lmax1: usize,
    p1: &Matrix<T, R1, C1, S1>,
    lmax2: usize,
    p2: &Matrix<T, R2, C2, S2>,
    lmax12: usize,
    out: &mut Matrix<T, R3, C3, S3>,
) -> Result<()>
where
    T: BasisScalar,
    R1: Dim,
    C1: Dim,
    S1: RawStorage<T, R1, C1>,
    R2: Dim,
    C2: Dim,
    S2: RawStorage<T, R2, C2>,
    R3: Dim,
    C3: Dim,
    S3: RawStorageMut<T, R3, C3>,
{
    require_rows_at_least("multiply_polynomials p1", p1.nrows(), ncoeff(lmax1))?;
    require_rows_at_least("multiply_polynomials p2", p2.nrows(), ncoeff(lmax2))?;
    require_rows_at_least(
        "multiply_polynomials output",
        out.nrows(),
        ncoeff(lmax12.min(lmax1 + lmax2)),
    )?;
    require_shape("multiply_polynomials p2 columns", (1, p2.ncols()), (1, p1.ncols()))?;
    require_shape("multiply_polynomials output columns", (1, out.ncols()), (1, p1.ncols()))?;
    out.fill(T::zero());
    let ncols = p1.ncols();
    let p2_live: Vec<bool> = (0..ncoeff(lmax2)).map(|n| !row_is_zero(p2, n)).collect();
    let mut n1 = 0;
    for l1 in 0..=lmax1 {
        for m1 in -(l1 as isize)..=(l1 as isize) {
            if row_is_zero(p1, n1) {
                n1 += 1;
                continue;
            }
            let odd1 = (l1 as isize + m1).rem_euclid(2) == 1;
            let mut n2 = 0;
            'outer: for l2 in 0..=lmax2 {
                if l1 + l2 > lmax12 {
                    break 'outer;
                }
                for m2 in -(l2 as isize)..=(l2 as isize) {
                    if p2_live[n2] {
                        let l = l1 + l2;
                        let n = ((l * l + l) as isize + m1 + m2) as usize;
                        let odd = odd1 && (l2 as isize + m2).rem_euclid(2) == 1;
                        for c in 0..ncols {
                            scatter(out, l, n, c, p1[(n1, c)] * p2[(n2, c)], odd);
                        }
                    }
                    n2 += 1;
                }
            }
            n1 += 1;
        }
    }
    Ok(())
}

/// Allocating form of [`multiply_polynomials_into`]; output has `(lmax12+1)²` rows.
pub fn multiply_polynomials<T, R1, C1, S1, R2, C2, S2>(
    lmax1: usize,
    p1: &Matrix<T, R1, C1, S1>,
    lmax2: usize,
    p2: &Matrix<T, R2, C2, S2>,
    lmax12: usize,
) -> Result<DMatrix<T>>
where
    T: BasisScalar,
    R1: Dim,
    C1: Dim,
    S1: RawStorage<T, R1, C1>,
    R2: Dim,
    C2: Dim,
    S2: RawStorage<T, R2, C2>,
{
    let mut out = DMatrix::zeros(ncoeff(lmax12), p1.ncols());
    multiply_polynomials_into(lmax1, p1, lmax2, p2, lmax12, &mut out)?;
    Ok(out)
}
