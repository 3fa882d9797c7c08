//! Assembly of the change-of-basis matrices and the flux solution vector.
//!
//! Purpose
//! - `compute_a1`: Ylm → polynomial (`A1`).
//! - `compute_a`: polynomial → Green's (`A2`) and Ylm → Green's (`A`), both from
//!   one QR factorization of the structural inverse `A2Inv`.
//! - `compute_rt`: full-disk flux of each polynomial term (`rT`).
//! - `compute_u`: limb-darkening coefficients → polynomial (`U1`).
//!
//! Why QR
//! - `A2Inv` and the Ylm limb-darkening matrix lose conditioning as the degree
//!   grows; Householder QR is the one decomposition used for every solve here.
//!   There is no fallback: a near-singular `R` is reported as
//!   `InversionFailure`.
//!
//! References
//! - Code cross-refs: `recur::{legendre, theta, amp}`,
//!   `poly::multiply_polynomials_into`, `basis::Basis`

mod solve;

pub use solve::QrSolver;

use nalgebra::{DMatrix, RowDVector};

use crate::contract::{check_bounds, require_shape};
use crate::error::Result;
use crate::index::{index, ncoeff};
use crate::poly::multiply_polynomials_into;
use crate::recur::{amp, legendre, theta};
use crate::scalar::{int, lit, pi, BasisScalar};

/// Dense `A1`: column `index(l, m)` is `norm · Y_lm` as a polynomial.
pub fn compute_a1<T: BasisScalar>(lmax: usize, norm: T) -> Result<DMatrix<T>> {
    let n = ncoeff(lmax);
    let c = amp::<T>(lmax);
    let z = legendre::<T>(lmax)?;
    let xy = theta::<T>(lmax);
    let mut a1 = DMatrix::<T>::zeros(n, n);
    multiply_polynomials_into(lmax, &z, lmax, &xy, lmax, &mut a1)?;
    a1.component_mul_assign(&c);
    a1 *= norm;
    Ok(a1)
}

/// Structural inverse of `A2`: column `n` expresses Green's term `n` in the
/// monomial basis.
///
/// Case analysis on `mu = l - m`, `nu = l + m`:
/// - `nu` even: `x^(mu/2) y^(nu/2)`;
/// - `(1, 0)`: `z`;
/// - `mu = 1`: the `z`-terms of degree `l`, split on the parity of `l`;
/// - otherwise the generic odd case, which reaches back to degree `l - 2`.
pub fn a2_inverse<T: BasisScalar>(lmax: usize) -> Result<DMatrix<T>> {
    let n = ncoeff(lmax);
    let mut mat = DMatrix::<T>::zeros(n, n);
    for l in 0..=lmax {
        let li = l as isize;
        let top = ncoeff(l) - 1;
        for m in -li..=li {
            let col = index(l, m);
            let (mu, nu) = (li - m, li + m);
            // Every row lies at degree <= l.
            let mut set = |row: isize, v: isize| -> Result<()> {
                check_bounds("A2Inv row", row as usize, 0, top)?;
                mat[(row as usize, col)] = int(v);
                Ok(())
            };
            if nu % 2 == 0 {
                set(col as isize, (mu + 2) / 2)?;
            } else if l == 1 && m == 0 {
                set(col as isize, 1)?;
            } else if mu == 1 && l % 2 == 0 {
                set(li * li + 3, 3)?;
            } else if mu == 1 {
                set(1 + (li - 2) * (li - 2), -1)?;
                set(li * li + 1, 1)?;
                set(li * li + 5, 4)?;
            } else {
                if mu != 3 {
                    set(nu + (mu - 4 + nu) * (mu - 4 + nu) / 4, (mu - 3) / 2)?;
                    set(nu + 4 + (mu + nu) * (mu + nu) / 4, -(mu - 3) / 2)?;
                }
                set(nu + (mu + nu) * (mu + nu) / 4, -(mu + 3) / 2)?;
            }
        }
    }
    Ok(mat)
}

/// `(A2, A)` with `A2 = A2Inv⁻¹` and `A = A2Inv⁻¹ · A1`.
pub fn compute_a<T: BasisScalar>(lmax: usize, a1: &DMatrix<T>) -> Result<(DMatrix<T>, DMatrix<T>)> {
    let n = ncoeff(lmax);
    require_shape("A1", a1.shape(), (n, n))?;
    let solver = QrSolver::new("A2Inv", a2_inverse::<T>(lmax)?)?;
    let a2 = solver.solve(&DMatrix::<T>::identity(n, n))?;
    let a = solver.solve(a1)?;
    Ok((a2, a))
}

/// Full-disk flux of every polynomial term: `rT · p` integrates `p` over the
/// visible unit disk.
///
/// Only even monomials `x^(2i) y^(2j)` and `z x^(2i) y^(2j)` have non-zero
/// integrals; they sit on the lattice `m ≡ l (mod 4)`, walked in two
/// branches (`l ≡ 0` and `l ≡ 2 mod 4`). Each step also fills the `z`
/// partner one degree up.
pub fn compute_rt<T: BasisScalar>(lmax: usize) -> RowDVector<T> {
    let mut rt = RowDVector::<T>::zeros(ncoeff(lmax));
    let pi = pi::<T>();
    let half: T = lit(0.5);
    fill_rt_branch(&mut rt, lmax, 0, pi, T::one(), lit(2.0 / 3.0), |l| {
        int::<T>((l + 2) * (l + 2)) / lit(16.0)
    });
    fill_rt_branch(&mut rt, lmax, 2, half * pi, half, lit(4.0 / 15.0), |l| {
        int::<T>(l * (l + 4)) / lit(16.0)
    });
    rt
}

fn fill_rt_branch<T: BasisScalar>(
    rt: &mut RowDVector<T>,
    lmax: usize,
    start: usize,
    mut amp0: T,
    mut lfac1: T,
    mut lfac2: T,
    outer: impl Fn(isize) -> T,
) {
    for l in (start..=lmax).step_by(4) {
        let mut amp = amp0;
        for m in (start..=l).step_by(4) {
            let (mu, nu) = ((l - m) as isize, (l + m) as isize);
            let mi = m as isize;
            rt[index(l, mi)] = amp * lfac1;
            rt[index(l, -mi)] = amp * lfac1;
            if l < lmax {
                rt[index(l + 1, mi)] = amp * lfac2;
                rt[index(l + 1, -mi)] = amp * lfac2;
            }
            amp *= int::<T>(nu + 2) / int::<T>(mu - 2);
        }
        let h = (l / 2) as isize;
        lfac1 /= int::<T>((h + 2) * (h + 3));
        lfac2 /= (int::<T>(h) + lit(2.5)) * (int::<T>(h) + lit(3.5));
        amp0 *= outer(l as isize);
    }
}

/// Selection `X` (`N × (lmax+1)`): one `1` per degree at `index(l, 0)`.
pub fn selection<T: BasisScalar>(lmax: usize) -> DMatrix<T> {
    let mut x = DMatrix::<T>::zeros(ncoeff(lmax), lmax + 1);
    for l in 0..=lmax {
        x[(index(l, 0), l)] = T::one();
    }
    x
}

/// `LT`: column `l` is `-(1 - z)^l` in powers of `z`.
fn limb_darkening_powers<T: BasisScalar>(lmax: usize) -> DMatrix<T> {
    let mut lt = DMatrix::<T>::zeros(lmax + 1, lmax + 1);
    for l in 0..=lmax {
        let mut lchoosek = T::one();
        for k in 0..=l {
            lt[(k, l)] = if (k + 1) % 2 == 0 { lchoosek } else { -lchoosek };
            lchoosek *= int::<T>((l - k) as isize) / int::<T>(k as isize + 1);
        }
    }
    lt
}

/// `YT`: column `l` is the un-normalized `Y_l0` in powers of `z`.
///
/// Even and odd degrees run separate multiplicative recurrences; the
/// `(2l)!/(l!)²`-type factors are carried in `twol`, `lfac` and `fac0`.
fn ylm_powers<T: BasisScalar>(lmax: usize) -> DMatrix<T> {
    let mut yt = DMatrix::<T>::zeros(lmax + 1, lmax + 1);
    let four_pi = lit::<T>(4.0) * pi::<T>();
    for parity in [0usize, 1] {
        let (mut twol, mut lfac, mut fac0): (T, T, T) = if parity == 0 {
            (T::one(), T::one(), T::one())
        } else {
            (lit(2.0), T::one(), lit(0.5))
        };
        for l in (parity..=lmax).step_by(2) {
            let li = l as isize;
            let amp = twol * (int::<T>(2 * li + 1) / four_pi).sqrt() / lfac;
            let mut lchoosek: T = if parity == 0 { T::one() } else { int(li) };
            let mut fac = fac0;
            for k in (parity..=l).step_by(2) {
                let ki = k as isize;
                yt[(k, l)] = amp * lchoosek * fac;
                fac *= int::<T>(ki + li + 1) / int::<T>(ki - li + 1);
                lchoosek *= int::<T>((li - ki) * (li - ki - 1)) / int::<T>((ki + 1) * (ki + 2));
            }
            fac0 *= if parity == 0 {
                lit::<T>(-0.25) * int::<T>((li + 1) * (li + 1))
            } else {
                lit::<T>(-0.25) * int::<T>((li + 2) * li)
            };
            lfac *= int::<T>((li + 1) * (li + 2));
            twol *= lit(4.0);
        }
    }
    yt
}

/// Dense `U1 = A1 · X · U0` with `U0 = YT⁻¹ · LT / norm`.
///
/// Column `l` of the result is `-(1 - z)^l` in the polynomial basis. `U0` is
/// divided by `norm` because it is built from the inverse direction of `A1`,
/// which carries the normalization.
pub fn compute_u<T: BasisScalar>(lmax: usize, a1: &DMatrix<T>, norm: T) -> Result<DMatrix<T>> {
    let n = ncoeff(lmax);
    require_shape("A1", a1.shape(), (n, n))?;
    let lt = limb_darkening_powers::<T>(lmax);
    let solver = QrSolver::new("YT", ylm_powers::<T>(lmax))?;
    let u0 = solver.solve(&lt)? / norm;
    Ok(a1 * (selection::<T>(lmax) * u0))
}

#[cfg(test)]
mod tests;
