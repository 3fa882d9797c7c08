//! Degree-increasing recurrences for the pieces of each real solid harmonic.
//!
//! A normalized real solid harmonic factors as
//! `amp(l, m) · P_l^|m|(z) · Θ_m(x, y)`. Each generator returns an `N × N`
//! matrix (`N = (lmax+1)²`) whose column `index(l, m)` holds that factor as a
//! polynomial in the `index` layout; `amp` is the odd one out and stores the
//! scalar amplitude broadcast down every row so it can be applied with a
//! component-wise product.
//!
//! References
//! - Code cross-refs: `poly::multiply_by_z_into`, `assemble::compute_a1`

use nalgebra::DMatrix;

use crate::error::Result;
use crate::index::{index, ncoeff};
use crate::poly::multiply_by_z_into;
use crate::scalar::{int, lit, root_pi, BasisScalar};

/// `z`-polynomial part `P_l^m(z)` of every harmonic (Bonnet-type recurrence).
///
/// Seeds: `P_m^m = (-1)^m (2m-1)!!` and `P_{m+1}^m = (2m+1) z P_m^m`; then
/// `(l-m) P_l^m = (2l-1) z P_{l-1}^m - (l+m-1) P_{l-2}^m`, where the `z·` is
/// `multiply_by_z`, so `z²` is reduced on the unit sphere.
pub fn legendre<T: BasisScalar>(lmax: usize) -> Result<DMatrix<T>> {
    let n = ncoeff(lmax);
    let mut mat = DMatrix::<T>::zeros(n, n);
    let mut zcol = DMatrix::<T>::zeros(n, 1);
    let mut fac = T::one();
    let mut term = T::one();
    for m in 0..=lmax {
        let mi = m as isize;
        mat[(0, index(m, mi))] = fac;
        mat[(0, index(m, -mi))] = fac;
        for l in m + 1..=lmax {
            multiply_by_z_into(l - 1, &mat.columns(index(l - 1, mi), 1), &mut zcol)?;
            let denom: T = int(l as isize - mi);
            let a = int::<T>(2 * l as isize - 1) / denom;
            let prev = (l > m + 1).then(|| index(l - 2, mi));
            let b = int::<T>(l as isize + mi - 1) / denom;
            let (ip, im) = (index(l, mi), index(l, -mi));
            for r in 0..ncoeff(l) {
                let mut v = a * zcol[(r, 0)];
                if let Some(p) = prev {
                    v -= b * mat[(r, p)];
                }
                mat[(r, ip)] = v;
                mat[(r, im)] = v;
            }
        }
        fac *= -term;
        term += lit(2.0);
    }
    Ok(mat)
}

/// Azimuthal part `Θ_m(x, y)`: `Re/Im (x + i y)^m` expanded in monomials.
///
/// The binomial weights are carried as running ratios (`term1` for the
/// cosine terms at even `j`, `term2` for the sine terms) so no factorial is
/// ever formed.
pub fn theta<T: BasisScalar>(lmax: usize) -> DMatrix<T> {
    let n = ncoeff(lmax);
    let mut mat = DMatrix::<T>::zeros(n, n);
    for m in 0..=lmax {
        let mi = m as isize;
        let mut term1 = T::one();
        let mut term2: T = int(mi);
        for j in (0..=m).step_by(2) {
            if j > 0 {
                let (mf, jf): (T, T) = (int(mi), int(j as isize));
                term1 *= -(mf - jf + T::one()) * (mf - jf + lit(2.0)) / (jf * (jf - T::one()));
                term2 *= -(mf - jf) * (mf - jf + T::one()) / (jf * (jf + T::one()));
            }
            let np1 = m * m + 2 * j;
            let np2 = np1 + 2;
            for l in m..=lmax {
                mat[(np1, index(l, mi))] = term1;
                if np2 < n {
                    mat[(np2, index(l, -mi))] = term2;
                }
            }
        }
    }
    mat
}

/// Normalization amplitude of each harmonic, broadcast down the rows.
///
/// `(l, 0)` starts at `sqrt(2(2l+1))`; each step in `|m|` divides by
/// `-sqrt((l+m)(l-m+1))`; the `m = 0` column then loses its extra `sqrt(2)`.
/// Everything is scaled by `1 / (2 sqrt(pi))`.
pub fn amp<T: BasisScalar>(lmax: usize) -> DMatrix<T> {
    let n = ncoeff(lmax);
    let mut col = vec![T::zero(); n];
    let inv_root_two = lit::<T>(0.5).sqrt();
    for l in 0..=lmax {
        let c = index(l, 0);
        col[c] = lit::<T>((2 * (2 * l + 1)) as f64).sqrt();
        for m in 1..=l {
            let v = -col[c + m - 1] / lit::<T>(((l + m) * (l - m + 1)) as f64).sqrt();
            col[c + m] = v;
            col[c - m] = v;
        }
        col[c] *= inv_root_two;
    }
    let scale = lit::<T>(2.0) * root_pi::<T>();
    DMatrix::from_fn(n, n, |_, j| col[j] / scale)
}
