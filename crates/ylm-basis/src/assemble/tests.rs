use super::*;
use crate::index::degree_order;
use crate::poly::multiply_by_z;
use crate::scalar::default_norm;
use nalgebra::DVector;
use std::f64::consts::PI;

/// Evaluate a polynomial in the `index` layout at a point on the unit sphere.
fn eval_poly(p: &[f64], x: f64, y: f64, z: f64) -> f64 {
    p.iter()
        .enumerate()
        .map(|(n, c)| {
            let (l, m) = degree_order(n);
            let (mu, nu) = (l as isize - m, l as isize + m);
            if nu % 2 == 0 {
                c * x.powi((mu / 2) as i32) * y.powi((nu / 2) as i32)
            } else {
                c * z * x.powi(((mu - 1) / 2) as i32) * y.powi(((nu - 1) / 2) as i32)
            }
        })
        .sum()
}

/// `∫∫_disk x^a y^b z^c dA` with `z = sqrt(1 - x² - y²)`, `c ∈ {0, 1}`.
fn disk_integral(a: usize, b: usize, c: usize) -> f64 {
    if a % 2 == 1 || b % 2 == 1 {
        return 0.0;
    }
    // ∫ cos^a sin^b over a full turn
    let dfact = |k: usize| -> f64 { (1..=k).rev().step_by(2).map(|v| v as f64).product() };
    let ang = 2.0 * PI * dfact(a.saturating_sub(1)) * dfact(b.saturating_sub(1)) / dfact(a + b);
    let p = (a + b) / 2;
    let rad = if c == 0 {
        1.0 / (a + b + 2) as f64
    } else {
        // ½ B(p + 1, 3/2)
        let num: f64 = (1..=p).map(|v| v as f64).product();
        let den: f64 = (0..=p).map(|i| i as f64 + 1.5).product();
        0.5 * num / den
    };
    ang * rad
}

fn rel_close(a: &DMatrix<f64>, b: &DMatrix<f64>, tol: f64) -> bool {
    let scale = a.amax().max(b.amax()).max(1.0);
    (a - b).amax() <= tol * scale
}

#[test]
fn a1_degree_zero_is_scaled_monopole() {
    let a1 = compute_a1::<f64>(0, 1.0).unwrap();
    assert_eq!(a1.shape(), (1, 1));
    assert!((a1[(0, 0)] - 0.5 / PI.sqrt()).abs() < 1e-15);
    let norm = default_norm::<f64>();
    let a1 = compute_a1::<f64>(0, norm).unwrap();
    assert!((a1[(0, 0)] - 1.0 / PI).abs() < 1e-15);
}

#[test]
fn a1_degree_one_maps_to_y_z_x() {
    let a1 = compute_a1::<f64>(1, 1.0).unwrap();
    let s = (3.0 / (4.0 * PI)).sqrt();
    // Y_{1,-1} ∝ y, Y_{1,0} ∝ z, Y_{1,1} ∝ x
    assert!((a1[(index(1, 1), index(1, -1))] - s).abs() < 1e-14);
    assert!((a1[(index(1, 0), index(1, 0))] - s).abs() < 1e-14);
    assert!((a1[(index(1, -1), index(1, 1))] - s).abs() < 1e-14);
    assert_eq!(a1.iter().filter(|v| **v != 0.0).count(), 4);
}

#[test]
fn a1_columns_evaluate_to_degree_two_harmonics() {
    let a1 = compute_a1::<f64>(2, 1.0).unwrap();
    let col = |l: usize, m: isize| -> Vec<f64> { a1.column(index(l, m)).iter().copied().collect() };
    let pts: [(f64, f64); 3] = [(0.3, -0.2), (-0.6, 0.1), (0.05, 0.7)];
    for (x, y) in pts {
        let z: f64 = (1.0 - x * x - y * y).sqrt();
        let cases = [
            ((2, -2), (15.0 / (4.0 * PI)).sqrt() * x * y),
            ((2, -1), (15.0 / (4.0 * PI)).sqrt() * y * z),
            ((2, 0), (5.0 / (16.0 * PI)).sqrt() * (3.0 * z * z - 1.0)),
            ((2, 1), (15.0 / (4.0 * PI)).sqrt() * x * z),
            ((2, 2), (15.0 / (16.0 * PI)).sqrt() * (x * x - y * y)),
        ];
        for ((l, m), want) in cases {
            let got = eval_poly(&col(l, m), x, y, z);
            assert!((got - want).abs() < 1e-13, "Y_{l},{m}: got {got}, want {want}");
        }
    }
}

#[test]
fn a1_scales_linearly_with_norm() {
    let a = compute_a1::<f64>(4, 1.0).unwrap();
    let b = compute_a1::<f64>(4, 2.5).unwrap();
    assert!(rel_close(&(a * 2.5), &b, 1e-14));
}

#[test]
fn a2_inverse_low_degrees() {
    let m = a2_inverse::<f64>(1).unwrap();
    assert_eq!(m, DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 2.0, 1.0, 1.0])));
    let m = a2_inverse::<f64>(2).unwrap();
    // (2,-1): mu = 3, single entry -(mu+3)/2 at row 5
    assert_eq!(m[(5, index(2, -1))], -3.0);
    assert_eq!(m.column(index(2, -1)).iter().filter(|v| **v != 0.0).count(), 1);
    // (2,1): mu = 1 with even l, 3 at row l² + 3
    assert_eq!(m[(7, index(2, 1))], 3.0);
    // x² has mu = 4: (mu+2)/2 on the diagonal
    assert_eq!(m[(index(2, -2), index(2, -2))], 3.0);
}

#[test]
fn a2_inverse_generic_odd_column_reaches_lower_degree() {
    // (3,-2): mu = 5, nu = 1
    let m = a2_inverse::<f64>(3).unwrap();
    let c = index(3, -2);
    assert_eq!(m[(2, c)], 1.0);
    assert_eq!(m[(14, c)], -1.0);
    assert_eq!(m[(c, c)], -4.0);
    assert_eq!(m.column(c).iter().filter(|v| **v != 0.0).count(), 3);
}

#[test]
fn a2_inverse_rows_stay_within_column_degree() {
    let m = a2_inverse::<f64>(12).unwrap();
    for c in 0..m.ncols() {
        let (lc, _) = degree_order(c);
        for r in 0..m.nrows() {
            if m[(r, c)] != 0.0 {
                assert!(degree_order(r).0 <= lc, "row {r} above column {c}");
            }
        }
    }
}

#[test]
fn compute_a_is_consistent() {
    for lmax in [0usize, 1, 2, 5, 8] {
        let n = ncoeff(lmax);
        let a1 = compute_a1::<f64>(lmax, default_norm()).unwrap();
        let (a2, a) = compute_a(lmax, &a1).unwrap();
        let a2inv = a2_inverse::<f64>(lmax).unwrap();
        assert!(rel_close(&(&a2 * &a2inv), &DMatrix::identity(n, n), 1e-10), "lmax {lmax}");
        assert!(rel_close(&(&a2 * &a1), &a, 1e-10), "lmax {lmax}");
    }
}

#[test]
fn compute_a_rejects_wrong_shape() {
    let a1 = DMatrix::<f64>::zeros(4, 3);
    assert!(compute_a(1, &a1).unwrap_err().is_shape_error());
    let a1 = DMatrix::<f64>::zeros(9, 9);
    assert!(compute_a(1, &a1).unwrap_err().is_shape_error());
}

#[test]
fn rt_low_degree_values() {
    let rt = compute_rt::<f64>(2);
    assert!((rt[0] - PI).abs() < 1e-15);
    assert!((rt[index(1, 0)] - 2.0 * PI / 3.0).abs() < 1e-15);
    assert!((rt[index(2, -2)] - PI / 4.0).abs() < 1e-15);
    assert!((rt[index(2, 2)] - PI / 4.0).abs() < 1e-15);
    assert_eq!(rt[index(2, 0)], 0.0);
    // no z-partner beyond lmax
    assert_eq!(rt.len(), 9);
}

#[test]
fn rt_matches_disk_integrals() {
    let lmax = 9;
    let rt = compute_rt::<f64>(lmax);
    for n in 0..ncoeff(lmax) {
        let (l, m) = degree_order(n);
        let (mu, nu) = (l as isize - m, l as isize + m);
        let want = if nu % 2 == 0 {
            disk_integral((mu / 2) as usize, (nu / 2) as usize, 0)
        } else {
            disk_integral(((mu - 1) / 2) as usize, ((nu - 1) / 2) as usize, 1)
        };
        assert!(
            (rt[n] - want).abs() <= 1e-13 * want.abs().max(1.0),
            "({l},{m}): got {}, want {want}",
            rt[n]
        );
    }
}

#[test]
fn selection_picks_zonal_terms() {
    let x = selection::<f64>(2);
    assert_eq!(x.shape(), (9, 3));
    assert_eq!(x[(0, 0)], 1.0);
    assert_eq!(x[(index(1, 0), 1)], 1.0);
    assert_eq!(x[(index(2, 0), 2)], 1.0);
    assert_eq!(x.sum(), 3.0);
}

#[test]
fn u1_columns_are_minus_one_minus_z_powers() {
    let lmax = 6;
    let n = ncoeff(lmax);
    let norm = default_norm::<f64>();
    let a1 = compute_a1::<f64>(lmax, norm).unwrap();
    let u1 = compute_u(lmax, &a1, norm).unwrap();
    assert_eq!(u1.shape(), (n, lmax + 1));
    // q_l = (1 - z)^l in the polynomial basis
    let mut q = DMatrix::<f64>::zeros(n, 1);
    q[(0, 0)] = 1.0;
    for l in 0..=lmax {
        let got = u1.column(l).into_owned();
        let want = -q.column(0).into_owned();
        let scale = want.amax().max(1.0);
        assert!((got - want).amax() < 1e-10 * scale, "column {l}");
        if l < lmax {
            let zq = multiply_by_z(l, &q.rows(0, ncoeff(l)).into_owned()).unwrap();
            let mut next = q.clone();
            for r in 0..zq.nrows() {
                next[(r, 0)] -= zq[(r, 0)];
            }
            q = next;
        }
    }
}

#[test]
fn u1_is_independent_of_norm() {
    let lmax = 4;
    let a = compute_u(lmax, &compute_a1::<f64>(lmax, 1.0).unwrap(), 1.0).unwrap();
    let b = compute_u(lmax, &compute_a1::<f64>(lmax, 3.0).unwrap(), 3.0).unwrap();
    assert!(rel_close(&a, &b, 1e-12));
}

#[test]
fn ylm_powers_and_limb_powers_are_triangular() {
    let yt = ylm_powers::<f64>(5);
    let lt = limb_darkening_powers::<f64>(5);
    for l in 0..6 {
        for k in l + 1..6 {
            assert_eq!(yt[(k, l)], 0.0);
            assert_eq!(lt[(k, l)], 0.0);
        }
        assert!(yt[(l, l)] != 0.0);
    }
    // Y_20 = sqrt(5/16π) (3 z² - 1)
    let c = (5.0 / (16.0 * PI)).sqrt();
    assert!((yt[(0, 2)] + c).abs() < 1e-14);
    assert!((yt[(2, 2)] - 3.0 * c).abs() < 1e-14);
    // -(1 - z)² = -1 + 2 z - z²
    assert_eq!(lt.column(2).as_slice()[..3], [-1.0, 2.0, -1.0]);
}

#[test]
fn compute_u_rejects_wrong_shape() {
    let a1 = DMatrix::<f64>::zeros(3, 3);
    assert!(compute_u(1, &a1, 1.0).unwrap_err().is_shape_error());
}

#[test]
fn high_degree_assembly_stays_finite() {
    let lmax = 20;
    let norm = default_norm::<f64>();
    let a1 = compute_a1::<f64>(lmax, norm).unwrap();
    let (a2, a) = compute_a(lmax, &a1).unwrap();
    let u1 = compute_u(lmax, &a1, norm).unwrap();
    assert!(a1.iter().chain(a2.iter()).chain(a.iter()).chain(u1.iter()).all(|v| v.is_finite()));
}
