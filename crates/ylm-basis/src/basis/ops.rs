//! Linear-operator helpers on map coefficients.
//!
//! Each helper first validates the input against the map kind: container
//! (`Single` for `Default`, `Multi` otherwise), row count and column count.
//! The output keeps the input's container; columns are transformed
//! independently.

use nalgebra::{DMatrix, RowDVector};
use nalgebra_sparse::CscMatrix;

use super::Basis;
use crate::error::Result;
use crate::map::{MapCoeffs, MapKind};
use crate::scalar::BasisScalar;

fn apply_dense<T: BasisScalar>(op: &DMatrix<T>, kind: MapKind, x: &MapCoeffs<T>) -> Result<MapCoeffs<T>> {
    x.validate_y(kind, op.ncols())?;
    Ok(match x {
        MapCoeffs::Single(v) => MapCoeffs::Single(op * v),
        MapCoeffs::Multi(m) => MapCoeffs::Multi(op * m),
    })
}

impl<T: BasisScalar> Basis<T> {
    /// Ylm coefficients → polynomial coefficients (`A1 · y`).
    pub fn to_polynomial(&self, kind: MapKind, y: &MapCoeffs<T>) -> Result<MapCoeffs<T>> {
        apply_dense(&self.a1, kind, y)
    }

    /// Polynomial coefficients → Ylm coefficients (`A1Inv · p`).
    pub fn from_polynomial(&self, kind: MapKind, p: &MapCoeffs<T>) -> Result<MapCoeffs<T>> {
        apply_dense(&self.a1_inv, kind, p)
    }

    /// Ylm coefficients → Green's coefficients (`A · y`).
    pub fn to_greens(&self, kind: MapKind, y: &MapCoeffs<T>) -> Result<MapCoeffs<T>> {
        apply_dense(&self.a, kind, y)
    }

    /// Full-disk flux of each map column (`rTA1 · y`); one entry per column.
    pub fn disk_flux(&self, kind: MapKind, y: &MapCoeffs<T>) -> Result<RowDVector<T>> {
        y.validate_y(kind, self.rta1.ncols())?;
        Ok(match y {
            MapCoeffs::Single(v) => RowDVector::from_element(1, self.rta1.tr_dot(v)),
            MapCoeffs::Multi(m) => &self.rta1 * m,
        })
    }

    /// Limb-darkening coefficients → polynomial coefficients (`U1 · u`).
    ///
    /// `u` has `udeg + 1` rows; `u[0]` is conventionally `-1`, so a map with
    /// no darkening (`u = [-1, 0, …]`) maps to the constant `1`. Only
    /// `Spectral` maps carry one column per wavelength.
    pub fn limb_darkening_polynomial(&self, kind: MapKind, u: &MapCoeffs<T>) -> Result<MapCoeffs<T>> {
        u.validate_u(kind, self.nu())?;
        let op: &CscMatrix<T> = &self.sp_u1;
        Ok(match u {
            MapCoeffs::Single(v) => MapCoeffs::Single(op * v),
            MapCoeffs::Multi(m) => MapCoeffs::Multi(op * m),
        })
    }
}
