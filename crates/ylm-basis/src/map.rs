//! Map representations and their coefficient containers.
//!
//! - `Default`: one static map, coefficients are a single column.
//! - `Spectral { nw }`: one map per wavelength bin; both the Ylm and the
//!   limb-darkening coefficients carry `nw` columns.
//! - `Temporal { nt }`: `nt` Ylm columns (time-derivative terms of the map),
//!   but a single limb-darkening column.
//!
//! Rows are always in the `index(l, m)` layout (Ylm) or degree order (limb
//! darkening); columns never mix.

use nalgebra::{DMatrix, DVector};

use crate::contract::require_shape;
use crate::error::{BasisError, Result};
use crate::scalar::BasisScalar;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapKind {
    Default,
    Spectral { nw: usize },
    Temporal { nt: usize },
}

impl MapKind {
    /// Number of Ylm columns.
    pub fn y_cols(&self) -> usize {
        match *self {
            MapKind::Default => 1,
            MapKind::Spectral { nw } => nw,
            MapKind::Temporal { nt } => nt,
        }
    }

    /// Number of limb-darkening columns.
    pub fn u_cols(&self) -> usize {
        match *self {
            MapKind::Spectral { nw } => nw,
            MapKind::Default | MapKind::Temporal { .. } => 1,
        }
    }

    pub fn y_shape(&self, ny: usize) -> (usize, usize) {
        (ny, self.y_cols())
    }

    pub fn u_shape(&self, nu: usize) -> (usize, usize) {
        (nu, self.u_cols())
    }

    /// Whether Ylm coefficients are stored as a matrix.
    pub fn is_multi_column(&self) -> bool {
        !matches!(self, MapKind::Default)
    }

    /// Whether limb-darkening coefficients are stored as a matrix.
    pub fn has_multi_u(&self) -> bool {
        matches!(self, MapKind::Spectral { .. })
    }
}

/// Coefficients of one map: a vector for `Default`, a matrix otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum MapCoeffs<T: BasisScalar> {
    Single(DVector<T>),
    Multi(DMatrix<T>),
}

impl<T: BasisScalar> MapCoeffs<T> {
    /// Zero Ylm coefficients with `ny` rows for the given kind.
    pub fn zeros_y(kind: MapKind, ny: usize) -> Self {
        if kind.is_multi_column() {
            MapCoeffs::Multi(DMatrix::zeros(ny, kind.y_cols()))
        } else {
            MapCoeffs::Single(DVector::zeros(ny))
        }
    }

    /// Zero limb-darkening coefficients with `nu` rows for the given kind.
    pub fn zeros_u(kind: MapKind, nu: usize) -> Self {
        if kind.has_multi_u() {
            MapCoeffs::Multi(DMatrix::zeros(nu, kind.u_cols()))
        } else {
            MapCoeffs::Single(DVector::zeros(nu))
        }
    }

    pub fn nrows(&self) -> usize {
        match self {
            MapCoeffs::Single(v) => v.nrows(),
            MapCoeffs::Multi(m) => m.nrows(),
        }
    }

    pub fn ncols(&self) -> usize {
        match self {
            MapCoeffs::Single(_) => 1,
            MapCoeffs::Multi(m) => m.ncols(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Check these are Ylm coefficients of `kind` with `ny` rows.
    pub fn validate_y(&self, kind: MapKind, ny: usize) -> Result<()> {
        self.validate("Ylm coefficients", kind.is_multi_column(), kind.y_shape(ny))
    }

    /// Check these are limb-darkening coefficients of `kind` with `nu` rows.
    pub fn validate_u(&self, kind: MapKind, nu: usize) -> Result<()> {
        self.validate("limb-darkening coefficients", kind.has_multi_u(), kind.u_shape(nu))
    }

    fn validate(&self, what: &'static str, multi: bool, expected: (usize, usize)) -> Result<()> {
        let container_ok = matches!(
            (self, multi),
            (MapCoeffs::Single(_), false) | (MapCoeffs::Multi(_), true)
        );
        if !container_ok {
            return Err(BasisError::ShapeMismatch {
                what: "map container (vector vs matrix)",
                expected,
                found: self.shape(),
            });
        }
        require_shape(what, self.shape(), expected)
    }
}

impl<T: BasisScalar> From<DVector<T>> for MapCoeffs<T> {
    fn from(v: DVector<T>) -> Self {
        MapCoeffs::Single(v)
    }
}

impl<T: BasisScalar> From<DMatrix<T>> for MapCoeffs<T> {
    fn from(m: DMatrix<T>) -> Self {
        MapCoeffs::Multi(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_per_kind() {
        let ny = 9;
        assert_eq!(MapKind::Default.y_shape(ny), (9, 1));
        assert_eq!(MapKind::Spectral { nw: 4 }.y_shape(ny), (9, 4));
        assert_eq!(MapKind::Spectral { nw: 4 }.u_shape(3), (3, 4));
        assert_eq!(MapKind::Temporal { nt: 2 }.y_shape(ny), (9, 2));
        assert_eq!(MapKind::Temporal { nt: 2 }.u_shape(3), (3, 1));
    }

    #[test]
    fn kind_predicates() {
        assert!(!MapKind::Default.is_multi_column());
        assert!(!MapKind::Default.has_multi_u());
        assert!(MapKind::Spectral { nw: 2 }.has_multi_u());
        assert!(MapKind::Temporal { nt: 3 }.is_multi_column());
        assert!(!MapKind::Temporal { nt: 3 }.has_multi_u());
    }

    #[test]
    fn zeros_match_kind() {
        let y = MapCoeffs::<f64>::zeros_y(MapKind::Temporal { nt: 3 }, 4);
        assert_eq!(y.shape(), (4, 3));
        assert!(y.validate_y(MapKind::Temporal { nt: 3 }, 4).is_ok());
        let u = MapCoeffs::<f64>::zeros_u(MapKind::Temporal { nt: 3 }, 2);
        assert!(matches!(u, MapCoeffs::Single(_)));
        assert!(u.validate_u(MapKind::Temporal { nt: 3 }, 2).is_ok());
        let u = MapCoeffs::<f64>::zeros_u(MapKind::Spectral { nw: 5 }, 2);
        assert_eq!(u.shape(), (2, 5));
    }

    #[test]
    fn validate_rejects_wrong_rows_and_container() {
        let y = MapCoeffs::<f64>::zeros_y(MapKind::Default, 4);
        assert!(y.validate_y(MapKind::Default, 9).unwrap_err().is_shape_error());
        // one-column matrix is not a Default map
        let m = MapCoeffs::Multi(DMatrix::<f64>::zeros(4, 1));
        assert!(m.validate_y(MapKind::Default, 4).unwrap_err().is_shape_error());
        assert!(m.validate_y(MapKind::Spectral { nw: 1 }, 4).is_ok());
        assert!(y
            .validate_y(MapKind::Spectral { nw: 1 }, 4)
            .unwrap_err()
            .is_shape_error());
    }
}
