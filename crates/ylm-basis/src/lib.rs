//! Change-of-basis machinery for spherical-harmonic surface maps.
//!
//! Purpose
//! - Build the dense matrices that move a surface map between three bases:
//!   spherical-harmonic coefficients (Ylm), polynomial monomials, and the
//!   Green's polynomial basis used for flux integration.
//! - Build the limb-darkening transform and the full-disk flux solution vector.
//!
//! Layout (leaves first)
//! - `index`: the `(l, m) ↦ l² + l + m` coefficient layout shared by everything.
//! - `poly`: multiplication of solid-harmonic polynomial arrays.
//! - `recur`: Legendre, azimuthal and amplitude recurrences.
//! - `assemble`: A1, A2/A, U1 and rT.
//! - `basis`: the immutable `Basis` container sliced to `(ydeg, udeg, fdeg)`.
//!
//! Consumers (rotation, occultation, bindings) treat the outputs as opaque
//! linear operators; none of that lives here.

pub mod assemble;
pub mod basis;
pub mod consts;
pub mod contract;
pub mod error;
pub mod index;
pub mod map;
pub mod poly;
pub mod recur;
pub mod scalar;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use basis::{Basis, BasisCfg};
pub use error::{BasisError, Result};
pub use map::{MapCoeffs, MapKind};
pub use scalar::BasisScalar;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::assemble::{compute_a, compute_a1, compute_rt, compute_u};
    pub use crate::basis::{Basis, BasisCfg};
    pub use crate::error::{BasisError, Result};
    pub use crate::index::{degree_order, index, ncoeff};
    pub use crate::map::{MapCoeffs, MapKind};
    pub use crate::scalar::{mach_eps, pi, root_pi, BasisScalar};
    pub use nalgebra::{DMatrix, DVector, RowDVector};
    pub use nalgebra_sparse::CscMatrix;
}
