//! Build-wide constants (immutable, process-wide).
//!
//! Policy
//! - Fixed values, no mutable globals. Callers that need a different ceiling
//!   pass it through `BasisCfg`.

/// Highest combined degree `ydeg + udeg + fdeg` at which the recurrences are
/// known to stay numerically stable in double precision.
pub const MAX_DEGREE: usize = 50;

/// Degree ceiling enforcement default (see `BasisCfg::enforce_max_degree`).
pub const ENFORCE_MAX_DEGREE: bool = true;
