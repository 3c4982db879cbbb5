//! Error types for solver operations.

use osc_core::OscError;
use thiserror::Error;

/// Errors raised while building the equation or producing a trajectory.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid physical parameters: {what}")]
    InvalidPhysicalParameters { what: &'static str },

    #[error(
        "Analytical solution requires underdamped regime: (b/m)^2 - 4k/m = {discriminant:.6e} >= 0"
    )]
    UnsupportedDampingRegime { discriminant: f64 },

    #[error("Requested {requested} steps exceeds the limit of {limit}")]
    ExcessiveIterationCount { requested: usize, limit: usize },

    #[error("Numerical degeneracy: {what}")]
    NumericalDegeneracy { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] OscError),
}

pub type SimResult<T> = Result<T, SimError>;
