//! Error types for trajectory comparison.

use crate::method::Method;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("No trajectories to compare")]
    NoTrajectories,

    #[error("Trajectory for {method} supplied more than once")]
    DuplicateMethod { method: Method },

    #[error("Reference method {method} has no trajectory")]
    MissingReference { method: Method },

    #[error("Trajectory length mismatch for {method}: expected {expected}, found {found}")]
    LengthMismatch {
        method: Method,
        expected: usize,
        found: usize,
    },

    #[error("Time mismatch for {method} at index {index}: expected {expected}, found {found}")]
    TimeMismatch {
        method: Method,
        index: usize,
        expected: f64,
        found: f64,
    },

    #[error(
        "Numerical degeneracy: reference {reference} value {reference_value:e} at t = {t} is too close to zero for a relative deviation"
    )]
    NumericalDegeneracy {
        reference: Method,
        reference_value: f64,
        t: f64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type CompareResult<T> = Result<T, CompareError>;
