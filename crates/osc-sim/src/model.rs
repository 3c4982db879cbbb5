//! Vector field trait for pluggable first-order systems.

use osc_core::{Real, StateVector};

use crate::error::SimResult;

/// Right-hand side `y' = f(t, y)` of a first-order system in `(x, x')`.
///
/// Implementations must be pure: the integrators evaluate the same point
/// more than once and rely on getting the same answer.
pub trait VectorField {
    /// Compute the state derivative at `(t, y)`.
    fn derivative(&self, t: Real, y: &StateVector) -> SimResult<StateVector>;
}

impl<F> VectorField for F
where
    F: Fn(Real, &StateVector) -> StateVector,
{
    fn derivative(&self, t: Real, y: &StateVector) -> SimResult<StateVector> {
        Ok(self(t, y))
    }
}
