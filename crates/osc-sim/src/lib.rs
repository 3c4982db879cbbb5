//! Time-domain solvers for the forced, damped single-degree-of-freedom oscillator.
//!
//! Provides:
//! - `EquationModel`: `m x'' + b x' + k x = F0 cos(omega t)` as a first-order vector field
//! - Fixed-step 6-stage, 5th-order Runge-Kutta integrator
//! - Adams-Bashforth/Adams-Moulton predictor-corrector bootstrapped from the RK5 integrator
//! - Closed-form underdamped response
//! - Step budget checks for the public solve entry points

pub mod adams;
pub mod analytical;
pub mod equation;
pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;

// Re-exports for public API
pub use adams::{AdamsMoulton4, CorrectorMode};
pub use analytical::UnderdampedResponse;
pub use equation::{EquationModel, NormalizedCoefficients, PhysicalParameters};
pub use error::{SimError, SimResult};
pub use integrator::{Integrator, RungeKutta5, integrate_fixed_step};
pub use model::VectorField;
pub use sim::{
    SimOptions, check_step_budget, solve_adams_moulton, solve_analytical, solve_runge_kutta,
};
