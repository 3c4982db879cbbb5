//! Public solve entry points with up-front step budget checks.

use osc_core::{StateVector, TimeGrid, Trajectory};
use tracing::debug;

use crate::adams::AdamsMoulton4;
use crate::analytical;
use crate::equation::EquationModel;
use crate::error::{SimError, SimResult};
use crate::integrator::{RungeKutta5, integrate_fixed_step};
use crate::model::VectorField;

/// Options shared by the solve entry points.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self { max_steps: 100_000 }
    }
}

/// Reject grids whose step count is above `opts.max_steps`; returns the count.
pub fn check_step_budget(grid: &TimeGrid, opts: &SimOptions) -> SimResult<usize> {
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    let requested = grid.step_count();
    if requested > opts.max_steps {
        return Err(SimError::ExcessiveIterationCount {
            requested,
            limit: opts.max_steps,
        });
    }
    Ok(requested)
}

/// RK5 trajectory from `initial` over `grid`.
pub fn solve_runge_kutta<F: VectorField + ?Sized>(
    field: &F,
    initial: StateVector,
    grid: &TimeGrid,
    opts: &SimOptions,
) -> SimResult<Trajectory> {
    let steps = check_step_budget(grid, opts)?;
    debug!(steps, h = grid.h(), "runge-kutta 5 solve");
    integrate_fixed_step(&RungeKutta5, field, initial, grid)
}

/// Adams-Moulton PEC trajectory from rest over `grid`.
pub fn solve_adams_moulton<F: VectorField + ?Sized>(
    field: &F,
    grid: &TimeGrid,
    opts: &SimOptions,
) -> SimResult<Trajectory> {
    let steps = check_step_budget(grid, opts)?;
    debug!(steps, h = grid.h(), "adams-moulton solve");
    AdamsMoulton4::default().integrate(field, grid)
}

/// Closed-form trajectory from rest over `grid`; underdamped systems only.
pub fn solve_analytical(
    equation: &EquationModel,
    grid: &TimeGrid,
    opts: &SimOptions,
) -> SimResult<Trajectory> {
    let steps = check_step_budget(grid, opts)?;
    debug!(steps, h = grid.h(), "analytical solve");
    analytical::solve(equation, grid)
}
