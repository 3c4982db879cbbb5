//! Fixed-step one-step integrators.

use osc_core::{Real, StateVector, TimeGrid, Trajectory};

use crate::error::SimResult;
use crate::model::VectorField;

/// Trait for one-step time integrators.
pub trait Integrator {
    /// Advance state by one time step of size `h`.
    fn step<F: VectorField + ?Sized>(
        &self,
        field: &F,
        t: Real,
        y: &StateVector,
        h: Real,
    ) -> SimResult<StateVector>;
}

/// Explicit 6-stage Runge-Kutta scheme of order 5.
///
/// Butcher tableau (the second stage feeds later stages but carries zero weight):
///
/// ```text
///  0   |
///  1/4 | 1/4
///  1/4 | 1/8    1/8
///  1/2 | 0     -1/2    1
///  3/4 | 3/16   0      0      9/16
///  1   | -3/7   2/7    12/7  -12/7   8/7
/// -----+-------------------------------------------
///      | 7/90   0      32/90  12/90  32/90  7/90
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RungeKutta5;

const W1: Real = 7.0 / 90.0;
const W3: Real = 32.0 / 90.0;
const W4: Real = 12.0 / 90.0;
const W5: Real = 32.0 / 90.0;
const W6: Real = 7.0 / 90.0;

impl Integrator for RungeKutta5 {
    fn step<F: VectorField + ?Sized>(
        &self,
        field: &F,
        t: Real,
        y: &StateVector,
        h: Real,
    ) -> SimResult<StateVector> {
        let k1 = field.derivative(t, y)?;

        let y2 = y + k1 * (h / 4.0);
        let k2 = field.derivative(t + h / 4.0, &y2)?;

        let y3 = y + k1 * (h / 8.0) + k2 * (h / 8.0);
        let k3 = field.derivative(t + h / 4.0, &y3)?;

        let y4 = y - k2 * (h / 2.0) + k3 * h;
        let k4 = field.derivative(t + h / 2.0, &y4)?;

        let y5 = y + k1 * (3.0 * h / 16.0) + k4 * (9.0 * h / 16.0);
        let k5 = field.derivative(t + 3.0 * h / 4.0, &y5)?;

        let y6 = y - k1 * (3.0 * h / 7.0) + k2 * (2.0 * h / 7.0) + k3 * (12.0 * h / 7.0)
            - k4 * (12.0 * h / 7.0)
            + k5 * (8.0 * h / 7.0);
        let k6 = field.derivative(t + h, &y6)?;

        Ok(y + (k1 * W1 + k3 * W3 + k4 * W4 + k5 * W5 + k6 * W6) * h)
    }
}

/// Walk `grid` with a one-step integrator.
///
/// Steps use exactly `h` and land on `t0 + i*h`; when `h` does not divide the
/// span, the final step is clipped to `t1 - t`. The last sample is always
/// stamped `t1`. Output holds `ceil((t1-t0)/h) + 1` samples, the first being
/// `(t0, initial)`.
pub fn integrate_fixed_step<I, F>(
    integrator: &I,
    field: &F,
    initial: StateVector,
    grid: &TimeGrid,
) -> SimResult<Trajectory>
where
    I: Integrator + ?Sized,
    F: VectorField + ?Sized,
{
    let steps = grid.step_count();
    let clip_last = !grid.is_aligned();
    let mut trajectory = Trajectory::with_capacity(steps + 1);

    let mut y = initial;
    trajectory.push(grid.t0(), y);

    for i in 0..steps {
        let t = grid.time_at(i);
        let last = i + 1 == steps;
        let h = if last && clip_last {
            grid.t1() - t
        } else {
            grid.h()
        };
        let t_next = if last { grid.t1() } else { grid.time_at(i + 1) };
        y = integrator.step(field, t, &y, h)?;
        trajectory.push(t_next, y);
    }

    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use osc_core::state;

    #[test]
    fn weights_sum_to_one() {
        assert!((W1 + W3 + W4 + W5 + W6 - 1.0).abs() < 1e-15);
    }

    #[test]
    fn exact_for_polynomial_rhs() {
        // x' = v, v' = 6t  =>  x = t^3 for x(0) = v(0) = 0
        let field = |t: Real, y: &StateVector| state(y[1], 6.0 * t);
        let y = RungeKutta5.step(&field, 0.0, &state(0.0, 0.0), 0.5).unwrap();
        assert!((y[0] - 0.125).abs() < 1e-14);
        assert!((y[1] - 0.75).abs() < 1e-14);
    }

    #[test]
    fn exponential_decay_is_fifth_order() {
        let field = |_t: Real, y: &StateVector| state(-y[0], -y[1]);
        let err = |h: Real| {
            let grid = TimeGrid::new(0.0, 1.0, h).unwrap();
            let traj = integrate_fixed_step(&RungeKutta5, &field, state(1.0, 1.0), &grid).unwrap();
            (traj.last().unwrap().x() - (-1.0_f64).exp()).abs()
        };
        let ratio = err(0.1) / err(0.05);
        // order 5 => ratio ~ 32
        assert!(ratio > 20.0 && ratio < 50.0, "ratio = {ratio}");
    }

    #[test]
    fn final_step_is_clipped() {
        let field = |_t: Real, y: &StateVector| state(y[1], -y[0]);
        let grid = TimeGrid::new(0.0, 1.0, 0.3).unwrap();
        let traj = integrate_fixed_step(&RungeKutta5, &field, state(1.0, 0.0), &grid).unwrap();

        assert_eq!(traj.len(), 5);
        let times: Vec<Real> = traj.iter().map(|s| s.t).collect();
        assert_eq!(times[0], 0.0);
        assert!((times[3] - 0.9).abs() < 1e-12);
        assert_eq!(times[4], 1.0);
        assert!((traj.last().unwrap().x() - 1.0_f64.cos()).abs() < 1e-6);
    }
}
