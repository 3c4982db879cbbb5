//! Adams-Bashforth / Adams-Moulton predictor-corrector.

use std::collections::VecDeque;

use osc_core::{Real, StateVector, TimeGrid, Trajectory};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::integrator::{RungeKutta5, integrate_fixed_step};
use crate::model::VectorField;

/// Samples produced by the bootstrap integrator before the multistep loop starts.
pub const BOOTSTRAP_SAMPLES: usize = 4;

/// How many times the corrector is applied per step.
///
/// Only predict-evaluate-correct is offered. Iterating the corrector to a fixed
/// point gives a different trajectory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CorrectorMode {
    /// Predict once, evaluate, correct once (PEC).
    #[default]
    SinglePass,
}

/// 4-step Adams-Bashforth predictor with a 3-step Adams-Moulton corrector.
///
/// The first four samples come from [`RungeKutta5`] with the same step, so the
/// head of the trajectory is bit-identical to an RK5 run from rest.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdamsMoulton4 {
    pub corrector: CorrectorMode,
}

impl AdamsMoulton4 {
    pub fn new(corrector: CorrectorMode) -> Self {
        Self { corrector }
    }

    /// Integrate from rest `(0, 0)` over `grid`.
    ///
    /// After the bootstrap, `floor((t1 - t3) / h)` steps are taken on the grid
    /// `t0 + i*h`, so the last sample never passes `t1`.
    pub fn integrate<F: VectorField + ?Sized>(
        &self,
        field: &F,
        grid: &TimeGrid,
    ) -> SimResult<Trajectory> {
        let h = grid.h();
        let bootstrap_steps = BOOTSTRAP_SAMPLES - 1;
        if grid.whole_steps_from(grid.t0()) < bootstrap_steps {
            return Err(SimError::InvalidArg {
                what: "time span shorter than the three bootstrap steps",
            });
        }

        let bootstrap_grid = grid.with_end(grid.time_at(bootstrap_steps))?;
        let head = integrate_fixed_step(&RungeKutta5, field, StateVector::zeros(), &bootstrap_grid)?;

        let t_last = grid.time_at(bootstrap_steps);
        let steps = grid.whole_steps_from(t_last);
        debug!(bootstrap = head.len(), steps, "adams-moulton start");

        let mut trajectory = Trajectory::with_capacity(head.len() + steps);
        // Derivatives f_{n-3}, f_{n-2}, f_{n-1}, f_n, oldest first.
        let mut history: VecDeque<StateVector> = VecDeque::with_capacity(BOOTSTRAP_SAMPLES);
        for sample in &head {
            history.push_back(field.derivative(sample.t, &sample.y)?);
            trajectory.push(sample.t, sample.y);
        }

        let mut y = head.last().map(|s| s.y).unwrap_or_else(StateVector::zeros);
        for i in 0..steps {
            let t_next = grid.time_at(bootstrap_steps + i + 1);
            y = self.advance(field, t_next, &y, &history, h)?;
            trajectory.push(t_next, y);

            history.pop_front();
            history.push_back(field.derivative(t_next, &y)?);
        }

        Ok(trajectory)
    }

    fn advance<F: VectorField + ?Sized>(
        &self,
        field: &F,
        t_next: Real,
        y_n: &StateVector,
        history: &VecDeque<StateVector>,
        h: Real,
    ) -> SimResult<StateVector> {
        let (f_n3, f_n2, f_n1, f_n) = (history[0], history[1], history[2], history[3]);

        let y_pred = y_n + (f_n * 55.0 - f_n1 * 59.0 + f_n2 * 37.0 - f_n3 * 9.0) * (h / 24.0);

        match self.corrector {
            CorrectorMode::SinglePass => {
                let f_pred = field.derivative(t_next, &y_pred)?;
                Ok(y_n + (f_pred * 9.0 + f_n * 19.0 - f_n1 * 5.0 + f_n2) * (h / 24.0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osc_core::state;

    fn forced(t: Real, y: &StateVector) -> StateVector {
        state(y[1], -4.0 * y[0] - 0.2 * y[1] + (1.5 * t).cos())
    }

    #[test]
    fn head_matches_runge_kutta() {
        let grid = TimeGrid::new(0.0, 2.0, 0.05).unwrap();
        let am = AdamsMoulton4::default().integrate(&forced, &grid).unwrap();
        let rk = integrate_fixed_step(&RungeKutta5, &forced, StateVector::zeros(), &grid).unwrap();

        for i in 0..BOOTSTRAP_SAMPLES {
            assert_eq!(am.get(i), rk.get(i));
        }
    }

    #[test]
    fn length_and_end_time() {
        let grid = TimeGrid::new(0.0, 2.0, 0.05).unwrap();
        let am = AdamsMoulton4::default().integrate(&forced, &grid).unwrap();
        assert_eq!(am.len(), 41);
        assert!((am.last().unwrap().t - 2.0).abs() < 1e-12);

        // floor: a ragged end is not reached
        let grid = TimeGrid::new(0.0, 1.0, 0.3).unwrap();
        let am = AdamsMoulton4::default().integrate(&forced, &grid).unwrap();
        assert_eq!(am.len(), 4);
        assert!(am.last().unwrap().t <= 1.0);
    }

    #[test]
    fn tracks_runge_kutta() {
        let grid = TimeGrid::new(0.0, 10.0, 0.01).unwrap();
        let am = AdamsMoulton4::default().integrate(&forced, &grid).unwrap();
        let rk = integrate_fixed_step(&RungeKutta5, &forced, StateVector::zeros(), &grid).unwrap();
        assert_eq!(am.len(), rk.len());

        let max_err = am
            .iter()
            .zip(rk.iter())
            .map(|(a, r)| (a.x() - r.x()).abs())
            .fold(0.0, Real::max);
        assert!(max_err < 1e-6, "max_err = {max_err}");
    }

    #[test]
    fn rejects_span_shorter_than_bootstrap() {
        let grid = TimeGrid::new(0.0, 0.1, 0.05).unwrap();
        let err = AdamsMoulton4::default().integrate(&forced, &grid).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }
}
