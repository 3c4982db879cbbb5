//! Closed-form response of the underdamped oscillator started from rest.

use osc_core::{Real, StateVector, TimeGrid, Trajectory, ensure_finite, state};

use crate::equation::{EquationModel, PhysicalParameters};
use crate::error::{SimError, SimResult};

/// `x(t) = e^{alpha t}(C1 cos(beta t) + C2 sin(beta t)) + A cos(omega t) + B sin(omega t)`
///
/// `A`, `B` are the steady-state forced amplitudes; `C1`, `C2` fit the
/// homogeneous part to `x(0) = x'(0) = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnderdampedResponse {
    pub alpha: Real,
    pub beta: Real,
    pub a: Real,
    pub b: Real,
    pub c1: Real,
    pub c2: Real,
    pub omega: Real,
}

impl UnderdampedResponse {
    pub fn new(params: &PhysicalParameters) -> SimResult<Self> {
        let discriminant = params.discriminant();
        if discriminant >= 0.0 {
            return Err(SimError::UnsupportedDampingRegime { discriminant });
        }

        let PhysicalParameters {
            mass: m,
            damping: b,
            stiffness: k,
            force_amplitude: f0,
            omega: w,
        } = *params;

        let alpha = -(b / (2.0 * m));
        let beta = ((b / m).powi(2) / 4.0 - k / m).abs().sqrt();

        let w2 = w * w;
        let amp_a = (f0 / m) / (-w2 + (b * b * w2 / (k * m - w2 * m * m)) + k / m);
        let amp_b = b * w * amp_a / (k - w2 * m);

        let c1 = -amp_a;
        let c2 = (-alpha * c1 - w * amp_b) / beta;

        // Undamped forcing at resonance divides by zero above.
        let finite = |v: Real, what: &'static str| {
            ensure_finite(v, what).map_err(|_| SimError::NumericalDegeneracy { what })
        };
        Ok(Self {
            alpha,
            beta,
            a: finite(amp_a, "forced amplitude A is not finite (resonance)")?,
            b: finite(amp_b, "forced amplitude B is not finite (resonance)")?,
            c1,
            c2: finite(c2, "homogeneous constant C2 is not finite")?,
            omega: w,
        })
    }

    /// `(x(t), x'(t))`.
    pub fn state_at(&self, t: Real) -> StateVector {
        let Self {
            alpha,
            beta,
            a,
            b,
            c1,
            c2,
            omega,
        } = *self;

        let decay = (alpha * t).exp();
        let (sin_bt, cos_bt) = (beta * t).sin_cos();
        let (sin_wt, cos_wt) = (omega * t).sin_cos();

        let x = decay * (c1 * cos_bt + c2 * sin_bt) + a * cos_wt + b * sin_wt;
        let v = decay * ((alpha * c1 + beta * c2) * cos_bt + (alpha * c2 - beta * c1) * sin_bt)
            - a * omega * sin_wt
            + b * omega * cos_wt;
        state(x, v)
    }

    /// Sample `t0 + i*h` for every grid point up to and including `t1`.
    ///
    /// On an aligned grid the last sample is stamped exactly `t1`.
    pub fn sample(&self, grid: &TimeGrid) -> Trajectory {
        let count = grid.whole_steps_from(grid.t0()) + 1;
        let pin_end = grid.is_aligned();
        let mut trajectory = Trajectory::with_capacity(count);
        for i in 0..count {
            let t = if pin_end && i + 1 == count {
                grid.t1()
            } else {
                grid.time_at(i).min(grid.t1())
            };
            trajectory.push(t, self.state_at(t));
        }
        trajectory
    }
}

/// Closed-form trajectory for `equation` from rest over `grid`.
pub fn solve(equation: &EquationModel, grid: &TimeGrid) -> SimResult<Trajectory> {
    let response = UnderdampedResponse::new(equation.params())?;
    Ok(response.sample(grid))
}
