//! Integration test: three solvers on the forced bridge-deck oscillator.
//!
//! m = 20 t, k = 2.5 MN/m, 1% damping ratio, 4 kN harmonic load at 6.1 rad/s,
//! integrated over 20 s with h = 10 ms.

use osc_core::{Real, StateVector, TimeGrid, state};
use osc_sim::{
    EquationModel, PhysicalParameters, SimError, SimOptions, solve_adams_moulton,
    solve_analytical, solve_runge_kutta,
};
use proptest::prelude::*;

fn bridge() -> EquationModel {
    let params = PhysicalParameters::with_damping_ratio(20_000.0, 2.5e6, 0.01, 4_000.0, 6.1);
    EquationModel::new(params).unwrap()
}

fn relative_pct(value: Real, reference: Real) -> Real {
    (value - reference).abs() / reference.abs() * 100.0
}

#[test]
fn bridge_three_way_agreement() {
    let eq = bridge();
    let grid = TimeGrid::new(0.0, 20.0, 0.01).unwrap();
    let opts = SimOptions::default();

    let exact = solve_analytical(&eq, &grid, &opts).unwrap();
    let rk = solve_runge_kutta(&eq, StateVector::zeros(), &grid, &opts).unwrap();
    let am = solve_adams_moulton(&eq, &grid, &opts).unwrap();

    assert_eq!(exact.len(), 2001);
    assert_eq!(rk.len(), 2001);
    assert_eq!(am.len(), 2001);

    let mid = rk.len() / 2;
    let (e, r, a) = (exact.get(mid).unwrap(), rk.get(mid).unwrap(), am.get(mid).unwrap());
    assert_eq!(e.t, r.t);
    assert_eq!(r.t, a.t);
    assert!((r.t - 10.0).abs() < 1e-12);

    assert!(relative_pct(r.x(), e.x()) < 1.0);
    assert!(relative_pct(a.x(), e.x()) < 1.0);
}

#[test]
fn runge_kutta_trajectory_shape() {
    let eq = bridge();
    let grid = TimeGrid::new(0.5, 3.0, 0.07).unwrap();
    let y0 = state(0.001, -0.02);
    let rk = solve_runge_kutta(&eq, y0, &grid, &SimOptions::default()).unwrap();

    let first = rk.first().unwrap();
    assert_eq!(first.t, 0.5);
    assert_eq!(first.y, y0);
    assert_eq!(rk.last().unwrap().t, 3.0);
    assert_eq!(rk.len(), ((3.0_f64 - 0.5) / 0.07).ceil() as usize + 1);
    assert!(rk.samples().windows(2).all(|w| w[1].t > w[0].t));
}

#[test]
fn free_undamped_energy_is_conserved() {
    let (m, k) = (3.0, 12.0);
    let params = PhysicalParameters {
        mass: m,
        damping: 0.0,
        stiffness: k,
        force_amplitude: 0.0,
        omega: 0.0,
    };
    let eq = EquationModel::new(params).unwrap();
    let grid = TimeGrid::new(0.0, 100.0, 0.01).unwrap();
    let rk = solve_runge_kutta(&eq, state(1.0, 0.0), &grid, &SimOptions::default()).unwrap();

    let energy = |y: &StateVector| 0.5 * m * y[1] * y[1] + 0.5 * k * y[0] * y[0];
    let e0 = energy(&rk.first().unwrap().y);
    let drift = rk
        .iter()
        .map(|s| (energy(&s.y) - e0).abs() / e0)
        .fold(0.0, Real::max);
    assert!(drift < 1e-8, "relative energy drift = {drift}");
}

#[test]
fn adams_moulton_shares_bootstrap() {
    let eq = bridge();
    let grid = TimeGrid::new(0.0, 5.0, 0.02).unwrap();
    let opts = SimOptions::default();
    let rk = solve_runge_kutta(&eq, StateVector::zeros(), &grid, &opts).unwrap();
    let am = solve_adams_moulton(&eq, &grid, &opts).unwrap();

    assert_eq!(&am.samples()[..4], &rk.samples()[..4]);
}

#[test]
fn step_ceiling_is_enforced_up_front() {
    let eq = bridge();
    let grid = TimeGrid::new(0.0, 20.0, 0.01).unwrap();
    let opts = SimOptions { max_steps: 1_000 };

    assert!(matches!(
        solve_runge_kutta(&eq, StateVector::zeros(), &grid, &opts),
        Err(SimError::ExcessiveIterationCount { requested: 2000, limit: 1000 })
    ));
    assert!(matches!(
        solve_adams_moulton(&eq, &grid, &opts),
        Err(SimError::ExcessiveIterationCount { .. })
    ));
    assert!(matches!(
        solve_analytical(&eq, &grid, &opts),
        Err(SimError::ExcessiveIterationCount { .. })
    ));
}

proptest! {
    #[test]
    fn analytical_regime_follows_discriminant(
        m in 0.1_f64..1.0e4,
        k in 0.1_f64..1.0e6,
        zeta in 0.0_f64..3.0,
    ) {
        let params = PhysicalParameters::with_damping_ratio(m, k, zeta, 1.0, 0.5);
        let eq = EquationModel::new(params).unwrap();
        let grid = TimeGrid::new(0.0, 1.0, 0.1).unwrap();
        let result = solve_analytical(&eq, &grid, &SimOptions::default());

        let b = params.damping;
        if b * b >= 4.0 * k * m * (1.0 + 1e-9) {
            let is_regime_error = matches!(result, Err(SimError::UnsupportedDampingRegime { .. }));
            prop_assert!(is_regime_error);
        } else if b * b < 4.0 * k * m * (1.0 - 1e-9) {
            let is_regime_error = matches!(result, Err(SimError::UnsupportedDampingRegime { .. }));
            prop_assert!(!is_regime_error);
        }
    }

    #[test]
    fn runge_kutta_length_is_ceil_plus_one(
        span in 0.05_f64..5.0,
        h in 0.01_f64..0.5,
    ) {
        let eq = bridge();
        let grid = TimeGrid::new(0.0, span, h).unwrap();
        let rk = solve_runge_kutta(&eq, StateVector::zeros(), &grid, &SimOptions::default()).unwrap();
        prop_assert_eq!(rk.len(), grid.step_count() + 1);
        prop_assert_eq!(rk.last().unwrap().t, span);
    }
}
