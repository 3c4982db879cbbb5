//! Problem loading, saving, validation, and translation to solver inputs.

use std::path::Path;

use osc_compare::{CompareOptions, Method, RepresentativeIndex, ZeroReferencePolicy};
use osc_core::{StateVector, TimeGrid, state};
use osc_project::schema::{DampingDef, MethodDef, ProblemDef, ZeroReferenceDef};
use osc_sim::equation::damping_from_ratio;
use osc_sim::{EquationModel, PhysicalParameters, SimOptions};

use crate::error::{AppError, AppResult};

/// What a problem describes, for display.
#[derive(Debug, Clone)]
pub struct ProblemSummary {
    pub name: String,
    pub damping_n_s_per_m: f64,
    pub discriminant: f64,
    pub underdamped: bool,
    pub equation: String,
    pub steps: usize,
    pub starts_at_rest: bool,
}

/// Load a problem file (YAML, or JSON by extension) and validate it.
pub fn load_problem(path: &Path) -> AppResult<ProblemDef> {
    if !path.exists() {
        return Err(AppError::ProblemFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        });
    }
    Ok(osc_project::load(path)?)
}

pub fn save_problem(path: &Path, problem: &ProblemDef) -> AppResult<()> {
    osc_project::save_yaml(path, problem)?;
    Ok(())
}

/// Schema validation plus the solver-side parameter checks.
pub fn validate_problem(problem: &ProblemDef) -> AppResult<()> {
    osc_project::validate_problem(problem)?;
    equation_model(problem)?;
    time_grid(problem)?;
    Ok(())
}

pub fn physical_parameters(problem: &ProblemDef) -> PhysicalParameters {
    let p = &problem.parameters;
    let damping = match p.damping {
        DampingDef::Coefficient { b_n_s_per_m } => b_n_s_per_m,
        DampingDef::Ratio { zeta } => damping_from_ratio(p.mass_kg, p.stiffness_n_per_m, zeta),
    };
    PhysicalParameters {
        mass: p.mass_kg,
        damping,
        stiffness: p.stiffness_n_per_m,
        force_amplitude: p.force_amplitude_n,
        omega: p.omega_rad_s,
    }
}

pub fn equation_model(problem: &ProblemDef) -> AppResult<EquationModel> {
    Ok(EquationModel::new(physical_parameters(problem))?)
}

pub fn time_grid(problem: &ProblemDef) -> AppResult<TimeGrid> {
    let t = &problem.time;
    Ok(TimeGrid::new(t.t0_s, t.t1_s, t.h_s)?)
}

pub fn initial_state(problem: &ProblemDef) -> StateVector {
    match problem.initial_state {
        Some([x, v]) => state(x, v),
        None => StateVector::zeros(),
    }
}

pub fn sim_options(problem: &ProblemDef) -> SimOptions {
    SimOptions {
        max_steps: problem.limits.max_steps,
    }
}

pub fn compare_options(problem: &ProblemDef) -> CompareOptions {
    let c = &problem.comparison;
    CompareOptions {
        index: match c.max_index {
            Some(max_index) => RepresentativeIndex::CappedMidpoint { max_index },
            None => RepresentativeIndex::Midpoint,
        },
        zero_policy: match c.zero_reference {
            ZeroReferenceDef::Reject => ZeroReferencePolicy::Reject,
            ZeroReferenceDef::AbsoluteFallback => ZeroReferencePolicy::AbsoluteFallback,
        },
        precision: problem.output.precision,
        ..CompareOptions::default()
    }
}

pub fn method_from_def(def: MethodDef) -> Method {
    match def {
        MethodDef::Analytical => Method::Analytical,
        MethodDef::RungeKutta5 => Method::RungeKutta5,
        MethodDef::AdamsMoulton4 => Method::AdamsMoulton4,
    }
}

pub fn summarize_problem(problem: &ProblemDef) -> AppResult<ProblemSummary> {
    let equation = equation_model(problem)?;
    let grid = time_grid(problem)?;
    let params = equation.params();
    Ok(ProblemSummary {
        name: problem.name.clone(),
        damping_n_s_per_m: params.damping,
        discriminant: params.discriminant(),
        underdamped: params.is_underdamped(),
        equation: equation.normalized_equation(problem.output.precision),
        steps: grid.step_count(),
        starts_at_rest: problem.starts_at_rest(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_damping_is_converted() {
        let problem = ProblemDef::bridge_example();
        let params = physical_parameters(&problem);
        // 2 * 0.01 * sqrt(2.5e6 * 2e4)
        assert!((params.damping - 4472.135954999579).abs() < 1e-9);
    }

    #[test]
    fn coefficient_damping_is_passed_through() {
        let mut problem = ProblemDef::bridge_example();
        problem.parameters.damping = DampingDef::Coefficient { b_n_s_per_m: 1234.5 };
        assert_eq!(physical_parameters(&problem).damping, 1234.5);
    }

    #[test]
    fn options_follow_problem() {
        let mut problem = ProblemDef::bridge_example();
        problem.comparison.max_index = Some(250);
        problem.comparison.zero_reference = ZeroReferenceDef::AbsoluteFallback;
        problem.output.precision = 3;
        let opts = compare_options(&problem);
        assert_eq!(opts.index, RepresentativeIndex::CappedMidpoint { max_index: 250 });
        assert_eq!(opts.zero_policy, ZeroReferencePolicy::AbsoluteFallback);
        assert_eq!(opts.precision, 3);
        assert_eq!(sim_options(&problem).max_steps, 100_000);
    }

    #[test]
    fn summary_of_bridge() {
        let summary = summarize_problem(&ProblemDef::bridge_example()).unwrap();
        assert!(summary.underdamped);
        assert_eq!(summary.steps, 2000);
        assert!(summary.starts_at_rest);
        assert!(summary.equation.starts_with("x'' + 0.22361x' + 125.00000x = 0.20000cos("));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_problem(Path::new("/nonexistent/problem.yaml")).unwrap_err();
        assert!(matches!(err, AppError::ProblemFileRead { .. }));
    }
}
