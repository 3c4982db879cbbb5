//! Run execution and caching service.

use std::path::Path;

use osc_compare::{ComparisonEngine, ComparisonResult, ComplianceReport, Method, check_compliance};
use osc_core::Trajectory;
use osc_project::schema::ProblemDef;
use osc_results::{GridInfo, RunManifest, RunStore, TrajectoryRecord};
use osc_sim::adams::BOOTSTRAP_SAMPLES;
use osc_sim::{solve_adams_moulton, solve_analytical, solve_runge_kutta};
use tracing::{info, warn};

use crate::error::AppResult;
use crate::problem_service;

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub problem_path: &'a Path,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
}

/// Trajectories of every method that applies, plus their comparison.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub trajectories: Vec<(Method, Trajectory)>,
    /// Absent when the comparison itself failed; the reason is in `notes`.
    pub comparison: Option<ComparisonResult>,
    /// Checked on the RK5 trajectory, which every problem has.
    pub compliance: ComplianceReport,
    pub notes: Vec<String>,
}

impl SolveOutcome {
    pub fn trajectory(&self, method: Method) -> Option<&Trajectory> {
        self.trajectories
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, t)| t)
    }
}

fn note(notes: &mut Vec<String>, message: String) {
    warn!("{}", message);
    notes.push(message);
}

/// Solve a validated problem with every applicable method and compare.
///
/// The analytical and Adams-Moulton solvers start from rest, so both are
/// skipped for a non-zero initial state. The analytical solver is also
/// skipped outside the underdamped regime.
pub fn solve_problem(problem: &ProblemDef) -> AppResult<SolveOutcome> {
    problem_service::validate_problem(problem)?;
    let equation = problem_service::equation_model(problem)?;
    let grid = problem_service::time_grid(problem)?;
    let opts = problem_service::sim_options(problem);
    let at_rest = problem.starts_at_rest();
    let mut notes = Vec::new();
    let mut trajectories = Vec::with_capacity(Method::ALL.len());

    info!(name = %problem.name, steps = grid.step_count(), "solving problem");

    if !at_rest {
        note(
            &mut notes,
            "analytical solution skipped: defined only for a system starting at rest".to_string(),
        );
    } else if !equation.params().is_underdamped() {
        note(
            &mut notes,
            format!(
                "analytical solution skipped: system is not underdamped (discriminant {:e})",
                equation.params().discriminant()
            ),
        );
    } else {
        trajectories.push((Method::Analytical, solve_analytical(&equation, &grid, &opts)?));
    }

    let initial = problem_service::initial_state(problem);
    let rk = solve_runge_kutta(&equation, initial, &grid, &opts)?;
    let compliance = check_compliance(&rk, problem.compliance.threshold_m)?;
    trajectories.push((Method::RungeKutta5, rk));

    if !at_rest {
        note(
            &mut notes,
            "Adams-Moulton skipped: bootstrap starts from rest".to_string(),
        );
    } else if grid.whole_steps_from(grid.t0()) < BOOTSTRAP_SAMPLES - 1 {
        note(
            &mut notes,
            "Adams-Moulton skipped: time span shorter than its bootstrap".to_string(),
        );
    } else {
        trajectories.push((Method::AdamsMoulton4, solve_adams_moulton(&equation, &grid, &opts)?));
    }

    let solved = |method: Method| trajectories.iter().any(|(m, _)| *m == method);
    let default_reference = if solved(Method::Analytical) {
        Method::Analytical
    } else {
        Method::RungeKutta5
    };
    let reference = match problem.comparison.reference.map(problem_service::method_from_def) {
        Some(method) if solved(method) => method,
        Some(method) => {
            note(
                &mut notes,
                format!(
                    "{} was not solved; comparing against {}",
                    method.label(),
                    default_reference.label()
                ),
            );
            default_reference
        }
        None => default_reference,
    };

    // On a grid that h does not divide, RK5 ends on a clipped step while the
    // others stop at the last whole step; only equal lengths are comparable.
    let ref_len = trajectories
        .iter()
        .find(|(m, _)| *m == reference)
        .map(|(_, t)| t.len());
    let mut comparable: Vec<(Method, &Trajectory)> = Vec::with_capacity(trajectories.len());
    let mut excluded = Vec::new();
    for (method, traj) in &trajectories {
        if ref_len.is_none_or(|len| len == traj.len()) {
            comparable.push((*method, traj));
        } else {
            excluded.push(*method);
        }
    }
    for method in excluded {
        note(
            &mut notes,
            format!("{} left out of comparison: different sample count", method.label()),
        );
    }

    let engine = ComparisonEngine::new(problem_service::compare_options(problem));
    let comparison = match engine.compare(&comparable, Some(reference)) {
        Ok(result) => Some(result),
        Err(err) => {
            note(&mut notes, format!("comparison unavailable: {}", err));
            None
        }
    };

    Ok(SolveOutcome {
        trajectories,
        comparison,
        compliance,
        notes,
    })
}

fn to_records(trajectory: &Trajectory) -> Vec<TrajectoryRecord> {
    trajectory
        .iter()
        .map(|s| TrajectoryRecord {
            time_s: s.t,
            x_m: s.x(),
            v_m_s: s.v(),
        })
        .collect()
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let problem = problem_service::load_problem(request.problem_path)?;
    let run_id = osc_results::compute_run_id(&problem, &request.options.solver_version);
    let store = RunStore::for_problem(request.problem_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        info!(%run_id, "loaded run from cache");
        let manifest = store.load_manifest(&run_id)?;
        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
        });
    }

    let outcome = solve_problem(&problem)?;
    let grid = problem_service::time_grid(&problem)?;

    let mut manifest = RunManifest::stamped(
        run_id.clone(),
        problem.name.clone(),
        request.options.solver_version.clone(),
        GridInfo {
            t0_s: grid.t0(),
            t1_s: grid.t1(),
            h_s: grid.h(),
            steps: grid.step_count(),
        },
    );
    manifest.methods = outcome.trajectories.iter().map(|(m, _)| *m).collect();
    manifest.comparison = outcome.comparison.clone();
    manifest.compliance = Some(outcome.compliance.clone());
    manifest.notes = outcome.notes.clone();

    let records: Vec<(Method, Vec<TrajectoryRecord>)> = outcome
        .trajectories
        .iter()
        .map(|(m, t)| (*m, to_records(t)))
        .collect();
    store.save_run(&manifest, &records)?;
    info!(%run_id, "run saved");

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
    })
}

/// Cached runs for a problem file, most recent first.
pub fn list_runs(problem_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_problem(problem_path)?;

    let mut runs = store.list_runs()?;
    runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(runs)
}

pub fn load_run(problem_path: &Path, run_id: &str) -> AppResult<RunManifest> {
    let store = RunStore::for_problem(problem_path)?;
    Ok(store.load_manifest(run_id)?)
}

pub fn load_trajectory(
    problem_path: &Path,
    run_id: &str,
    method: Method,
) -> AppResult<Vec<TrajectoryRecord>> {
    let store = RunStore::for_problem(problem_path)?;
    Ok(store.load_trajectory(run_id, method)?)
}
