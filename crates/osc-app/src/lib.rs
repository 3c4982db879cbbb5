//! Shared application service layer for the oscillator workbench.
//!
//! Loads problem files, runs the three solvers, compares them, caches runs,
//! and prepares series for export.

pub mod error;
pub mod problem_service;
pub mod query;
pub mod run_service;

pub use error::{AppError, AppResult};
pub use problem_service::{
    ProblemSummary, load_problem, save_problem, summarize_problem, validate_problem,
};
pub use query::{
    RunSummary, Variable, decimate, describe_manifest, extract_series, get_run_summary, series_csv,
};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, SolveOutcome, ensure_run, list_runs, load_run,
    load_trajectory, solve_problem,
};
