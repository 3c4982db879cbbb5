//! Error types for the osc-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Problem error: {0}")]
    Problem(String),

    #[error("Failed to read problem file: {path}")]
    ProblemFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Problem validation failed: {0}")]
    Validation(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Comparison error: {0}")]
    Comparison(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<osc_project::ProjectError> for AppError {
    fn from(err: osc_project::ProjectError) -> Self {
        match err {
            osc_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Problem(other.to_string()),
        }
    }
}

impl From<osc_project::ValidationError> for AppError {
    fn from(err: osc_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<osc_sim::SimError> for AppError {
    fn from(err: osc_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<osc_core::OscError> for AppError {
    fn from(err: osc_core::OscError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<osc_compare::CompareError> for AppError {
    fn from(err: osc_compare::CompareError) -> Self {
        AppError::Comparison(err.to_string())
    }
}

impl From<osc_results::ResultsError> for AppError {
    fn from(err: osc_results::ResultsError) -> Self {
        match err {
            osc_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
