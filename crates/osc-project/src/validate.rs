//! Problem validation logic.

use osc_core::TimeGrid;

use crate::schema::{DampingDef, ProblemDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Too many steps: {steps} exceeds limits.max_steps = {max_steps}")]
    TooManySteps { steps: usize, max_steps: usize },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, value, "must be non-negative and finite"));
    }
    Ok(())
}

pub fn validate_problem(problem: &ProblemDef) -> Result<(), ValidationError> {
    if problem.version == 0 || problem.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: problem.version,
        });
    }

    let p = &problem.parameters;
    positive("parameters.mass_kg", p.mass_kg)?;
    positive("parameters.stiffness_n_per_m", p.stiffness_n_per_m)?;
    match p.damping {
        DampingDef::Coefficient { b_n_s_per_m } => {
            non_negative("parameters.damping.b_n_s_per_m", b_n_s_per_m)?
        }
        DampingDef::Ratio { zeta } => non_negative("parameters.damping.zeta", zeta)?,
    }
    non_negative("parameters.force_amplitude_n", p.force_amplitude_n)?;
    non_negative("parameters.omega_rad_s", p.omega_rad_s)?;

    let t = &problem.time;
    if !t.t0_s.is_finite() {
        return Err(invalid("time.t0_s", t.t0_s, "must be finite"));
    }
    positive("time.h_s", t.h_s)?;
    if !t.t1_s.is_finite() || t.t1_s <= t.t0_s {
        return Err(invalid("time.t1_s", t.t1_s, "must be finite and greater than t0_s"));
    }

    if problem.limits.max_steps == 0 {
        return Err(ValidationError::InvalidValue {
            field: "limits.max_steps".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    let grid = TimeGrid::new(t.t0_s, t.t1_s, t.h_s).map_err(|e| ValidationError::InvalidValue {
        field: "time".to_string(),
        value: format!("[{}, {}] step {}", t.t0_s, t.t1_s, t.h_s),
        reason: e.to_string(),
    })?;
    let steps = grid.step_count();
    if steps > problem.limits.max_steps {
        return Err(ValidationError::TooManySteps {
            steps,
            max_steps: problem.limits.max_steps,
        });
    }

    if let Some([x0, v0]) = problem.initial_state {
        if !x0.is_finite() || !v0.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "initial_state".to_string(),
                value: format!("[{x0}, {v0}]"),
                reason: "must be finite".to_string(),
            });
        }
    }

    non_negative("compliance.threshold_m", problem.compliance.threshold_m)?;

    Ok(())
}
