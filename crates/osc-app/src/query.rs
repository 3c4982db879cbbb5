//! Query helpers for stored trajectories.

use std::str::FromStr;

use osc_results::{RunManifest, TrajectoryRecord};

use crate::error::{AppError, AppResult};

/// Most points a decimated series keeps, give or take one stride.
pub const MAX_SERIES_POINTS: usize = 1000;

/// Summary of one stored trajectory.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub record_count: usize,
    pub peak_abs_displacement: f64,
}

/// Exportable trajectory component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Displacement,
    Velocity,
}

impl Variable {
    pub fn column(self) -> &'static str {
        match self {
            Variable::Displacement => "x_m",
            Variable::Velocity => "v_m_s",
        }
    }

    fn of(self, record: &TrajectoryRecord) -> f64 {
        match self {
            Variable::Displacement => record.x_m,
            Variable::Velocity => record.v_m_s,
        }
    }
}

impl FromStr for Variable {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "x_m" | "displacement" => Ok(Variable::Displacement),
            "v" | "v_m_s" | "velocity" => Ok(Variable::Velocity),
            other => Err(AppError::InvalidInput(format!(
                "Unknown variable: {} (expected x or v)",
                other
            ))),
        }
    }
}

pub fn get_run_summary(records: &[TrajectoryRecord]) -> AppResult<RunSummary> {
    if records.is_empty() {
        return Err(AppError::InvalidInput("No records in trajectory".to_string()));
    }

    let t_min = records.first().map(|r| r.time_s).unwrap_or(0.0);
    let t_max = records.last().map(|r| r.time_s).unwrap_or(0.0);
    let peak = records.iter().map(|r| r.x_m.abs()).fold(0.0, f64::max);

    Ok(RunSummary {
        time_range: (t_min, t_max),
        record_count: records.len(),
        peak_abs_displacement: peak,
    })
}

/// Every `max(1, len / 1000)`-th record, starting with the first.
pub fn decimate(records: &[TrajectoryRecord]) -> Vec<&TrajectoryRecord> {
    let step = (records.len() / MAX_SERIES_POINTS).max(1);
    records.iter().step_by(step).collect()
}

/// Decimated `(t, value)` series for one variable.
pub fn extract_series(records: &[TrajectoryRecord], variable: Variable) -> Vec<(f64, f64)> {
    decimate(records)
        .into_iter()
        .map(|r| (r.time_s, variable.of(r)))
        .collect()
}

pub fn series_csv(series: &[(f64, f64)], variable: Variable) -> String {
    let mut csv = format!("time_s,{}\n", variable.column());
    for (t, val) in series {
        csv.push_str(&format!("{},{}\n", t, val));
    }
    csv
}

/// Text block describing a stored run.
pub fn describe_manifest(manifest: &RunManifest) -> String {
    let mut out = String::new();
    out.push_str(&format!("Run {} ({})\n", manifest.run_id, manifest.timestamp));
    out.push_str(&format!("  Problem: {}\n", manifest.problem_name));
    out.push_str(&format!("  Solver version: {}\n", manifest.solver_version));
    out.push_str(&format!(
        "  Grid: {} .. {} s, h = {} s, {} steps\n",
        manifest.grid.t0_s, manifest.grid.t1_s, manifest.grid.h_s, manifest.grid.steps
    ));
    let methods: Vec<&str> = manifest.methods.iter().map(|m| m.slug()).collect();
    out.push_str(&format!("  Methods: {}\n", methods.join(", ")));
    match &manifest.comparison {
        Some(comparison) => {
            out.push('\n');
            out.push_str(&comparison.to_string());
            for method in &manifest.methods {
                if comparison.get(*method).is_none() {
                    out.push_str(&format!("{:<26} NOT COMPARED (see notes)\n", method.label()));
                }
            }
        }
        None if !manifest.methods.is_empty() => {
            out.push_str("\nComparison unavailable (see notes)\n");
        }
        None => {}
    }
    if let Some(c) = &manifest.compliance {
        out.push_str(&format!(
            "\nPeak |x| = {:.4} m at t = {:.3} s (limit {} m): {}\n",
            c.peak_abs_displacement,
            c.t_at_peak,
            c.threshold,
            if c.exceeded { "EXCEEDED" } else { "within limit" }
        ));
    }
    for note in &manifest.notes {
        out.push_str(&format!("  note: {}\n", note));
    }
    out
}
