//! Result data types.

use osc_compare::{ComparisonResult, ComplianceReport, Method};
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub problem_name: String,
    pub timestamp: String,
    pub solver_version: String,
    pub grid: GridInfo,
    /// Methods with a stored trajectory, in solve order.
    pub methods: Vec<Method>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceReport>,
    /// Why a method was skipped, and similar remarks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl RunManifest {
    /// Stamp a manifest with the current UTC time.
    pub fn stamped(run_id: RunId, problem_name: String, solver_version: String, grid: GridInfo) -> Self {
        Self {
            run_id,
            problem_name,
            timestamp: chrono::Utc::now().to_rfc3339(),
            solver_version,
            grid,
            methods: Vec::new(),
            comparison: None,
            compliance: None,
            notes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridInfo {
    pub t0_s: f64,
    pub t1_s: f64,
    pub h_s: f64,
    pub steps: usize,
}

/// One sample of a stored trajectory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrajectoryRecord {
    pub time_s: f64,
    pub x_m: f64,
    pub v_m_s: f64,
}
