//! Problem schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemDef {
    pub version: u32,
    pub name: String,
    pub parameters: ParametersDef,
    pub time: TimeDef,
    /// `[x0, v0]`; absent means the system starts at rest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<[f64; 2]>,
    #[serde(default)]
    pub output: OutputDef,
    #[serde(default)]
    pub compliance: ComplianceDef,
    #[serde(default)]
    pub limits: LimitsDef,
    #[serde(default)]
    pub comparison: ComparisonDef,
}

impl ProblemDef {
    /// Bridge deck under periodic pedestrian load.
    pub fn bridge_example() -> Self {
        Self {
            version: crate::validate::LATEST_VERSION,
            name: "Bridge deck".to_string(),
            parameters: ParametersDef {
                mass_kg: 20_000.0,
                stiffness_n_per_m: 2.5e6,
                damping: DampingDef::Ratio { zeta: 0.01 },
                force_amplitude_n: 4_000.0,
                omega_rad_s: 6.1,
            },
            time: TimeDef {
                t0_s: 0.0,
                t1_s: 20.0,
                h_s: 0.01,
            },
            initial_state: None,
            output: OutputDef::default(),
            compliance: ComplianceDef::default(),
            limits: LimitsDef::default(),
            comparison: ComparisonDef::default(),
        }
    }

    /// True when no initial state is given or it is `[0, 0]`.
    pub fn starts_at_rest(&self) -> bool {
        self.initial_state.is_none_or(|[x, v]| x == 0.0 && v == 0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParametersDef {
    pub mass_kg: f64,
    pub stiffness_n_per_m: f64,
    pub damping: DampingDef,
    #[serde(default)]
    pub force_amplitude_n: f64,
    #[serde(default)]
    pub omega_rad_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DampingDef {
    /// Viscous damping coefficient `b`.
    Coefficient { b_n_s_per_m: f64 },
    /// Damping ratio `zeta`, `b = 2 zeta sqrt(k m)`.
    Ratio { zeta: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    pub t0_s: f64,
    pub t1_s: f64,
    pub h_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputDef {
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceDef {
    #[serde(default = "default_threshold_m")]
    pub threshold_m: f64,
}

impl Default for ComplianceDef {
    fn default() -> Self {
        Self {
            threshold_m: default_threshold_m(),
        }
    }
}

fn default_threshold_m() -> f64 {
    0.04
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitsDef {
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for LimitsDef {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

fn default_max_steps() -> usize {
    100_000
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ComparisonDef {
    /// Reference method; defaults to analytical when available, else RK5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<MethodDef>,
    #[serde(default)]
    pub zero_reference: ZeroReferenceDef,
    /// Upper bound on the representative sample index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MethodDef {
    Analytical,
    RungeKutta5,
    AdamsMoulton4,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ZeroReferenceDef {
    #[default]
    Reject,
    AbsoluteFallback,
}
