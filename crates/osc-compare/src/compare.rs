//! Representative-sample comparison between trajectories.

use core::fmt;

use osc_core::{Real, Tolerances, Trajectory, nearly_equal};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CompareError, CompareResult};
use crate::method::Method;

/// Which sample index represents a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepresentativeIndex {
    /// `floor(len / 2)`
    #[default]
    Midpoint,
    /// `min(floor(len / 2), max_index)`
    CappedMidpoint { max_index: usize },
}

impl RepresentativeIndex {
    pub fn resolve(self, len: usize) -> usize {
        let mid = len / 2;
        match self {
            RepresentativeIndex::Midpoint => mid,
            RepresentativeIndex::CappedMidpoint { max_index } => mid.min(max_index),
        }
    }
}

/// What to do when the reference value is too close to zero to divide by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroReferencePolicy {
    /// Fail with [`CompareError::NumericalDegeneracy`].
    #[default]
    Reject,
    /// Report `|value - reference|` as [`Deviation::Absolute`].
    AbsoluteFallback,
}

#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub index: RepresentativeIndex,
    pub zero_policy: ZeroReferencePolicy,
    /// Absolute floor: `|reference| <= zero_threshold` always counts as zero.
    pub zero_threshold: Real,
    /// Cutoff relative to the reference trajectory's peak `|x|`; the larger of
    /// the two cutoffs applies.
    pub zero_rel: Real,
    /// Decimals used when rendering values.
    pub precision: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            index: RepresentativeIndex::default(),
            zero_policy: ZeroReferencePolicy::default(),
            zero_threshold: 1e-12,
            zero_rel: 1e-6,
            precision: 5,
        }
    }
}

/// Deviation of one method from the reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Deviation {
    /// `|value - reference| / |reference| * 100`
    Percent(Real),
    /// `|value - reference|`, used when the reference is zero.
    Absolute(Real),
}

impl Deviation {
    pub fn percent(self) -> Option<Real> {
        match self {
            Deviation::Percent(p) => Some(p),
            Deviation::Absolute(_) => None,
        }
    }
}

/// Displacement of one method at the representative sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodValue {
    pub method: Method,
    pub value: Real,
    pub deviation: Deviation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub index: usize,
    pub t_mid: Real,
    pub reference: Method,
    /// One entry per input trajectory, in input order.
    pub values: Vec<MethodValue>,
    pub precision: usize,
}

impl ComparisonResult {
    pub fn get(&self, method: Method) -> Option<&MethodValue> {
        self.values.iter().find(|v| v.method == method)
    }

    pub fn value(&self, method: Method) -> Option<Real> {
        self.get(method).map(|v| v.value)
    }

    pub fn deviation(&self, method: Method) -> Option<Deviation> {
        self.get(method).map(|v| v.deviation)
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision;
        writeln!(f, "{:<26} {:>16} {:>18}", "Method", format!("x({:.p$})", self.t_mid), "Deviation")?;
        for v in &self.values {
            let deviation = if v.method == self.reference {
                "0 (reference)".to_string()
            } else {
                match v.deviation {
                    Deviation::Percent(pct) => format!("{pct:.4} %"),
                    Deviation::Absolute(abs) => format!("{abs:.p$e} (abs)"),
                }
            };
            writeln!(f, "{:<26} {:>16.p$} {:>18}", v.method.label(), v.value, deviation)?;
        }
        Ok(())
    }
}

/// Compares any set of method trajectories at one shared sample.
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    opts: CompareOptions,
}

impl ComparisonEngine {
    pub fn new(opts: CompareOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.opts
    }

    /// Compare displacements at the representative index.
    ///
    /// `reference` defaults to the analytical trajectory when supplied, else
    /// the RK5 one. All trajectories must share length and the sample time at
    /// the chosen index.
    pub fn compare(
        &self,
        trajectories: &[(Method, &Trajectory)],
        reference: Option<Method>,
    ) -> CompareResult<ComparisonResult> {
        let (_, first) = trajectories.first().ok_or(CompareError::NoTrajectories)?;
        for (i, (method, _)) in trajectories.iter().enumerate() {
            if trajectories[..i].iter().any(|(m, _)| m == method) {
                return Err(CompareError::DuplicateMethod { method: *method });
            }
        }

        let reference = match reference {
            Some(m) => m,
            None => default_reference(trajectories)?,
        };
        let (_, ref_traj) = trajectories
            .iter()
            .find(|(m, _)| *m == reference)
            .ok_or(CompareError::MissingReference { method: reference })?;

        let len = first.len();
        if len == 0 {
            return Err(CompareError::InvalidArg {
                what: "trajectories must not be empty",
            });
        }
        let index = self.opts.index.resolve(len);
        let ref_sample = ref_traj.get(index).ok_or(CompareError::LengthMismatch {
            method: reference,
            expected: len,
            found: ref_traj.len(),
        })?;

        let peak = ref_traj
            .peak_displacement()
            .map(|s| s.x().abs())
            .unwrap_or(0.0);
        let zero_cutoff = self.opts.zero_threshold.max(self.opts.zero_rel * peak);

        let time_tol = Tolerances::default();
        let mut values = Vec::with_capacity(trajectories.len());
        for (method, traj) in trajectories {
            if traj.len() != len {
                return Err(CompareError::LengthMismatch {
                    method: *method,
                    expected: len,
                    found: traj.len(),
                });
            }
            let sample = traj.get(index).ok_or(CompareError::LengthMismatch {
                method: *method,
                expected: len,
                found: traj.len(),
            })?;
            if !nearly_equal(sample.t, ref_sample.t, time_tol) {
                return Err(CompareError::TimeMismatch {
                    method: *method,
                    index,
                    expected: ref_sample.t,
                    found: sample.t,
                });
            }

            let deviation = if *method == reference {
                Deviation::Percent(0.0)
            } else {
                self.deviation(sample.x(), ref_sample.x(), zero_cutoff, reference, ref_sample.t)?
            };
            values.push(MethodValue {
                method: *method,
                value: sample.x(),
                deviation,
            });
        }

        debug!(index, t_mid = ref_sample.t, %reference, "comparison complete");
        Ok(ComparisonResult {
            index,
            t_mid: ref_sample.t,
            reference,
            values,
            precision: self.opts.precision,
        })
    }

    fn deviation(
        &self,
        value: Real,
        reference_value: Real,
        zero_cutoff: Real,
        reference: Method,
        t: Real,
    ) -> CompareResult<Deviation> {
        let diff = (value - reference_value).abs();
        if reference_value.abs() > zero_cutoff {
            return Ok(Deviation::Percent(diff / reference_value.abs() * 100.0));
        }
        match self.opts.zero_policy {
            ZeroReferencePolicy::Reject => Err(CompareError::NumericalDegeneracy {
                reference,
                reference_value,
                t,
            }),
            ZeroReferencePolicy::AbsoluteFallback => {
                warn!(t, reference_value, "reference near zero, reporting absolute deviation");
                Ok(Deviation::Absolute(diff))
            }
        }
    }
}

fn default_reference(trajectories: &[(Method, &Trajectory)]) -> CompareResult<Method> {
    [Method::Analytical, Method::RungeKutta5]
        .into_iter()
        .find(|m| trajectories.iter().any(|(t, _)| t == m))
        .ok_or(CompareError::MissingReference {
            method: Method::RungeKutta5,
        })
}

/// Compare with default options and the given display precision.
pub fn compare_results(
    trajectories: &[(Method, &Trajectory)],
    reference: Option<Method>,
    precision: usize,
) -> CompareResult<ComparisonResult> {
    let engine = ComparisonEngine::new(CompareOptions {
        precision,
        ..CompareOptions::default()
    });
    engine.compare(trajectories, reference)
}
