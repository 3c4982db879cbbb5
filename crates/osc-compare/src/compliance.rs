//! Peak displacement against a normative limit.

use osc_core::{Real, Trajectory};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CompareError, CompareResult};

/// Normative displacement band `|x| <= 0.04 m`.
pub const DEFAULT_DISPLACEMENT_LIMIT_M: Real = 0.04;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub threshold: Real,
    pub peak_abs_displacement: Real,
    pub t_at_peak: Real,
    pub exceeded: bool,
}

/// Scan the whole trajectory for `max |x(t)|` and flag `max > threshold`.
pub fn check_compliance(trajectory: &Trajectory, threshold: Real) -> CompareResult<ComplianceReport> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(CompareError::InvalidArg {
            what: "threshold must be finite and non-negative",
        });
    }
    let peak = trajectory
        .peak_displacement()
        .ok_or(CompareError::InvalidArg {
            what: "trajectory must not be empty",
        })?;

    let report = ComplianceReport {
        threshold,
        peak_abs_displacement: peak.x().abs(),
        t_at_peak: peak.t,
        exceeded: peak.x().abs() > threshold,
    };
    info!(
        peak = report.peak_abs_displacement,
        t = report.t_at_peak,
        exceeded = report.exceeded,
        "compliance check"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use osc_core::state;

    fn swing(amplitude: Real) -> Trajectory {
        let mut t = Trajectory::with_capacity(100);
        for i in 0..100 {
            let time = i as Real * 0.05;
            t.push(time, state(amplitude * (2.0 * time).sin(), 0.0));
        }
        t
    }

    #[test]
    fn within_band() {
        let report = check_compliance(&swing(0.03), DEFAULT_DISPLACEMENT_LIMIT_M).unwrap();
        assert!(!report.exceeded);
        assert!(report.peak_abs_displacement <= 0.03);
        assert!(report.peak_abs_displacement > 0.029);
    }

    #[test]
    fn outside_band() {
        let report = check_compliance(&swing(-0.05), DEFAULT_DISPLACEMENT_LIMIT_M).unwrap();
        assert!(report.exceeded);
        assert!(report.peak_abs_displacement > 0.04);
    }

    #[test]
    fn boundary_value_is_compliant() {
        let mut t = Trajectory::with_capacity(2);
        t.push(0.0, state(0.0, 0.0));
        t.push(1.0, state(-0.04, 0.0));
        let report = check_compliance(&t, 0.04).unwrap();
        assert!(!report.exceeded);
        assert_eq!(report.t_at_peak, 1.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(check_compliance(&Trajectory::default(), 0.04).is_err());
        assert!(check_compliance(&swing(0.01), -1.0).is_err());
    }
}
