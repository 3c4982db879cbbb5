//! Forced damped oscillator `m x'' + b x' + k x = F0 cos(omega t)`.

use osc_core::{Real, StateVector, state};

use crate::error::{SimError, SimResult};
use crate::model::VectorField;

/// Physical description of the oscillator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalParameters {
    /// Mass `m` (kg), > 0
    pub mass: Real,
    /// Viscous damping coefficient `b` (N*s/m), >= 0
    pub damping: Real,
    /// Stiffness `k` (N/m), > 0
    pub stiffness: Real,
    /// Forcing amplitude `F0` (N), >= 0
    pub force_amplitude: Real,
    /// Forcing angular frequency `omega` (rad/s), >= 0
    pub omega: Real,
}

impl PhysicalParameters {
    /// Build parameters with `b = 2 * zeta * sqrt(k * m)`.
    pub fn with_damping_ratio(
        mass: Real,
        stiffness: Real,
        damping_ratio: Real,
        force_amplitude: Real,
        omega: Real,
    ) -> Self {
        Self {
            mass,
            damping: damping_from_ratio(mass, stiffness, damping_ratio),
            stiffness,
            force_amplitude,
            omega,
        }
    }

    /// Characteristic discriminant `(b/m)^2 - 4k/m`; negative means underdamped.
    pub fn discriminant(&self) -> Real {
        let b_norm = self.damping / self.mass;
        b_norm * b_norm - 4.0 * self.stiffness / self.mass
    }

    pub fn is_underdamped(&self) -> bool {
        self.discriminant() < 0.0
    }

    fn validate(&self) -> SimResult<()> {
        let finite = [
            self.mass,
            self.damping,
            self.stiffness,
            self.force_amplitude,
            self.omega,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(SimError::InvalidPhysicalParameters {
                what: "all parameters must be finite",
            });
        }
        if self.mass <= 0.0 {
            return Err(SimError::InvalidPhysicalParameters {
                what: "mass must be positive",
            });
        }
        if self.stiffness <= 0.0 {
            return Err(SimError::InvalidPhysicalParameters {
                what: "stiffness must be positive",
            });
        }
        if self.damping < 0.0 {
            return Err(SimError::InvalidPhysicalParameters {
                what: "damping must be non-negative",
            });
        }
        if self.force_amplitude < 0.0 {
            return Err(SimError::InvalidPhysicalParameters {
                what: "force amplitude must be non-negative",
            });
        }
        if self.omega < 0.0 {
            return Err(SimError::InvalidPhysicalParameters {
                what: "forcing frequency must be non-negative",
            });
        }
        Ok(())
    }
}

/// Damping coefficient from a damping ratio: `b = 2 * zeta * sqrt(k * m)`.
pub fn damping_from_ratio(mass: Real, stiffness: Real, damping_ratio: Real) -> Real {
    2.0 * damping_ratio * (stiffness * mass).sqrt()
}

/// Coefficients of the equation divided through by `m`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedCoefficients {
    pub b_norm: Real,
    pub k_norm: Real,
    pub f0_norm: Real,
}

/// Second-order linear ODE written as the first-order system
/// `x1' = x2`, `x2' = -b/m x2 - k/m x1 + F0/m cos(omega t)`.
#[derive(Clone, Debug)]
pub struct EquationModel {
    params: PhysicalParameters,
    coeffs: NormalizedCoefficients,
}

impl EquationModel {
    pub fn new(params: PhysicalParameters) -> SimResult<Self> {
        params.validate()?;
        let coeffs = NormalizedCoefficients {
            b_norm: params.damping / params.mass,
            k_norm: params.stiffness / params.mass,
            f0_norm: params.force_amplitude / params.mass,
        };
        Ok(Self { params, coeffs })
    }

    pub fn params(&self) -> &PhysicalParameters {
        &self.params
    }

    pub fn coefficients(&self) -> &NormalizedCoefficients {
        &self.coeffs
    }

    /// Human-readable normalized form, coefficients printed with `precision` decimals.
    pub fn normalized_equation(&self, precision: usize) -> String {
        format!(
            "x'' + {:.p$}x' + {:.p$}x = {:.p$}cos({}t)",
            self.coeffs.b_norm,
            self.coeffs.k_norm,
            self.coeffs.f0_norm,
            self.params.omega,
            p = precision
        )
    }
}

impl VectorField for EquationModel {
    fn derivative(&self, t: Real, y: &StateVector) -> SimResult<StateVector> {
        let c = &self.coeffs;
        let (x, v) = (y[0], y[1]);
        let a = -c.b_norm * v - c.k_norm * x + c.f0_norm * (self.params.omega * t).cos();
        Ok(state(v, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge() -> PhysicalParameters {
        PhysicalParameters::with_damping_ratio(20_000.0, 2.5e6, 0.01, 4_000.0, 6.1)
    }

    #[test]
    fn damping_ratio_conversion() {
        let p = bridge();
        assert!((p.damping - 2.0 * 0.01 * (2.5e6_f64 * 20_000.0).sqrt()).abs() < 1e-9);
        assert!((p.damping - 4472.135954999579).abs() < 1e-6);
    }

    #[test]
    fn normalized_coefficients() {
        let eq = EquationModel::new(bridge()).unwrap();
        let c = eq.coefficients();
        assert!((c.k_norm - 125.0).abs() < 1e-12);
        assert!((c.f0_norm - 0.2).abs() < 1e-12);
        assert!((c.b_norm - 0.2236067977).abs() < 1e-9);
    }

    #[test]
    fn derivative_at_rest_is_forcing() {
        let eq = EquationModel::new(bridge()).unwrap();
        let d = eq.derivative(0.0, &state(0.0, 0.0)).unwrap();
        assert_eq!(d[0], 0.0);
        assert!((d[1] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn derivative_matches_formula() {
        let p = PhysicalParameters {
            mass: 2.0,
            damping: 1.0,
            stiffness: 8.0,
            force_amplitude: 4.0,
            omega: 3.0,
        };
        let eq = EquationModel::new(p).unwrap();
        let t = 0.7;
        let d = eq.derivative(t, &state(0.5, -1.5)).unwrap();
        let expected = -0.5 * -1.5 - 4.0 * 0.5 + 2.0 * (3.0_f64 * t).cos();
        assert_eq!(d[0], -1.5);
        assert!((d[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_mass_or_stiffness() {
        let mut p = bridge();
        p.mass = 0.0;
        assert!(matches!(
            EquationModel::new(p),
            Err(SimError::InvalidPhysicalParameters { .. })
        ));

        let mut p = bridge();
        p.stiffness = -1.0;
        assert!(matches!(
            EquationModel::new(p),
            Err(SimError::InvalidPhysicalParameters { .. })
        ));

        let mut p = bridge();
        p.damping = Real::NAN;
        assert!(EquationModel::new(p).is_err());
    }

    #[test]
    fn regime_classification() {
        assert!(bridge().is_underdamped());

        let critical = PhysicalParameters::with_damping_ratio(1.0, 4.0, 1.0, 0.0, 0.0);
        assert!(!critical.is_underdamped());
    }

    #[test]
    fn normalized_equation_string() {
        let eq = EquationModel::new(bridge()).unwrap();
        assert_eq!(
            eq.normalized_equation(3),
            "x'' + 0.224x' + 125.000x = 0.200cos(6.1t)"
        );
    }
}
