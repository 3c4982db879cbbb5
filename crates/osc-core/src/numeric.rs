use crate::OscError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, OscError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(OscError::NonFinite { what, value: v })
    }
}

/// Relative gap used when snapping a step ratio onto the nearest integer.
const SNAP_REL: Real = 1e-9;

/// Round `ratio` to the nearest integer when it is within floating noise of it.
///
/// `20.0 / 0.01` and `0.3 / 0.1` both land a few ulps away from the intended
/// count; ceil/floor on the raw value would add or drop a whole step.
pub fn snap_to_integer(ratio: Real) -> Option<Real> {
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= SNAP_REL * nearest.abs().max(1.0) {
        Some(nearest)
    } else {
        None
    }
}

/// `ceil(ratio)` after snapping.
pub fn snapped_ceil(ratio: Real) -> Real {
    snap_to_integer(ratio).unwrap_or_else(|| ratio.ceil())
}

/// `floor(ratio)` after snapping.
pub fn snapped_floor(ratio: Real) -> Real {
    snap_to_integer(ratio).unwrap_or_else(|| ratio.floor())
}
