//! Fixed-step time grid.

use crate::numeric::{Real, ensure_finite, snap_to_integer, snapped_ceil, snapped_floor};
use crate::{OscError, OscResult};

/// Closed interval `[t0, t1]` walked with a fixed step `h`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    t0: Real,
    t1: Real,
    h: Real,
}

impl TimeGrid {
    pub fn new(t0: Real, t1: Real, h: Real) -> OscResult<Self> {
        ensure_finite(t0, "t0")?;
        ensure_finite(t1, "t1")?;
        ensure_finite(h, "h")?;
        if h <= 0.0 {
            return Err(OscError::InvalidArg {
                what: "step size h must be positive",
            });
        }
        if t1 <= t0 {
            return Err(OscError::InvalidArg {
                what: "end time t1 must be greater than t0",
            });
        }
        Ok(Self { t0, t1, h })
    }

    pub fn t0(&self) -> Real {
        self.t0
    }

    pub fn t1(&self) -> Real {
        self.t1
    }

    pub fn h(&self) -> Real {
        self.h
    }

    /// Steps needed to reach `t1` with the last one clipped: `ceil((t1-t0)/h)`.
    pub fn step_count(&self) -> usize {
        snapped_ceil((self.t1 - self.t0) / self.h) as usize
    }

    /// True when `(t1-t0)/h` is a whole number, so no step needs clipping.
    pub fn is_aligned(&self) -> bool {
        snap_to_integer((self.t1 - self.t0) / self.h).is_some()
    }

    /// Whole steps that fit between `from` and `t1`: `floor((t1-from)/h)`.
    pub fn whole_steps_from(&self, from: Real) -> usize {
        let ratio = (self.t1 - from) / self.h;
        if ratio <= 0.0 {
            0
        } else {
            snapped_floor(ratio) as usize
        }
    }

    /// Grid time `t0 + i*h`, without clipping.
    #[inline]
    pub fn time_at(&self, index: usize) -> Real {
        self.t0 + index as Real * self.h
    }

    /// Same start and step, new end time.
    pub fn with_end(&self, t1: Real) -> OscResult<Self> {
        Self::new(self.t0, t1, self.h)
    }
}
