//! State vector and trajectory containers.

use nalgebra::Vector2;

use crate::numeric::Real;

/// Ordered pair `(x, x')`: displacement and velocity.
pub type StateVector = Vector2<Real>;

/// Build a state vector from displacement and velocity.
#[inline]
pub fn state(x: Real, v: Real) -> StateVector {
    StateVector::new(x, v)
}

/// One trajectory point `(t, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectorySample {
    pub t: Real,
    pub y: StateVector,
}

impl TrajectorySample {
    pub fn new(t: Real, y: StateVector) -> Self {
        Self { t, y }
    }

    /// Displacement component.
    #[inline]
    pub fn x(&self) -> Real {
        self.y[0]
    }

    /// Velocity component.
    #[inline]
    pub fn v(&self) -> Real {
        self.y[1]
    }
}

/// Time-increasing sequence of samples, first element `(t0, initial state)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, t: Real, y: StateVector) {
        debug_assert!(
            self.samples.last().is_none_or(|last| t > last.t),
            "trajectory times must increase"
        );
        self.samples.push(TrajectorySample::new(t, y));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&TrajectorySample> {
        self.samples.get(index)
    }

    pub fn first(&self) -> Option<&TrajectorySample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    /// Sample with the largest `|x|`, first one wins on ties.
    pub fn peak_displacement(&self) -> Option<&TrajectorySample> {
        self.samples
            .iter()
            .fold(None, |best: Option<&TrajectorySample>, s| match best {
                Some(b) if b.x().abs() >= s.x().abs() => Some(b),
                _ => Some(s),
            })
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_accessors() {
        let s = TrajectorySample::new(1.5, state(0.25, -3.0));
        assert_eq!(s.x(), 0.25);
        assert_eq!(s.v(), -3.0);
    }

    #[test]
    fn peak_displacement_uses_magnitude() {
        let mut traj = Trajectory::default();
        traj.push(0.0, state(0.0, 0.0));
        traj.push(0.1, state(0.02, 0.0));
        traj.push(0.2, state(-0.05, 0.0));
        traj.push(0.3, state(0.05, 0.0));

        let peak = traj.peak_displacement().unwrap();
        assert_eq!(peak.t, 0.2);
        assert_eq!(peak.x(), -0.05);
    }

    #[test]
    fn empty_trajectory_has_no_peak() {
        let traj = Trajectory::with_capacity(4);
        assert!(traj.is_empty());
        assert!(traj.peak_displacement().is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "trajectory times must increase")]
    fn push_rejects_non_increasing_time() {
        let mut traj = Trajectory::with_capacity(2);
        traj.push(0.5, state(0.0, 0.0));
        traj.push(0.5, state(1.0, 0.0));
    }
}
