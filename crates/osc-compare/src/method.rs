//! Solution method identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which solver produced a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Method {
    Analytical,
    RungeKutta5,
    AdamsMoulton4,
}

impl Method {
    pub const ALL: [Method; 3] = [
        Method::Analytical,
        Method::RungeKutta5,
        Method::AdamsMoulton4,
    ];

    /// Display name used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Method::Analytical => "Analytical solution",
            Method::RungeKutta5 => "Runge-Kutta 5th order",
            Method::AdamsMoulton4 => "Adams-Moulton 4th order",
        }
    }

    /// Short identifier used in file names and on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Method::Analytical => "analytical",
            Method::RungeKutta5 => "rk5",
            Method::AdamsMoulton4 => "am4",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.slug() == slug)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trip() {
        for m in Method::ALL {
            assert_eq!(Method::from_slug(m.slug()), Some(m));
        }
        assert_eq!(Method::from_slug("euler"), None);
    }
}
