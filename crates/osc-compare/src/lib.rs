//! osc-compare: cross-checks between solver trajectories.
//!
//! - `ComparisonEngine`: value of each method at one representative sample and
//!   its relative deviation from a reference method
//! - `check_compliance`: peak displacement against a normative limit

pub mod compare;
pub mod compliance;
pub mod error;
pub mod method;

pub use compare::{
    CompareOptions, ComparisonEngine, ComparisonResult, Deviation, MethodValue,
    RepresentativeIndex, ZeroReferencePolicy, compare_results,
};
pub use compliance::{ComplianceReport, DEFAULT_DISPLACEMENT_LIMIT_M, check_compliance};
pub use error::{CompareError, CompareResult};
pub use method::Method;
