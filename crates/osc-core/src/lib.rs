//! osc-core: stable foundation for the oscillator solvers.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - state (2-component state vector, trajectory samples)
//! - grid (fixed-step time grid and step counting)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;
pub mod state;

// Re-exports: nice ergonomics for downstream crates
pub use error::{OscError, OscResult};
pub use grid::TimeGrid;
pub use numeric::*;
pub use state::*;
