//! antforge core - shared types for ant colony tour optimization
//!
//! This crate provides the fundamental abstractions used by the solver:
//! - [`Point`] and [`DistanceMatrix`] for the Euclidean cost model
//! - [`Tour`] for closed round trips over city indices
//! - [`AntForgeError`] for input validation and internal failures

pub mod error;
pub mod geometry;
pub mod tour;

pub use error::{AntForgeError, Result};
pub use geometry::{DistanceMatrix, Point};
pub use tour::Tour;
