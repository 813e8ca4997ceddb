//! Shared test fixtures for antforge crates.
//!
//! This crate provides point sets with known optimal tours and their CSV
//! renderings. It depends only on `antforge-core`.
//!
//! - [`geometry`] - Point sets (unit square, two points, polygons, grids)
//! - [`csv`] - Point files as the command-line loader reads them
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! antforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use antforge_test::geometry::{regular_polygon, unit_square};
//!
//! assert_eq!(unit_square().len(), 4);
//! assert_eq!(regular_polygon(7, 1.0).len(), 7);
//! ```

pub mod csv;
pub mod geometry;

pub use geometry::{grid, regular_polygon, two_points, unit_square};
