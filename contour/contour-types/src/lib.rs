//! Core 2D contour types for the planar slicing engine.
//!
//! This crate provides the foundational value types shared by every stage
//! of the slicing pipeline:
//!
//! - [`Contour`] - a closed boundary loop with winding-encoded role
//! - [`ContourSet`] - all loops belonging to one height level
//! - [`Island`] - one outer boundary plus its directly nested holes
//! - [`Bounds`] - 2D axis-aligned bounding box
//! - [`geometry`] - pure planar predicates (area, containment, intersection)
//!
//! # Winding Convention
//!
//! Counter-clockwise loops bound solid material; clockwise loops bound
//! holes. Every operation in the engine preserves this invariant, and
//! [`Contour::is_counter_clockwise`] derives the role from the shoelace
//! sign rather than storing it.
//!
//! # Value Semantics
//!
//! Contours never alias another contour's point storage. Every transform
//! in the engine returns new values, which is what makes slicing layers
//! in parallel safe without locks.
//!
//! # Example
//!
//! ```
//! use contour_types::{Contour, Point2};
//!
//! let square = Contour::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]).unwrap();
//!
//! assert!(square.is_counter_clockwise());
//! assert!((square.area() - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod contour;
mod error;
pub mod geometry;
mod island;
mod set;

pub use bounds::Bounds;
pub use contour::Contour;
pub use error::{GeometryError, GeometryResult};
pub use island::{build_islands, Island};
pub use set::ContourSet;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};
