//! Boolean set operations over planar contour sets.
//!
//! Combines the loop sets of several bodies with union, intersection,
//! or difference, preserving the winding and nesting invariants the
//! rest of the pipeline depends on: outer boundaries stay
//! counter-clockwise, holes stay clockwise, and output loops come back
//! ordered by descending enclosed area so island nesting survives
//! reconstruction.
//!
//! # Approach
//!
//! Loop/loop intersection points are inserted as corners on both loops,
//! every edge is classified by a laterally perturbed midpoint probe
//! against the other operands, and the kept edges are stitched back
//! into closed loops at the shared corners. Self-intersecting operands
//! are normalized first, so imperfect input degrades instead of
//! corrupting the result.
//!
//! # Example
//!
//! ```
//! use contour_boolean::union;
//! use contour_types::{Contour, ContourSet, Point2};
//!
//! let a = ContourSet::new(vec![Contour::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]).unwrap()]);
//! let b = ContourSet::new(vec![Contour::new(vec![
//!     Point2::new(0.5, 0.5),
//!     Point2::new(1.5, 0.5),
//!     Point2::new(1.5, 1.5),
//!     Point2::new(0.5, 1.5),
//! ]).unwrap()]);
//!
//! let merged = union(&[a, b], 1e-9);
//! assert_eq!(merged.len(), 1);
//! assert!((merged.net_area() - 1.75).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod engine;
mod op;

pub use engine::{combine, difference, intersection, self_union, union};
pub use op::BooleanOp;
