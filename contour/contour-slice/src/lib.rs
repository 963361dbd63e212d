//! Plane slicing of triangle meshes into per-layer contour islands.
//!
//! The orchestrating crate of the slicing engine: it cuts a triangle
//! mesh into cross-sections height by height, stitches the raw
//! segments into closed loops (with a tolerance-widened fallback for
//! meshes that are not watertight), repairs self-overlap through the
//! boolean engine, classifies the loops into nested islands, and
//! optionally detects a bridging direction between consecutive layers.
//!
//! Geometric imperfections never abort a run: degenerate contours and
//! unclosable gaps are dropped, counted, and flagged on the emitted
//! [`Slice`]. The only fatal conditions are malformed input - a
//! non-finite triangle coordinate, an empty mesh, or a non-positive
//! layer thickness - rejected before slicing begins.
//!
//! # Example
//!
//! ```
//! use contour_slice::{slice_mesh, SliceConfig, TriangleMesh};
//!
//! let mesh = TriangleMesh::unit_cube();
//! let slices = slice_mesh(&mesh, &SliceConfig::new(1.0, 0.6)).unwrap();
//!
//! assert_eq!(slices.len(), 1);
//! assert_eq!(slices[0].islands.len(), 1);
//! assert!((slices[0].net_area() - 1.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bridge;
mod error;
mod mesh;
mod params;
mod pipeline;
mod slice;
mod slicer;
mod stitch;

pub use bridge::bridge_direction;
pub use error::{SliceError, SliceResult};
pub use mesh::{Triangle, TriangleMesh};
pub use params::SliceConfig;
pub use pipeline::{slice_mesh, SliceLayerPipeline};
pub use slice::Slice;
pub use slicer::{cross_section_segments, slice_at, PlaneSlice};
pub use stitch::{stitch_segments, StitchOutcome};

// Re-export the island types alongside the slices that carry them.
pub use contour_types::{Contour, ContourSet, Island};
