//! Inscribed-circle offsetting of planar contours.
//!
//! Produces a contour moved uniformly inward or outward by a signed
//! radius, the primitive behind perimeter extraction, outset/widen for
//! subtractive machining, and the "in-between" probe loops the boolean
//! engine classifies against.
//!
//! # Sign Convention
//!
//! Negative radius always shrinks solids and grows holes; positive
//! radius does the opposite. The winding of the input decides which
//! geometric side that is, so callers never branch on loop role.
//!
//! # Totality
//!
//! Offsetting never fails. A radius too large for the local feature
//! width collapses the loop, and collapsed (inverted or sub-feature)
//! loops are discarded, so the result of an unrepresentable offset is an
//! empty vector rather than an error. Callers must handle an empty
//! result; a narrow wall vanishing from an inset is expected behavior.
//!
//! # Example
//!
//! ```
//! use contour_offset::{offset_contour, OffsetConfig};
//! use contour_types::{Contour, Point2};
//!
//! let square = Contour::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(4.0, 4.0),
//!     Point2::new(0.0, 4.0),
//! ]).unwrap();
//!
//! // Shrink the solid by 1: a 2x2 core remains.
//! let inset = offset_contour(&square, -1.0, &OffsetConfig::default());
//! assert_eq!(inset.len(), 1);
//! assert!((inset[0].area() - 4.0).abs() < 1e-9);
//!
//! // Shrink by more than half the width: the wall vanishes.
//! let gone = offset_contour(&square, -2.5, &OffsetConfig::default());
//! assert!(gone.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod offset;

pub use config::OffsetConfig;
pub use offset::{offset_contour, offset_set, split_at_self_crossings};
