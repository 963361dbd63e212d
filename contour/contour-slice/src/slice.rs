//! The per-layer output record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use contour_types::Island;

/// One finished layer, immutable once emitted.
///
/// Downstream craft tools (perimeter fill, travel combing, outset and
/// widen passes) consume slices in emission order and must not mutate
/// the contours they receive. Diagnostics from the lossy repairs live
/// here rather than in errors: a flagged layer is lower-confidence, not
/// a failure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slice {
    /// Zero-based layer number in emission order.
    pub index: usize,
    /// Height of the plane this layer was actually cut at.
    pub z: f64,
    /// Nested contour groups at this height.
    pub islands: Vec<Island>,
    /// Bridge rotation angle in radians, when an unsupported span was
    /// detected against the previous layer.
    pub bridge: Option<f64>,
    /// True when the gap-spanning stitch fallback ran for this height.
    pub gap_spanned: bool,
    /// Contours dropped as degenerate or unclosable at this height.
    pub dropped_contours: usize,
}

impl Slice {
    /// Net solid area across all islands.
    #[must_use]
    pub fn net_area(&self) -> f64 {
        self.islands.iter().map(Island::area).sum()
    }

    /// True when the plane cut no material.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }
}
