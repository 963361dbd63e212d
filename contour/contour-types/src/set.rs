//! All contours belonging to one height level.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{geometry, Bounds, Contour};

/// The contours of one height level.
///
/// Internally unordered; solids and holes are distinguishable via
/// winding and containment rather than position. Carries the count of
/// contours dropped as degenerate during construction so callers can
/// audit lossy repairs.
///
/// # Example
///
/// ```
/// use contour_types::{Contour, ContourSet, Point2};
///
/// let square = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let sliver = vec![Point2::new(5.0, 5.0), Point2::new(5.0, 5.0), Point2::new(6.0, 5.0)];
///
/// let set = ContourSet::from_loops(vec![square, sliver], 1e-9);
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.dropped_degenerate(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContourSet {
    contours: Vec<Contour>,
    dropped_degenerate: usize,
}

impl ContourSet {
    /// Create a set from already-validated contours.
    #[must_use]
    pub fn new(contours: Vec<Contour>) -> Self {
        Self {
            contours,
            dropped_degenerate: 0,
        }
    }

    /// Create an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            contours: Vec::new(),
            dropped_degenerate: 0,
        }
    }

    /// Build a set from raw point loops, dropping degenerate ones.
    ///
    /// Each loop is cleaned through [`Contour::with_tolerance`]; loops
    /// that come out with fewer than 3 distinct points are dropped and
    /// counted on [`ContourSet::dropped_degenerate`] instead of aborting
    /// the set.
    #[must_use]
    pub fn from_loops(loops: Vec<Vec<Point2<f64>>>, tolerance: f64) -> Self {
        let mut contours = Vec::with_capacity(loops.len());
        let mut dropped = 0;
        for points in loops {
            match Contour::with_tolerance(points, tolerance) {
                Ok(contour) => contours.push(contour),
                Err(_) => dropped += 1,
            }
        }
        Self {
            contours,
            dropped_degenerate: dropped,
        }
    }

    /// The contours in the set.
    #[inline]
    #[must_use]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Consume the set, yielding its contours.
    #[must_use]
    pub fn into_contours(self) -> Vec<Contour> {
        self.contours
    }

    /// Number of contours.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    /// True when the set has no contours.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// How many input loops were dropped as degenerate.
    #[inline]
    #[must_use]
    pub fn dropped_degenerate(&self) -> usize {
        self.dropped_degenerate
    }

    /// Record additional dropped loops (used by repair passes).
    pub fn add_dropped(&mut self, count: usize) {
        self.dropped_degenerate += count;
    }

    /// Counter-clockwise (solid boundary) contours.
    pub fn solids(&self) -> impl Iterator<Item = &Contour> {
        self.contours.iter().filter(|c| c.is_counter_clockwise())
    }

    /// Clockwise (hole boundary) contours.
    pub fn holes(&self) -> impl Iterator<Item = &Contour> {
        self.contours.iter().filter(|c| c.is_hole())
    }

    /// Net enclosed area: solid areas minus hole areas.
    #[must_use]
    pub fn net_area(&self) -> f64 {
        self.contours.iter().map(Contour::signed_area).sum()
    }

    /// Bounding box covering every contour.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for contour in &self.contours {
            for point in contour.points() {
                bounds.expand_to_include(point);
            }
        }
        bounds
    }

    /// Parity containment test against the whole set.
    ///
    /// On-boundary points are outside, same as [`geometry::is_inside`].
    #[must_use]
    pub fn contains(&self, point: Point2<f64>) -> bool {
        geometry::is_inside(&self.contours, point)
    }

    /// A copy with every contour directed to the given winding.
    #[must_use]
    pub fn directed(&self, counter_clockwise: bool) -> Self {
        Self {
            contours: self
                .contours
                .iter()
                .map(|c| c.directed(counter_clockwise))
                .collect(),
            dropped_degenerate: self.dropped_degenerate,
        }
    }

    /// A copy sorted by descending enclosed area.
    ///
    /// The order island classification and boolean reassembly rely on:
    /// containers come before their contents.
    #[must_use]
    pub fn sorted_by_descending_area(&self) -> Self {
        let mut contours = self.contours.clone();
        contours.sort_by(|a, b| {
            b.area()
                .partial_cmp(&a.area())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self {
            contours,
            dropped_degenerate: self.dropped_degenerate,
        }
    }
}

impl From<Vec<Contour>> for ContourSet {
    fn from(contours: Vec<Contour>) -> Self {
        Self::new(contours)
    }
}
