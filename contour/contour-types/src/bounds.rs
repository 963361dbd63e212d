//! 2D axis-aligned bounding box.

use nalgebra::{Point2, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// Used for cheap rejection tests before the exact loop/loop predicates
/// run, and for deriving scale-invariant tolerances from the diagonal.
///
/// # Example
///
/// ```
/// use contour_types::{Bounds, Point2};
///
/// let mut bounds = Bounds::empty();
/// bounds.expand_to_include(&Point2::new(0.0, 0.0));
/// bounds.expand_to_include(&Point2::new(3.0, 4.0));
///
/// assert!((bounds.diagonal() - 5.0).abs() < 1e-12);
/// assert!(bounds.contains(&Point2::new(1.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// Minimum corner (smallest x, y values).
    pub min: Point2<f64>,
    /// Maximum corner (largest x, y values).
    pub max: Point2<f64>,
}

impl Bounds {
    /// Create a bounding box from minimum and maximum corners.
    ///
    /// The corners are swapped per axis if min > max.
    #[must_use]
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self {
            min: Point2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Point2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Create an empty (inverted) bounding box.
    ///
    /// An empty box has min > max, which makes it the identity for
    /// [`Bounds::expand_to_include`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create a bounding box covering an iterator of points.
    ///
    /// Returns an empty box for an empty iterator.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point2<f64>>) -> Self {
        let mut bounds = Self::empty();
        for point in points {
            bounds.expand_to_include(point);
        }
        bounds
    }

    /// Check if the box is empty (min > max on any axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Grow the box to include a point.
    pub fn expand_to_include(&mut self, point: &Point2<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Grow the box uniformly by a margin on every side.
    #[must_use]
    pub fn inflated(&self, margin: f64) -> Self {
        let delta = Vector2::new(margin, margin);
        Self {
            min: self.min - delta,
            max: self.max + delta,
        }
    }

    /// Size of the box (width, height).
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector2<f64> {
        self.max - self.min
    }

    /// Length of the box diagonal.
    ///
    /// Zero for an empty box. Tolerances throughout the engine are
    /// derived from this so they stay scale invariant.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.size().norm()
    }

    /// Check if a point is inside the box (boundary inclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Check if this box overlaps another (boundary touch counts).
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}
