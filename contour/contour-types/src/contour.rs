//! A closed boundary loop.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::{geometry, Bounds};

/// A closed boundary loop in one slicing plane.
///
/// Points form a cyclic sequence with no explicit closing duplicate.
/// Counter-clockwise winding (positive shoelace area) marks a solid
/// boundary; clockwise marks a hole.
///
/// A contour owns its point storage and is never mutated after
/// construction; offsetting and boolean operations always produce new
/// contours.
///
/// # Example
///
/// ```
/// use contour_types::{Contour, Point2};
///
/// let triangle = Contour::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(0.0, 2.0),
/// ]).unwrap();
///
/// assert_eq!(triangle.point_count(), 3);
/// assert!((triangle.area() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contour {
    points: Vec<Point2<f64>>,
}

impl Contour {
    /// Build a contour, rejecting degenerate input.
    ///
    /// Consecutive duplicate points (within `1e-12` of each other) are
    /// removed, including a trailing point that repeats the first.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::NonFinitePoint`] if any coordinate is NaN or
    ///   infinite.
    /// - [`GeometryError::TooFewPoints`] if fewer than 3 distinct points
    ///   remain after cleanup.
    pub fn new(points: Vec<Point2<f64>>) -> GeometryResult<Self> {
        Self::with_tolerance(points, 1e-12)
    }

    /// Build a contour, merging consecutive points within `tolerance`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Contour::new`].
    pub fn with_tolerance(points: Vec<Point2<f64>>, tolerance: f64) -> GeometryResult<Self> {
        for (index, point) in points.iter().enumerate() {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(GeometryError::NonFinitePoint { index });
            }
        }
        let cleaned = geometry::simplified(&points, tolerance);
        if cleaned.len() < 3 {
            return Err(GeometryError::TooFewPoints {
                remaining: cleaned.len(),
            });
        }
        Ok(Self { points: cleaned })
    }

    /// Build a contour from points known to be clean.
    ///
    /// No cleanup or validation runs; intended for points that already
    /// came out of an engine pass. Test helpers use it too.
    #[must_use]
    pub fn from_raw(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    /// The cyclic point sequence.
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Number of points in the loop.
    #[inline]
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Signed enclosed area (positive = counter-clockwise).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        geometry::signed_area(&self.points)
    }

    /// Absolute enclosed area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// True when the loop winds counter-clockwise (a solid boundary).
    #[inline]
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// True when the loop winds clockwise (a hole boundary).
    #[inline]
    #[must_use]
    pub fn is_hole(&self) -> bool {
        !self.is_counter_clockwise()
    }

    /// Total boundary length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        let mut length = 0.0;
        for (i, p) in self.points.iter().enumerate() {
            let q = &self.points[(i + 1) % self.points.len()];
            length += (q - p).norm();
        }
        length
    }

    /// A new contour with the winding direction reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// A copy directed to the requested winding.
    ///
    /// Returns a reversed copy when the current winding differs, a plain
    /// clone otherwise.
    #[must_use]
    pub fn directed(&self, counter_clockwise: bool) -> Self {
        if self.is_counter_clockwise() == counter_clockwise {
            self.clone()
        } else {
            self.reversed()
        }
    }

    /// 2D bounding box of the loop.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.points.iter())
    }

    /// Largest bounding-box extent; the cheap feature-size proxy the
    /// offsetter's retention filter uses.
    #[must_use]
    pub fn max_span(&self) -> f64 {
        let size = self.bounds().size();
        size.x.max(size.y)
    }

    /// Arithmetic mean of the points.
    #[must_use]
    pub fn centroid(&self) -> Point2<f64> {
        let mut sum = nalgebra::Vector2::zeros();
        for point in &self.points {
            sum += point.coords;
        }
        #[allow(clippy::cast_precision_loss)]
        Point2::from(sum / self.points.len() as f64)
    }

    /// True when `point` lies strictly inside the enclosed region.
    ///
    /// Uses the left-crossing parity test; points exactly on the
    /// boundary are outside.
    #[must_use]
    pub fn contains(&self, point: Point2<f64>) -> bool {
        geometry::crossings_to_left(point, &self.points) % 2 == 1
    }

    /// Iterate the edges as point pairs, wrapping at the end.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Contour {
        Contour::from_raw(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ])
    }

    #[test]
    fn cleanup_removes_duplicates() {
        let contour = Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0), // closing duplicate
        ])
        .unwrap();
        assert_eq!(contour.point_count(), 4);
    }

    #[test]
    fn too_few_points_rejected() {
        let err = Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        ])
        .unwrap_err();
        assert_eq!(err, GeometryError::TooFewPoints { remaining: 2 });
    }

    #[test]
    fn non_finite_rejected() {
        let err = Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(1.0, 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, GeometryError::NonFinitePoint { index: 1 });
    }

    #[test]
    fn winding_and_reversal() {
        let square = unit_square();
        assert!(square.is_counter_clockwise());
        assert!(!square.is_hole());

        let hole = square.reversed();
        assert!(hole.is_hole());
        assert!((hole.signed_area() + 1.0).abs() < 1e-12);

        // directed() is a no-op when the winding already matches
        assert!(square.directed(true).is_counter_clockwise());
        assert!(square.directed(false).is_hole());
    }

    #[test]
    fn perimeter_and_span() {
        let square = unit_square();
        assert!((square.perimeter() - 4.0).abs() < 1e-12);
        assert!((square.max_span() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn containment_tie_break() {
        let square = unit_square();
        assert!(square.contains(Point2::new(0.5, 0.5)));
        assert!(!square.contains(Point2::new(1.5, 0.5)));
        // Boundary points are outside by convention.
        assert!(!square.contains(Point2::new(0.0, 0.5)));
    }

    #[test]
    fn centroid_of_square() {
        let square = unit_square();
        let c = square.centroid();
        assert!((c.x - 0.5).abs() < 1e-12);
        assert!((c.y - 0.5).abs() < 1e-12);
    }
}
