//! Pure planar geometry predicates.
//!
//! Free functions over points and contours, with no persistent state.
//! Everything here is exact up to the caller-supplied tolerance; callers
//! derive that tolerance from the bounding diagonal of the geometry in
//! play (typically `1e-6 ×` the diagonal) so behavior is scale invariant.

use nalgebra::{Point2, Vector2};

use crate::Contour;

/// Signed area of a closed polyline via the shoelace formula.
///
/// Positive area means counter-clockwise winding (a solid boundary by
/// the engine's convention); negative means clockwise (a hole).
///
/// # Example
///
/// ```
/// use contour_types::{geometry, Point2};
///
/// let square = [
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ];
/// assert!((geometry::signed_area(&square) - 4.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        doubled += p.x.mul_add(q.y, -(q.x * p.y));
    }
    doubled / 2.0
}

/// Count boundary crossings strictly to the left of `point`.
///
/// An edge is crossed when it straddles `point.y` and its x-intersection
/// at that height is strictly less than `point.x`. A point exactly on a
/// boundary therefore contributes no crossing from that edge, which makes
/// [`is_inside`] treat on-boundary points as outside (the tie-break the
/// offset and boolean passes rely on for idempotence).
#[must_use]
pub fn crossings_to_left(point: Point2<f64>, loop_points: &[Point2<f64>]) -> usize {
    let mut crossings = 0;
    for (i, p) in loop_points.iter().enumerate() {
        let q = &loop_points[(i + 1) % loop_points.len()];
        if (p.y > point.y) == (q.y > point.y) {
            continue;
        }
        let t = (point.y - p.y) / (q.y - p.y);
        let x = t.mul_add(q.x - p.x, p.x);
        if x < point.x {
            crossings += 1;
        }
    }
    crossings
}

/// Ray-cast parity test over a whole set of loops.
///
/// Returns true when `point` lies inside the filled region described by
/// `contours` (solids minus holes): the total crossing count to the left
/// is odd. Points exactly on a boundary are outside.
#[must_use]
pub fn is_inside(contours: &[Contour], point: Point2<f64>) -> bool {
    let crossings: usize = contours
        .iter()
        .map(|contour| crossings_to_left(point, contour.points()))
        .sum();
    crossings % 2 == 1
}

/// Intersection point of two 2D segments, if any.
///
/// Returns the intersection of segment `a0..a1` with segment `b0..b1`,
/// or `None` when the segments are parallel within `eps` or the
/// intersection falls outside either segment (with an `eps`-sized
/// allowance at the endpoints so shared vertices register).
#[must_use]
pub fn segment_intersection(
    a0: Point2<f64>,
    a1: Point2<f64>,
    b0: Point2<f64>,
    b1: Point2<f64>,
    eps: f64,
) -> Option<Point2<f64>> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = cross(da, db);
    let len_scale = da.norm().max(db.norm()).max(eps);
    if denom.abs() <= eps * len_scale {
        return None;
    }
    let diff = b0 - a0;
    let t = cross(diff, db) / denom;
    let u = cross(diff, da) / denom;

    // Parameter tolerance scaled so an endpoint within eps of the other
    // segment still counts as touching.
    let t_eps = eps / da.norm().max(eps);
    let u_eps = eps / db.norm().max(eps);
    if t < -t_eps || t > 1.0 + t_eps || u < -u_eps || u > 1.0 + u_eps {
        return None;
    }
    Some(a0 + da * t)
}

/// Check whether any two non-adjacent segments of a contour cross.
///
/// O(n²) pairwise scan; n is the per-layer perimeter point count, not
/// the mesh size, so this stays cheap in practice.
#[must_use]
pub fn self_intersects(contour: &Contour, eps: f64) -> bool {
    let points = contour.points();
    let n = points.len();
    for i in 0..n {
        let a0 = points[i];
        let a1 = points[(i + 1) % n];
        for j in (i + 2)..n {
            // Skip the pair sharing the wrap-around vertex.
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = points[j];
            let b1 = points[(j + 1) % n];
            if segment_intersection(a0, a1, b0, b1, eps).is_some() {
                return true;
            }
        }
    }
    false
}

/// Nearest point to `point` on the segment `a..b`.
#[must_use]
pub fn nearest_point_on_segment(
    point: Point2<f64>,
    a: Point2<f64>,
    b: Point2<f64>,
) -> Point2<f64> {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= f64::EPSILON {
        return a;
    }
    let t = ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Nearest point to `point` on the boundary of a contour.
///
/// Returns `None` for an empty contour (cannot happen for contours built
/// through [`Contour::new`], but the slicer's raw chains use this too).
#[must_use]
pub fn nearest_point_on_contour(point: Point2<f64>, contour: &Contour) -> Option<Point2<f64>> {
    let points = contour.points();
    let mut best: Option<(f64, Point2<f64>)> = None;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let candidate = nearest_point_on_segment(point, *p, q);
        let dist_sq = (candidate - point).norm_squared();
        match best {
            Some((best_sq, _)) if best_sq <= dist_sq => {}
            _ => best = Some((dist_sq, candidate)),
        }
    }
    best.map(|(_, p)| p)
}

/// Drop points closer than `radius` to the previously kept point.
///
/// Running-predecessor cleanup used before self-intersection removal;
/// also drops a trailing point that lands on the first one.
#[must_use]
pub fn simplified(points: &[Point2<f64>], radius: f64) -> Vec<Point2<f64>> {
    let radius_sq = radius * radius;
    let mut kept: Vec<Point2<f64>> = Vec::with_capacity(points.len());
    for point in points {
        if let Some(last) = kept.last() {
            if (point - last).norm_squared() <= radius_sq {
                continue;
            }
        }
        kept.push(*point);
    }
    while kept.len() > 1 {
        let first = kept[0];
        let last = kept[kept.len() - 1];
        if (last - first).norm_squared() <= radius_sq {
            kept.pop();
        } else {
            break;
        }
    }
    kept
}

/// 2D cross product (z-component of the 3D cross product).
#[inline]
#[must_use]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x.mul_add(b.y, -(a.y * b.x))
}

/// Left (counter-clockwise) perpendicular of a vector.
#[inline]
#[must_use]
pub fn perp_left(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

/// Right (clockwise) perpendicular of a vector.
#[inline]
#[must_use]
pub fn perp_right(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(v.y, -v.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    #[test]
    fn shoelace_sign_tracks_winding() {
        let ccw = square(2.0);
        assert!((signed_area(&ccw) - 4.0).abs() < 1e-12);

        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!((signed_area(&cw) + 4.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_polyline_has_zero_area() {
        assert!(signed_area(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]).abs() < f64::EPSILON);
    }

    #[test]
    fn crossings_parity() {
        let loop_points = square(2.0);
        assert_eq!(crossings_to_left(Point2::new(1.0, 1.0), &loop_points) % 2, 1);
        assert_eq!(crossings_to_left(Point2::new(3.0, 1.0), &loop_points) % 2, 0);
        assert_eq!(crossings_to_left(Point2::new(-1.0, 1.0), &loop_points) % 2, 0);
    }

    #[test]
    fn boundary_point_is_outside() {
        let loop_points = square(2.0);
        // Exactly on the left edge: the edge's x-intersection equals
        // point.x, which is not strictly less, so parity stays even.
        assert_eq!(crossings_to_left(Point2::new(0.0, 1.0), &loop_points) % 2, 0);
    }

    #[test]
    fn segments_crossing_at_center() {
        let p = segment_intersection(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(2.0, 0.0),
            1e-9,
        );
        let p = p.unwrap();
        assert!((p.x - 1.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let p = segment_intersection(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            1e-9,
        );
        assert!(p.is_none());
    }

    #[test]
    fn disjoint_segments_do_not_intersect() {
        let p = segment_intersection(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, -1.0),
            Point2::new(2.0, 1.0),
            1e-9,
        );
        assert!(p.is_none());
    }

    #[test]
    fn bowtie_self_intersects() {
        let bowtie = Contour::from_raw(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ]);
        assert!(self_intersects(&bowtie, 1e-9));

        let convex = Contour::from_raw(square(2.0));
        assert!(!self_intersects(&convex, 1e-9));
    }

    #[test]
    fn nearest_point_clamps_to_segment() {
        let near = nearest_point_on_segment(
            Point2::new(5.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
        );
        assert!((near.x - 2.0).abs() < 1e-12);
        assert!(near.y.abs() < 1e-12);
    }

    #[test]
    fn nearest_point_on_square_boundary() {
        let contour = Contour::from_raw(square(2.0));
        let near = nearest_point_on_contour(Point2::new(1.0, -3.0), &contour).unwrap();
        assert!((near.x - 1.0).abs() < 1e-12);
        assert!(near.y.abs() < 1e-12);
    }

    #[test]
    fn simplify_removes_crowded_points() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0005, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0001, 0.0001),
        ];
        let kept = simplified(&points, 0.01);
        assert_eq!(kept.len(), 3);
    }
}
