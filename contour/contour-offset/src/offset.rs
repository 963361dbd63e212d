//! The inscribed-circle offset pass.

use contour_types::{geometry, Contour, ContourSet, Point2};
use nalgebra::Vector2;
use tracing::debug;

use crate::OffsetConfig;

/// Offset a contour by a signed radius.
///
/// For every edge the locus of inscribed-circle centers at distance
/// `|distance|` on the offset side is a parallel support line; adjacent
/// support lines meet at the miter point, which is where the circle
/// tangent to both edges sits. Where the offset inverts topology the
/// raw loop crosses itself; it is split at each crossing and the pieces
/// whose winding flipped (the self-overlapping arcs) are discarded,
/// along with pieces smaller than the minimum-feature span.
///
/// Negative `distance` shrinks solids and grows holes; positive does
/// the opposite. Zero returns the input unchanged.
///
/// The operation is total: an unrepresentable offset yields an empty
/// vector, never an error. An offset may also legitimately yield more
/// than one loop (a waisted solid pinches apart).
#[must_use]
pub fn offset_contour(contour: &Contour, distance: f64, config: &OffsetConfig) -> Vec<Contour> {
    if distance == 0.0 {
        return vec![contour.clone()];
    }
    let radius = distance.abs();
    let points = contour.points();
    let n = points.len();

    let mut raw = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let center = points[i];
        let next = points[(i + 1) % n];
        raw.push(offset_vertex(prev, center, next, distance));
    }

    let eps = 1e-6 * contour.bounds().diagonal().max(radius);
    let merged = geometry::simplified(&raw, config.merge_fraction * radius);
    let pieces = split_at_self_crossings(merged, eps);

    let want_ccw = contour.is_counter_clockwise();
    let min_span = config.min_span_factor * radius;
    let mut kept = Vec::new();
    for piece in pieces {
        if piece.len() < 3 {
            continue;
        }
        let candidate = Contour::from_raw(piece);
        if candidate.is_counter_clockwise() != want_ccw {
            debug!(area = candidate.area(), "Dropping inverted offset piece");
            continue;
        }
        if candidate.max_span() <= min_span {
            debug!(
                span = candidate.max_span(),
                min_span, "Dropping sub-feature offset piece"
            );
            continue;
        }
        kept.push(candidate);
    }
    kept
}

/// Offset every contour of a set by the same signed radius.
///
/// Solids and holes each move according to their own winding, so a
/// single negative radius insets a solid-with-hole wall from both
/// sides at once.
#[must_use]
pub fn offset_set(set: &ContourSet, distance: f64, config: &OffsetConfig) -> ContourSet {
    let mut contours = Vec::with_capacity(set.len());
    for contour in set.contours() {
        contours.extend(offset_contour(contour, distance, config));
    }
    ContourSet::new(contours)
}

/// Split a loop at every self-crossing.
///
/// Each crossing splits the loop into two smaller loops sharing the
/// crossing point; the process repeats until every piece is simple.
/// Pieces are returned unfiltered - callers decide which windings and
/// sizes survive. Exposed for the boolean engine's operand
/// normalization.
#[must_use]
pub fn split_at_self_crossings(points: Vec<Point2<f64>>, eps: f64) -> Vec<Vec<Point2<f64>>> {
    let mut simple = Vec::new();
    let mut pending = vec![points];
    // Every split produces two strictly smaller loops, so the budget is
    // only a guard against tolerance-induced livelock.
    let mut budget = 64 + 4 * pending[0].len();

    while let Some(piece) = pending.pop() {
        let piece = geometry::simplified(&piece, eps);
        if piece.len() < 3 {
            continue;
        }
        if budget == 0 {
            simple.push(piece);
            continue;
        }
        match first_crossing(&piece, eps) {
            None => simple.push(piece),
            Some((i, j, p)) => {
                budget -= 1;
                let mut loop_a = Vec::with_capacity(j - i + 1);
                loop_a.push(p);
                loop_a.extend_from_slice(&piece[i + 1..=j]);

                let mut loop_b = Vec::with_capacity(piece.len() - (j - i) + 1);
                loop_b.push(p);
                loop_b.extend_from_slice(&piece[j + 1..]);
                loop_b.extend_from_slice(&piece[..=i]);

                pending.push(loop_a);
                pending.push(loop_b);
            }
        }
    }
    simple
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Miter point of the two support lines parallel to the edges around
/// `center`, each displaced by `distance` along its clockwise
/// perpendicular.
fn offset_vertex(
    prev: Point2<f64>,
    center: Point2<f64>,
    next: Point2<f64>,
    distance: f64,
) -> Point2<f64> {
    let d1 = normalize_or_zero(center - prev);
    let d2 = normalize_or_zero(next - center);
    let n1 = geometry::perp_right(d1);
    let n2 = geometry::perp_right(d2);

    let denom = geometry::cross(d1, d2);
    if denom.abs() < 1e-9 {
        // Collinear edges share a support line; a full reversal (spike)
        // has no bisector, so the first edge's normal stands in.
        let bisector = n1 + n2;
        let len = bisector.norm();
        if len < 1e-9 {
            return center + n1 * distance;
        }
        return center + bisector * (distance / len);
    }

    let p1 = center + n1 * distance;
    let p2 = center + n2 * distance;
    let t = geometry::cross(p2 - p1, d2) / denom;
    p1 + d1 * t
}

fn normalize_or_zero(v: Vector2<f64>) -> Vector2<f64> {
    let len = v.norm();
    if len < f64::EPSILON {
        Vector2::zeros()
    } else {
        v / len
    }
}

/// First pair of non-adjacent segments that cross, with the crossing
/// point.
fn first_crossing(points: &[Point2<f64>], eps: f64) -> Option<(usize, usize, Point2<f64>)> {
    let n = points.len();
    for i in 0..n {
        let a0 = points[i];
        let a1 = points[(i + 1) % n];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = points[j];
            let b1 = points[(j + 1) % n];
            if let Some(p) = geometry::segment_intersection(a0, a1, b0, b1, eps) {
                return Some((i, j, p));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Contour {
        Contour::from_raw(vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ])
    }

    #[test]
    fn inset_square_shrinks() {
        let inset = offset_contour(&square(4.0), -1.0, &OffsetConfig::default());
        assert_eq!(inset.len(), 1);
        assert!((inset[0].area() - 4.0).abs() < 1e-9);
        assert!(inset[0].is_counter_clockwise());
    }

    #[test]
    fn outset_square_grows() {
        let outset = offset_contour(&square(4.0), 1.0, &OffsetConfig::default());
        assert_eq!(outset.len(), 1);
        assert!((outset[0].area() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn overlarge_inset_vanishes() {
        // Radius beyond half the 1.0 feature width: empty result, not an
        // inverted loop and not an error.
        let gone = offset_contour(&square(1.0), -0.6, &OffsetConfig::default());
        assert!(gone.is_empty());
    }

    #[test]
    fn zero_offset_is_identity() {
        let original = square(2.0);
        let same = offset_contour(&original, 0.0, &OffsetConfig::default());
        assert_eq!(same.len(), 1);
        assert!((same[0].area() - original.area()).abs() < 1e-12);
    }

    #[test]
    fn outset_then_inset_restores_area() {
        let original = square(4.0);
        let config = OffsetConfig::default();
        let out = offset_contour(&original, 0.5, &config);
        assert_eq!(out.len(), 1);
        let back = offset_contour(&out[0], -0.5, &config);
        assert_eq!(back.len(), 1);
        assert!((back[0].area() - original.area()).abs() < 1e-9);
    }

    #[test]
    fn detail_loss_monotonic_in_radius() {
        let triangle = Contour::from_raw(vec![
            Point2::new(0.0, 0.0),
            Point2::new(8.0, 0.0),
            Point2::new(4.0, 6.0),
        ]);
        let config = OffsetConfig::default();
        let mut last_area = triangle.area();
        for step in 1..5 {
            let inset = offset_contour(&triangle, -0.2 * f64::from(step), &config);
            let area: f64 = inset.iter().map(Contour::area).sum();
            assert!(area < last_area);
            last_area = area;
        }
    }

    #[test]
    fn negative_radius_grows_hole() {
        let hole = square(4.0).reversed();
        let grown = offset_contour(&hole, -0.5, &OffsetConfig::default());
        assert_eq!(grown.len(), 1);
        assert!(grown[0].is_hole());
        assert!((grown[0].area() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn waisted_solid_pinches_into_two_loops() {
        // Two 4x4 squares joined by a 0.4-wide neck; a 0.5 inset is
        // wider than half the neck, so the neck vanishes and the squares
        // separate.
        let dumbbell = Contour::from_raw(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 1.8),
            Point2::new(6.0, 1.8),
            Point2::new(6.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.0),
            Point2::new(6.0, 4.0),
            Point2::new(6.0, 2.2),
            Point2::new(4.0, 2.2),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ]);
        let pieces = offset_contour(&dumbbell, -0.5, &OffsetConfig::default());
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert!(piece.is_counter_clockwise());
            assert!((piece.area() - 9.0).abs() < 1e-6);
        }
    }

    #[test]
    fn offset_set_moves_solid_and_hole_together() {
        let outer = square(6.0);
        let hole = Contour::from_raw(vec![
            Point2::new(2.0, 2.0),
            Point2::new(4.0, 2.0),
            Point2::new(4.0, 4.0),
            Point2::new(2.0, 4.0),
        ])
        .reversed();
        let set = ContourSet::new(vec![outer, hole]);

        let inset = offset_set(&set, -0.5, &OffsetConfig::default());
        assert_eq!(inset.len(), 2);
        // Solid shrank to 5x5, hole grew to 3x3.
        assert!((inset.net_area() - (25.0 - 9.0)).abs() < 1e-9);
    }
}
