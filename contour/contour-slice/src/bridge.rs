//! Bridge direction detection between consecutive layers.

use contour_offset::{offset_set, OffsetConfig};
use contour_types::{ContourSet, Point2, Vector2};
use tracing::debug;

/// How far the lower layer's loops are outset to form the supported
/// region, in layer thicknesses.
const SUPPORT_OUTSET_FACTOR: f64 = 1.875;

/// Minimum accumulated unsupported length, in layer thicknesses, for a
/// layer to count as bridging at all.
const MIN_BRIDGE_WEIGHT_FACTOR: f64 = 0.75;

/// Detect the bridging direction of `current` over `below`.
///
/// The lower layer's loops are outset to the region they can support;
/// every current-layer perimeter segment whose midpoint falls outside
/// it is unsupported and votes for its own direction. Votes accumulate
/// as length-weighted doubled-angle vectors (the complex-square
/// identity), so opposite travel directions along the same line
/// reinforce instead of cancel. Below a minimum accumulated weight the
/// overhang is too small to matter and the layer has no bridge;
/// otherwise the bridge angle is half the argument of the accumulated
/// vector, in `(-pi/2, pi/2]`.
#[must_use]
pub fn bridge_direction(current: &ContourSet, below: &ContourSet, layer_thickness: f64) -> Option<f64> {
    if current.is_empty() || below.is_empty() {
        return None;
    }
    let support = offset_set(
        below,
        SUPPORT_OUTSET_FACTOR * layer_thickness,
        &OffsetConfig::default(),
    );

    let mut vote = Vector2::zeros();
    for contour in current.contours() {
        for (p, q) in contour.edges() {
            let mid = Point2::from((p.coords + q.coords) / 2.0);
            if support.contains(mid) {
                continue;
            }
            let dir = q - p;
            let len = dir.norm();
            if len < f64::EPSILON {
                continue;
            }
            let unit = dir / len;
            vote += Vector2::new(
                unit.x.mul_add(unit.x, -(unit.y * unit.y)),
                2.0 * unit.x * unit.y,
            ) * len;
        }
    }

    let weight = vote.norm();
    if weight < MIN_BRIDGE_WEIGHT_FACTOR * layer_thickness {
        return None;
    }
    let angle = 0.5 * vote.y.atan2(vote.x);
    debug!(angle, weight, "Detected bridge layer");
    Some(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_types::Contour;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
        Contour::from_raw(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    #[test]
    fn fully_supported_layer_has_no_bridge() {
        let below = ContourSet::new(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        assert_eq!(bridge_direction(&below.clone(), &below, 0.5), None);
    }

    #[test]
    fn overhang_bridges_along_its_long_axis() {
        // A 1x1 column supporting a 6-long beam: the beam's long edges
        // are unsupported and dominate the vote, so the bridge runs
        // along x.
        let below = ContourSet::new(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        let current = ContourSet::new(vec![rect(2.0, 0.0, 8.0, 1.0)]);
        let angle = bridge_direction(&current, &below, 0.5).unwrap();
        assert!(angle.abs() < 1e-9);
    }

    #[test]
    fn tiny_overhang_below_weight_threshold() {
        // Only a sliver pokes out past the supported region; the
        // accumulated unsupported length stays under the threshold.
        let below = ContourSet::new(vec![rect(0.0, 0.0, 10.0, 10.0)]);
        let current = ContourSet::new(vec![rect(0.0, 0.0, 10.0, 10.2)]);
        assert_eq!(bridge_direction(&current, &below, 0.5), None);
    }

    #[test]
    fn empty_neighbor_layers_never_bridge() {
        let square = ContourSet::new(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        assert_eq!(bridge_direction(&square, &ContourSet::empty(), 0.5), None);
        assert_eq!(bridge_direction(&ContourSet::empty(), &square, 0.5), None);
    }
}
