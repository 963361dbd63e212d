//! Island classification: outer boundaries and their nested holes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Contour, ContourSet};

/// A maximal nesting group at one height: one outer counter-clockwise
/// contour plus the clockwise contours directly contained in it.
///
/// Built per layer from a flat [`ContourSet`] and consumed immediately
/// by the downstream craft tools; never persisted across layers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Island {
    /// The counter-clockwise outer boundary.
    pub outer: Contour,
    /// Clockwise hole boundaries directly inside the outer contour.
    pub holes: Vec<Contour>,
}

impl Island {
    /// Enclosed area: outer area minus hole areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.outer.signed_area() + self.holes.iter().map(Contour::signed_area).sum::<f64>()
    }

    /// Total boundary length of the outer contour and all holes.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.outer.perimeter() + self.holes.iter().map(Contour::perimeter).sum::<f64>()
    }
}

/// Classify a flat contour set into islands.
///
/// Contours are placed in descending area order. A counter-clockwise
/// contour opens a new island; a clockwise contour is attached to the
/// smallest already-placed island whose outer contour contains it.
/// Deeper nesting (a solid inside a hole) opens its own island, so the
/// result is always a flat list of outer-plus-direct-holes groups.
///
/// Contours with a winding/containment mismatch - a clockwise loop
/// contained by no island - are dropped, consistent with the
/// drop-and-continue policy for invalid geometry.
///
/// # Example
///
/// ```
/// use contour_types::{build_islands, Contour, ContourSet, Point2};
///
/// let outer = Contour::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 4.0),
///     Point2::new(0.0, 4.0),
/// ]).unwrap();
/// let hole = Contour::new(vec![
///     Point2::new(1.0, 1.0),
///     Point2::new(2.0, 1.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(1.0, 2.0),
/// ]).unwrap().reversed();
///
/// let islands = build_islands(&ContourSet::new(vec![outer, hole]));
/// assert_eq!(islands.len(), 1);
/// assert_eq!(islands[0].holes.len(), 1);
/// ```
#[must_use]
pub fn build_islands(set: &ContourSet) -> Vec<Island> {
    let ordered = set.sorted_by_descending_area();
    let mut islands: Vec<Island> = Vec::new();

    for contour in ordered.contours() {
        if contour.is_counter_clockwise() {
            islands.push(Island {
                outer: contour.clone(),
                holes: Vec::new(),
            });
            continue;
        }

        // Probe with a boundary point; islands are scanned in reverse so
        // the smallest (most recently placed) containing outer wins.
        let probe = contour.points()[0];
        let target = islands
            .iter_mut()
            .rev()
            .find(|island| island.outer.contains(probe));
        if let Some(island) = target {
            island.holes.push(contour.clone());
        }
    }

    islands
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn square_at(x: f64, y: f64, size: f64) -> Contour {
        Contour::from_raw(vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ])
    }

    #[test]
    fn two_disjoint_solids_make_two_islands() {
        let set = ContourSet::new(vec![square_at(0.0, 0.0, 1.0), square_at(5.0, 0.0, 1.0)]);
        let islands = build_islands(&set);
        assert_eq!(islands.len(), 2);
        assert!(islands.iter().all(|island| island.holes.is_empty()));
    }

    #[test]
    fn hole_attaches_to_containing_island() {
        let outer = square_at(0.0, 0.0, 4.0);
        let hole = square_at(1.0, 1.0, 1.0).reversed();
        let other = square_at(10.0, 10.0, 2.0);

        let islands = build_islands(&ContourSet::new(vec![hole, other, outer]));
        assert_eq!(islands.len(), 2);

        let with_hole = islands
            .iter()
            .find(|island| !island.holes.is_empty())
            .unwrap();
        assert!((with_hole.outer.area() - 16.0).abs() < 1e-12);
        assert!((with_hole.area() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn solid_inside_hole_is_its_own_island() {
        let outer = square_at(0.0, 0.0, 8.0);
        let hole = square_at(1.0, 1.0, 6.0).reversed();
        let inner = square_at(3.0, 3.0, 1.0);

        let islands = build_islands(&ContourSet::new(vec![inner, outer, hole]));
        assert_eq!(islands.len(), 2);
        // The nested solid carries no holes of its own.
        let nested = islands
            .iter()
            .find(|island| island.outer.area() < 2.0)
            .unwrap();
        assert!(nested.holes.is_empty());
    }

    #[test]
    fn orphan_hole_dropped() {
        let hole = square_at(0.0, 0.0, 1.0).reversed();
        let islands = build_islands(&ContourSet::new(vec![hole]));
        assert!(islands.is_empty());
    }
}
