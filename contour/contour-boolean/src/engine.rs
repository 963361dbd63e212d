//! Corner insertion, edge classification, and loop reassembly.

use contour_offset::split_at_self_crossings;
use contour_types::{geometry, Contour, ContourSet, Point2};
use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::BooleanOp;

/// Fraction of coincident points above which a reassembled loop is
/// treated as a duplicate of an already-accepted loop.
const DUPLICATE_OVERLAP_RATIO: f64 = 0.45;

/// Combine operand sets with the given operator.
///
/// `Difference` subtracts every remaining operand from the first.
/// `eps` is the geometric tolerance; derive it from the bounding
/// diagonal of the operands (typically `1e-6 ×`) for scale invariance.
#[must_use]
pub fn combine(op: BooleanOp, operands: &[ContourSet], eps: f64) -> ContourSet {
    match op {
        BooleanOp::Union => union(operands, eps),
        BooleanOp::Intersection => intersection(operands, eps),
        BooleanOp::Difference => match operands.split_first() {
            None => ContourSet::empty(),
            Some((minuend, rest)) => difference(minuend, rest, eps),
        },
    }
}

/// Union of any number of contour sets.
#[must_use]
pub fn union(operands: &[ContourSet], eps: f64) -> ContourSet {
    let groups: Vec<Vec<Contour>> = operands.iter().map(|set| normalized(set, eps)).collect();
    if groups.len() == 1 {
        return finish(groups.into_iter().flatten().collect());
    }
    combine_groups(&groups, KeepRule::OutsideOthers, eps)
}

/// Intersection of any number of contour sets, folded pairwise.
#[must_use]
pub fn intersection(operands: &[ContourSet], eps: f64) -> ContourSet {
    let Some((first, rest)) = operands.split_first() else {
        return ContourSet::empty();
    };
    let mut acc = finish(normalized(first, eps));
    for next in rest {
        let groups = vec![acc.into_contours(), normalized(next, eps)];
        acc = combine_groups(&groups, KeepRule::InsideOthers, eps);
    }
    acc
}

/// First operand minus the union of the rest.
///
/// The subtracted loops participate reversed, so subtracted area shows
/// up in the result as clockwise hole boundaries where it punches into
/// the minuend.
#[must_use]
pub fn difference(minuend: &ContourSet, subtrahends: &[ContourSet], eps: f64) -> ContourSet {
    if subtrahends.is_empty() {
        return finish(normalized(minuend, eps));
    }
    let negative: Vec<Contour> = union(subtrahends, eps)
        .into_contours()
        .iter()
        .map(Contour::reversed)
        .collect();
    if negative.is_empty() {
        return finish(normalized(minuend, eps));
    }
    let groups = vec![normalized(minuend, eps), negative];
    combine_groups(&groups, KeepRule::DifferenceOfTwo, eps)
}

/// Repair a single set against itself.
///
/// Self-intersecting loops are split at their crossings, then loops of
/// the same winding whose boundaries cross each other are unified.
/// Disjoint loops and properly nested holes pass through untouched, so
/// the repair is the identity on clean input. This is the entry point
/// the layer pipeline runs on every raw slice.
#[must_use]
pub fn self_union(set: &ContourSet, eps: f64) -> ContourSet {
    let loops = normalized(set, eps);
    let (solids, holes): (Vec<Contour>, Vec<Contour>) =
        loops.into_iter().partition(Contour::is_counter_clockwise);

    let mut merged = merge_crossing_loops(solids, eps);
    let grown_holes = merge_crossing_loops(holes.iter().map(Contour::reversed).collect(), eps);
    merged.extend(grown_holes.iter().map(Contour::reversed));

    let mut result = finish(merged);
    result.add_dropped(set.dropped_degenerate());
    result
}

// ============================================================================
// Internal machinery
// ============================================================================

#[derive(Clone, Copy)]
enum KeepRule {
    /// Keep edges whose material-side probe is outside every other
    /// operand (union).
    OutsideOthers,
    /// Keep edges whose material-side probe is inside every other
    /// operand (intersection).
    InsideOthers,
    /// Group 0 keeps edges outside group 1; group 1 (the reversed
    /// subtrahend) keeps edges inside group 0.
    DifferenceOfTwo,
}

fn edge_kept(rule: KeepRule, group: usize, probe: Point2<f64>, groups: &[Vec<Contour>]) -> bool {
    match rule {
        KeepRule::OutsideOthers => groups
            .iter()
            .enumerate()
            .all(|(j, other)| j == group || !geometry::is_inside(other, probe)),
        KeepRule::InsideOthers => groups
            .iter()
            .enumerate()
            .all(|(j, other)| j == group || geometry::is_inside(other, probe)),
        KeepRule::DifferenceOfTwo => {
            if group == 0 {
                !geometry::is_inside(&groups[1], probe)
            } else {
                geometry::is_inside(&groups[0], probe)
            }
        }
    }
}

/// The full pass: corners, classification, chain stitching, dedupe.
fn combine_groups(groups: &[Vec<Contour>], rule: KeepRule, eps: f64) -> ContourSet {
    let inserts = collect_corners(groups, eps);

    let mut closed: Vec<Vec<Point2<f64>>> = Vec::new();
    let mut chains: Vec<Vec<Point2<f64>>> = Vec::new();

    for (gi, group) in groups.iter().enumerate() {
        for (li, contour) in group.iter().enumerate() {
            let pts = augmented_loop(contour, &inserts[gi][li], eps);
            if pts.len() < 3 {
                continue;
            }
            split_kept_edges(&pts, gi, groups, rule, eps, &mut closed, &mut chains);
        }
    }

    let (stitched, open_dropped) = stitch_chains(chains, 4.0 * eps);
    if open_dropped > 0 {
        warn!(open_dropped, "Boolean reassembly dropped unclosable chains");
    }
    closed.extend(stitched);

    let mut loops: Vec<Contour> = closed
        .into_iter()
        .map(|pts| geometry::simplified(&pts, eps))
        .filter(|pts| pts.len() >= 3)
        .map(Contour::from_raw)
        .collect();
    loops = suppress_duplicates(loops, 4.0 * eps);
    finish(loops)
}

/// All pairwise corner insertions, indexed `[group][loop][edge]`.
type CornerInserts = Vec<Vec<Vec<Vec<(f64, Point2<f64>)>>>>;

fn collect_corners(groups: &[Vec<Contour>], eps: f64) -> CornerInserts {
    let mut inserts: CornerInserts = groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|contour| vec![Vec::new(); contour.point_count()])
                .collect()
        })
        .collect();

    let mut corner_count = 0usize;
    for gi in 0..groups.len() {
        for gj in (gi + 1)..groups.len() {
            for (li, la) in groups[gi].iter().enumerate() {
                for (lj, lb) in groups[gj].iter().enumerate() {
                    if !la.bounds().inflated(eps).overlaps(&lb.bounds()) {
                        continue;
                    }
                    for (ei, (a0, a1)) in la.edges().enumerate() {
                        for (ej, (b0, b1)) in lb.edges().enumerate() {
                            let Some(p) = geometry::segment_intersection(a0, a1, b0, b1, eps)
                            else {
                                continue;
                            };
                            // The same point value goes onto both loops
                            // so the chains rejoin exactly at it.
                            inserts[gi][li][ei].push((edge_param(a0, a1, p), p));
                            inserts[gj][lj][ej].push((edge_param(b0, b1, p), p));
                            corner_count += 1;
                        }
                    }
                }
            }
        }
    }
    debug!(corner_count, "Inserted boolean corners");
    inserts
}

fn edge_param(a0: Point2<f64>, a1: Point2<f64>, p: Point2<f64>) -> f64 {
    let dir = a1 - a0;
    let len_sq = dir.norm_squared();
    if len_sq <= f64::EPSILON {
        return 0.0;
    }
    (p - a0).dot(&dir) / len_sq
}

/// The loop's points with corners spliced in along each edge, coincident
/// neighbors merged.
fn augmented_loop(
    contour: &Contour,
    edge_inserts: &[Vec<(f64, Point2<f64>)>],
    eps: f64,
) -> Vec<Point2<f64>> {
    let mut pts = Vec::with_capacity(contour.point_count() + edge_inserts.len());
    for (ei, (a0, _)) in contour.edges().enumerate() {
        pts.push(a0);
        let mut corners = edge_inserts[ei].clone();
        corners.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        pts.extend(corners.into_iter().map(|(_, p)| p));
    }
    geometry::simplified(&pts, eps)
}

/// Classify each edge by its perturbed midpoint, emit whole loops when
/// everything is kept, chains of kept edges otherwise.
fn split_kept_edges(
    pts: &[Point2<f64>],
    group: usize,
    groups: &[Vec<Contour>],
    rule: KeepRule,
    eps: f64,
    closed: &mut Vec<Vec<Point2<f64>>>,
    chains: &mut Vec<Vec<Point2<f64>>>,
) {
    let n = pts.len();
    let keep: Vec<bool> = (0..n)
        .map(|i| {
            let p = pts[i];
            let q = pts[(i + 1) % n];
            let dir = q - p;
            let len = dir.norm();
            if len < f64::EPSILON {
                return false;
            }
            // Probe one tolerance to the left of travel: the material
            // side for naturally wound loops, the kept side for the
            // reversed subtrahend.
            let probe = Point2::from((p.coords + q.coords) / 2.0) + geometry::perp_left(dir / len) * eps;
            edge_kept(rule, group, probe, groups)
        })
        .collect();

    let Some(first_gap) = keep.iter().position(|k| !k) else {
        closed.push(pts.to_vec());
        return;
    };

    let mut chain: Vec<Point2<f64>> = Vec::new();
    for offset in 1..=n {
        let i = (first_gap + offset) % n;
        if keep[i] {
            if chain.is_empty() {
                chain.push(pts[i]);
            }
            chain.push(pts[(i + 1) % n]);
        } else if chain.len() >= 2 {
            chains.push(std::mem::take(&mut chain));
        } else {
            chain.clear();
        }
    }
    if chain.len() >= 2 {
        chains.push(chain);
    }
}

/// Join directed chains end-to-start within `tol` into closed loops.
///
/// Chains keep their traversal direction; a chain that cannot reach
/// closure is dropped and counted (degenerate classification around a
/// tangency), never emitted as an open loop.
fn stitch_chains(mut chains: Vec<Vec<Point2<f64>>>, tol: f64) -> (Vec<Vec<Point2<f64>>>, usize) {
    let mut closed = Vec::new();
    let mut dropped = 0usize;

    while let Some(mut current) = chains.pop() {
        loop {
            let Some(&end) = current.last() else {
                break;
            };
            let start = current[0];
            if current.len() >= 3 && (end - start).norm() <= tol {
                current.pop();
                closed.push(current);
                break;
            }
            let next_idx = chains
                .iter()
                .position(|chain| (chain[0] - end).norm() <= tol);
            match next_idx {
                Some(idx) => {
                    let next = chains.swap_remove(idx);
                    current.extend_from_slice(&next[1..]);
                }
                None => {
                    dropped += 1;
                    break;
                }
            }
        }
    }
    (closed, dropped)
}

/// Drop loops that mostly coincide with an already-accepted loop.
///
/// Operands with coincident boundaries (intersection of a set with
/// itself) reassemble the same loop once per operand; only the first
/// survives.
fn suppress_duplicates(mut loops: Vec<Contour>, merge_radius: f64) -> Vec<Contour> {
    loops.sort_by(|a, b| {
        b.area()
            .partial_cmp(&a.area())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let cell = merge_radius.max(f64::MIN_POSITIVE);
    let mut table: HashMap<(i64, i64), Vec<Point2<f64>>> = HashMap::new();
    let mut kept = Vec::with_capacity(loops.len());

    for contour in loops {
        let points = contour.points();
        #[allow(clippy::cast_precision_loss)]
        let matched = points
            .iter()
            .filter(|p| near_table_point(&table, **p, cell, merge_radius))
            .count() as f64;
        #[allow(clippy::cast_precision_loss)]
        let ratio = matched / points.len() as f64;
        if ratio > DUPLICATE_OVERLAP_RATIO {
            debug!(ratio, "Suppressing duplicate boolean loop");
            continue;
        }
        for p in points {
            table.entry(quantize(*p, cell)).or_default().push(*p);
        }
        kept.push(contour);
    }
    kept
}

#[allow(clippy::cast_possible_truncation)]
fn quantize(p: Point2<f64>, cell: f64) -> (i64, i64) {
    ((p.x / cell).floor() as i64, (p.y / cell).floor() as i64)
}

fn near_table_point(
    table: &HashMap<(i64, i64), Vec<Point2<f64>>>,
    p: Point2<f64>,
    cell: f64,
    radius: f64,
) -> bool {
    let (cx, cy) = quantize(p, cell);
    for dx in -1..=1 {
        for dy in -1..=1 {
            if let Some(bucket) = table.get(&(cx + dx, cy + dy)) {
                if bucket.iter().any(|q| (q - p).norm() <= radius) {
                    return true;
                }
            }
        }
    }
    false
}

/// Split self-intersecting operand loops into simple pieces directed to
/// the parent's winding.
fn normalized(set: &ContourSet, eps: f64) -> Vec<Contour> {
    let mut out = Vec::with_capacity(set.len());
    for contour in set.contours() {
        if geometry::self_intersects(contour, eps) {
            // A perfect figure-eight has zero signed area; treat the
            // ambiguous case as solid so its lobes stay solid.
            let want_ccw = contour.signed_area() >= 0.0;
            for piece in split_at_self_crossings(contour.points().to_vec(), eps) {
                if piece.len() >= 3 {
                    out.push(Contour::from_raw(piece).directed(want_ccw));
                }
            }
        } else {
            out.push(contour.clone());
        }
    }
    out
}

/// Unify loops whose boundaries cross each other; non-crossing loops
/// pass through untouched (nesting is containment, not overlap).
fn merge_crossing_loops(loops: Vec<Contour>, eps: f64) -> Vec<Contour> {
    if loops.len() <= 1 {
        return loops;
    }

    // Union-find over boundary-crossing pairs.
    let mut parent: Vec<usize> = (0..loops.len()).collect();
    fn root(parent: &mut Vec<usize>, mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }
    for i in 0..loops.len() {
        for j in (i + 1)..loops.len() {
            if loops_cross(&loops[i], &loops[j], eps) {
                let (ri, rj) = (root(&mut parent, i), root(&mut parent, j));
                parent[ri] = rj;
            }
        }
    }

    let mut clusters: HashMap<usize, Vec<Contour>> = HashMap::new();
    for (i, contour) in loops.into_iter().enumerate() {
        clusters.entry(root(&mut parent, i)).or_default().push(contour);
    }

    let mut merged = Vec::new();
    for cluster in clusters.into_values() {
        if cluster.len() == 1 {
            merged.extend(cluster);
        } else {
            let groups: Vec<Vec<Contour>> = cluster.into_iter().map(|c| vec![c]).collect();
            merged.extend(combine_groups(&groups, KeepRule::OutsideOthers, eps).into_contours());
        }
    }
    merged
}

fn loops_cross(a: &Contour, b: &Contour, eps: f64) -> bool {
    if !a.bounds().inflated(eps).overlaps(&b.bounds()) {
        return false;
    }
    for (a0, a1) in a.edges() {
        for (b0, b1) in b.edges() {
            if geometry::segment_intersection(a0, a1, b0, b1, eps).is_some() {
                return true;
            }
        }
    }
    false
}

/// Package loops as a set ordered by descending enclosed area.
fn finish(loops: Vec<Contour>) -> ContourSet {
    ContourSet::new(loops).sorted_by_descending_area()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_set(x: f64, y: f64, size: f64) -> ContourSet {
        ContourSet::new(vec![Contour::from_raw(vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ])])
    }

    const EPS: f64 = 1e-9;

    #[test]
    fn union_of_overlapping_squares_is_one_octagonal_loop() {
        let a = square_set(0.0, 0.0, 1.0);
        let b = square_set(0.5, 0.5, 1.0);

        let merged = union(&[a, b], EPS);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.contours()[0].point_count(), 8);
        // 1 + 1 - 0.25 overlap
        assert!((merged.net_area() - 1.75).abs() < 1e-9);
        assert!(merged.contours()[0].is_counter_clockwise());
    }

    #[test]
    fn union_is_commutative() {
        let a = square_set(0.0, 0.0, 2.0);
        let b = square_set(1.0, 1.0, 2.0);

        let ab = union(&[a.clone(), b.clone()], EPS);
        let ba = union(&[b, a], EPS);
        assert!((ab.net_area() - ba.net_area()).abs() < 1e-9);
        assert_eq!(ab.len(), ba.len());
    }

    #[test]
    fn union_of_disjoint_squares_keeps_both() {
        let a = square_set(0.0, 0.0, 1.0);
        let b = square_set(5.0, 0.0, 1.0);

        let merged = union(&[a, b], EPS);
        assert_eq!(merged.len(), 2);
        assert!((merged.net_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn union_swallows_contained_loop() {
        let a = square_set(0.0, 0.0, 4.0);
        let b = square_set(1.0, 1.0, 1.0);

        let merged = union(&[a, b], EPS);
        assert_eq!(merged.len(), 1);
        assert!((merged.net_area() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn intersection_of_overlapping_squares() {
        let a = square_set(0.0, 0.0, 2.0);
        let b = square_set(1.0, 1.0, 2.0);

        let common = intersection(&[a, b], EPS);
        assert_eq!(common.len(), 1);
        assert!((common.net_area() - 1.0).abs() < 1e-9);
        assert!(common.contours()[0].is_counter_clockwise());
    }

    #[test]
    fn intersection_with_itself_is_identity() {
        let a = square_set(0.0, 0.0, 3.0);

        let same = intersection(&[a.clone(), a.clone()], EPS);
        assert_eq!(same.len(), 1);
        assert!((same.net_area() - a.net_area()).abs() < 1e-9);
    }

    #[test]
    fn intersection_of_disjoint_squares_is_empty() {
        let a = square_set(0.0, 0.0, 1.0);
        let b = square_set(5.0, 5.0, 1.0);

        let common = intersection(&[a, b], EPS);
        assert!(common.is_empty());
    }

    #[test]
    fn difference_with_itself_is_empty() {
        let a = square_set(0.0, 0.0, 2.0);
        let gone = difference(&a, std::slice::from_ref(&a), EPS);
        assert!(gone.net_area().abs() < 1e-9);
    }

    #[test]
    fn difference_notches_a_corner() {
        let a = square_set(0.0, 0.0, 2.0);
        let b = square_set(1.0, 1.0, 2.0);

        let notched = difference(&a, &[b], EPS);
        assert_eq!(notched.len(), 1);
        assert!((notched.net_area() - 3.0).abs() < 1e-9);
        assert!(notched.contours()[0].is_counter_clockwise());
    }

    #[test]
    fn difference_punches_a_hole() {
        let a = square_set(0.0, 0.0, 4.0);
        let b = square_set(1.0, 1.0, 1.0);

        let pierced = difference(&a, &[b], EPS);
        assert_eq!(pierced.len(), 2);
        assert!((pierced.net_area() - 15.0).abs() < 1e-9);
        assert_eq!(pierced.contours().iter().filter(|c| c.is_hole()).count(), 1);
    }

    #[test]
    fn self_union_is_identity_on_clean_nested_input() {
        let outer = Contour::from_raw(vec![
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(6.0, 6.0),
            Point2::new(0.0, 6.0),
        ]);
        let hole = Contour::from_raw(vec![
            Point2::new(2.0, 2.0),
            Point2::new(4.0, 2.0),
            Point2::new(4.0, 4.0),
            Point2::new(2.0, 4.0),
        ])
        .reversed();
        let inner = Contour::from_raw(vec![
            Point2::new(2.5, 2.5),
            Point2::new(3.5, 2.5),
            Point2::new(3.5, 3.5),
            Point2::new(2.5, 3.5),
        ]);
        let set = ContourSet::new(vec![outer, hole, inner]);

        let repaired = self_union(&set, EPS);
        assert_eq!(repaired.len(), 3);
        assert!((repaired.net_area() - set.net_area()).abs() < 1e-9);
    }

    #[test]
    fn self_union_merges_overlapping_solids() {
        let a = Contour::from_raw(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ]);
        let b = Contour::from_raw(vec![
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 1.0),
            Point2::new(3.0, 3.0),
            Point2::new(1.0, 3.0),
        ]);
        let set = ContourSet::new(vec![a, b]);

        let repaired = self_union(&set, EPS);
        assert_eq!(repaired.len(), 1);
        assert!((repaired.net_area() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn self_union_splits_bowtie_operand() {
        // A figure-eight loop normalizes into two simple lobes.
        let bowtie = Contour::from_raw(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ]);
        let repaired = self_union(&ContourSet::new(vec![bowtie]), EPS);
        assert_eq!(repaired.len(), 2);
        for contour in repaired.contours() {
            assert!(contour.is_counter_clockwise());
        }
    }

    #[test]
    fn combine_dispatches_all_operators() {
        let a = square_set(0.0, 0.0, 2.0);
        let b = square_set(1.0, 1.0, 2.0);

        let u = combine(BooleanOp::Union, &[a.clone(), b.clone()], EPS);
        let i = combine(BooleanOp::Intersection, &[a.clone(), b.clone()], EPS);
        let d = combine(BooleanOp::Difference, &[a, b], EPS);

        assert!((u.net_area() - 7.0).abs() < 1e-9);
        assert!((i.net_area() - 1.0).abs() < 1e-9);
        assert!((d.net_area() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_operands() {
        assert!(union(&[], EPS).is_empty());
        assert!(intersection(&[], EPS).is_empty());
        let a = square_set(0.0, 0.0, 1.0);
        let kept = difference(&a, &[], EPS);
        assert!((kept.net_area() - 1.0).abs() < 1e-9);
    }
}
