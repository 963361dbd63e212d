//! Endpoint stitching of raw section segments into closed loops.

use contour_types::Point2;
use hashbrown::HashMap;
use tracing::debug;

/// The result of one stitch pass.
#[derive(Debug, Clone)]
pub struct StitchOutcome {
    /// Closed loops, each without a trailing closing duplicate.
    pub loops: Vec<Vec<Point2<f64>>>,
    /// Chains whose far endpoint matched nothing within tolerance.
    pub unclosed: usize,
}

/// Join directed segments end-to-start within `tolerance` into loops.
///
/// Segments keep the direction the slicer gave them (solid on the
/// left), so a chain only ever extends from its tail onto another
/// segment's start point and winding is preserved by construction.
/// Start points are bucketed on a grid of cell size `tolerance`, making
/// each lookup scan at most nine cells.
///
/// An unmatched tail leaves an open chain; it is counted and dropped,
/// never returned as a loop. Callers decide whether to re-run the pass
/// with a wider (gap-spanning) tolerance.
#[must_use]
pub fn stitch_segments(
    segments: &[(Point2<f64>, Point2<f64>)],
    tolerance: f64,
) -> StitchOutcome {
    let cell = tolerance.max(f64::MIN_POSITIVE);
    let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, (start, _)) in segments.iter().enumerate() {
        grid.entry(quantize(*start, cell)).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut loops = Vec::new();
    let mut unclosed = 0usize;

    for seed in 0..segments.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let (start, end) = segments[seed];
        let mut chain = vec![start, end];

        let closed = loop {
            let tail = chain[chain.len() - 1];
            if chain.len() >= 3 && (tail - chain[0]).norm() <= tolerance {
                // The tail landed back on the start; drop the duplicate.
                chain.pop();
                break true;
            }
            match nearest_unused_start(&grid, &used, segments, tail, cell, tolerance) {
                Some(next) => {
                    used[next] = true;
                    chain.push(segments[next].1);
                }
                None => break false,
            }
        };

        if closed {
            loops.push(chain);
        } else {
            debug!(points = chain.len(), "Section chain failed to close");
            unclosed += 1;
        }
    }

    StitchOutcome { loops, unclosed }
}

// ============================================================================
// Internal helper functions
// ============================================================================

#[allow(clippy::cast_possible_truncation)]
fn quantize(p: Point2<f64>, cell: f64) -> (i64, i64) {
    ((p.x / cell).floor() as i64, (p.y / cell).floor() as i64)
}

/// Closest unused segment whose start lies within `tolerance` of `tail`.
fn nearest_unused_start(
    grid: &HashMap<(i64, i64), Vec<usize>>,
    used: &[bool],
    segments: &[(Point2<f64>, Point2<f64>)],
    tail: Point2<f64>,
    cell: f64,
    tolerance: f64,
) -> Option<usize> {
    let (cx, cy) = quantize(tail, cell);
    let mut best: Option<(f64, usize)> = None;
    for dx in -1..=1 {
        for dy in -1..=1 {
            let Some(bucket) = grid.get(&(cx + dx, cy + dy)) else {
                continue;
            };
            for &i in bucket {
                if used[i] {
                    continue;
                }
                let dist = (segments[i].0 - tail).norm();
                if dist > tolerance {
                    continue;
                }
                match best {
                    Some((best_dist, _)) if best_dist <= dist => {}
                    _ => best = Some((dist, i)),
                }
            }
        }
    }
    best.map(|(_, i)| i)
}
