//! Plane/mesh intersection.

use contour_types::{Point2, Vector2};
use tracing::warn;

use crate::mesh::{Triangle, TriangleMesh};
use crate::stitch;

/// Raw result of cutting the mesh at one height.
#[derive(Debug, Clone)]
pub struct PlaneSlice {
    /// Closed boundary loops; counter-clockwise around solid material.
    pub loops: Vec<Vec<Point2<f64>>>,
    /// True when the tolerance-widened stitch pass was needed.
    pub gap_spanned: bool,
    /// Chains that failed to close even after gap spanning; dropped.
    pub unclosed_chains: usize,
}

/// Cut the mesh at height `z` and stitch the cross-section into loops.
///
/// Stitching first runs at the exact `tolerance`. If any chain fails to
/// close - the common symptom of a mesh that is not watertight - the
/// whole pass is re-run with endpoints bucketed at `import_radius`, so
/// endpoints up to that far apart are treated as coincident. That
/// fallback is best-effort repair, reported through
/// [`PlaneSlice::gap_spanned`], never hidden.
#[must_use]
pub fn slice_at(mesh: &TriangleMesh, z: f64, tolerance: f64, import_radius: f64) -> PlaneSlice {
    let segments = cross_section_segments(mesh, z, tolerance);
    if segments.is_empty() {
        return PlaneSlice {
            loops: Vec::new(),
            gap_spanned: false,
            unclosed_chains: 0,
        };
    }

    let exact = stitch::stitch_segments(&segments, tolerance);
    if exact.unclosed == 0 {
        return PlaneSlice {
            loops: exact.loops,
            gap_spanned: false,
            unclosed_chains: 0,
        };
    }

    if import_radius <= tolerance {
        warn!(
            z,
            unclosed = exact.unclosed,
            "Mesh gaps at slicing plane and no spanning radius to widen to"
        );
        return PlaneSlice {
            loops: exact.loops,
            gap_spanned: false,
            unclosed_chains: exact.unclosed,
        };
    }

    warn!(
        z,
        unclosed = exact.unclosed,
        import_radius,
        "Mesh gaps at slicing plane; re-stitching with spanning radius"
    );
    let spanned = stitch::stitch_segments(&segments, import_radius);
    PlaneSlice {
        loops: spanned.loops,
        gap_spanned: true,
        unclosed_chains: spanned.unclosed,
    }
}

/// Directed cross-section segments of every straddling triangle.
#[must_use]
pub fn cross_section_segments(
    mesh: &TriangleMesh,
    z: f64,
    tolerance: f64,
) -> Vec<(Point2<f64>, Point2<f64>)> {
    let mut segments = Vec::new();
    for triangle in mesh.triangles() {
        if !triangle.straddles(z) {
            continue;
        }
        if let Some(segment) = triangle_section(triangle, z, tolerance) {
            segments.push(segment);
        }
    }
    segments
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Intersect one triangle with the plane `z`, directed so the solid
/// lies on the segment's left.
fn triangle_section(
    triangle: &Triangle,
    z: f64,
    tolerance: f64,
) -> Option<(Point2<f64>, Point2<f64>)> {
    let [a, b, c] = *triangle.vertices();
    let mut hits: Vec<Point2<f64>> = Vec::with_capacity(2);
    for (p, q) in [(a, b), (b, c), (c, a)] {
        // Strictly-above classification: a vertex exactly at z counts
        // as below, so it contributes through its straddling edges only.
        if (p.z > z) == (q.z > z) {
            continue;
        }
        let t = (z - p.z) / (q.z - p.z);
        hits.push(Point2::new(
            t.mul_add(q.x - p.x, p.x),
            t.mul_add(q.y - p.y, p.y),
        ));
    }
    if hits.len() != 2 {
        return None;
    }
    let (p0, p1) = (hits[0], hits[1]);
    if (p1 - p0).norm() <= tolerance {
        return None;
    }
    // In-plane travel direction is z-hat cross the face normal; with
    // outward normals that puts material on the left, which is what
    // makes stitched outer loops come out counter-clockwise.
    let normal = triangle.normal();
    let along = Vector2::new(-normal.y, normal.x);
    if (p1 - p0).dot(&along) >= 0.0 {
        Some((p0, p1))
    } else {
        Some((p1, p0))
    }
}
