//! Triangle-soup mesh input.

use contour_types::{Bounds, Point2};
use nalgebra::{Point3, Vector3};

use crate::error::{SliceError, SliceResult};

/// One triangle of the input solid.
///
/// Vertices are expected in counter-clockwise order seen from outside,
/// so the face normal points out of the material. The slicing-axis
/// range is computed once at construction; the slicer rejects
/// non-straddling triangles against it without touching the vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f64>; 3],
    z_min: f64,
    z_max: f64,
}

impl Triangle {
    /// Build a triangle and cache its z-range.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self {
            vertices: [a, b, c],
            z_min: a.z.min(b.z).min(c.z),
            z_max: a.z.max(b.z).max(c.z),
        }
    }

    /// The three vertices.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point3<f64>; 3] {
        &self.vertices
    }

    /// Lowest vertex height.
    #[inline]
    #[must_use]
    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    /// Highest vertex height.
    #[inline]
    #[must_use]
    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// True when the plane `z` cuts through this triangle.
    ///
    /// The lower bound is inclusive and the upper exclusive, matching
    /// the strictly-above vertex classification the slicer uses, so a
    /// vertex exactly at `z` never double-counts.
    #[inline]
    #[must_use]
    pub fn straddles(&self, z: f64) -> bool {
        self.z_min <= z && z < self.z_max
    }

    /// Unnormalized face normal from the vertex winding.
    #[must_use]
    pub fn normal(&self) -> Vector3<f64> {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a))
    }

    fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite())
    }
}

/// The input solid: a flat bag of triangles.
///
/// Read-only for the whole engine; loaded once by the caller and never
/// mutated. No connectivity is required - the stitcher reconnects
/// cross-sections from shared edge geometry, with a tolerance fallback
/// for meshes that are not watertight.
///
/// # Example
///
/// ```
/// use contour_slice::TriangleMesh;
///
/// let cube = TriangleMesh::unit_cube();
/// assert_eq!(cube.len(), 12);
/// assert_eq!(cube.z_range(), Some((0.0, 1.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Wrap a triangle soup.
    #[must_use]
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// The triangles.
    #[inline]
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Height range covered by the mesh, `None` when empty.
    #[must_use]
    pub fn z_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for triangle in &self.triangles {
            range = Some(match range {
                None => (triangle.z_min, triangle.z_max),
                Some((lo, hi)) => (lo.min(triangle.z_min), hi.max(triangle.z_max)),
            });
        }
        range
    }

    /// Bounding box of the vertices projected onto the slicing plane.
    ///
    /// Its diagonal is what the pipeline derives the exact stitching
    /// tolerance from.
    #[must_use]
    pub fn xy_bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for triangle in &self.triangles {
            for v in triangle.vertices() {
                bounds.expand_to_include(&Point2::new(v.x, v.y));
            }
        }
        bounds
    }

    /// Reject malformed input before slicing begins.
    ///
    /// # Errors
    ///
    /// - [`SliceError::EmptyMesh`] when there are no triangles.
    /// - [`SliceError::NonFiniteTriangle`] naming the first triangle
    ///   with a NaN or infinite coordinate.
    pub fn validate(&self) -> SliceResult<()> {
        if self.triangles.is_empty() {
            return Err(SliceError::EmptyMesh);
        }
        for (index, triangle) in self.triangles.iter().enumerate() {
            if !triangle.is_finite() {
                return Err(SliceError::NonFiniteTriangle { index });
            }
        }
        Ok(())
    }

    /// Extrude planar loops into vertical walls between two heights.
    ///
    /// Each loop edge becomes a quad of two triangles with the normal
    /// facing away from the material, assuming the usual winding
    /// (counter-clockwise solids, clockwise holes). No end caps are
    /// generated; the result slices correctly at any interior height.
    #[must_use]
    pub fn from_extruded_loops(loops: &[Vec<Point2<f64>>], z_bottom: f64, z_top: f64) -> Self {
        let mut triangles = Vec::new();
        for points in loops {
            let n = points.len();
            for i in 0..n {
                let p = points[i];
                let q = points[(i + 1) % n];
                let bp = Point3::new(p.x, p.y, z_bottom);
                let bq = Point3::new(q.x, q.y, z_bottom);
                let tp = Point3::new(p.x, p.y, z_top);
                let tq = Point3::new(q.x, q.y, z_top);
                triangles.push(Triangle::new(bp, bq, tq));
                triangles.push(Triangle::new(bp, tq, tp));
            }
        }
        Self::new(triangles)
    }

    /// The canonical watertight test solid: 8 vertices, 12 triangles,
    /// spanning `[0, 1]` on every axis, outward normals throughout.
    #[must_use]
    pub fn unit_cube() -> Self {
        let v = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        Self::new(vec![
            // bottom (z = 0)
            Triangle::new(v(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(1.0, 1.0, 0.0)),
            Triangle::new(v(0.0, 0.0, 0.0), v(1.0, 1.0, 0.0), v(1.0, 0.0, 0.0)),
            // top (z = 1)
            Triangle::new(v(0.0, 0.0, 1.0), v(1.0, 0.0, 1.0), v(1.0, 1.0, 1.0)),
            Triangle::new(v(0.0, 0.0, 1.0), v(1.0, 1.0, 1.0), v(0.0, 1.0, 1.0)),
            // front (y = 0)
            Triangle::new(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 0.0, 1.0)),
            Triangle::new(v(0.0, 0.0, 0.0), v(1.0, 0.0, 1.0), v(0.0, 0.0, 1.0)),
            // right (x = 1)
            Triangle::new(v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0), v(1.0, 1.0, 1.0)),
            Triangle::new(v(1.0, 0.0, 0.0), v(1.0, 1.0, 1.0), v(1.0, 0.0, 1.0)),
            // back (y = 1)
            Triangle::new(v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0), v(0.0, 1.0, 1.0)),
            Triangle::new(v(1.0, 1.0, 0.0), v(0.0, 1.0, 1.0), v(1.0, 1.0, 1.0)),
            // left (x = 0)
            Triangle::new(v(0.0, 1.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 0.0, 1.0)),
            Triangle::new(v(0.0, 1.0, 0.0), v(0.0, 0.0, 1.0), v(0.0, 1.0, 1.0)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_shape() {
        let cube = TriangleMesh::unit_cube();
        assert_eq!(cube.len(), 12);
        assert_eq!(cube.z_range(), Some((0.0, 1.0)));
        assert!((cube.xy_bounds().diagonal() - 2.0_f64.sqrt()).abs() < 1e-12);
        cube.validate().unwrap();
    }

    #[test]
    fn cube_normals_point_outward() {
        for triangle in TriangleMesh::unit_cube().triangles() {
            let centroid = {
                let [a, b, c] = *triangle.vertices();
                Point3::from((a.coords + b.coords + c.coords) / 3.0)
            };
            let outward = centroid - Point3::new(0.5, 0.5, 0.5);
            assert!(triangle.normal().dot(&outward) > 0.0);
        }
    }

    #[test]
    fn straddle_bounds() {
        let wall = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 2.0),
        );
        assert!(wall.straddles(0.0));
        assert!(wall.straddles(1.0));
        assert!(!wall.straddles(2.0));
        assert!(!wall.straddles(-0.1));
    }

    #[test]
    fn validation_reports_triangle_index() {
        let mut triangles = TriangleMesh::unit_cube().triangles().to_vec();
        triangles[5] = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(f64::NAN, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        );
        let err = TriangleMesh::new(triangles).validate().unwrap_err();
        assert_eq!(err, SliceError::NonFiniteTriangle { index: 5 });
    }

    #[test]
    fn empty_mesh_rejected() {
        let err = TriangleMesh::new(Vec::new()).validate().unwrap_err();
        assert_eq!(err, SliceError::EmptyMesh);
    }

    #[test]
    fn extruded_loop_wall_count() {
        let square = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let mesh = TriangleMesh::from_extruded_loops(&[square], 0.0, 2.0);
        assert_eq!(mesh.len(), 8);
        assert_eq!(mesh.z_range(), Some((0.0, 2.0)));
    }
}
