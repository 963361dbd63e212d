//! The height-stepping orchestrator.

use contour_boolean::self_union;
use contour_types::{build_islands, ContourSet};
use rayon::prelude::*;
use tracing::debug;

use crate::bridge::bridge_direction;
use crate::error::{SliceError, SliceResult};
use crate::mesh::TriangleMesh;
use crate::params::SliceConfig;
use crate::slice::Slice;
use crate::slicer;

/// Lazy, height-ordered production of [`Slice`]s.
///
/// Implements [`Iterator`]: each `next` call cuts one plane, repairs
/// and classifies the result, and steps the height. The sequence is
/// finite and non-restartable; running off the end of the mesh yields
/// `None`, never a panic or a sentinel error. A caller may simply stop
/// calling `next` to cancel - no partial slice is ever emitted.
///
/// # Example
///
/// ```
/// use contour_slice::{SliceConfig, SliceLayerPipeline, TriangleMesh};
///
/// let mesh = TriangleMesh::unit_cube();
/// let pipeline = SliceLayerPipeline::new(&mesh, SliceConfig::new(0.25, 0.5)).unwrap();
///
/// let slices: Vec<_> = pipeline.collect();
/// assert_eq!(slices.len(), 4);
/// assert!(slices.iter().all(|slice| slice.islands.len() == 1));
/// ```
#[derive(Debug)]
pub struct SliceLayerPipeline<'mesh> {
    mesh: &'mesh TriangleMesh,
    config: SliceConfig,
    tolerance: f64,
    z_min: f64,
    z_max: f64,
    next_z: f64,
    index: usize,
    below: Option<ContourSet>,
}

impl<'mesh> SliceLayerPipeline<'mesh> {
    /// Validate the mesh and configuration and position the first plane
    /// half a layer inside the mesh range.
    ///
    /// # Errors
    ///
    /// - [`SliceError::EmptyMesh`] and
    ///   [`SliceError::NonFiniteTriangle`] from mesh validation.
    /// - [`SliceError::InvalidLayerThickness`] for a non-positive or
    ///   non-finite layer or bridge-layer thickness.
    pub fn new(mesh: &'mesh TriangleMesh, config: SliceConfig) -> SliceResult<Self> {
        mesh.validate()?;
        config.validate()?;
        let Some((z_min, z_max)) = mesh.z_range() else {
            return Err(SliceError::EmptyMesh);
        };
        let tolerance = 1e-6 * mesh.xy_bounds().diagonal().max(config.layer_thickness);
        let next_z = if config.descending {
            z_max - 0.5 * config.layer_thickness
        } else {
            z_min + 0.5 * config.layer_thickness
        };
        Ok(Self {
            mesh,
            config,
            tolerance,
            z_min,
            z_max,
            next_z,
            index: 0,
            below: None,
        })
    }

    fn in_range(&self, z: f64) -> bool {
        if self.config.descending {
            z > self.z_min
        } else {
            z < self.z_max
        }
    }
}

impl Iterator for SliceLayerPipeline<'_> {
    type Item = Slice;

    fn next(&mut self) -> Option<Slice> {
        if !self.in_range(self.next_z) {
            return None;
        }
        let (slice, repaired) = build_layer(
            self.mesh,
            &self.config,
            self.tolerance,
            self.z_min,
            self.z_max,
            self.index,
            self.next_z,
            self.below.as_ref(),
        );
        // A bridged layer steps at the bridge-layer thickness.
        let step = slice
            .bridge
            .and(self.config.bridge_layer_thickness)
            .unwrap_or(self.config.layer_thickness);
        self.next_z += if self.config.descending { -step } else { step };
        self.index += 1;
        self.below = Some(repaired);
        Some(slice)
    }
}

/// Slice the whole mesh in one call.
///
/// Sequential when bridging is enabled, since each layer's bridge
/// decision reads the previous layer's loops. With bridging disabled
/// the layers are independent, so they are computed fork-join across
/// the height range and collected in height order.
///
/// # Errors
///
/// Same conditions as [`SliceLayerPipeline::new`].
pub fn slice_mesh(mesh: &TriangleMesh, config: &SliceConfig) -> SliceResult<Vec<Slice>> {
    let pipeline = SliceLayerPipeline::new(mesh, config.clone())?;
    if config.bridge_layer_thickness.is_some() {
        return Ok(pipeline.collect());
    }

    let (z_min, z_max, tolerance) = (pipeline.z_min, pipeline.z_max, pipeline.tolerance);
    let heights = layer_heights(z_min, z_max, config.layer_thickness, config.descending);
    Ok(heights
        .into_par_iter()
        .enumerate()
        .map(|(index, z)| build_layer(mesh, config, tolerance, z_min, z_max, index, z, None).0)
        .collect())
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Cut, repair, classify, and package one layer.
///
/// Returns the slice together with the repaired contour set, which the
/// sequential pipeline feeds into the next layer's bridge detection.
#[allow(clippy::too_many_arguments)]
fn build_layer(
    mesh: &TriangleMesh,
    config: &SliceConfig,
    tolerance: f64,
    z_min: f64,
    z_max: f64,
    index: usize,
    z: f64,
    below: Option<&ContourSet>,
) -> (Slice, ContourSet) {
    let mut plane = slicer::slice_at(mesh, z, tolerance, config.import_radius);
    let mut probed_z = z;
    if plane.loops.is_empty() {
        // A plane landing exactly on a flat face cuts nothing; probe
        // once at a half-step offset, clamped inside the mesh range.
        // The only retry in the engine.
        let half = 0.5 * config.layer_thickness;
        let retry = if config.descending {
            (z - half).max(z_min + tolerance)
        } else {
            (z + half).min(z_max - tolerance)
        };
        debug!(z, retry, "Empty plane inside mesh range; probing at half-step offset");
        plane = slicer::slice_at(mesh, retry, tolerance, config.import_radius);
        if !plane.loops.is_empty() {
            probed_z = retry;
        }
    }

    let raw = ContourSet::from_loops(plane.loops, tolerance);
    let repaired = self_union(&raw, tolerance);
    let dropped_contours = repaired.dropped_degenerate() + plane.unclosed_chains;

    // Bridging reads the layer below; in top-down mode the previous
    // layer is above, so detection is skipped entirely.
    let bridge = match (config.bridge_layer_thickness, below) {
        (Some(_), Some(below)) if !config.descending => {
            bridge_direction(&repaired, below, config.layer_thickness)
        }
        _ => None,
    };

    let islands = build_islands(&repaired);
    let slice = Slice {
        index,
        z: probed_z,
        islands,
        bridge,
        gap_spanned: plane.gap_spanned,
        dropped_contours,
    };
    (slice, repaired)
}

/// The fixed-step plane heights, first plane half a layer inside the
/// range. Only valid when bridging is disabled.
fn layer_heights(z_min: f64, z_max: f64, thickness: f64, descending: bool) -> Vec<f64> {
    let mut heights = Vec::new();
    if descending {
        let mut z = z_max - 0.5 * thickness;
        while z > z_min {
            heights.push(z);
            z -= thickness;
        }
    } else {
        let mut z = z_min + 0.5 * thickness;
        while z < z_max {
            heights.push(z);
            z += thickness;
        }
    }
    heights
}
