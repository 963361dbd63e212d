//! Slicing configuration values.

use crate::error::{SliceError, SliceResult};

/// Plain-value configuration for the layer pipeline.
///
/// Carries no behavior and no global state; the pipeline takes it by
/// value at construction, so two pipelines with different settings can
/// run side by side.
///
/// # Example
///
/// ```
/// use contour_slice::SliceConfig;
///
/// let config = SliceConfig::new(0.3, 0.5).with_bridging(0.4);
/// assert!((config.import_radius - 0.25).abs() < 1e-12);
/// assert_eq!(config.bridge_layer_thickness, Some(0.4));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SliceConfig {
    /// Height of each printed layer.
    pub layer_thickness: f64,
    /// Extruded perimeter line width.
    pub line_width: f64,
    /// Gap-spanning stitch radius for non-watertight meshes.
    ///
    /// Defaults to half the line width: gaps narrower than a perimeter
    /// line are bridged by extrusion anyway. Independent of the offset
    /// retention threshold on purpose.
    pub import_radius: f64,
    /// Layer thickness over detected bridges; `None` disables bridge
    /// detection entirely (and with it the layer-to-layer dependency).
    pub bridge_layer_thickness: Option<f64>,
    /// Slice top-down (subtractive chop mode) instead of bottom-up.
    pub descending: bool,
}

impl SliceConfig {
    /// Configuration with the derived default import radius.
    #[must_use]
    pub fn new(layer_thickness: f64, line_width: f64) -> Self {
        Self {
            layer_thickness,
            line_width,
            import_radius: 0.5 * line_width,
            bridge_layer_thickness: None,
            descending: false,
        }
    }

    /// Override the gap-spanning radius.
    #[must_use]
    pub fn with_import_radius(mut self, import_radius: f64) -> Self {
        self.import_radius = import_radius;
        self
    }

    /// Enable bridge detection with the given bridge-layer thickness.
    #[must_use]
    pub fn with_bridging(mut self, bridge_layer_thickness: f64) -> Self {
        self.bridge_layer_thickness = Some(bridge_layer_thickness);
        self
    }

    /// Slice top-down instead of bottom-up.
    #[must_use]
    pub fn top_down(mut self) -> Self {
        self.descending = true;
        self
    }

    pub(crate) fn validate(&self) -> SliceResult<()> {
        if !self.layer_thickness.is_finite() || self.layer_thickness <= 0.0 {
            return Err(SliceError::InvalidLayerThickness(self.layer_thickness));
        }
        if let Some(thickness) = self.bridge_layer_thickness {
            if !thickness.is_finite() || thickness <= 0.0 {
                return Err(SliceError::InvalidLayerThickness(thickness));
            }
        }
        Ok(())
    }
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self::new(0.4, 0.6)
    }
}
