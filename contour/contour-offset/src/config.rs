//! Offset configuration.

/// Tuning knobs for contour offsetting.
///
/// The defaults reproduce the engine's standard perimeter behavior;
/// the retention threshold is exposed separately from the slicer's
/// gap-spanning radius because the two tolerances are related but not
/// provably equal.
#[derive(Debug, Clone)]
pub struct OffsetConfig {
    /// Minimum surviving-loop span as a multiple of the offset radius.
    ///
    /// A resulting loop whose largest bounding-box extent is below
    /// `min_span_factor * |radius|` is treated as a vanished feature and
    /// discarded.
    pub min_span_factor: f64,

    /// Point-merge radius as a fraction of the offset radius.
    ///
    /// Raw offset vertices closer together than this are collapsed
    /// before self-intersection removal.
    pub merge_fraction: f64,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            min_span_factor: 2.5,
            merge_fraction: 0.001,
        }
    }
}

impl OffsetConfig {
    /// Set the minimum-span retention factor.
    #[must_use]
    pub const fn with_min_span_factor(mut self, factor: f64) -> Self {
        self.min_span_factor = factor;
        self
    }

    /// Keep every non-inverted loop regardless of span.
    ///
    /// Useful for probe geometry where even slivers carry information.
    #[must_use]
    pub const fn keep_slivers() -> Self {
        Self {
            min_span_factor: 0.0,
            merge_fraction: 0.001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_retention() {
        let config = OffsetConfig::default();
        assert!((config.min_span_factor - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn builder_overrides() {
        let config = OffsetConfig::default().with_min_span_factor(1.0);
        assert!((config.min_span_factor - 1.0).abs() < f64::EPSILON);

        let sliver = OffsetConfig::keep_slivers();
        assert!(sliver.min_span_factor.abs() < f64::EPSILON);
    }
}
