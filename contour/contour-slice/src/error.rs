//! Fatal input errors.
//!
//! Only malformed input at the mesh/config level is an error; every
//! geometric imperfection encountered during slicing (degenerate
//! contours, unclosable gaps, collapsed offsets) is recovered locally
//! and reported as counters and flags on the emitted [`crate::Slice`].

use thiserror::Error;

/// A fatal condition rejected before slicing begins.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SliceError {
    /// A mesh triangle carries a NaN or infinite coordinate.
    #[error("triangle {index} has a non-finite coordinate")]
    NonFiniteTriangle {
        /// Index of the offending triangle in the mesh.
        index: usize,
    },

    /// Layer thickness must be positive and finite.
    #[error("invalid layer thickness {0}")]
    InvalidLayerThickness(f64),

    /// The mesh contains no triangles, so there is nothing to slice.
    #[error("mesh contains no triangles")]
    EmptyMesh,
}

/// Convenience alias for slicing results.
pub type SliceResult<T> = Result<T, SliceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            SliceError::NonFiniteTriangle { index: 7 }.to_string(),
            "triangle 7 has a non-finite coordinate"
        );
        assert_eq!(
            SliceError::InvalidLayerThickness(0.0).to_string(),
            "invalid layer thickness 0"
        );
        assert_eq!(SliceError::EmptyMesh.to_string(), "mesh contains no triangles");
    }
}
