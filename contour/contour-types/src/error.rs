//! Error types for contour construction and geometry queries.

use thiserror::Error;

/// Errors that can occur while building contour geometry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Fewer than 3 distinct points remained after degenerate-point removal.
    #[error("Contour has only {remaining} distinct points (need at least 3)")]
    TooFewPoints {
        /// Number of distinct points that survived cleanup.
        remaining: usize,
    },

    /// A coordinate was NaN or infinite.
    #[error("Non-finite coordinate at point index {index}")]
    NonFinitePoint {
        /// Index of the offending point in the input sequence.
        index: usize,
    },
}

/// Result type for contour geometry operations.
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeometryError::TooFewPoints { remaining: 2 };
        assert!(format!("{err}").contains('2'));

        let err = GeometryError::NonFinitePoint { index: 7 };
        assert!(format!("{err}").contains('7'));
    }
}
