//! Error types for mesh selection.

use thiserror::Error;

/// Result type alias for selection operations.
pub type Result<T> = std::result::Result<T, SelectError>;

/// Errors that can occur while selecting from a mesh.
///
/// Every variant is a deterministic function of the input; nothing here is
/// transient or worth retrying.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Face indices are needed for box and region selection.
    #[error(
        "face topology is required: attach faces to the data or pass them explicitly \
         as indices[nelem, 3] defining the triangles"
    )]
    MissingTopology,

    /// Mutually exclusive selection arguments were supplied together.
    #[error("conflicting selection arguments: {0}")]
    ConfigurationConflict(String),

    /// Only nearest-neighbour lookups are implemented.
    #[error("not implemented: {0}")]
    UnsupportedMethod(String),

    /// Arrays that must line up have different lengths.
    #[error("length mismatch for {what}: expected {expected}, got {actual}")]
    DimensionLengthMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// A path given as coordinate columns must have exactly two of them.
    #[error(
        "path with {0} coordinate columns is ambiguous, expected (lons, lats); \
         use a dimension mapping instead"
    )]
    AmbiguousPath(usize),

    /// Distance computation supports 1-D and 2-D coordinate arrays only.
    #[error("{0}-dimensional coordinate arrays are not supported, at most 2 dimensions")]
    UnsupportedDimensionality(usize),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// Nearest-node lookup on a mesh without nodes.
    #[error("mesh has no nodes")]
    EmptyMesh,

    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("no label matching {label} found along dimension {dim}")]
    LabelNotFound { dim: String, label: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SelectError {
    pub fn conflict(details: impl Into<String>) -> Self {
        Self::ConfigurationConflict(details.into())
    }

    pub fn unsupported(details: impl Into<String>) -> Self {
        Self::UnsupportedMethod(details.into())
    }

    pub fn length_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionLengthMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// `true` for the variants reporting arguments that cannot be combined.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConfigurationConflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SelectError::MissingTopology;
        assert!(err.to_string().contains("faces"));

        let err = SelectError::conflict("lon with region");
        assert!(err.is_conflict());
        assert!(err.to_string().contains("lon with region"));

        let err = SelectError::length_mismatch("time", 3, 4);
        assert_eq!(
            err.to_string(),
            "length mismatch for time: expected 3, got 4"
        );

        let err = SelectError::AmbiguousPath(3);
        assert!(err.to_string().contains("3 coordinate columns"));
    }
}
