//! Selector builder for flexible configuration
//!
//! This module provides a builder pattern for creating selectors with
//! explicit face topology, a custom node dimension or tuned settings.

use crate::config::SelectConfig;
use crate::container::MeshContainer;
use crate::error::{Result, SelectError};
use crate::mesh::Mesh;
use crate::selector::MeshSelector;
use meshcut_types::face::Face;
use std::sync::Arc;

/// Builder for [`MeshSelector`].
#[derive(Debug, Default)]
pub struct SelectorBuilder {
    config: SelectConfig,
    faces: Option<Vec<Face>>,
    node_dim: Option<String>,
}

impl SelectorBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection configuration.
    pub fn config(mut self, config: SelectConfig) -> Self {
        self.config = config;
        self
    }

    /// Use these faces instead of any attached to the container.
    pub fn faces(mut self, faces: Vec<Face>) -> Self {
        self.faces = Some(faces);
        self
    }

    /// Expect the container's node dimension to carry this name.
    pub fn node_dim(mut self, dim: impl Into<String>) -> Self {
        self.node_dim = Some(dim.into());
        self
    }

    /// Buffer around region boundaries, in degrees.
    pub fn containment_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_containment_tolerance(tolerance);
        self
    }

    /// Build the selector. Validates the configuration and the mesh.
    pub fn build<C: MeshContainer>(self, data: C) -> Result<MeshSelector<C>> {
        if let Some(dim) = &self.node_dim
            && dim != data.node_dim()
        {
            return Err(SelectError::UnknownDimension(format!(
                "expected node dimension {}, container uses {}",
                dim,
                data.node_dim()
            )));
        }

        let config = self.config.with_node_dim(data.node_dim());
        config.validate().map_err(SelectError::InvalidConfig)?;

        let mesh = Mesh::from_container(&data, self.faces)?;
        log::debug!(
            "Built selector over {} nodes and {} faces",
            mesh.node_count(),
            mesh.face_count()
        );

        Ok(MeshSelector::from_parts(data, Arc::new(mesh), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Dataset;
    use meshcut_types::bbox::BoundingBox;

    fn nodes() -> Dataset {
        Dataset::with_node_dim("node", vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn test_builder_face_override() {
        let selector = SelectorBuilder::new()
            .faces(vec![[0, 1, 2]])
            .build(nodes())
            .unwrap();
        assert_eq!(selector.mesh().face_count(), 1);

        let cut = selector
            .select_bbox(BoundingBox::new(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(cut.data.faces().unwrap(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_builder_adopts_node_dim() {
        let selector = SelectorBuilder::new().build(nodes()).unwrap();
        assert_eq!(selector.config().node_dim, "node");
        assert_eq!(selector.config().selection_dim(), "node");
    }

    #[test]
    fn test_builder_node_dim_mismatch() {
        let result = SelectorBuilder::new().node_dim("nod2").build(nodes());
        assert!(matches!(result, Err(SelectError::UnknownDimension(_))));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = SelectorBuilder::new()
            .containment_tolerance(f64::NAN)
            .build(nodes());
        assert!(matches!(result, Err(SelectError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_bad_faces() {
        let result = SelectorBuilder::new().faces(vec![[0, 1, 5]]).build(nodes());
        assert!(matches!(result, Err(SelectError::InvalidMesh(_))));
    }
}
