//! Axis-aligned bounding box cutting.

use super::selection::{Selection, SelectionStatus, faces_where, subset_by_faces, subset_nodes};
use crate::compute::validation::{validate_bbox, validate_faces};
use crate::container::MeshContainer;
use crate::error::{Result, SelectError};
use meshcut_types::bbox::BoundingBox;
use meshcut_types::face::Face;

/// Faces with all three vertices inside `bbox`, bounds inclusive.
///
/// Faces keep their global node indices.
///
/// # Examples
///
/// ```
/// use meshcut::compute::spatial::cut_faces;
/// use meshcut::BoundingBox;
///
/// let lon = [0.0, 1.0, 2.0, 0.0];
/// let lat = [0.0, 0.0, 0.0, 1.0];
/// let faces = [[0, 1, 3], [1, 2, 3]];
///
/// let kept = cut_faces(&lon, &lat, &faces, &BoundingBox::new(0.0, 0.0, 1.0, 1.0));
/// assert_eq!(kept, vec![[0, 1, 3]]);
/// ```
pub fn cut_faces(lon: &[f64], lat: &[f64], faces: &[Face], bbox: &BoundingBox) -> Vec<Face> {
    faces_where(faces, |node| bbox.contains(lon[node], lat[node]))
}

/// Cut the mesh to the faces lying fully inside `bbox`.
///
/// Faces come from `faces` when given, else from the container. The result
/// is sliced to the nodes those faces use, with `faces` remapped onto the
/// sliced node dimension. When no face survives, the node dimension is
/// sliced to nothing, `faces` is dropped and the status is
/// [`SelectionStatus::NoFaces`].
///
/// # Errors
///
/// - [`SelectError::MissingTopology`] when no faces are available
/// - [`SelectError::InvalidInput`] for an unordered or non-finite box
/// - [`SelectError::InvalidMesh`] when a face references a missing node
pub fn select_bbox<C: MeshContainer>(
    data: &C,
    bbox: &BoundingBox,
    faces: Option<&[Face]>,
) -> Result<Selection<C>> {
    validate_bbox(bbox)?;
    let faces = faces.or_else(|| data.faces()).ok_or(SelectError::MissingTopology)?;
    validate_faces(faces, data.node_count())?;

    let (lon, lat) = (data.lon(), data.lat());
    let kept = cut_faces(lon, lat, faces, bbox);

    if kept.is_empty() {
        log::warn!(
            "No faces lie fully inside bounding box {:?}, returning data without nodes or faces",
            bbox.to_array()
        );
        return Ok(Selection::new(
            SelectionStatus::NoFaces,
            subset_nodes(data, &[])?,
        ));
    }

    log::debug!("Bounding box kept {} of {} faces", kept.len(), faces.len());
    Ok(Selection::new(
        SelectionStatus::Selected,
        subset_by_faces(data, &kept)?,
    ))
}
