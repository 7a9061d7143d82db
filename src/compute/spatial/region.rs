//! Polygon and multi-polygon region selection.
//!
//! A region is prepared once: converted to a single multi-polygon and paired
//! with its bounding rectangle, grown by the containment tolerance, so most
//! nodes far from the region are rejected without a geometric test.

use super::selection::{Selection, SelectionStatus, faces_where, subset_by_faces, subset_nodes};
use crate::compute::validation::{validate_faces, validate_region};
use crate::container::MeshContainer;
use crate::error::{Result, SelectError};
use geo::{BoundingRect, Closest, ClosestPoint, Distance, Euclidean, Intersects, MultiPolygon, Point};
use meshcut_types::bbox::BoundingBox;
use meshcut_types::face::Face;
use meshcut_types::region::Region;

/// Region ready for repeated containment tests.
#[derive(Debug, Clone)]
pub struct PreparedRegion {
    shape: MultiPolygon,
    envelope: Option<BoundingBox>,
    tolerance: f64,
}

impl PreparedRegion {
    /// Prepare `region` with a boundary buffer of `tolerance` degrees.
    pub fn new(region: &Region, tolerance: f64) -> Result<Self> {
        validate_region(region)?;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(SelectError::InvalidInput(format!(
                "containment tolerance must be finite and non-negative, got: {}",
                tolerance
            )));
        }

        let shape = region.to_multi_polygon();
        let envelope = shape
            .bounding_rect()
            .map(|rect| BoundingBox::from_rect(rect).expand(tolerance));

        Ok(Self {
            shape,
            envelope,
            tolerance,
        })
    }

    pub fn shape(&self) -> &MultiPolygon {
        &self.shape
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether a position lies in or on the region, or within the tolerance
    /// of its boundary.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        match self.envelope {
            Some(envelope) if envelope.contains(lon, lat) => {}
            _ => return false,
        }

        let point = Point::new(lon, lat);
        if self.shape.intersects(&point) {
            return true;
        }
        if self.tolerance == 0.0 {
            return false;
        }

        match self.shape.closest_point(&point) {
            Closest::Intersection(p) | Closest::SinglePoint(p) => {
                Euclidean.distance(p, point) <= self.tolerance
            }
            Closest::Indeterminate => false,
        }
    }

    /// Containment flag for every node.
    pub fn node_mask(&self, lon: &[f64], lat: &[f64]) -> Vec<bool> {
        lon.iter()
            .zip(lat)
            .map(|(&x, &y)| self.contains(x, y))
            .collect()
    }
}

/// Cut the mesh to the faces lying fully inside `region`.
///
/// A node is inside when it is in or on the region, or within `tolerance`
/// degrees of its boundary. A face survives when all three of its nodes are
/// inside. Surviving faces are compacted onto the sliced node dimension.
///
/// Two outcomes are not errors and are logged as warnings instead:
/// - no node inside: the input comes back unchanged with
///   [`SelectionStatus::EmptyRegion`]
/// - nodes inside but no face: the node dimension is sliced to nothing and
///   `faces` dropped, with [`SelectionStatus::NoFaces`]
///
/// # Errors
///
/// [`SelectError::MissingTopology`] when neither `faces` nor the container
/// provide faces.
pub fn select_region<C: MeshContainer>(
    data: &C,
    region: &Region,
    faces: Option<&[Face]>,
    tolerance: f64,
) -> Result<Selection<C>> {
    let faces = faces.or_else(|| data.faces()).ok_or(SelectError::MissingTopology)?;
    validate_faces(faces, data.node_count())?;
    let prepared = PreparedRegion::new(region, tolerance)?;

    let mask = prepared.node_mask(data.lon(), data.lat());
    let inside: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(node, &flag)| flag.then_some(node))
        .collect();

    if inside.is_empty() {
        log::warn!("No nodes found inside the selected region, returning data unchanged");
        return Ok(Selection::new(SelectionStatus::EmptyRegion, data.clone()));
    }

    let kept = faces_where(faces, |node| mask[node]);
    if kept.is_empty() {
        log::warn!(
            "{} nodes inside the selected region but no complete faces, returning data without nodes or faces",
            inside.len()
        );
        return Ok(Selection::new(
            SelectionStatus::NoFaces,
            subset_nodes(data, &[])?,
        ));
    }

    log::debug!(
        "Region kept {} of {} nodes and {} of {} faces",
        inside.len(),
        data.node_count(),
        kept.len(),
        faces.len()
    );
    Ok(Selection::new(
        SelectionStatus::Selected,
        subset_by_faces(data, &kept)?,
    ))
}
