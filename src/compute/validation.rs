//! Validation for mesh coordinates, topology and selection regions.

use crate::error::{Result, SelectError};
use meshcut_types::bbox::BoundingBox;
use meshcut_types::face::Face;
use meshcut_types::region::Region;

/// Validates a longitude/latitude pair.
///
/// Latitude: [-90.0, 90.0]. Longitude: [-180.0, 360.0], so meshes stored in
/// either the signed or the 0..360 convention pass.
///
/// # Examples
///
/// ```
/// use meshcut::compute::validation::validate_coordinate;
///
/// assert!(validate_coordinate(-74.0060, 40.7128).is_ok());
/// assert!(validate_coordinate(300.0, -60.0).is_ok());
/// assert!(validate_coordinate(-74.0, 95.0).is_err());
/// assert!(validate_coordinate(f64::NAN, 0.0).is_err());
/// ```
pub fn validate_coordinate(lon: f64, lat: f64) -> Result<()> {
    if !lon.is_finite() {
        return Err(SelectError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !lat.is_finite() {
        return Err(SelectError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !(-180.0..=360.0).contains(&lon) {
        return Err(SelectError::InvalidInput(format!(
            "Longitude out of range [-180.0, 360.0]: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(SelectError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    Ok(())
}

/// Validates paired longitude and latitude arrays.
pub fn validate_coordinates(lon: &[f64], lat: &[f64]) -> Result<()> {
    if lon.len() != lat.len() {
        return Err(SelectError::length_mismatch("lat", lon.len(), lat.len()));
    }
    for (idx, (&x, &y)) in lon.iter().zip(lat).enumerate() {
        validate_coordinate(x, y)
            .map_err(|e| SelectError::InvalidInput(format!("Point at index {}: {}", idx, e)))?;
    }
    Ok(())
}

/// Validates that every face references an existing node.
///
/// # Examples
///
/// ```
/// use meshcut::compute::validation::validate_faces;
///
/// assert!(validate_faces(&[[0, 1, 2]], 3).is_ok());
/// assert!(validate_faces(&[[0, 1, 3]], 3).is_err());
/// ```
pub fn validate_faces(faces: &[Face], node_count: usize) -> Result<()> {
    for (idx, face) in faces.iter().enumerate() {
        if let Some(&node) = face.iter().find(|&&node| node >= node_count) {
            return Err(SelectError::InvalidMesh(format!(
                "Face {} references node {} but the mesh has {} nodes",
                idx, node, node_count
            )));
        }
    }
    Ok(())
}

/// Validates a bounding box.
///
/// Bounds must be finite with `min <= max` on both axes. Degenerate boxes
/// (zero width or height) are allowed.
///
/// # Examples
///
/// ```
/// use meshcut::compute::validation::validate_bbox;
/// use meshcut::BoundingBox;
///
/// assert!(validate_bbox(&BoundingBox::new(-10.0, -10.0, 10.0, 10.0)).is_ok());
/// assert!(validate_bbox(&BoundingBox::new(10.0, -10.0, -10.0, 10.0)).is_err());
/// ```
pub fn validate_bbox(bbox: &BoundingBox) -> Result<()> {
    if bbox.to_array().iter().any(|v| !v.is_finite()) {
        return Err(SelectError::InvalidInput(format!(
            "Bounding box bounds must be finite, got: {:?}",
            bbox.to_array()
        )));
    }

    if bbox.min_lon() > bbox.max_lon() {
        return Err(SelectError::InvalidInput(format!(
            "min_lon ({}) must be <= max_lon ({})",
            bbox.min_lon(),
            bbox.max_lon()
        )));
    }
    if bbox.min_lat() > bbox.max_lat() {
        return Err(SelectError::InvalidInput(format!(
            "min_lat ({}) must be <= max_lat ({})",
            bbox.min_lat(),
            bbox.max_lat()
        )));
    }

    Ok(())
}

/// Validates a selection region: box ordering, or finite polygon rings.
pub fn validate_region(region: &Region) -> Result<()> {
    if let Some(bbox) = region.as_bbox() {
        return validate_bbox(bbox);
    }

    for (poly_idx, polygon) in region.to_multi_polygon().0.iter().enumerate() {
        let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
        for (ring_idx, ring) in rings.enumerate() {
            if let Some(coord) = ring.coords().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
                return Err(SelectError::InvalidInput(format!(
                    "Polygon {} ring {} has a non-finite coordinate ({}, {})",
                    poly_idx, ring_idx, coord.x, coord.y
                )));
            }
        }
    }

    Ok(())
}
