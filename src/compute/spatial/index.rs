//! Nearest-node index over mesh nodes.
//!
//! Nodes are embedded on the WGS84 ellipsoid in geocentric (ECEF) coordinates
//! before indexing, so nearest-neighbour lookups see true spatial proximity:
//! no seam at the antimeridian and no distortion towards the poles, which a
//! flat lon/lat tree would have.
//!
//! The distance reported for a match is the geodesic distance in meters
//! between the query position and the matched node.

use crate::compute::validation::validate_coordinate;
use crate::error::{Result, SelectError};
use geo::{Distance, Geodesic, Point as GeoPoint};
use rstar::{Point as RstarPoint, RTree};

/// WGS84 semi-major axis in meters.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Geocentric position of a mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Position of the node in the mesh
    pub node: usize,
}

impl NodePoint {
    /// Project a lon/lat position (degrees, height 0) to geocentric meters.
    pub fn from_lon_lat(lon: f64, lat: f64, node: usize) -> Self {
        let e2 = WGS84_F * (2.0 - WGS84_F);
        let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
        let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
        let n = WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt();

        Self {
            x: n * cos_lat * cos_lon,
            y: n * cos_lat * sin_lon,
            z: n * (1.0 - e2) * sin_lat,
            node,
        }
    }
}

impl RstarPoint for NodePoint {
    type Scalar = f64;
    const DIMENSIONS: usize = 3;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Self {
            x: generator(0),
            y: generator(1),
            z: generator(2),
            node: 0,
        }
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => unreachable!(),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => unreachable!(),
        }
    }
}

/// Result of a nearest-node lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNode {
    /// Position of the matched node in the mesh
    pub node: usize,
    /// Geodesic distance from the query to the node, in meters
    pub distance: f64,
}

/// R*-tree over the geocentric positions of all mesh nodes.
///
/// # Examples
///
/// ```
/// use meshcut::compute::spatial::NodeIndex;
///
/// let index = NodeIndex::build(&[0.0, 10.0, 179.9], &[0.0, 0.0, 0.0]);
/// let hit = index.nearest(-179.9, 0.0)?;
/// assert_eq!(hit.node, 2);
/// assert!(hit.distance < 25_000.0);
/// # Ok::<(), meshcut::SelectError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NodeIndex {
    tree: RTree<NodePoint>,
    lon: Vec<f64>,
    lat: Vec<f64>,
}

impl NodeIndex {
    /// Bulk-load the index. Extra entries in the longer slice are ignored.
    pub fn build(lon: &[f64], lat: &[f64]) -> Self {
        let points: Vec<NodePoint> = lon
            .iter()
            .zip(lat)
            .enumerate()
            .map(|(node, (&x, &y))| NodePoint::from_lon_lat(x, y, node))
            .collect();
        let len = points.len();

        log::debug!("Building node index over {} nodes", len);

        Self {
            tree: RTree::bulk_load(points),
            lon: lon[..len].to_vec(),
            lat: lat[..len].to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Find the node closest to `(lon, lat)`.
    ///
    /// Non-finite or out-of-range positions are rejected with
    /// [`SelectError::InvalidInput`].
    pub fn nearest(&self, lon: f64, lat: f64) -> Result<NearestNode> {
        validate_coordinate(lon, lat)?;
        let query = NodePoint::from_lon_lat(lon, lat, 0);
        let hit = self.tree.nearest_neighbor(&query).ok_or(SelectError::EmptyMesh)?;

        let distance = Geodesic.distance(
            GeoPoint::new(lon, lat),
            GeoPoint::new(self.lon[hit.node], self.lat[hit.node]),
        );

        Ok(NearestNode {
            node: hit.node,
            distance,
        })
    }

    /// Nearest node for every query position, in query order.
    pub fn nearest_all(&self, lon: &[f64], lat: &[f64]) -> Result<Vec<NearestNode>> {
        if lon.len() != lat.len() {
            return Err(SelectError::length_mismatch("lat", lon.len(), lat.len()));
        }
        lon.iter()
            .zip(lat)
            .map(|(&x, &y)| self.nearest(x, y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_axes() {
        let p = NodePoint::from_lon_lat(0.0, 0.0, 0);
        assert_relative_eq!(p.x, WGS84_A, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);

        let pole = NodePoint::from_lon_lat(0.0, 90.0, 0);
        // Polar radius b = a (1 - f)
        assert_relative_eq!(pole.z, WGS84_A * (1.0 - WGS84_F), epsilon = 1e-3);
    }

    #[test]
    fn test_exact_node_has_zero_distance() {
        let index = NodeIndex::build(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]);
        let hit = index.nearest(1.0, 1.0).unwrap();
        assert_eq!(hit.node, 1);
        assert!(hit.distance < 1e-6);
    }

    #[test]
    fn test_across_antimeridian() {
        let index = NodeIndex::build(&[179.0, -179.5, 0.0], &[10.0, 10.0, 10.0]);
        assert_eq!(index.nearest(-179.9, 10.0).unwrap().node, 1);
        assert_eq!(index.nearest(179.9, 10.0).unwrap().node, 1);
    }

    #[test]
    fn test_0_360_longitudes() {
        let index = NodeIndex::build(&[350.0, 10.0], &[0.0, 0.0]);
        assert_eq!(index.nearest(-9.0, 0.0).unwrap().node, 0);
    }

    #[test]
    fn test_near_pole() {
        // Near the pole all longitudes are close together.
        let index = NodeIndex::build(&[0.0, 90.0], &[89.99, 80.0]);
        assert_eq!(index.nearest(180.0, 89.99).unwrap().node, 0);
    }

    #[test]
    fn test_empty_index() {
        let index = NodeIndex::build(&[], &[]);
        assert!(index.is_empty());
        assert!(matches!(index.nearest(0.0, 0.0), Err(SelectError::EmptyMesh)));
    }

    #[test]
    fn test_invalid_query_position() {
        let index = NodeIndex::build(&[0.0, 1.0], &[0.0, 0.0]);
        assert!(matches!(index.nearest(f64::NAN, 0.0), Err(SelectError::InvalidInput(_))));
        assert!(matches!(index.nearest(0.0, f64::NAN), Err(SelectError::InvalidInput(_))));
        assert!(index.nearest_all(&[0.0, f64::INFINITY], &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_nearest_all_length_mismatch() {
        let index = NodeIndex::build(&[0.0], &[0.0]);
        assert!(index.nearest_all(&[0.0, 1.0], &[0.0]).is_err());
        assert_eq!(index.nearest_all(&[0.1, 0.2], &[0.0, 0.0]).unwrap().len(), 2);
    }
}
