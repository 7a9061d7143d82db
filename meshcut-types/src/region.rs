//! Selection regions.
//!
//! A region is either a bounding box, a polygon or a collection of polygons,
//! all in longitude/latitude degrees. Every variant converts to a single
//! `geo::MultiPolygon`, which is what containment tests run against.

use crate::bbox::BoundingBox;
use geo::{MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

/// A spatial selection predicate.
///
/// # Examples
///
/// ```
/// use meshcut_types::region::Region;
/// use geo::polygon;
///
/// let triangle = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 0.0, y: 10.0)];
/// let region = Region::from(triangle);
/// assert_eq!(region.to_multi_polygon().0.len(), 1);
///
/// let bbox = Region::from([0.0, 0.0, 5.0, 5.0]);
/// assert!(bbox.as_bbox().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    BBox(BoundingBox),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl Region {
    /// The single internal representation used for containment tests.
    ///
    /// Boxes become rectangular polygons.
    pub fn to_multi_polygon(&self) -> MultiPolygon {
        match self {
            Self::BBox(bbox) => MultiPolygon::new(vec![bbox.to_polygon()]),
            Self::Polygon(polygon) => MultiPolygon::new(vec![polygon.clone()]),
            Self::MultiPolygon(polygons) => polygons.clone(),
        }
    }

    pub fn as_bbox(&self) -> Option<&BoundingBox> {
        match self {
            Self::BBox(bbox) => Some(bbox),
            _ => None,
        }
    }

    /// Number of polygons the region is made of.
    pub fn polygon_count(&self) -> usize {
        match self {
            Self::BBox(_) | Self::Polygon(_) => 1,
            Self::MultiPolygon(polygons) => polygons.0.len(),
        }
    }
}

impl From<BoundingBox> for Region {
    fn from(bbox: BoundingBox) -> Self {
        Self::BBox(bbox)
    }
}

impl From<[f64; 4]> for Region {
    fn from(bounds: [f64; 4]) -> Self {
        Self::BBox(bounds.into())
    }
}

impl From<Polygon> for Region {
    fn from(polygon: Polygon) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<MultiPolygon> for Region {
    fn from(polygons: MultiPolygon) -> Self {
        Self::MultiPolygon(polygons)
    }
}

impl From<Vec<Polygon>> for Region {
    fn from(polygons: Vec<Polygon>) -> Self {
        Self::MultiPolygon(MultiPolygon::new(polygons))
    }
}
