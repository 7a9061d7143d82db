//! GeoJSON input for regions and paths.

use crate::path::Path;
use crate::region::Region;
use geo::{Coord, LineString, MultiPolygon, Polygon};
use ::geojson::{Geometry, PolygonType, Position, Value};

/// Error type for GeoJSON conversions.
#[derive(Debug)]
pub enum GeoJsonError {
    /// Deserialization failed
    Deserialization(String),
    /// Invalid geometry type
    InvalidGeometry(String),
    /// Invalid coordinates
    InvalidCoordinates(String),
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deserialization(msg) => write!(f, "GeoJSON deserialization error: {}", msg),
            Self::InvalidGeometry(msg) => write!(f, "Invalid GeoJSON geometry: {}", msg),
            Self::InvalidCoordinates(msg) => write!(f, "Invalid GeoJSON coordinates: {}", msg),
        }
    }
}

impl std::error::Error for GeoJsonError {}

fn parse_geometry(geojson: &str) -> Result<Geometry, GeoJsonError> {
    serde_json::from_str(geojson)
        .map_err(|e| GeoJsonError::Deserialization(format!("Failed to parse GeoJSON: {}", e)))
}

fn to_coord(position: &Position) -> Result<Coord, GeoJsonError> {
    match position.as_slice() {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(GeoJsonError::InvalidCoordinates(
            "Position must have at least 2 coordinates".to_string(),
        )),
    }
}

fn to_line_string(positions: &[Position]) -> Result<LineString, GeoJsonError> {
    positions
        .iter()
        .map(to_coord)
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::from)
}

fn to_polygon(rings: &PolygonType) -> Result<Polygon, GeoJsonError> {
    let (exterior, interiors) = rings.split_first().ok_or_else(|| {
        GeoJsonError::InvalidCoordinates("Polygon must have an exterior ring".to_string())
    })?;
    let interiors = interiors
        .iter()
        .map(|ring| to_line_string(ring))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(to_line_string(exterior)?, interiors))
}

impl Region {
    /// Parse a region from a GeoJSON `Polygon` or `MultiPolygon` geometry.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshcut_types::region::Region;
    ///
    /// let json = r#"{"type":"Polygon","coordinates":[[[0,0],[4,0],[4,4],[0,4],[0,0]]]}"#;
    /// let region = Region::from_geojson(json).unwrap();
    /// assert_eq!(region.polygon_count(), 1);
    /// ```
    pub fn from_geojson(geojson: &str) -> Result<Self, GeoJsonError> {
        match parse_geometry(geojson)?.value {
            Value::Polygon(rings) => Ok(Self::Polygon(to_polygon(&rings)?)),
            Value::MultiPolygon(polygons) => {
                let polygons = polygons
                    .iter()
                    .map(to_polygon)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::MultiPolygon(MultiPolygon::new(polygons)))
            }
            _ => Err(GeoJsonError::InvalidGeometry(
                "GeoJSON geometry is not a Polygon or MultiPolygon".to_string(),
            )),
        }
    }
}

impl Path {
    /// Parse a path from a GeoJSON `LineString` geometry.
    pub fn from_geojson(geojson: &str) -> Result<Self, GeoJsonError> {
        match parse_geometry(geojson)?.value {
            Value::LineString(positions) => Ok(Self::LineString(to_line_string(&positions)?)),
            _ => Err(GeoJsonError::InvalidGeometry(
                "GeoJSON geometry is not a LineString".to_string(),
            )),
        }
    }
}
