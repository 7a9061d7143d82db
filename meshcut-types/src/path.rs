//! Paths of query points.
//!
//! A path is an ordered sequence of longitude/latitude positions used for
//! nearest-node lookups along a transect. The variants mirror the shapes
//! callers usually have at hand; the `meshcut` crate normalizes all of them
//! to longitude and latitude arrays plus optional auxiliary dimensions.

use geo::LineString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered query positions.
///
/// # Examples
///
/// ```
/// use meshcut_types::path::Path;
/// use std::collections::BTreeMap;
///
/// let path = Path::from((vec![0.0, 1.0, 2.0], vec![10.0, 10.0, 10.0]));
/// assert_eq!(path.len(), Some(3));
///
/// let mut dims = BTreeMap::new();
/// dims.insert("lon".to_string(), vec![0.0, 1.0]);
/// dims.insert("lat".to_string(), vec![5.0, 5.0]);
/// dims.insert("time".to_string(), vec![0.0, 3600.0]);
/// let path = Path::Dims(dims);
/// assert_eq!(path.len(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Path {
    /// Two equal-length arrays of longitudes and latitudes.
    Coordinates { lon: Vec<f64>, lat: Vec<f64> },
    /// Coordinate columns, expected to be exactly `[lons, lats]`.
    Columns(Vec<Vec<f64>>),
    /// A line geometry; `x` is longitude and `y` is latitude.
    LineString(LineString),
    /// Named coordinate arrays; must contain `lon` and `lat`, any other entry
    /// is matched as an auxiliary dimension.
    Dims(BTreeMap<String, Vec<f64>>),
}

impl Path {
    /// Number of positions, or `None` for column and dimension variants whose
    /// arrays disagree in length.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Coordinates { lon, lat } => (lon.len() == lat.len()).then_some(lon.len()),
            Self::Columns(columns) => common_len(columns.iter().map(Vec::len)),
            Self::LineString(line) => Some(line.0.len()),
            Self::Dims(dims) => common_len(dims.values().map(Vec::len)),
        }
    }

    /// `true` for a path without positions.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

fn common_len(mut lens: impl Iterator<Item = usize>) -> Option<usize> {
    let first = lens.next().unwrap_or(0);
    lens.all(|len| len == first).then_some(first)
}

impl From<(Vec<f64>, Vec<f64>)> for Path {
    fn from((lon, lat): (Vec<f64>, Vec<f64>)) -> Self {
        Self::Coordinates { lon, lat }
    }
}

impl From<Vec<Vec<f64>>> for Path {
    fn from(columns: Vec<Vec<f64>>) -> Self {
        Self::Columns(columns)
    }
}

impl From<LineString> for Path {
    fn from(line: LineString) -> Self {
        Self::LineString(line)
    }
}

impl From<BTreeMap<String, Vec<f64>>> for Path {
    fn from(dims: BTreeMap<String, Vec<f64>>) -> Self {
        Self::Dims(dims)
    }
}
