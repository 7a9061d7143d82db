//! Selection dispatch.
//!
//! One request can carry a spatial part (point coordinates, a region, or a
//! path) and label indexers over any other dimension. The spatial part runs
//! first, then range indexers, then label indexers.

use crate::compute::spatial::{
    NodeIndex, PointQuery, Selection, SelectionStatus, select_points, select_region,
};
use crate::config::SelectConfig;
use crate::container::{Indexer, MeshContainer, Method};
use crate::error::{Result, SelectError};
use crate::mesh::Mesh;
use meshcut_types::path::Path;
use meshcut_types::region::Region;
use std::collections::BTreeMap;

const LON: &str = "lon";
const LAT: &str = "lat";

/// A combined selection.
///
/// Point coordinates are given as `lon` and `lat` indexers. At most one of
/// point coordinates, `region` and `path` may be set.
///
/// # Examples
///
/// ```
/// use meshcut::{Indexer, SelectRequest};
///
/// let request = SelectRequest::new()
///     .region([0.0, 40.0, 10.0, 50.0])
///     .sel("time", Indexer::range(0.0, 86400.0));
///
/// assert!(request.region.is_some());
/// assert!(request.indexers.contains_key("time"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectRequest {
    /// Label matching method; the configured default when unset
    pub method: Option<Method>,
    pub tolerance: Option<f64>,
    pub region: Option<Region>,
    pub path: Option<Path>,
    pub indexers: BTreeMap<String, Indexer>,
}

impl SelectRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn region(mut self, region: impl Into<Region>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn path(mut self, path: impl Into<Path>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add an indexer for `dim`, replacing any earlier one.
    pub fn sel(mut self, dim: impl Into<String>, indexer: impl Into<Indexer>) -> Self {
        self.indexers.insert(dim.into(), indexer.into());
        self
    }

    /// Nearest-node lookup at the given positions.
    pub fn points(self, lon: Vec<f64>, lat: Vec<f64>) -> Self {
        self.sel(LON, lon).sel(LAT, lat)
    }

    fn spatial_indexers(&self) -> (Option<&Indexer>, Option<&Indexer>) {
        (self.indexers.get(LON), self.indexers.get(LAT))
    }

    /// Reject argument combinations that cannot be resolved.
    pub fn validate(&self) -> Result<()> {
        let (lon, lat) = self.spatial_indexers();
        let has_points = lon.is_some() || lat.is_some();

        if has_points && (self.region.is_some() || self.path.is_some()) {
            return Err(SelectError::conflict(
                "only one of lon/lat indexers, path or region is supported",
            ));
        }
        if self.region.is_some() && self.path.is_some() {
            return Err(SelectError::conflict(
                "region and path cannot be combined",
            ));
        }
        if has_points && (lon.is_none() || lat.is_none()) {
            return Err(SelectError::conflict(
                "both lon and lat indexers are needed, else use a path or region",
            ));
        }
        Ok(())
    }
}

/// Split a path into longitudes, latitudes and auxiliary dimensions.
///
/// # Errors
///
/// - [`SelectError::AmbiguousPath`] for coordinate columns other than two
/// - [`SelectError::InvalidInput`] for a dimension mapping without `lon` or `lat`
pub fn path_query(path: &Path) -> Result<PointQuery> {
    match path {
        Path::Coordinates { lon, lat } => Ok(PointQuery::new(lon.clone(), lat.clone())),
        Path::Columns(columns) => match columns.as_slice() {
            [lon, lat] => Ok(PointQuery::new(lon.clone(), lat.clone())),
            other => Err(SelectError::AmbiguousPath(other.len())),
        },
        Path::LineString(line) => {
            let (lon, lat) = line.coords().map(|c| (c.x, c.y)).unzip();
            Ok(PointQuery::new(lon, lat))
        }
        Path::Dims(dims) => {
            let (Some(lon), Some(lat)) = (dims.get(LON), dims.get(LAT)) else {
                return Err(SelectError::InvalidInput(
                    "path dimension mapping must contain lon and lat".to_string(),
                ));
            };
            let query = PointQuery::new(lon.clone(), lat.clone());
            Ok(dims
                .iter()
                .filter(|(dim, _)| dim.as_str() != LON && dim.as_str() != LAT)
                .fold(query, |query, (dim, labels)| {
                    query.with_dim(dim.clone(), labels.clone())
                }))
        }
    }
}

fn indexer_labels(dim: &str, indexer: &Indexer) -> Result<Vec<f64>> {
    indexer.labels().ok_or_else(|| {
        SelectError::InvalidInput(format!("{} must be given as labels, not a range", dim))
    })
}

/// Run a combined selection.
///
/// With a `mesh` over the same nodes as `data`, its faces and cached node
/// index are used; otherwise the container's faces and a temporary index.
/// Region selection statuses pass through; every other selection reports
/// [`SelectionStatus::Selected`].
///
/// # Errors
///
/// - [`SelectError::ConfigurationConflict`] for conflicting spatial arguments
/// - [`SelectError::UnsupportedMethod`] for point or path lookups with a
///   method other than nearest, or with a tolerance
/// - any error of the selected operation
pub fn select<C: MeshContainer>(
    data: &C,
    request: &SelectRequest,
    config: &SelectConfig,
    mesh: Option<&Mesh>,
) -> Result<Selection<C>> {
    request.validate()?;
    let method = request.method.unwrap_or(config.method);
    let mesh = mesh.filter(|mesh| mesh.matches(data));

    let point_query = |query: PointQuery| {
        let query = PointQuery {
            method,
            tolerance: request.tolerance,
            selection_dim: Some(config.selection_dim().to_string()),
            distance_long_name: config.distance_long_name.clone(),
            ..query
        };
        query.validate()?;
        let index: Option<&NodeIndex> = mesh.map(Mesh::node_index);
        select_points(data, &query, index)
    };

    let mut selection = match request.spatial_indexers() {
        (Some(lon), Some(lat)) => {
            if method != Method::Nearest {
                return Err(SelectError::unsupported(
                    "only the nearest method is supported for lon/lat selection",
                ));
            }
            log::debug!("Selecting points from lon/lat indexers");
            let query = PointQuery::new(indexer_labels(LON, lon)?, indexer_labels(LAT, lat)?)
                .with_distance(false);
            Selection::new(SelectionStatus::Selected, point_query(query)?)
        }
        _ => {
            if let Some(region) = &request.region {
                log::debug!("Selecting region of {} polygons", region.polygon_count());
                let faces = mesh.and_then(Mesh::faces);
                select_region(data, region, faces, config.containment_tolerance)?
            } else if let Some(path) = &request.path {
                log::debug!("Selecting along a path");
                Selection::new(SelectionStatus::Selected, point_query(path_query(path)?)?)
            } else {
                Selection::new(SelectionStatus::Selected, data.clone())
            }
        }
    };

    let remaining = request
        .indexers
        .iter()
        .filter(|(dim, _)| dim.as_str() != LON && dim.as_str() != LAT);
    let (ranges, labels): (Vec<_>, Vec<_>) = remaining.partition(|(_, indexer)| indexer.is_range());

    for (dim, indexer) in ranges.into_iter().chain(labels) {
        selection.data = selection
            .data
            .sel(dim, indexer, method, request.tolerance)?;
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Dataset, Variable};
    use geo::line_string;

    fn data() -> Dataset {
        Dataset::new(vec![0.0, 1.0, 2.0, 0.0], vec![0.0, 0.0, 0.0, 1.0])
            .unwrap()
            .with_faces(vec![[0, 1, 3], [1, 2, 3]])
            .unwrap()
            .with_coord("time", Variable::from_vec("time", vec![0.0, 10.0, 20.0]))
            .unwrap()
    }

    fn run(request: SelectRequest) -> Result<Selection<Dataset>> {
        select(&data(), &request, &SelectConfig::default(), None)
    }

    #[test]
    fn test_conflicts() {
        let err = run(SelectRequest::new().points(vec![0.0], vec![0.0]).region([0.0, 0.0, 1.0, 1.0]))
            .unwrap_err();
        assert!(err.is_conflict());

        let err = run(SelectRequest::new().sel("lon", 0.0).path((vec![0.0], vec![0.0]))).unwrap_err();
        assert!(err.is_conflict());

        let err = run(SelectRequest::new().sel("lat", 0.0)).unwrap_err();
        assert!(err.is_conflict());

        let err = run(SelectRequest::new()
            .region([0.0, 0.0, 1.0, 1.0])
            .path((vec![0.0], vec![0.0])))
        .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_points_without_distance() {
        let sel = run(SelectRequest::new().points(vec![1.9], vec![0.1])).unwrap();
        assert_eq!(sel.data.lon(), &[2.0]);
        assert!(sel.data.distance().is_none());
    }

    #[test]
    fn test_points_need_nearest() {
        let result = run(SelectRequest::new().points(vec![1.9], vec![0.1]).method(Method::Pad));
        assert!(matches!(result, Err(SelectError::UnsupportedMethod(_))));
    }

    #[test]
    fn test_path_has_distance() {
        let sel = run(SelectRequest::new().path(line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)]))
            .unwrap();
        assert_eq!(sel.data.lon(), &[0.0, 2.0]);
        assert!(sel.data.distance().is_some());
    }

    #[test]
    fn test_ambiguous_path() {
        let path = Path::Columns(vec![vec![0.0], vec![0.0], vec![0.0]]);
        assert!(matches!(
            run(SelectRequest::new().path(path)),
            Err(SelectError::AmbiguousPath(3))
        ));
    }

    #[test]
    fn test_path_dims() {
        let mut dims = BTreeMap::new();
        dims.insert("lon".to_string(), vec![0.0, 1.0]);
        dims.insert("lat".to_string(), vec![0.0, 0.0]);
        dims.insert("time".to_string(), vec![19.0, 1.0]);
        let query = path_query(&Path::Dims(dims.clone())).unwrap();
        assert_eq!(query.other_dims.get("time"), Some(&vec![19.0, 1.0]));

        dims.remove("lat");
        assert!(matches!(
            path_query(&Path::Dims(dims)),
            Err(SelectError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_region_then_indexers() {
        let sel = run(SelectRequest::new()
            .region([-0.5, -0.5, 1.5, 1.5])
            .sel("time", Indexer::range(5.0, None))
            .sel("time", 19.0))
        .unwrap();
        assert_eq!(sel.status, SelectionStatus::Selected);
        assert_eq!(sel.data.dim_len("time"), None);
        assert_eq!(sel.data.node_count(), 3);
    }

    #[test]
    fn test_range_and_label_indexers() {
        let data = data()
            .with_coord("depth", Variable::from_vec("depth", vec![0.0, 5.0, 10.0]))
            .unwrap();
        let request = SelectRequest::new()
            .sel("time", Indexer::range(5.0, None))
            .sel("depth", 6.0);
        let sel = select(&data, &request, &SelectConfig::default(), None).unwrap();
        assert_eq!(sel.data.coord("time").unwrap().values(), &[10.0, 20.0]);
        assert_eq!(sel.data.dim_len("depth"), None);
    }

    #[test]
    fn test_empty_region_still_applies_indexers() {
        let sel = run(SelectRequest::new().region([50.0, 50.0, 51.0, 51.0]).sel("time", 10.0))
            .unwrap();
        assert_eq!(sel.status, SelectionStatus::EmptyRegion);
        assert_eq!(sel.data.dim_len("time"), None);
        assert_eq!(sel.data.node_count(), 4);
    }

    #[test]
    fn test_mesh_index_reused() {
        let data = data();
        let mesh = Mesh::from_container(&data, None).unwrap();
        let request = SelectRequest::new().points(vec![0.0], vec![1.0]);
        let sel = select(&data, &request, &SelectConfig::default(), Some(&mesh)).unwrap();
        assert!(mesh.is_index_built());
        assert_eq!(sel.data.lat(), &[1.0]);
    }
}
