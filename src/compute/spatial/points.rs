//! Nearest-node point matching.

use super::geodesic::{distance_along_trajectory, normalize_distance};
use super::index::NodeIndex;
use crate::compute::validation::validate_coordinates;
use crate::config::DEFAULT_DISTANCE_LONG_NAME;
use crate::container::{MeshContainer, Method, Variable};
use crate::error::{Result, SelectError};
use ndarray::Array1;
use std::collections::BTreeMap;

/// A batch of query positions for nearest-node matching.
///
/// # Examples
///
/// ```
/// use meshcut::compute::spatial::PointQuery;
///
/// let query = PointQuery::new(vec![0.0, 1.0], vec![50.0, 50.5])
///     .with_dim("time", vec![0.0, 3600.0])
///     .with_selection_dim("track");
///
/// assert_eq!(query.len(), 2);
/// assert!(query.return_distance);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointQuery {
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    /// Labels along other dimensions, one per query position
    pub other_dims: BTreeMap<String, Vec<f64>>,
    pub method: Method,
    pub tolerance: Option<f64>,
    pub return_distance: bool,
    /// Dimension the matched points are laid out along; the node dimension
    /// when unset
    pub selection_dim: Option<String>,
    pub distance_long_name: String,
}

impl PointQuery {
    pub fn new(lon: Vec<f64>, lat: Vec<f64>) -> Self {
        Self {
            lon,
            lat,
            other_dims: BTreeMap::new(),
            method: Method::Nearest,
            tolerance: None,
            return_distance: true,
            selection_dim: None,
            distance_long_name: DEFAULT_DISTANCE_LONG_NAME.to_string(),
        }
    }

    /// Add labels along another dimension, matched pointwise.
    pub fn with_dim(mut self, dim: impl Into<String>, labels: Vec<f64>) -> Self {
        self.other_dims.insert(dim.into(), labels);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_distance(mut self, return_distance: bool) -> Self {
        self.return_distance = return_distance;
        self
    }

    pub fn with_selection_dim(mut self, dim: impl Into<String>) -> Self {
        self.selection_dim = Some(dim.into());
        self
    }

    pub fn with_distance_long_name(mut self, name: impl Into<String>) -> Self {
        self.distance_long_name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.lon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }

    /// Every per-point array must have the length of `lon`, and every
    /// position must be a finite, in-range coordinate.
    pub fn validate(&self) -> Result<()> {
        let expected = self.lon.len();
        if self.lat.len() != expected {
            return Err(SelectError::length_mismatch("lat", expected, self.lat.len()));
        }
        for (dim, labels) in &self.other_dims {
            if labels.len() != expected {
                return Err(SelectError::length_mismatch(dim, expected, labels.len()));
            }
        }
        validate_coordinates(&self.lon, &self.lat)?;

        if self.method != Method::Nearest {
            return Err(SelectError::unsupported(format!(
                "point selection only supports the nearest method, got '{}'",
                self.method
            )));
        }
        if self.tolerance.is_some() {
            return Err(SelectError::unsupported(
                "tolerance for nearest-node matching",
            ));
        }
        Ok(())
    }
}

/// Select the node nearest to every query position.
///
/// The result is laid out along the query's selection dimension, one entry
/// per query position, in query order. Labels in `other_dims` are matched
/// pointwise by nearest label. Faces are dropped, since the picked nodes no
/// longer form a mesh. With `return_distance`, a `distance` coordinate holds
/// the cumulative geodesic distance along the query positions, in meters or
/// kilometers as given by its `units` attribute.
///
/// `index` is used when given; otherwise a temporary index is built over the
/// container's nodes.
pub fn select_points<C: MeshContainer>(
    data: &C,
    query: &PointQuery,
    index: Option<&NodeIndex>,
) -> Result<C> {
    query.validate()?;

    let built;
    let index = match index {
        Some(index) => index,
        None => {
            built = NodeIndex::build(data.lon(), data.lat());
            &built
        }
    };

    let nodes: Vec<usize> = index
        .nearest_all(&query.lon, &query.lat)?
        .into_iter()
        .map(|hit| hit.node)
        .collect();

    let dim = query
        .selection_dim
        .clone()
        .unwrap_or_else(|| data.node_dim().to_string());

    let mut selected = data.isel_points(&nodes, &dim)?;
    for (other, labels) in &query.other_dims {
        selected = selected.sel_pointwise(other, labels, &dim, Method::Nearest)?;
    }
    selected = selected.drop_faces();

    if query.return_distance {
        let distance = distance_along_trajectory(
            &Array1::from(query.lon.clone()).into_dyn(),
            &Array1::from(query.lat.clone()).into_dyn(),
        )?;
        let (unit, values) = normalize_distance(&distance);
        let coord = Variable::new(vec![dim.as_str()], values)?
            .with_attr("units", unit.as_str())
            .with_attr("long_name", query.distance_long_name.as_str());
        selected = selected.assign_coord("distance", coord)?;
    }

    log::debug!("Matched {} query points along {}", nodes.len(), dim);
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Dataset;
    use ndarray::array;

    fn mesh() -> Dataset {
        Dataset::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0, 0.0])
            .unwrap()
            .with_faces(vec![[0, 1, 2], [1, 2, 3]])
            .unwrap()
            .with_coord("time", Variable::from_vec("time", vec![0.0, 10.0]))
            .unwrap()
            .with_data_var(
                "ssh",
                Variable::new(
                    vec!["time", "nod2"],
                    array![[0.0, 1.0, 2.0, 3.0], [10.0, 11.0, 12.0, 13.0]].into_dyn(),
                )
                .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_nearest_nodes_in_query_order() {
        let query = PointQuery::new(vec![2.9, 0.1, 0.9], vec![0.0, 0.0, 0.0]).with_distance(false);
        let ds = select_points(&mesh(), &query, None).unwrap();
        assert_eq!(ds.lon(), &[3.0, 0.0, 1.0]);
        assert!(ds.faces().is_none());
        assert!(ds.distance().is_none());
    }

    #[test]
    fn test_distance_coordinate() {
        let query = PointQuery::new(vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]);
        let ds = select_points(&mesh(), &query, None).unwrap();
        let distance = ds.distance().unwrap();
        assert_eq!(distance.attr("units"), Some("km"));
        assert_eq!(distance.attr("long_name"), Some("distance along trajectory"));
        assert_eq!(distance.values()[0], 0.0);
        assert!(distance.values()[2] > 222.0 && distance.values()[2] < 223.0);
    }

    #[test]
    fn test_other_dims_pointwise() {
        let query = PointQuery::new(vec![0.0, 3.0], vec![0.0, 0.0])
            .with_dim("time", vec![9.0, 1.0])
            .with_selection_dim("track");
        let ds = select_points(&mesh(), &query, None).unwrap();
        assert_eq!(ds.data_var("ssh").unwrap().dims(), &["track".to_string()]);
        assert_eq!(ds.data_var("ssh").unwrap().values(), &[10.0, 3.0]);
        assert_eq!(ds.distance().unwrap().dims(), &["track".to_string()]);
    }

    #[test]
    fn test_supplied_index() {
        let data = mesh();
        let index = NodeIndex::build(data.lon(), data.lat());
        let query = PointQuery::new(vec![1.2], vec![0.1]);
        let ds = select_points(&data, &query, Some(&index)).unwrap();
        assert_eq!(ds.lon(), &[1.0]);
    }

    #[test]
    fn test_length_mismatch() {
        let query = PointQuery::new(vec![0.0, 1.0], vec![0.0]);
        assert!(matches!(
            select_points(&mesh(), &query, None),
            Err(SelectError::DimensionLengthMismatch { .. })
        ));

        let query = PointQuery::new(vec![0.0], vec![0.0]).with_dim("time", vec![0.0, 1.0]);
        assert!(matches!(
            select_points(&mesh(), &query, None),
            Err(SelectError::DimensionLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_non_finite_positions_rejected() {
        let query = PointQuery::new(vec![0.0, f64::NAN], vec![0.0, 0.0]);
        let err = select_points(&mesh(), &query, None).unwrap_err();
        assert!(matches!(err, SelectError::InvalidInput(_)));
        assert!(err.to_string().contains("index 1"));

        let query = PointQuery::new(vec![0.0], vec![f64::INFINITY]);
        assert!(select_points(&mesh(), &query, None).is_err());

        let query = PointQuery::new(vec![0.0], vec![91.0]);
        assert!(select_points(&mesh(), &query, None).is_err());
    }

    #[test]
    fn test_only_nearest() {
        let query = PointQuery::new(vec![0.0], vec![0.0]).with_method(Method::Pad);
        assert!(matches!(
            select_points(&mesh(), &query, None),
            Err(SelectError::UnsupportedMethod(_))
        ));

        let query = PointQuery::new(vec![0.0], vec![0.0]).with_tolerance(0.1);
        let err = select_points(&mesh(), &query, None).unwrap_err();
        assert!(err.to_string().starts_with("not implemented"));
    }

    #[test]
    fn test_empty_mesh() {
        let data = Dataset::new(vec![], vec![]).unwrap();
        let query = PointQuery::new(vec![0.0], vec![0.0]);
        assert!(matches!(
            select_points(&data, &query, None),
            Err(SelectError::EmptyMesh)
        ));
    }
}
