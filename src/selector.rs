//! Selection facade bound to one container.

use crate::builder::SelectorBuilder;
use crate::compute::spatial::{
    NodeIndex, PointQuery, Selection, select_bbox, select_points, select_region,
};
use crate::config::SelectConfig;
use crate::container::{Dataset, MeshContainer};
use crate::error::Result;
use crate::mesh::Mesh;
use crate::select::{SelectRequest, select};
use meshcut_types::bbox::BoundingBox;
use meshcut_types::region::Region;
use std::sync::Arc;

/// A container paired with its mesh and selection settings.
///
/// The mesh, and with it the cached node index, is shared between a selector
/// and the per-variable selectors derived from it.
///
/// # Examples
///
/// ```
/// use meshcut::{Dataset, MeshContainer, MeshSelector, SelectRequest};
///
/// let data = Dataset::new(vec![0.0, 1.0, 0.0, 1.0], vec![0.0, 0.0, 1.0, 1.0])?
///     .with_faces(vec![[0, 1, 2], [1, 3, 2]])?;
/// let selector = MeshSelector::new(data)?;
///
/// let cut = selector.select_bbox([0.0, 0.0, 1.0, 1.0])?;
/// assert!(cut.is_selected());
///
/// let points = selector.select(&SelectRequest::new().points(vec![0.9], vec![0.1]))?;
/// assert_eq!(points.data.lon(), &[1.0]);
/// assert!(selector.is_index_built());
/// # Ok::<(), meshcut::SelectError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MeshSelector<C> {
    data: C,
    mesh: Arc<Mesh>,
    config: SelectConfig,
}

impl<C: MeshContainer> MeshSelector<C> {
    /// Selector with the default configuration and the container's faces.
    pub fn new(data: C) -> Result<Self> {
        SelectorBuilder::new().build(data)
    }

    pub fn builder() -> SelectorBuilder {
        SelectorBuilder::new()
    }

    pub(crate) fn from_parts(data: C, mesh: Arc<Mesh>, config: SelectConfig) -> Self {
        Self { data, mesh, config }
    }

    pub fn data(&self) -> &C {
        &self.data
    }

    pub fn into_data(self) -> C {
        self.data
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Combined selection; see [`select`](crate::select::select).
    pub fn select(&self, request: &SelectRequest) -> Result<Selection<C>> {
        select(&self.data, request, &self.config, Some(&self.mesh))
    }

    /// Nearest-node lookup for a path of positions.
    ///
    /// A `distance` coordinate is attached unless disabled in the
    /// configuration.
    pub fn select_points(&self, lon: Vec<f64>, lat: Vec<f64>) -> Result<C> {
        let query = PointQuery::new(lon, lat)
            .with_distance(self.config.return_distance)
            .with_distance_long_name(self.config.distance_long_name.clone());
        self.select_points_with(query)
    }

    /// Nearest-node lookup with full control over the query. The configured
    /// selection dimension applies when the query names none.
    pub fn select_points_with(&self, mut query: PointQuery) -> Result<C> {
        if query.selection_dim.is_none() {
            query.selection_dim = Some(self.config.selection_dim().to_string());
        }
        query.validate()?;
        select_points(&self.data, &query, Some(self.node_index()))
    }

    pub fn select_region(&self, region: impl Into<Region>) -> Result<Selection<C>> {
        select_region(
            &self.data,
            &region.into(),
            self.mesh.faces(),
            self.config.containment_tolerance,
        )
    }

    pub fn select_bbox(&self, bbox: impl Into<BoundingBox>) -> Result<Selection<C>> {
        select_bbox(&self.data, &bbox.into(), self.mesh.faces())
    }

    /// The node index, built now if it was not built yet.
    pub fn node_index(&self) -> &NodeIndex {
        self.mesh.node_index()
    }

    pub fn is_index_built(&self) -> bool {
        self.mesh.is_index_built()
    }
}

impl MeshSelector<Dataset> {
    /// Selector over a single data variable, sharing this selector's mesh,
    /// faces and node index.
    pub fn variable(&self, name: &str) -> Result<Self> {
        Ok(Self {
            data: self.data.subset_vars(&[name])?,
            mesh: Arc::clone(&self.mesh),
            config: self.config.clone(),
        })
    }

    /// Combined selection on a single data variable.
    pub fn select_variable(&self, name: &str, request: &SelectRequest) -> Result<Selection<Dataset>> {
        self.variable(name)?.select(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::spatial::SelectionStatus;
    use crate::container::Variable;
    use crate::error::SelectError;

    fn selector() -> MeshSelector<Dataset> {
        let data = Dataset::new(vec![0.0, 1.0, 2.0, 0.0], vec![0.0, 0.0, 0.0, 1.0])
            .unwrap()
            .with_faces(vec![[0, 1, 3], [1, 2, 3]])
            .unwrap()
            .with_data_var("a", Variable::from_vec("nod2", vec![1.0, 2.0, 3.0, 4.0]))
            .unwrap()
            .with_data_var("b", Variable::from_vec("nod2", vec![5.0, 6.0, 7.0, 8.0]))
            .unwrap();
        MeshSelector::new(data).unwrap()
    }

    #[test]
    fn test_select_points_with_distance() {
        let sel = selector();
        assert!(!sel.is_index_built());
        let ds = sel.select_points(vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]).unwrap();
        assert!(sel.is_index_built());
        assert_eq!(ds.data_var("a").unwrap().values(), &[1.0, 2.0, 3.0]);
        assert_eq!(ds.distance().unwrap().attr("units"), Some("km"));

        // The leading 0 alone is more than a third of a two-point path.
        let ds = sel.select_points(vec![0.0, 2.0], vec![0.0, 0.0]).unwrap();
        let distance = ds.distance().unwrap();
        assert_eq!(distance.attr("units"), Some("m"));
        assert!(distance.values()[1] > 222_000.0);
    }

    #[test]
    fn test_select_bbox_and_region() {
        let sel = selector();
        let bbox = sel.select_bbox([0.0, 0.0, 1.0, 1.0]).unwrap();
        assert_eq!(bbox.status, SelectionStatus::Selected);
        assert_eq!(bbox.data.node_count(), 3);

        let region = sel.select_region([0.0, 0.0, 1.0, 1.0]).unwrap();
        assert_eq!(region.data, bbox.data);
        assert!(!sel.is_index_built());
    }

    #[test]
    fn test_variable_shares_index() {
        let sel = selector();
        let var = sel.variable("b").unwrap();
        assert!(var.data().data_var("a").is_none());

        var.node_index();
        assert!(sel.is_index_built());
    }

    #[test]
    fn test_select_variable() {
        let sel = selector();
        let result = sel
            .select_variable("b", &SelectRequest::new().region([1.0, 0.0, 2.0, 1.0]))
            .unwrap();
        assert_eq!(result.status, SelectionStatus::NoFaces);
        assert!(result.data.data_var("a").is_none());
        assert!(result.data.data_var("b").unwrap().values().is_empty());

        let result = sel
            .select_variable("b", &SelectRequest::new().region([0.0, 0.0, 1.0, 1.0]))
            .unwrap();
        assert_eq!(result.status, SelectionStatus::Selected);
        assert_eq!(result.data.data_var("b").unwrap().values(), &[5.0, 6.0, 8.0]);

        assert!(matches!(
            sel.select_variable("c", &SelectRequest::new()),
            Err(SelectError::InvalidInput(_))
        ));
    }
}
