//! In-memory container implementation

use super::{Indexer, MeshContainer, Method, Variable};
use crate::compute::validation::{validate_coordinates, validate_faces};
use crate::config::DEFAULT_NODE_DIM;
use crate::error::{Result, SelectError};
use meshcut_types::face::Face;
use std::collections::BTreeMap;

const LON: &str = "lon";
const LAT: &str = "lat";

/// In-memory labeled dataset on an unstructured mesh.
///
/// Holds node longitudes and latitudes over the node dimension, an optional
/// face coordinate, further coordinates (dimension labels such as `time`, or
/// attributes of the selection such as `distance`) and data variables.
/// Dimension sizes are kept consistent across every variable.
///
/// # Examples
///
/// ```
/// use meshcut::{Dataset, Variable};
///
/// let ds = Dataset::new(vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0])?
///     .with_faces(vec![[0, 1, 2]])?
///     .with_coord("time", Variable::from_vec("time", vec![0.0, 86400.0]))?
///     .with_data_var("ssh", Variable::from_vec("nod2", vec![0.1, 0.2, 0.3]))?;
///
/// assert_eq!(ds.dim_len("nod2"), Some(3));
/// assert_eq!(ds.dim_len("time"), Some(2));
/// # Ok::<(), meshcut::SelectError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    node_dim: String,
    lon: Variable,
    lat: Variable,
    faces: Option<Vec<Face>>,
    coords: BTreeMap<String, Variable>,
    data_vars: BTreeMap<String, Variable>,
}

impl Dataset {
    /// Create a dataset over the default node dimension (`nod2`).
    pub fn new(lon: Vec<f64>, lat: Vec<f64>) -> Result<Self> {
        Self::with_node_dim(DEFAULT_NODE_DIM, lon, lat)
    }

    /// Create a dataset over a custom node dimension.
    pub fn with_node_dim(node_dim: impl Into<String>, lon: Vec<f64>, lat: Vec<f64>) -> Result<Self> {
        validate_coordinates(&lon, &lat)?;
        let node_dim = node_dim.into();
        Ok(Self {
            lon: Variable::from_vec(node_dim.clone(), lon).with_attr("units", "degrees_east"),
            lat: Variable::from_vec(node_dim.clone(), lat).with_attr("units", "degrees_north"),
            node_dim,
            faces: None,
            coords: BTreeMap::new(),
            data_vars: BTreeMap::new(),
        })
    }

    /// Attach face topology; every index must refer to an existing node.
    pub fn with_faces(mut self, faces: Vec<Face>) -> Result<Self> {
        validate_faces(&faces, self.node_count())?;
        self.faces = Some(faces);
        Ok(self)
    }

    pub fn with_coord(mut self, name: impl Into<String>, coord: Variable) -> Result<Self> {
        let name = name.into();
        self.check_name(&name)?;
        self.check_sizes(&coord, Some(name.as_str()))?;
        self.coords.insert(name, coord);
        Ok(self)
    }

    pub fn with_data_var(mut self, name: impl Into<String>, var: Variable) -> Result<Self> {
        let name = name.into();
        self.check_name(&name)?;
        self.check_sizes(&var, Some(name.as_str()))?;
        self.data_vars.insert(name, var);
        Ok(self)
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if name == LON || name == LAT {
            return Err(SelectError::InvalidInput(format!(
                "{} is reserved for node coordinates",
                name
            )));
        }
        Ok(())
    }

    /// Every dimension of `var` must match the size already in use.
    /// `replacing` names an entry that `var` is about to replace.
    fn check_sizes(&self, var: &Variable, replacing: Option<&str>) -> Result<()> {
        let sizes = self.sizes_excluding(replacing);
        for (dim, len) in var.sizes() {
            if let Some(&expected) = sizes.get(dim)
                && expected != len
            {
                return Err(SelectError::length_mismatch(dim, expected, len));
            }
        }
        Ok(())
    }

    fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        [(LON, &self.lon), (LAT, &self.lat)]
            .into_iter()
            .chain(self.coords.iter().map(|(k, v)| (k.as_str(), v)))
            .chain(self.data_vars.iter().map(|(k, v)| (k.as_str(), v)))
    }

    fn sizes_excluding(&self, skip: Option<&str>) -> BTreeMap<String, usize> {
        let mut sizes = BTreeMap::new();
        for (name, var) in self.variables() {
            if Some(name) == skip {
                continue;
            }
            for (dim, len) in var.sizes() {
                sizes.entry(dim.to_string()).or_insert(len);
            }
        }
        sizes
    }

    /// Size of every dimension in the dataset.
    pub fn dims(&self) -> BTreeMap<String, usize> {
        self.sizes_excluding(None)
    }

    pub fn dim_len(&self, dim: &str) -> Option<usize> {
        self.dims().get(dim).copied()
    }

    pub fn coord(&self, name: &str) -> Option<&Variable> {
        match name {
            LON => Some(&self.lon),
            LAT => Some(&self.lat),
            _ => self.coords.get(name),
        }
    }

    pub fn coords(&self) -> &BTreeMap<String, Variable> {
        &self.coords
    }

    pub fn data_var(&self, name: &str) -> Option<&Variable> {
        self.data_vars.get(name)
    }

    pub fn data_vars(&self) -> &BTreeMap<String, Variable> {
        &self.data_vars
    }

    /// The distance coordinate added by path and point selections.
    pub fn distance(&self) -> Option<&Variable> {
        self.coords.get("distance")
    }

    /// Keep only the named data variables, with all coordinates and faces.
    pub fn subset_vars(&self, names: &[&str]) -> Result<Self> {
        let mut data_vars = BTreeMap::new();
        for &name in names {
            let var = self.data_vars.get(name).ok_or_else(|| {
                SelectError::InvalidInput(format!("no data variable named {}", name))
            })?;
            data_vars.insert(name.to_string(), var.clone());
        }
        Ok(Self {
            data_vars,
            ..self.clone()
        })
    }

    fn map_variables(&self, f: impl Fn(&Variable) -> Result<Variable>) -> Result<Self> {
        let coords = self
            .coords
            .iter()
            .map(|(name, var)| Ok((name.clone(), f(var)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        let data_vars = self
            .data_vars
            .iter()
            .map(|(name, var)| Ok((name.clone(), f(var)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self {
            node_dim: self.node_dim.clone(),
            lon: f(&self.lon)?,
            lat: f(&self.lat)?,
            faces: self.faces.clone(),
            coords,
            data_vars,
        })
    }

    /// Positional selection along any dimension.
    ///
    /// Selecting along the node dimension drops the faces, which would
    /// otherwise reference nodes that are gone.
    pub fn isel(&self, dim: &str, indices: &[usize]) -> Result<Self> {
        if self.dim_len(dim).is_none() {
            return Err(SelectError::UnknownDimension(dim.to_string()));
        }
        let mut selected = self.map_variables(|var| var.take(dim, indices))?;
        if dim == self.node_dim {
            selected.faces = None;
        }
        Ok(selected)
    }

    /// The 1-D coordinate labelling `dim`.
    fn index_coord(&self, dim: &str) -> Result<&[f64]> {
        match self.coords.get(dim) {
            Some(coord) if coord.dims().len() == 1 && coord.dims()[0] == dim => {
                Ok(coord.values())
            }
            _ => Err(SelectError::UnknownDimension(format!(
                "{} has no coordinate labels",
                dim
            ))),
        }
    }

    fn lookup_all(
        &self,
        dim: &str,
        targets: &[f64],
        method: Method,
        tolerance: Option<f64>,
    ) -> Result<Vec<usize>> {
        let labels = self.index_coord(dim)?;
        targets
            .iter()
            .map(|&target| {
                lookup(labels, target, method, tolerance).ok_or_else(|| {
                    SelectError::LabelNotFound {
                        dim: dim.to_string(),
                        label: target,
                    }
                })
            })
            .collect()
    }
}

/// Position of the label matching `target`.
fn lookup(labels: &[f64], target: f64, method: Method, tolerance: Option<f64>) -> Option<usize> {
    if !target.is_finite() {
        return None;
    }

    let mut candidates = labels.iter().copied().enumerate();
    let best = match method {
        Method::Exact => candidates.find(|&(_, label)| label == target),
        Method::Nearest => candidates.fold(None, |best: Option<(usize, f64)>, (i, label)| {
            match best {
                Some((_, b)) if (b - target).abs() <= (label - target).abs() => best,
                _ => Some((i, label)),
            }
        }),
        Method::Pad => candidates
            .filter(|&(_, label)| label <= target)
            .fold(None, |best: Option<(usize, f64)>, (i, label)| match best {
                Some((_, b)) if b >= label => best,
                _ => Some((i, label)),
            }),
        Method::Backfill => candidates
            .filter(|&(_, label)| label >= target)
            .fold(None, |best: Option<(usize, f64)>, (i, label)| match best {
                Some((_, b)) if b <= label => best,
                _ => Some((i, label)),
            }),
    }?;

    match tolerance {
        Some(tol) if (best.1 - target).abs() > tol => None,
        _ => Some(best.0),
    }
}

impl MeshContainer for Dataset {
    fn node_dim(&self) -> &str {
        &self.node_dim
    }

    fn lon(&self) -> &[f64] {
        self.lon.values()
    }

    fn lat(&self) -> &[f64] {
        self.lat.values()
    }

    fn faces(&self) -> Option<&[Face]> {
        self.faces.as_deref()
    }

    fn isel_nodes(&self, nodes: &[usize]) -> Result<Self> {
        let node_dim = self.node_dim.clone();
        self.isel(&node_dim, nodes)
    }

    fn isel_points(&self, nodes: &[usize], dim: &str) -> Result<Self> {
        let mut selected = self.isel_nodes(nodes)?;
        if dim != selected.node_dim {
            let from = std::mem::replace(&mut selected.node_dim, dim.to_string());
            selected.lon.rename_dim(&from, dim);
            selected.lat.rename_dim(&from, dim);
            for var in selected
                .coords
                .values_mut()
                .chain(selected.data_vars.values_mut())
            {
                var.rename_dim(&from, dim);
            }
        }
        Ok(selected)
    }

    fn sel(
        &self,
        dim: &str,
        indexer: &Indexer,
        method: Method,
        tolerance: Option<f64>,
    ) -> Result<Self> {
        match indexer {
            Indexer::Scalar(label) => {
                let position = self.lookup_all(dim, &[*label], method, tolerance)?[0];
                self.map_variables(|var| var.index(dim, position))
            }
            Indexer::Array(labels) => {
                let positions = self.lookup_all(dim, labels, method, tolerance)?;
                self.isel(dim, &positions)
            }
            Indexer::Range { start, stop } => {
                let positions: Vec<usize> = self
                    .index_coord(dim)?
                    .iter()
                    .enumerate()
                    .filter(|&(_, &label)| Indexer::range_contains(*start, *stop, label))
                    .map(|(i, _)| i)
                    .collect();
                self.isel(dim, &positions)
            }
        }
    }

    fn sel_pointwise(
        &self,
        dim: &str,
        labels: &[f64],
        along: &str,
        method: Method,
    ) -> Result<Self> {
        let positions = self.lookup_all(dim, labels, method, None)?;
        self.map_variables(|var| var.take_pointwise(dim, &positions, along))
    }

    fn assign_faces(mut self, faces: Vec<Face>) -> Self {
        self.faces = Some(faces);
        self
    }

    fn drop_faces(mut self) -> Self {
        self.faces = None;
        self
    }

    fn assign_coord(mut self, name: &str, coord: Variable) -> Result<Self> {
        self.check_name(name)?;
        self.check_sizes(&coord, Some(name))?;
        self.coords.insert(name.to_string(), coord);
        Ok(self)
    }
}
