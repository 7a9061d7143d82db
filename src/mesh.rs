//! Mesh topology with a lazily built node index.

use crate::compute::spatial::NodeIndex;
use crate::compute::validation::{validate_coordinates, validate_faces};
use crate::container::MeshContainer;
use crate::error::{Result, SelectError};
use meshcut_types::face::Face;
use once_cell::sync::OnceCell;

/// Node coordinates and optional faces of an unstructured triangular mesh.
///
/// The nearest-node index is built on first use and cached for the lifetime
/// of the mesh. Concurrent first use builds it once.
///
/// # Examples
///
/// ```
/// use meshcut::Mesh;
///
/// let mesh = Mesh::new(vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0])?
///     .with_faces(vec![[0, 1, 2]])?;
///
/// assert!(!mesh.is_index_built());
/// let hit = mesh.node_index().nearest(0.9, 0.1)?;
/// assert_eq!(hit.node, 1);
/// assert!(mesh.is_index_built());
/// # Ok::<(), meshcut::SelectError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    lon: Vec<f64>,
    lat: Vec<f64>,
    faces: Option<Vec<Face>>,
    index: OnceCell<NodeIndex>,
}

impl Mesh {
    pub fn new(lon: Vec<f64>, lat: Vec<f64>) -> Result<Self> {
        validate_coordinates(&lon, &lat).map_err(|e| SelectError::InvalidMesh(e.to_string()))?;
        Ok(Self {
            lon,
            lat,
            faces: None,
            index: OnceCell::new(),
        })
    }

    pub fn with_faces(mut self, faces: Vec<Face>) -> Result<Self> {
        validate_faces(&faces, self.node_count())?;
        self.faces = Some(faces);
        Ok(self)
    }

    /// Mesh over the nodes of `data`. Explicit `faces` take precedence over
    /// the faces attached to the container.
    pub fn from_container<C: MeshContainer>(data: &C, faces: Option<Vec<Face>>) -> Result<Self> {
        let mesh = Self::new(data.lon().to_vec(), data.lat().to_vec())?;
        match faces.or_else(|| data.faces().map(<[Face]>::to_vec)) {
            Some(faces) => mesh.with_faces(faces),
            None => Ok(mesh),
        }
    }

    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    pub fn faces(&self) -> Option<&[Face]> {
        self.faces.as_deref()
    }

    pub fn node_count(&self) -> usize {
        self.lon.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.as_ref().map_or(0, Vec::len)
    }

    /// The node index, built on first call.
    pub fn node_index(&self) -> &NodeIndex {
        self.index.get_or_init(|| NodeIndex::build(&self.lon, &self.lat))
    }

    pub fn is_index_built(&self) -> bool {
        self.index.get().is_some()
    }

    /// Whether `data` lies on this mesh's nodes, so the cached index applies.
    pub(crate) fn matches<C: MeshContainer>(&self, data: &C) -> bool {
        data.lon() == self.lon.as_slice() && data.lat() == self.lat.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Dataset;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_invalid_mesh() {
        assert!(matches!(
            Mesh::new(vec![0.0, 1.0], vec![0.0]),
            Err(SelectError::InvalidMesh(_))
        ));
        assert!(matches!(
            Mesh::new(vec![f64::NAN], vec![0.0]),
            Err(SelectError::InvalidMesh(_))
        ));

        let mesh = Mesh::new(vec![0.0, 1.0, 2.0], vec![0.0; 3]).unwrap();
        assert!(matches!(
            mesh.with_faces(vec![[0, 1, 3]]),
            Err(SelectError::InvalidMesh(_))
        ));
    }

    #[test]
    fn test_from_container_face_override() {
        let data = Dataset::new(vec![0.0, 1.0, 0.0, 1.0], vec![0.0, 0.0, 1.0, 1.0])
            .unwrap()
            .with_faces(vec![[0, 1, 2]])
            .unwrap();

        let mesh = Mesh::from_container(&data, None).unwrap();
        assert_eq!(mesh.faces().unwrap(), &[[0, 1, 2]]);

        let mesh = Mesh::from_container(&data, Some(vec![[1, 3, 2]])).unwrap();
        assert_eq!(mesh.faces().unwrap(), &[[1, 3, 2]]);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.matches(&data));
    }

    #[test]
    fn test_index_built_once_across_threads() {
        let mesh = Arc::new(Mesh::new(vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mesh = Arc::clone(&mesh);
                thread::spawn(move || mesh.node_index() as *const NodeIndex as usize)
            })
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(mesh.is_index_built());
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
