//! Triangle topology.

/// A triangular face as three node indices.
///
/// Indices refer to positions in the node dimension of the mesh (or of a
/// selection result, after compaction).
pub type Face = [usize; 3];

/// Largest node index referenced by any face, `None` when there are no faces.
///
/// # Examples
///
/// ```
/// use meshcut_types::face::max_node_index;
///
/// assert_eq!(max_node_index(&[[0, 4, 2], [1, 2, 3]]), Some(4));
/// assert_eq!(max_node_index(&[]), None);
/// ```
pub fn max_node_index(faces: &[Face]) -> Option<usize> {
    faces.iter().flat_map(|face| face.iter().copied()).max()
}
