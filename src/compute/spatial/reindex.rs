//! Node compaction for face subsets.
//!
//! Faces cut out of a mesh still reference global node indices. Compaction
//! collects the nodes those faces use into an ascending, duplicate-free list
//! and rewrites each face in terms of positions in that list, so the faces
//! stay valid once the node dimension is sliced down to it.

use meshcut_types::face::Face;
use rustc_hash::FxHashMap;

/// Faces rewritten against a compacted node list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompactFaces {
    /// Global indices of the nodes used by the faces, ascending and unique.
    pub nodes: Vec<usize>,
    /// The input faces, each entry replaced by its position in `nodes`.
    pub faces: Vec<Face>,
}

impl CompactFaces {
    /// Translate the local faces back to global node indices.
    pub fn decode(&self) -> Vec<Face> {
        self.faces
            .iter()
            .map(|face| face.map(|local| self.nodes[local]))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Compact the nodes referenced by `faces`.
///
/// The output keeps the face order and shape of the input. The mapping
/// between the used global indices and `0..nodes.len()` is a bijection.
///
/// # Examples
///
/// ```
/// use meshcut::compute::spatial::reindex_faces;
///
/// let compact = reindex_faces(&[[7, 3, 9], [9, 3, 12]]);
/// assert_eq!(compact.nodes, vec![3, 7, 9, 12]);
/// assert_eq!(compact.faces, vec![[1, 0, 2], [2, 0, 3]]);
/// assert_eq!(compact.decode(), vec![[7, 3, 9], [9, 3, 12]]);
/// ```
pub fn reindex_faces(faces: &[Face]) -> CompactFaces {
    let mut nodes: Vec<usize> = faces.iter().flatten().copied().collect();
    nodes.sort_unstable();
    nodes.dedup();

    let positions: FxHashMap<usize, usize> = nodes
        .iter()
        .enumerate()
        .map(|(local, &global)| (global, local))
        .collect();

    // Every entry of `faces` went into `nodes`, so the lookup cannot miss.
    let faces = faces
        .iter()
        .map(|face| face.map(|global| positions[&global]))
        .collect();

    CompactFaces { nodes, faces }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let compact = reindex_faces(&[]);
        assert!(compact.is_empty());
        assert_eq!(compact.node_count(), 0);
    }

    #[test]
    fn test_contiguous_input_is_identity() {
        let faces = vec![[0, 1, 2], [1, 2, 3]];
        let compact = reindex_faces(&faces);
        assert_eq!(compact.nodes, vec![0, 1, 2, 3]);
        assert_eq!(compact.faces, faces);
    }

    #[test]
    fn test_bijection_with_duplicates_and_unsorted() {
        let faces = vec![[42, 5, 17], [17, 5, 100], [100, 42, 5], [3, 3, 3]];
        let compact = reindex_faces(&faces);

        assert!(compact.nodes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(compact.nodes, vec![3, 5, 17, 42, 100]);
        assert!(
            compact
                .faces
                .iter()
                .flatten()
                .all(|&local| local < compact.node_count())
        );
        assert_eq!(compact.decode(), faces);
    }
}
