//! Selection outcome shared by the box and region cutters.

use super::reindex::reindex_faces;
use crate::container::MeshContainer;
use crate::error::Result;
use meshcut_types::face::Face;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a spatial selection resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    /// Nodes and faces were selected; `faces` is valid on the result
    Selected,
    /// No node fell inside the region; the input is returned unchanged
    EmptyRegion,
    /// Nodes fell inside but no face survived; the result has no nodes and
    /// no `faces`
    NoFaces,
}

impl SelectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::EmptyRegion => "empty_region",
            Self::NoFaces => "no_faces",
        }
    }
}

impl fmt::Display for SelectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a box or region selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<C> {
    pub status: SelectionStatus,
    pub data: C,
}

impl<C> Selection<C> {
    pub fn new(status: SelectionStatus, data: C) -> Self {
        Self { status, data }
    }

    /// `true` when faces survived the selection.
    pub fn is_selected(&self) -> bool {
        self.status == SelectionStatus::Selected
    }

    pub fn into_data(self) -> C {
        self.data
    }

    pub fn map<D>(self, f: impl FnOnce(C) -> D) -> Selection<D> {
        Selection {
            status: self.status,
            data: f(self.data),
        }
    }
}

/// Slice `data` down to the nodes used by `kept` and attach the faces
/// remapped onto the sliced node dimension.
pub(crate) fn subset_by_faces<C: MeshContainer>(data: &C, kept: &[Face]) -> Result<C> {
    let compact = reindex_faces(kept);
    Ok(data.isel_nodes(&compact.nodes)?.assign_faces(compact.faces))
}

/// Keep the given nodes only, without any face coordinate.
pub(crate) fn subset_nodes<C: MeshContainer>(data: &C, nodes: &[usize]) -> Result<C> {
    Ok(data.isel_nodes(nodes)?.drop_faces())
}

/// Faces whose three vertices all pass `keep`.
pub(crate) fn faces_where(faces: &[Face], keep: impl Fn(usize) -> bool) -> Vec<Face> {
    faces
        .iter()
        .filter(|face| face.iter().all(|&node| keep(node)))
        .copied()
        .collect()
}
