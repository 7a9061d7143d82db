//! Spatial selection algorithms on unstructured triangular meshes.

pub mod bbox;
pub mod geodesic;
pub mod index;
pub mod points;
pub mod region;
pub mod reindex;
pub mod selection;

pub use bbox::{cut_faces, select_bbox};
pub use geodesic::{cumulative_distance, distance_along_trajectory, normalize_distance};
pub use index::{NearestNode, NodeIndex, NodePoint};
pub use points::{PointQuery, select_points};
pub use region::{PreparedRegion, select_region};
pub use reindex::{CompactFaces, reindex_faces};
pub use selection::{Selection, SelectionStatus};
