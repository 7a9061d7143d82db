//! Spatial selection on unstructured triangular meshes.
//!
//! Cut data defined on mesh nodes by bounding box or polygon region, keeping
//! the faces that lie fully inside and remapping them onto the reduced node
//! set, or pick the nodes nearest to a set of positions, optionally with the
//! geodesic distance along them.
//!
//! ```rust
//! use meshcut::{Dataset, MeshContainer, MeshSelector, SelectRequest, SelectionStatus, Variable};
//!
//! let data = Dataset::new(vec![0.0, 1.0, 2.0, 0.0], vec![0.0, 0.0, 0.0, 1.0])?
//!     .with_faces(vec![[0, 1, 3], [1, 2, 3]])?
//!     .with_data_var("ssh", Variable::from_vec("nod2", vec![0.1, 0.2, 0.3, 0.4]))?;
//! let selector = MeshSelector::new(data)?;
//!
//! let cut = selector.select(&SelectRequest::new().region([-0.5, -0.5, 1.5, 1.5]))?;
//! assert_eq!(cut.status, SelectionStatus::Selected);
//! assert_eq!(cut.data.faces(), Some(&[[0, 1, 2]][..]));
//!
//! let track = selector.select_points(vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0])?;
//! assert_eq!(track.distance().and_then(|d| d.attr("units")), Some("km"));
//! # Ok::<(), meshcut::SelectError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod container;
pub mod error;
pub mod mesh;
pub mod select;
pub mod selector;

pub use builder::SelectorBuilder;
pub use config::SelectConfig;
pub use container::{Attrs, Dataset, Indexer, MeshContainer, Method, Variable};
pub use error::{Result, SelectError};
pub use mesh::Mesh;
pub use select::{SelectRequest, select};
pub use selector::MeshSelector;

pub use compute::spatial::{
    CompactFaces, NearestNode, NodeIndex, PointQuery, Selection, SelectionStatus,
    distance_along_trajectory, normalize_distance, reindex_faces,
};

pub use meshcut_types::bbox::BoundingBox;
pub use meshcut_types::face::Face;
pub use meshcut_types::path::Path;
pub use meshcut_types::region::Region;
pub use meshcut_types::units::DistanceUnit;

#[cfg(feature = "geojson")]
pub use meshcut_types::geojson::GeoJsonError;

pub use geo::{LineString, MultiPolygon, Polygon, Rect};
pub use ndarray;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{MeshSelector, Result, SelectError, SelectorBuilder};

    pub use crate::{Dataset, Indexer, MeshContainer, Method, Variable};

    pub use crate::{SelectConfig, SelectRequest, Selection, SelectionStatus};

    pub use crate::{BoundingBox, Face, Path, Region};

    pub use geo::{LineString, Polygon};
}
