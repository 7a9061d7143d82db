//! Compute layer: validation and the spatial selection algorithms.
//!
//! Everything here works against the [`MeshContainer`](crate::container::MeshContainer)
//! seam and plain coordinate slices, independent of how the data is held.

pub mod spatial;
pub mod validation;
