//! # meshcut-types
//!
//! Value types shared by the `meshcut` selection crate.
//!
//! - **Regions**: [`BoundingBox`](bbox::BoundingBox) and the tagged
//!   [`Region`](region::Region) variant (box, polygon, multi-polygon)
//! - **Paths**: the tagged [`Path`](path::Path) variant (coordinate pair,
//!   coordinate columns, line string, named dimensions)
//! - **Topology**: the [`Face`](face::Face) triple of node indices
//! - **Units**: [`DistanceUnit`](units::DistanceUnit)
//!
//! All types are serializable with Serde and built on top of the `geo`
//! crate's geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use meshcut_types::bbox::BoundingBox;
//! use meshcut_types::region::Region;
//!
//! let bbox = BoundingBox::new(-10.0, 30.0, 10.0, 50.0);
//! assert!(bbox.contains(0.0, 40.0));
//!
//! let region = Region::from(bbox);
//! assert_eq!(region.to_multi_polygon().0.len(), 1);
//! ```

pub mod bbox;
pub mod face;
pub mod path;
pub mod region;
pub mod units;

#[cfg(feature = "geojson")]
pub mod geojson;
