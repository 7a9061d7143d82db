//! Labeled data container abstraction
//!
//! Selection operates on a container of labeled arrays sharing a node
//! dimension. This module defines the trait the selection core consumes,
//! allowing different container implementations while keeping one selection
//! code path, plus the in-memory [`Dataset`] implementation.

use crate::error::{Result, SelectError};
use meshcut_types::face::Face;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

mod dataset;
mod variable;

pub use dataset::Dataset;
pub use variable::{Attrs, Variable};

/// Trait for containers the selection core can slice
///
/// Implementations expose the per-node coordinates and optional face
/// topology, and provide positional and label-based subsetting.
pub trait MeshContainer: Clone + Send + Sync {
    /// Name of the node dimension
    fn node_dim(&self) -> &str;

    /// Longitude of every node, in degrees
    fn lon(&self) -> &[f64];

    /// Latitude of every node, in degrees
    fn lat(&self) -> &[f64];

    /// Face topology attached to the container, if any
    fn faces(&self) -> Option<&[Face]>;

    fn node_count(&self) -> usize {
        self.lon().len()
    }

    /// Keep the given nodes, in the given order. Faces are not carried over.
    fn isel_nodes(&self, nodes: &[usize]) -> Result<Self>;

    /// Pick one node per query point and lay the result out along `dim`,
    /// which replaces the node dimension.
    fn isel_points(&self, nodes: &[usize], dim: &str) -> Result<Self>;

    /// Label-based selection along one dimension.
    fn sel(
        &self,
        dim: &str,
        indexer: &Indexer,
        method: Method,
        tolerance: Option<f64>,
    ) -> Result<Self>;

    /// Pointwise label selection: entry `i` of `labels` picks along `dim` for
    /// position `i` of dimension `along`. `dim` is dropped from the result.
    fn sel_pointwise(
        &self,
        dim: &str,
        labels: &[f64],
        along: &str,
        method: Method,
    ) -> Result<Self>;

    /// Attach a face coordinate.
    fn assign_faces(self, faces: Vec<Face>) -> Self;

    /// Remove the face coordinate.
    fn drop_faces(self) -> Self;

    /// Attach (or replace) a coordinate.
    fn assign_coord(self, name: &str, coord: Variable) -> Result<Self>;
}

/// Label matching method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Labels must match exactly
    Exact,
    /// Closest label
    #[default]
    Nearest,
    /// Closest label at or below the target
    Pad,
    /// Closest label at or above the target
    Backfill,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Nearest => "nearest",
            Self::Pad => "pad",
            Self::Backfill => "backfill",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SelectError;

    /// # Examples
    ///
    /// ```
    /// use meshcut::Method;
    ///
    /// assert_eq!("nearest".parse::<Method>().unwrap(), Method::Nearest);
    /// assert_eq!("ffill".parse::<Method>().unwrap(), Method::Pad);
    /// assert!("linear".parse::<Method>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exact" => Ok(Self::Exact),
            "nearest" => Ok(Self::Nearest),
            "pad" | "ffill" => Ok(Self::Pad),
            "backfill" | "bfill" => Ok(Self::Backfill),
            other => Err(SelectError::unsupported(format!(
                "selection method '{}' is not supported",
                other
            ))),
        }
    }
}

/// Selection along one named dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indexer {
    /// One label; the dimension is dropped from the result
    Scalar(f64),
    /// Several labels; the dimension is kept
    Array(Vec<f64>),
    /// Inclusive label range, open where a bound is `None`
    Range { start: Option<f64>, stop: Option<f64> },
}

impl Indexer {
    pub fn range(start: impl Into<Option<f64>>, stop: impl Into<Option<f64>>) -> Self {
        Self::Range {
            start: start.into(),
            stop: stop.into(),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }

    /// Labels of a scalar or array indexer as a vector, `None` for ranges.
    pub fn labels(&self) -> Option<Vec<f64>> {
        match self {
            Self::Scalar(label) => Some(vec![*label]),
            Self::Array(labels) => Some(labels.clone()),
            Self::Range { .. } => None,
        }
    }

    /// Whether `label` falls inside a range indexer.
    pub(crate) fn range_contains(start: Option<f64>, stop: Option<f64>, label: f64) -> bool {
        start.is_none_or(|s| label >= s) && stop.is_none_or(|s| label <= s)
    }
}

impl From<f64> for Indexer {
    fn from(label: f64) -> Self {
        Self::Scalar(label)
    }
}

impl From<Vec<f64>> for Indexer {
    fn from(labels: Vec<f64>) -> Self {
        Self::Array(labels)
    }
}

impl From<RangeInclusive<f64>> for Indexer {
    fn from(range: RangeInclusive<f64>) -> Self {
        Self::range(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("exact".parse::<Method>().unwrap(), Method::Exact);
        assert_eq!("bfill".parse::<Method>().unwrap(), Method::Backfill);
        assert!(matches!(
            "cubic".parse::<Method>(),
            Err(SelectError::UnsupportedMethod(_))
        ));
        assert_eq!(Method::default().to_string(), "nearest");
    }

    #[test]
    fn test_indexer_labels() {
        assert_eq!(Indexer::from(2.0).labels(), Some(vec![2.0]));
        assert_eq!(Indexer::from(vec![1.0, 3.0]).labels(), Some(vec![1.0, 3.0]));

        let range = Indexer::from(1.0..=4.0);
        assert!(range.is_range());
        assert!(range.labels().is_none());
    }

    #[test]
    fn test_range_contains() {
        assert!(Indexer::range_contains(Some(1.0), Some(2.0), 1.0));
        assert!(Indexer::range_contains(Some(1.0), Some(2.0), 2.0));
        assert!(!Indexer::range_contains(Some(1.0), Some(2.0), 2.5));
        assert!(Indexer::range_contains(None, Some(2.0), -100.0));
        assert!(Indexer::range_contains(Some(1.0), None, 1e9));
    }
}
