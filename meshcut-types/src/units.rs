use serde::{Deserialize, Serialize};
use std::fmt;

/// Display unit of a distance series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
}

impl DistanceUnit {
    /// Unit label as stored in the `units` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
        }
    }

    /// Number of meters in one unit.
    pub fn meters(&self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Kilometers => 1000.0,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
