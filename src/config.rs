//! Selection settings.
use crate::container::Method;
use serde::de::Error;

/// Default name of the node dimension.
pub const DEFAULT_NODE_DIM: &str = "nod2";

/// Default `long_name` attribute of the distance coordinate.
pub const DEFAULT_DISTANCE_LONG_NAME: &str = "distance along trajectory";

/// Selection configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectConfig {
    /// Name of the node dimension in the container
    #[serde(default = "SelectConfig::default_node_dim")]
    pub node_dim: String,

    /// Dimension that point and path results are laid out along.
    /// Defaults to the node dimension.
    #[serde(default)]
    pub selection_dim: Option<String>,

    #[serde(default)]
    pub method: Method,

    /// Buffer around region boundaries, in degrees
    #[serde(default = "SelectConfig::default_containment_tolerance")]
    pub containment_tolerance: f64,

    /// Attach a distance coordinate to point selections made through
    /// `MeshSelector::select_points`
    #[serde(default = "SelectConfig::default_return_distance")]
    pub return_distance: bool,

    #[serde(default = "SelectConfig::default_distance_long_name")]
    pub distance_long_name: String,
}

impl SelectConfig {
    fn default_node_dim() -> String {
        DEFAULT_NODE_DIM.to_string()
    }

    const fn default_containment_tolerance() -> f64 {
        1e-6
    }

    const fn default_return_distance() -> bool {
        true
    }

    fn default_distance_long_name() -> String {
        DEFAULT_DISTANCE_LONG_NAME.to_string()
    }

    pub fn with_node_dim(mut self, dim: impl Into<String>) -> Self {
        self.node_dim = dim.into();
        self
    }

    pub fn with_selection_dim(mut self, dim: impl Into<String>) -> Self {
        self.selection_dim = Some(dim.into());
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_containment_tolerance(mut self, tolerance: f64) -> Self {
        if tolerance > 0.01 {
            log::warn!(
                "Containment tolerance of {} degrees is large and will pull in nodes \
                well outside the region boundary",
                tolerance
            );
        }
        self.containment_tolerance = tolerance;
        self
    }

    pub fn with_return_distance(mut self, return_distance: bool) -> Self {
        self.return_distance = return_distance;
        self
    }

    pub fn with_distance_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.distance_long_name = long_name.into();
        self
    }

    /// Dimension point selections are laid out along.
    pub fn selection_dim(&self) -> &str {
        self.selection_dim.as_deref().unwrap_or(&self.node_dim)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.node_dim.is_empty() {
            return Err("Node dimension name must not be empty".to_string());
        }

        if let Some(dim) = &self.selection_dim
            && dim.is_empty()
        {
            return Err("Selection dimension name must not be empty".to_string());
        }

        if !self.containment_tolerance.is_finite() || self.containment_tolerance < 0.0 {
            return Err(format!(
                "Containment tolerance must be finite and non-negative, got {}",
                self.containment_tolerance
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: SelectConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: SelectConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            node_dim: Self::default_node_dim(),
            selection_dim: None,
            method: Method::default(),
            containment_tolerance: Self::default_containment_tolerance(),
            return_distance: Self::default_return_distance(),
            distance_long_name: Self::default_distance_long_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SelectConfig::default();
        assert_eq!(config.node_dim, "nod2");
        assert_eq!(config.selection_dim(), "nod2");
        assert_eq!(config.method, Method::Nearest);
        assert_eq!(config.containment_tolerance, 1e-6);
        assert!(config.return_distance);
        assert_eq!(config.distance_long_name, "distance along trajectory");
    }

    #[test]
    fn test_config_serialization() {
        let config = SelectConfig::default()
            .with_node_dim("node")
            .with_selection_dim("track")
            .with_containment_tolerance(1e-4)
            .with_return_distance(false);

        let json = config.to_json().unwrap();
        let deserialized = SelectConfig::from_json(&json).unwrap();

        assert_eq!(deserialized, config);
        assert_eq!(deserialized.selection_dim(), "track");
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = SelectConfig::from_json(r#"{"node_dim": "n"}"#).unwrap();
        assert_eq!(config.node_dim, "n");
        assert_eq!(config.containment_tolerance, 1e-6);
    }

    #[test]
    fn test_config_validation() {
        assert!(SelectConfig::from_json(r#"{"containment_tolerance": -1.0}"#).is_err());
        assert!(SelectConfig::from_json(r#"{"node_dim": ""}"#).is_err());
        assert!(SelectConfig::from_json(r#"{"unknown_field": 1}"#).is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml() {
        let config = SelectConfig::default().with_method(Method::Pad);
        let toml_str = config.to_toml().unwrap();
        let parsed = SelectConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
