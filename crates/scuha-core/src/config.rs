//! Catalog settings

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the catalog page. Every field is optional when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Cards added per "load more"
    pub batch_size: usize,
    /// Delay between consecutive card insertions in a batch
    pub stagger_ms: u32,
    /// Maximum length of the play history
    pub recent_limit: usize,
    pub favorites_key: String,
    pub recent_key: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            batch_size: 6,
            stagger_ms: 100,
            recent_limit: 10,
            // Same keys as the original page so saved favorites and history carry over
            favorites_key: "scuha_favorites".to_string(),
            recent_key: "scuha_recent_games".to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.recent_limit == 0 {
            return Err(ConfigError::ZeroRecentLimit);
        }
        if self.favorites_key.is_empty() {
            return Err(ConfigError::EmptyKey("favorites_key"));
        }
        if self.recent_key.is_empty() {
            return Err(ConfigError::EmptyKey("recent_key"));
        }
        Ok(())
    }

    /// Parse JSON overrides on top of the defaults. Only an object is accepted;
    /// serde would otherwise fill fields positionally from an array.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ConfigError::Decode(e.to_string()))?;
        if !value.is_object() {
            return Err(ConfigError::Decode("expected a JSON object".to_string()));
        }
        let config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::Decode(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CatalogConfig::default();
        assert_eq!(config.batch_size, 6);
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.favorites_key, "scuha_favorites");
        assert_eq!(config.recent_key, "scuha_recent_games");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CatalogConfig::from_json(r#"{"batch_size": 3}"#).unwrap();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.stagger_ms, 100);
        assert_eq!(config.recent_key, "scuha_recent_games");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(
            CatalogConfig::from_json(r#"{"batch_size": 0}"#).unwrap_err(),
            ConfigError::ZeroBatchSize
        );
        assert_eq!(
            CatalogConfig::from_json(r#"{"favorites_key": ""}"#).unwrap_err(),
            ConfigError::EmptyKey("favorites_key")
        );
        assert!(matches!(
            CatalogConfig::from_json("{"),
            Err(ConfigError::Decode(_))
        ));
        assert!(matches!(
            CatalogConfig::from_json(r#"{"batch_size": "six"}"#),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    fn test_non_object_json_rejected() {
        for json in ["[1, 2]", "\"x\"", "7", "null"] {
            assert!(
                matches!(CatalogConfig::from_json(json), Err(ConfigError::Decode(_))),
                "{} should not decode",
                json
            );
        }
    }
}
