//! Registry configuration loaded from JSON or YAML.

use blockkit_core::{BlockKey, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How much of an unmatched or failed block the fallback shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackMode {
    /// Marker plus the raw descriptor payload, for debugging.
    #[default]
    Development,
    /// Terse marker only.
    Production,
}

/// Configuration applied to a block registry at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Log every match decision.
    pub debug: bool,
    /// Warn when a named variant silently falls back to its type.
    pub strict_variants: bool,
    /// Fallback rendering mode.
    pub fallback_mode: FallbackMode,
    /// Extra keys that reuse the component another key resolves to.
    pub aliases: Vec<AliasMapping>,
}

/// Registers `key` with whatever `target` resolves to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasMapping {
    /// Key to register (e.g. "feature:01").
    pub key: String,
    /// Key whose resolution supplies the component (e.g. "features:cards").
    pub target: String,
}

impl AliasMapping {
    /// Creates an alias mapping.
    pub fn new(key: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: target.into(),
        }
    }

    /// Parsed alias key.
    pub fn key(&self) -> BlockKey {
        BlockKey::parse(&self.key)
    }

    /// Parsed target key.
    pub fn target(&self) -> BlockKey {
        BlockKey::parse(&self.target)
    }
}

impl RegistryConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig =
            serde_yaml::from_str(input).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let input = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Self::from_json_str(&input),
            "yaml" | "yml" => Self::from_yaml_str(&input),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Rejects aliases with empty keys or targets.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for alias in &self.aliases {
            for raw in [&alias.key, &alias.target] {
                if raw.trim().is_empty() {
                    return Err(ConfigError::invalid_key(raw.as_str(), "key must not be empty"));
                }
            }
        }
        Ok(())
    }

    /// The aliases every default registry carries: singular CMS spellings of
    /// the features block.
    pub fn default_aliases() -> Vec<AliasMapping> {
        vec![
            AliasMapping::new("feature:01", "features:cards"),
            AliasMapping::new("feature", "features"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert!(!config.debug);
        assert!(!config.strict_variants);
        assert_eq!(config.fallback_mode, FallbackMode::Development);
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_from_json() {
        let config = RegistryConfig::from_json_str(
            r#"{"debug": true, "fallbackMode": "production",
                "aliases": [{"key": "faq:02", "target": "faq:accordion"}]}"#,
        )
        .unwrap();
        assert!(config.debug);
        assert_eq!(config.fallback_mode, FallbackMode::Production);
        assert_eq!(config.aliases[0].key(), BlockKey::exact("faq", "02"));
        assert_eq!(config.aliases[0].target(), BlockKey::exact("faq", "accordion"));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "strictVariants: true\naliases:\n  - key: \"cta:banner\"\n    target: cta\n";
        let config = RegistryConfig::from_yaml_str(yaml).unwrap();
        assert!(config.strict_variants);
        assert_eq!(config.aliases, vec![AliasMapping::new("cta:banner", "cta")]);
    }

    #[test]
    fn test_rejects_empty_alias() {
        let err = RegistryConfig::from_json_str(r#"{"aliases": [{"key": " ", "target": "hero"}]}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKey { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = RegistryConfig::from_yaml_str("aliases: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("blockkit-registry-config.toml");
        std::fs::write(&path, "debug = true").unwrap();
        let err = RegistryConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_path_json() {
        let path = std::env::temp_dir().join("blockkit-registry-config.json");
        std::fs::write(&path, r#"{"debug": true}"#).unwrap();
        let config = RegistryConfig::from_path(&path).unwrap();
        assert!(config.debug);
        std::fs::remove_file(&path).ok();
    }
}
