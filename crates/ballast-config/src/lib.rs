//! Configuration management for ballast
//!
//! This module handles loading, validation, and management of
//! ballast configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON file with accounts, categories, transactions and posts
    #[serde(default = "default_data_file")]
    pub file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: default_data_file(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./data/ballast.json")
}

/// A named preset applied in one action from the transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickFilterConfig {
    /// Identifier used in URLs
    pub name: String,
    /// Label shown to users
    #[serde(default)]
    pub label: String,
    /// URL filter parameters the preset applies (e.g. `status: NEEDS_REVIEW`)
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl QuickFilterConfig {
    fn new(name: &str, label: &str, params: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Transaction filter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Delay before free-text search is applied
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Rows per page when the request does not say
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Upper bound for a requested page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    #[serde(default = "default_quick_filters")]
    pub quick_filters: Vec<QuickFilterConfig>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            quick_filters: default_quick_filters(),
        }
    }
}

impl FiltersConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> usize {
    50
}

fn default_max_page_size() -> usize {
    200
}

fn default_quick_filters() -> Vec<QuickFilterConfig> {
    vec![
        QuickFilterConfig::new("needs-review", "Needs review", &[("status", "NEEDS_REVIEW")]),
        QuickFilterConfig::new("uncategorized", "Uncategorized", &[("uncategorized", "true")]),
        QuickFilterConfig::new("income", "Income", &[("type", "INCOME")]),
        QuickFilterConfig::new("expenses", "Expenses", &[("type", "EXPENSE")]),
    ]
}

/// Related content settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedConfig {
    /// Number of related posts returned when the request does not say
    #[serde(default = "default_related_limit")]
    pub limit: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            limit: default_related_limit(),
        }
    }
}

fn default_related_limit() -> usize {
    4
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data file settings
    #[serde(default)]
    pub data: DataConfig,
    /// Filter settings
    #[serde(default)]
    pub filters: FiltersConfig,
    /// Related content settings
    #[serde(default)]
    pub related: RelatedConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "Port must be greater than 0"));
        }

        if self.filters.search_debounce_ms > 10_000 {
            return Err(invalid(
                "filters.search_debounce_ms",
                "Search debounce must be at most 10000 ms",
            ));
        }

        if self.filters.max_page_size == 0 {
            return Err(invalid(
                "filters.max_page_size",
                "Maximum page size must be greater than 0",
            ));
        }

        if self.filters.page_size == 0 || self.filters.page_size > self.filters.max_page_size {
            return Err(invalid(
                "filters.page_size",
                "Page size must be between 1 and filters.max_page_size",
            ));
        }

        let mut names = HashSet::new();
        for preset in &self.filters.quick_filters {
            if preset.name.trim().is_empty() {
                return Err(invalid(
                    "filters.quick_filters.name",
                    "Quick filter names must not be empty",
                ));
            }
            if !names.insert(preset.name.as_str()) {
                return Err(invalid(
                    "filters.quick_filters.name",
                    &format!("Duplicate quick filter name: {}", preset.name),
                ));
            }
        }

        if self.related.limit == 0 {
            return Err(invalid("related.limit", "Related limit must be greater than 0"));
        }

        Ok(())
    }

    /// Default configuration file contents
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.filters.search_debounce_ms, 300);
        assert_eq!(config.filters.page_size, 50);
        assert_eq!(config.related.limit, 4);
        assert_eq!(config.filters.quick_filters.len(), 4);
    }

    #[test]
    fn test_default_template_is_valid() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        let needs_review = &config.filters.quick_filters[0];
        assert_eq!(needs_review.name, "needs-review");
        assert_eq!(
            needs_review.params.get("status"),
            Some(&"NEEDS_REVIEW".to_string())
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "server.port"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_page_size_above_maximum() {
        let yaml = "filters:\n  page_size: 500\n  max_page_size: 100\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("filters.page_size"));
    }

    #[test]
    fn test_duplicate_quick_filters_rejected() {
        let yaml = r#"
filters:
  quick_filters:
    - name: review
      params: { status: NEEDS_REVIEW }
    - name: review
      params: { type: INCOME }
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate quick filter name"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/definitely/not/here.yaml").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::FileNotFound);
    }
}
