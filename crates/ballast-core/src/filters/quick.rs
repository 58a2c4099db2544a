//! Named filter presets

use super::reducer::FilterPatch;
use crate::error::FilterError;
use ballast_config::QuickFilterConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickFilter {
    pub name: String,
    pub label: String,
    pub patch: FilterPatch,
}

impl QuickFilter {
    pub fn new(name: impl Into<String>, label: impl Into<String>, patch: FilterPatch) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            patch,
        }
    }

    /// Build a preset from configuration, rejecting unknown parameter names
    pub fn from_config(config: &QuickFilterConfig) -> Result<Self, FilterError> {
        let patch = FilterPatch::from_params(
            config.params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )?;
        let label = if config.label.is_empty() {
            config.name.clone()
        } else {
            config.label.clone()
        };
        Ok(Self::new(config.name.clone(), label, patch))
    }
}

/// Every usable preset from configuration; broken entries are logged and skipped
pub fn presets_from_config(configs: &[QuickFilterConfig]) -> Vec<QuickFilter> {
    configs
        .iter()
        .filter_map(|config| match QuickFilter::from_config(config) {
            Ok(preset) => Some(preset),
            Err(e) => {
                log::warn!("Skipping quick filter '{}': {}", config.name, e);
                None
            }
        })
        .collect()
}
