//! Engine configuration
//!
//! Defaults cover every field, so a YAML file only needs the keys it changes:
//!
//! ```yaml
//! debounce_ms: 150
//! max_results: 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables for one document engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay before a non-empty query is searched
    pub debounce_ms: u64,
    /// Maximum number of candidates shown
    pub max_results: usize,
    /// Font size applied by the minimize command
    pub minimize_size: f32,
    /// Font family for emphasized text
    pub emphasis_font: String,
    /// Font size for emphasized text
    pub emphasis_size: f32,
    /// Gap between the caret and the candidate overlay
    pub overlay_margin: f64,
    /// Base font size of the editor
    pub font_size: f64,
    /// Measured line height, if the host knows it
    pub line_height: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            max_results: 10,
            minimize_size: 6.0,
            emphasis_font: "Calibri".to_string(),
            emphasis_size: 13.0,
            overlay_margin: 4.0,
            font_size: 14.0,
            line_height: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::Invalid("max_results must be at least 1".into()));
        }
        if self.minimize_size <= 0.0 || self.emphasis_size <= 0.0 {
            return Err(ConfigError::Invalid("font sizes must be positive".into()));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    pub fn with_minimize_size(mut self, size: f32) -> Self {
        self.minimize_size = size;
        self
    }

    pub fn with_emphasis(mut self, font: impl Into<String>, size: f32) -> Self {
        self.emphasis_font = font.into();
        self.emphasis_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.max_results, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml_str("debounce_ms: 150\nmax_results: 5\n").unwrap();
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.emphasis_font, "Calibri");
    }

    #[test]
    fn zero_results_is_invalid() {
        let err = EngineConfig::from_yaml_str("max_results: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardflow.yaml");
        std::fs::write(&path, "emphasis_font: Georgia\nemphasis_size: 12\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.emphasis_font, "Georgia");
        assert_eq!(config.emphasis_size, 12.0);
    }

    #[test]
    fn builders_chain() {
        let config = EngineConfig::new()
            .with_debounce_ms(0)
            .with_max_results(3)
            .with_emphasis("Arial", 11.0);
        assert_eq!(config.debounce(), Duration::ZERO);
        assert_eq!(config.max_results, 3);
        assert_eq!(config.emphasis_font, "Arial");
    }
}
