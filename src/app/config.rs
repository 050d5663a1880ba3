//! Configuration Management

use crate::session::settings::{OutputDetail, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bounds for the collector poll interval.
const MIN_POLL_INTERVAL_MS: u64 = 100;
const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
    /// Remote collector settings
    #[serde(default)]
    pub collector: CollectorConfig,
    /// Engine behavior toggles
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output tier: compact, standard, detailed, or forensic
    pub detail: String,
    /// Default marker color
    pub marker_color: String,
    /// Clear the session after a successful copy
    pub clear_on_copy: bool,
}

/// Remote collector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Base URL, e.g. "http://localhost:7007"
    pub base_url: Option<String>,
    /// Poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// Whether the collector integration is active
    pub enabled: bool,
}

/// Engine behavior toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Suppress page click handlers while recording
    pub block_page_interactions: bool,
    /// Show framework component identities in overlays
    pub show_framework_components: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            detail: OutputDetail::Forensic.to_string(),
            marker_color: "blue".to_string(),
            clear_on_copy: false,
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            poll_interval_ms: 2000,
            enabled: false,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            block_page_interactions: false,
            show_framework_components: true,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.report
            .detail
            .parse::<OutputDetail>()
            .map_err(crate::Error::Config)?;
        self.report
            .marker_color
            .parse::<crate::session::marker::MarkerColor>()
            .map_err(crate::Error::Config)?;
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&self.collector.poll_interval_ms)
        {
            return Err(crate::Error::Config(format!(
                "poll_interval_ms must be in [{MIN_POLL_INTERVAL_MS}, {MAX_POLL_INTERVAL_MS}], got {}",
                self.collector.poll_interval_ms
            )));
        }
        if self.collector.enabled && self.collector.base_url.is_none() {
            return Err(crate::Error::Config(
                "collector.base_url is required when the collector is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Engine settings derived from this config.
    pub fn settings(&self) -> Result<Settings, crate::Error> {
        Ok(Settings {
            output_detail: self.report.detail.parse().map_err(crate::Error::Config)?,
            marker_color: self
                .report
                .marker_color
                .parse()
                .map_err(crate::Error::Config)?,
            clear_on_copy: self.report.clear_on_copy,
            block_page_interactions: self.engine.block_page_interactions,
            show_framework_components: self.engine.show_framework_components,
            is_dark_mode: false,
        })
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from the default location, falling back to defaults
    /// when the file is absent.
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<(), crate::Error> {
        let content = serde_json::to_string_pretty(self)?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config path, next to where the tool runs.
    pub fn default_path() -> PathBuf {
        PathBuf::from("agentation.json")
    }

    /// Pretty JSON representation
    pub fn to_json(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::marker::MarkerColor;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.report.detail, "forensic");
        assert_eq!(config.report.marker_color, "blue");
        assert_eq!(config.collector.poll_interval_ms, 2000);
        assert!(!config.collector.enabled);
        assert!(config.engine.show_framework_components);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_settings_conversion() {
        let mut config = Config::default();
        config.report.detail = "compact".to_string();
        config.report.marker_color = "red".to_string();
        config.engine.block_page_interactions = true;

        let settings = config.settings().unwrap();
        assert_eq!(settings.output_detail, OutputDetail::Compact);
        assert_eq!(settings.marker_color, MarkerColor::Red);
        assert!(settings.block_page_interactions);
    }

    #[test]
    fn test_validate_unknown_detail() {
        let mut config = Config::default();
        config.report.detail = "terse".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_color() {
        let mut config = Config::default();
        config.report.marker_color = "magenta".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_poll_interval_bounds() {
        let mut config = Config::default();
        config.collector.poll_interval_ms = 10;
        assert!(config.validate().is_err());
        config.collector.poll_interval_ms = 120_000;
        assert!(config.validate().is_err());
        config.collector.poll_interval_ms = 2000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_enabled_collector_needs_url() {
        let mut config = Config::default();
        config.collector.enabled = true;
        assert!(config.validate().is_err());
        config.collector.base_url = Some("http://localhost:7007".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("agentation.json");

        let mut original = Config::default();
        original.report.detail = "standard".to_string();
        original.collector.poll_interval_ms = 5000;

        original.save(&config_path).expect("Failed to save config");
        let loaded = Config::load(&config_path).expect("Failed to load config");
        assert_eq!(loaded.report.detail, "standard");
        assert_eq!(loaded.collector.poll_interval_ms, 5000);
    }

    #[test]
    fn test_config_save_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested_path = temp_dir.path().join("nested").join("agentation.json");

        Config::default().save(&nested_path).expect("Failed to save config");
        assert!(nested_path.exists());
    }

    #[test]
    fn test_load_invalid_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bad.json");
        std::fs::write(
            &config_path,
            r#"{"report": {"detail": "forensic", "marker_color": "blue", "clear_on_copy": false},
                "collector": {"base_url": null, "poll_interval_ms": 1, "enabled": false},
                "engine": {"block_page_interactions": false, "show_framework_components": true}}"#,
        )
        .expect("Failed to write config");
        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_partial_config_uses_section_defaults() {
        let partial = r#"{"report": {"detail": "detailed", "marker_color": "green", "clear_on_copy": true}}"#;
        let config: Config = serde_json::from_str(partial).unwrap();
        assert_eq!(config.report.detail, "detailed");
        assert_eq!(config.collector.poll_interval_ms, 2000);
        assert!(config.engine.show_framework_components);
    }
}
