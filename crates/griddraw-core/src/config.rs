//! Canvas configuration.

use crate::coords::{GRID_SPACING, GridMapper};
use crate::shapes::ApproximateMetrics;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for {field}: {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Tunables for the canvas and its tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Pixels between grid points.
    pub grid_spacing: f64,
    /// Pixel radius within which the pointer grabs a handle.
    pub handle_tolerance_px: f64,
    /// Content of newly placed text shapes.
    pub default_text: String,
    /// Font size used for the approximate text metrics.
    pub font_size: f64,
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let metrics = ApproximateMetrics::default();
        Self {
            grid_spacing: GRID_SPACING,
            handle_tolerance_px: 5.0,
            default_text: "Text".to_string(),
            font_size: metrics.font_size,
            char_width_factor: metrics.char_width_factor,
            line_height_factor: metrics.line_height_factor,
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CanvasConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("grid_spacing", self.grid_spacing),
            ("font_size", self.font_size),
            ("char_width_factor", self.char_width_factor),
            ("line_height_factor", self.line_height_factor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                log::warn!("Rejecting {field} = {value}");
                return Err(ConfigError::Invalid { field, value });
            }
        }
        if !(self.handle_tolerance_px.is_finite() && self.handle_tolerance_px >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "handle_tolerance_px",
                value: self.handle_tolerance_px,
            });
        }
        Ok(())
    }

    pub fn mapper(&self) -> GridMapper {
        GridMapper::new(self.grid_spacing)
    }

    pub fn metrics(&self) -> ApproximateMetrics {
        ApproximateMetrics {
            font_size: self.font_size,
            char_width_factor: self.char_width_factor,
            line_height_factor: self.line_height_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert!((config.grid_spacing - 10.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
        assert!((config.mapper().pad() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = CanvasConfig::from_json(r#"{"grid_spacing": 20.0}"#).unwrap();
        assert!((config.grid_spacing - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.default_text, "Text");
    }

    #[test]
    fn test_rejects_bad_spacing() {
        let err = CanvasConfig::from_json(r#"{"grid_spacing": 0.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grid_spacing", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = CanvasConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_text": "hello", "font_size": 16.0}}"#).unwrap();
        let config = CanvasConfig::load(file.path()).unwrap();
        assert_eq!(config.default_text, "hello");
        assert!((config.metrics().font_size - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CanvasConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
