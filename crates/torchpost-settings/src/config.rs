//! Post-processor configuration
//!
//! Provides the recognized post options, file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Lengths that describe the machine (tolerances) are given in millimeters
//! and converted to the program unit by the emitter.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use torchpost_core::units::MeasurementSystem;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Highest sequence number the controller accepts.
pub const SEQUENCE_CEILING: u32 = 99999;

/// Separator placed between the words of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordSeparator {
    /// Words separated by a single space
    #[default]
    Space,
    /// Words packed together
    None,
}

impl WordSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::None => "",
        }
    }
}

/// What drives the torch on/off commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorchControl {
    /// Explicit power requests from the planner
    #[default]
    Explicit,
    /// Movement hints: plunge lights the torch, rapid puts it out
    MotionHints,
}

/// Complete post-processor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    /// Prefix blocks with N words
    pub sequencing: bool,
    /// First sequence number
    pub sequence_start: u32,
    /// Sequence number step
    pub sequence_increment: u32,
    /// Separator between words
    pub word_separator: WordSeparator,
    /// Emit an automatic material selection block at each tool call
    pub automatic_material_selection: bool,
    /// Merge consecutive arcs sharing a center into one move
    pub merge_circles: bool,
    /// Feed percentage used for small-hole operations
    pub slow_speed_percent: u32,
    /// Path blending tolerance (mm); 0 falls back to the CAM tolerance
    pub blend_tolerance: f64,
    /// Tolerance the toolpath was computed with (mm)
    pub cam_tolerance: f64,
    /// Program unit
    pub unit_system: MeasurementSystem,
    /// The controller only runs inch programs
    pub inch_only: bool,
    /// Torch on/off policy
    pub torch_control: TorchControl,
    /// Maximum center distance for merging arcs (mm)
    pub arc_merge_tolerance: f64,
    /// Chord error allowed when arcs are broken into lines (mm)
    pub chordal_tolerance: f64,
    /// Program name written in the header
    pub program_name: Option<String>,
    /// Program comment written in the header
    pub program_comment: Option<String>,
    /// Write tool descriptions and operation comments
    pub show_notes: bool,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            sequencing: true,
            sequence_start: 10,
            sequence_increment: 5,
            word_separator: WordSeparator::Space,
            automatic_material_selection: false,
            merge_circles: true,
            slow_speed_percent: 60,
            blend_tolerance: 0.0,
            cam_tolerance: 0.01,
            unit_system: MeasurementSystem::Imperial,
            inch_only: true,
            torch_control: TorchControl::Explicit,
            arc_merge_tolerance: 0.2,
            chordal_tolerance: 0.01,
            program_name: None,
            program_comment: None,
            show_notes: true,
        }
    }
}

impl PostConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()).into());
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded post configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(SettingsError::SaveError(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sequence_increment == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "sequence_increment".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.sequence_start > SEQUENCE_CEILING {
            return Err(ConfigError::ValueOutOfRange {
                key: "sequence_start".to_string(),
                value: self.sequence_start.to_string(),
            });
        }

        if !(10..=99).contains(&self.slow_speed_percent) {
            return Err(ConfigError::ValueOutOfRange {
                key: "slow_speed_percent".to_string(),
                value: self.slow_speed_percent.to_string(),
            });
        }

        for (key, value) in [
            ("blend_tolerance", self.blend_tolerance),
            ("cam_tolerance", self.cam_tolerance),
            ("arc_merge_tolerance", self.arc_merge_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if !self.chordal_tolerance.is_finite() || self.chordal_tolerance <= 0.0 {
            return Err(ConfigError::InvalidSetting {
                key: "chordal_tolerance".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Blend tolerance in mm, falling back to the CAM tolerance when unset.
    pub fn effective_blend_tolerance(&self) -> f64 {
        if self.blend_tolerance > 0.0 {
            self.blend_tolerance
        } else {
            self.cam_tolerance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PostConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.word_separator.as_str(), " ");
        assert_eq!(config.unit_system, MeasurementSystem::Imperial);
    }

    #[test]
    fn test_slow_speed_range() {
        let mut config = PostConfig::default();
        config.slow_speed_percent = 9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { .. })
        ));
        config.slow_speed_percent = 99;
        assert!(config.validate().is_ok());
        config.slow_speed_percent = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_increment_rejected() {
        let config = PostConfig {
            sequence_increment: 0,
            ..PostConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_blend_tolerance_fallback() {
        let mut config = PostConfig::default();
        config.cam_tolerance = 0.05;
        assert_eq!(config.effective_blend_tolerance(), 0.05);
        config.blend_tolerance = 0.1;
        assert_eq!(config.effective_blend_tolerance(), 0.1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PostConfig =
            serde_json::from_str(r#"{"sequencing": false, "word_separator": "none"}"#).unwrap();
        assert!(!config.sequencing);
        assert_eq!(config.word_separator, WordSeparator::None);
        assert_eq!(config.sequence_start, 10);
        assert!(config.merge_circles);
    }
}
