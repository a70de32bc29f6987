//! Error types for the post-processor crate.
//!
//! Every error is fatal to the generation pass: the program text produced
//! so far is discarded. Warnings do not abort and are written into the
//! program as comments.

use std::fmt;
use thiserror::Error;
use torchpost_core::{JetMode, MeasurementSystem, ToolType};
use torchpost_settings::ConfigError;

/// Errors that abort program generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PostError {
    /// The configured unit system cannot be used with this controller.
    #[error("Unsupported unit: {unit} programs are not accepted, the controller runs inch only")]
    UnsupportedUnit { unit: MeasurementSystem },

    /// A section requests a tool the machine cannot carry.
    #[error("Section {section}: unsupported tool type '{tool_type}' for tool T{tool}")]
    UnsupportedToolType {
        section: usize,
        tool: u32,
        tool_type: ToolType,
    },

    /// A section requests a jet mode the machine cannot run.
    #[error("Section {section}: unsupported cut mode '{mode}'")]
    UnsupportedCutMode { section: usize, mode: JetMode },

    /// Simultaneous 5-axis motion was requested.
    #[error("Event {event}: 5-axis simultaneous motion is not supported")]
    UnsupportedMotion { event: usize },

    /// A compensation change is still pending when a rapid or circular move arrives.
    #[error("Event {event}: radius compensation cannot be changed on a {motion}, only with a linear move")]
    InvalidCompensationTiming { event: usize, motion: &'static str },

    /// The program started at work offset 0 and a later section asks for another offset.
    #[error("Section {section}: work offset {offset} requested but the program started at work offset 0")]
    MixedWorkOffsetScheme { section: usize, offset: u32 },

    /// The work offset has no select code on this controller.
    #[error("Section {section}: work offset {offset} is out of range (0-6)")]
    UnsupportedWorkOffset { section: usize, offset: u32 },

    /// A machine command outside the command table.
    #[error("Event {event}: unsupported command '{command}'")]
    UnsupportedCommand { event: usize, command: String },

    /// The configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Conditions reported inline without aborting.
#[derive(Debug, Clone, PartialEq)]
pub enum PostWarning {
    /// Dwell time outside the representable range, clamped.
    DwellOutOfRange { requested: f64, clamped: f64 },
}

impl fmt::Display for PostWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DwellOutOfRange { requested, clamped } => write!(
                f,
                "dwell of {:.3} seconds out of range, clamped to {:.3}",
                requested, clamped
            ),
        }
    }
}

/// Result type alias for post-processing.
pub type PostResult<T> = Result<T, PostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_error_display() {
        let err = PostError::InvalidCompensationTiming {
            event: 7,
            motion: "rapid move",
        };
        assert_eq!(
            err.to_string(),
            "Event 7: radius compensation cannot be changed on a rapid move, only with a linear move"
        );

        let err = PostError::UnsupportedCutMode {
            section: 2,
            mode: JetMode::Etching,
        };
        assert_eq!(err.to_string(), "Section 2: unsupported cut mode 'etching'");

        let err = PostError::UnsupportedUnit {
            unit: MeasurementSystem::Metric,
        };
        assert!(err.to_string().contains("Metric"));
    }

    #[test]
    fn test_warning_display() {
        let warning = PostWarning::DwellOutOfRange {
            requested: 120000.0,
            clamped: 99999.999,
        };
        assert_eq!(
            warning.to_string(),
            "dwell of 120000.000 seconds out of range, clamped to 99999.999"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: PostError = ConfigError::InvalidSetting {
            key: "sequence_increment".into(),
            reason: "must be greater than zero".into(),
        }
        .into();
        assert!(matches!(err, PostError::Config(_)));
    }
}
