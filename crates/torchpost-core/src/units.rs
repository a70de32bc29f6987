//! Unit conversion utilities
//!
//! Handles conversion between Metric (mm) and Imperial (inch) systems.
//! Machine-side tolerances are configured in millimeters and converted
//! into the program unit once, at the start of a run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[serde(alias = "mm")]
    Metric,
    /// Imperial system (inches)
    #[default]
    #[serde(alias = "inch", alias = "in")]
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Convert a length given in millimeters into the program unit
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn from_mm(value_mm: f64, system: MeasurementSystem) -> f64 {
    match system {
        MeasurementSystem::Metric => value_mm,
        MeasurementSystem::Imperial => value_mm / MM_PER_INCH,
    }
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_metric_conversion() {
        assert_relative_eq!(from_mm(10.5, MeasurementSystem::Metric), 10.5);
    }

    #[test]
    fn test_imperial_conversion() {
        assert_relative_eq!(from_mm(25.4, MeasurementSystem::Imperial), 1.0);
        assert_relative_eq!(from_mm(0.2, MeasurementSystem::Imperial), 0.2 / 25.4);
    }

    #[test]
    fn test_parse() {
        assert_eq!("mm".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Metric));
        assert_eq!("Inch".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Imperial));
        assert!("furlong".parse::<MeasurementSystem>().is_err());
    }

    #[test]
    fn test_serde_aliases() {
        let m: MeasurementSystem = serde_json::from_str("\"mm\"").unwrap();
        assert_eq!(m, MeasurementSystem::Metric);
        let i: MeasurementSystem = serde_json::from_str("\"inch\"").unwrap();
        assert_eq!(i, MeasurementSystem::Imperial);
        assert_eq!(serde_json::to_string(&i).unwrap(), "\"imperial\"");
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(get_unit_label(MeasurementSystem::Metric), "mm");
        assert_eq!(get_unit_label(MeasurementSystem::Imperial), "in");
    }
}
