//! Numeric word formatting
//!
//! Renders values as fixed-decimal text. Precision depends on the kind of
//! value and on the program unit, never on the value itself. Rounding is
//! half away from zero.

use torchpost_core::MeasurementSystem;

/// What a formatted value represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Positions, center offsets and tolerances
    Coordinate,
    Feed,
    /// Seconds
    Time,
    Percentage,
    /// Tool numbers, registers, counts
    Integer,
}

/// Rendering rules for one value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub decimals: u32,
    /// Keep the decimal point even when no fractional digits remain
    pub force_decimal: bool,
    /// Drop trailing fractional zeros
    pub trim_zeros: bool,
}

impl FormatSpec {
    pub const fn new(decimals: u32, force_decimal: bool, trim_zeros: bool) -> Self {
        Self {
            decimals,
            force_decimal,
            trim_zeros,
        }
    }
}

/// Unit-aware formatter, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct NumericFormatter {
    coordinate: FormatSpec,
    feed: FormatSpec,
    time: FormatSpec,
    percentage: FormatSpec,
    integer: FormatSpec,
}

impl NumericFormatter {
    pub fn new(system: MeasurementSystem) -> Self {
        let (coordinate_decimals, feed_decimals) = match system {
            MeasurementSystem::Metric => (5, 1),
            MeasurementSystem::Imperial => (6, 2),
        };
        Self {
            coordinate: FormatSpec::new(coordinate_decimals, true, true),
            feed: FormatSpec::new(feed_decimals, true, true),
            time: FormatSpec::new(3, true, false),
            percentage: FormatSpec::new(0, false, false),
            integer: FormatSpec::new(0, false, false),
        }
    }

    pub fn spec(&self, kind: ValueKind) -> FormatSpec {
        match kind {
            ValueKind::Coordinate => self.coordinate,
            ValueKind::Feed => self.feed,
            ValueKind::Time => self.time,
            ValueKind::Percentage => self.percentage,
            ValueKind::Integer => self.integer,
        }
    }

    /// Override the rules for one kind.
    pub fn set_spec(&mut self, kind: ValueKind, spec: FormatSpec) {
        match kind {
            ValueKind::Coordinate => self.coordinate = spec,
            ValueKind::Feed => self.feed = spec,
            ValueKind::Time => self.time = spec,
            ValueKind::Percentage => self.percentage = spec,
            ValueKind::Integer => self.integer = spec,
        }
    }

    pub fn format(&self, value: f64, kind: ValueKind) -> String {
        render(value, self.spec(kind))
    }

    /// Letter-prefixed word, e.g. `X1.25`.
    pub fn word(&self, letter: char, value: f64, kind: ValueKind) -> String {
        format!("{}{}", letter, self.format(value, kind))
    }
}

fn render(value: f64, spec: FormatSpec) -> String {
    let scale = 10f64.powi(spec.decimals as i32);
    // f64::round rounds half away from zero
    let scaled = (value * scale).round();
    let negative = scaled < 0.0;
    let digits = scaled.abs() as u128;
    let divisor = 10u128.pow(spec.decimals);

    let mut fraction = if spec.decimals > 0 {
        format!(
            "{:0width$}",
            digits % divisor,
            width = spec.decimals as usize
        )
    } else {
        String::new()
    };
    if spec.trim_zeros {
        while fraction.ends_with('0') {
            fraction.pop();
        }
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&(digits / divisor).to_string());
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(&fraction);
    } else if spec.force_decimal {
        out.push('.');
    }
    out
}
