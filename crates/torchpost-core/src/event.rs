//! Toolpath event model
//!
//! The CAM planner hands the post-processor an ordered stream of
//! [`ToolpathEvent`]s. Events are immutable once issued and each one is
//! consumed exactly once by the emitter.

use crate::error::{Error, Result};
use crate::geometry::Point2;
use crate::section::Section;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Active arc plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    #[default]
    XY,
    ZX,
    YZ,
}

/// Side requested by a radius compensation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationSide {
    Off,
    Left,
    Right,
}

/// Semantic classification of the motion that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Rapid,
    LeadIn,
    Cutting,
    LeadOut,
    Plunge,
    Other,
}

/// Machine commands the planner may request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Stop,
    OptionalStop,
    End,
    PowerOn,
    PowerOff,
    SpindleClockwise,
    SpindleCounterClockwise,
    StartSpindle,
    StopSpindle,
    CoolantOn,
    CoolantOff,
    ToolMeasure,
    BreakControl,
    /// A command this planner knows but the post does not
    Other(String),
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(name) => write!(f, "{}", name),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Value carried by a parameter change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A single event of the toolpath stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolpathEvent {
    RapidMove {
        x: f64,
        y: f64,
    },
    LinearMove {
        x: f64,
        y: f64,
        feed: f64,
    },
    CircularMove {
        clockwise: bool,
        center: Point2,
        end: Point2,
        feed: f64,
        #[serde(default)]
        plane: Plane,
    },
    /// Simultaneous 5-axis motion
    MultiAxisMove {
        position: [f64; 3],
        direction: [f64; 3],
        feed: f64,
    },
    Dwell {
        seconds: f64,
    },
    PowerRequest {
        on: bool,
    },
    RadiusCompensation {
        side: CompensationSide,
    },
    Movement {
        kind: MovementKind,
    },
    ParameterChange {
        name: String,
        value: ParameterValue,
    },
    SectionStart(Section),
    SectionEnd,
    Command {
        kind: CommandKind,
    },
}

impl ToolpathEvent {
    pub fn rapid(x: f64, y: f64) -> Self {
        Self::RapidMove { x, y }
    }

    pub fn linear(x: f64, y: f64, feed: f64) -> Self {
        Self::LinearMove { x, y, feed }
    }

    pub fn arc(clockwise: bool, center: Point2, end: Point2, feed: f64) -> Self {
        Self::CircularMove {
            clockwise,
            center,
            end,
            feed,
            plane: Plane::XY,
        }
    }

    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularMove { .. })
    }

    /// True for any event that moves the tool.
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            Self::RapidMove { .. }
                | Self::LinearMove { .. }
                | Self::CircularMove { .. }
                | Self::MultiAxisMove { .. }
        )
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RapidMove { .. } => "rapid move",
            Self::LinearMove { .. } => "linear move",
            Self::CircularMove { .. } => "circular move",
            Self::MultiAxisMove { .. } => "5-axis move",
            Self::Dwell { .. } => "dwell",
            Self::PowerRequest { .. } => "power request",
            Self::RadiusCompensation { .. } => "radius compensation",
            Self::Movement { .. } => "movement",
            Self::ParameterChange { .. } => "parameter change",
            Self::SectionStart(_) => "section start",
            Self::SectionEnd => "section end",
            Self::Command { .. } => "command",
        }
    }

    /// Reject values no planner should ever produce.
    fn check(&self, index: usize) -> Result<()> {
        let finite = |values: &[f64]| values.iter().all(|v| v.is_finite());
        let ok = match self {
            Self::RapidMove { x, y } => finite(&[*x, *y]),
            Self::LinearMove { x, y, feed } => finite(&[*x, *y, *feed]),
            Self::CircularMove {
                center, end, feed, ..
            } => finite(&[center.x, center.y, end.x, end.y, *feed]),
            Self::Dwell { seconds } => seconds.is_finite(),
            _ => true,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidEvent {
                index,
                reason: format!("{} has a non-finite value", self.name()),
            })
        }
    }
}

/// Decode a JSON array of events.
pub fn parse_events(json: &str) -> Result<Vec<ToolpathEvent>> {
    let events: Vec<ToolpathEvent> = serde_json::from_str(json)?;
    for (index, event) in events.iter().enumerate() {
        event.check(index)?;
    }
    Ok(events)
}
