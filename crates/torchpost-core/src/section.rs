//! Section metadata: the tool, offsets and per-operation overrides that
//! apply between a `SectionStart` and its `SectionEnd`.

use crate::geometry::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of cutting tool mounted for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    #[default]
    Plasma,
    Laser,
    Waterjet,
    Marker,
    Milling,
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plasma => write!(f, "plasma cutter"),
            Self::Laser => write!(f, "laser cutter"),
            Self::Waterjet => write!(f, "waterjet"),
            Self::Marker => write!(f, "marker"),
            Self::Milling => write!(f, "milling cutter"),
        }
    }
}

/// Cutting strategy of a jet tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JetMode {
    /// Cut all the way through the material
    #[default]
    Through,
    /// Mark the surface only
    Etching,
    /// Burn away material without piercing
    Vaporize,
}

impl fmt::Display for JetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Through => write!(f, "through cutting"),
            Self::Etching => write!(f, "etching"),
            Self::Vaporize => write!(f, "vaporize"),
        }
    }
}

/// A tool as described by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool number (T word)
    pub number: u32,
    #[serde(default)]
    pub tool_type: ToolType,
    /// Free text description, written as a note at the tool call
    #[serde(default)]
    pub description: String,
    /// Controller register holding the kerf width. Defaults to the tool number.
    #[serde(default)]
    pub kerf_register: Option<u32>,
}

impl Tool {
    /// A plasma tool with the given number and no description.
    pub fn plasma(number: u32) -> Self {
        Self {
            number,
            tool_type: ToolType::Plasma,
            description: String::new(),
            kerf_register: None,
        }
    }

    pub fn kerf_register(&self) -> u32 {
        self.kerf_register.unwrap_or(self.number)
    }
}

/// Per-operation overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionProperties {
    /// Cut this operation at the reduced small-hole speed
    pub small_hole: bool,
    /// Emit a tool call even when the tool is unchanged
    pub force_tool_change: bool,
    /// Operation comment
    pub comment: Option<String>,
}

/// One toolpath section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub tool: Tool,
    /// Work offset index; 0 is the machine default frame
    #[serde(default)]
    pub work_offset: u32,
    #[serde(default)]
    pub jet_mode: JetMode,
    /// Where the section begins, if the planner knows it up front
    #[serde(default)]
    pub initial_position: Option<Point2>,
    #[serde(default)]
    pub properties: SectionProperties,
}

impl Section {
    /// A through-cutting plasma section at work offset 0.
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            work_offset: 0,
            jet_mode: JetMode::Through,
            initial_position: None,
            properties: SectionProperties::default(),
        }
    }

    pub fn with_work_offset(mut self, work_offset: u32) -> Self {
        self.work_offset = work_offset;
        self
    }

    pub fn with_initial_position(mut self, position: Point2) -> Self {
        self.initial_position = Some(position);
        self
    }

    pub fn with_jet_mode(mut self, jet_mode: JetMode) -> Self {
        self.jet_mode = jet_mode;
        self
    }

    pub fn with_small_hole(mut self, small_hole: bool) -> Self {
        self.properties.small_hole = small_hole;
        self
    }
}
