//! # torchpost Core
//!
//! Core types shared by the torchpost crates.
//! Provides the toolpath event model produced by the CAM planner,
//! section metadata, unit handling and the small amount of planar
//! geometry the post-processor needs.

pub mod error;
pub mod event;
pub mod geometry;
pub mod section;
pub mod units;

pub use error::{Error, Result};
pub use event::{
    parse_events, CommandKind, CompensationSide, MovementKind, ParameterValue, Plane,
    ToolpathEvent,
};
pub use geometry::Point2;
pub use section::{JetMode, Section, SectionProperties, Tool, ToolType};
pub use units::MeasurementSystem;
