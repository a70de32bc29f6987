//! Controller word table.

use torchpost_core::{CommandKind, CompensationSide, MeasurementSystem, Plane};

pub const RAPID: &str = "G00";
pub const LINEAR: &str = "G01";
pub const ARC_CW: &str = "G02";
pub const ARC_CCW: &str = "G03";
pub const DWELL: &str = "G04";
pub const ABSOLUTE: &str = "G90";
pub const PATH_BLEND: &str = "G64";

pub const MOTION_PAUSE_ENABLE: &str = "M76";
pub const REVERSE_RUN_ENABLE: &str = "M77";
pub const HEIGHT_CONTROL_ENABLE: &str = "M51";
pub const HEIGHT_CONTROL_DISABLE: &str = "M50";
pub const TORCH_ENABLE: &str = "M52";
pub const TORCH_DISABLE: &str = "M53";
pub const TORCH_ON: &str = "M07";
pub const TORCH_OFF: &str = "M08";
pub const MATERIAL_SELECT: &str = "M36";
pub const PROGRAM_END: &str = "M30";

pub fn plane_code(plane: Plane) -> &'static str {
    match plane {
        Plane::XY => "G17",
        Plane::ZX => "G18",
        Plane::YZ => "G19",
    }
}

pub fn unit_code(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Imperial => "G20",
        MeasurementSystem::Metric => "G21",
    }
}

pub fn compensation_code(side: CompensationSide) -> &'static str {
    match side {
        CompensationSide::Off => "G40",
        CompensationSide::Left => "G41",
        CompensationSide::Right => "G42",
    }
}

/// Work offset select code; 0 is the machine default frame and shares G54.
pub fn work_offset_code(offset: u32) -> Option<&'static str> {
    match offset {
        0 | 1 => Some("G54"),
        2 => Some("G55"),
        3 => Some("G56"),
        4 => Some("G57"),
        5 => Some("G58"),
        6 => Some("G59"),
        _ => None,
    }
}

/// What a machine command turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Write a single M word
    Code(&'static str),
    /// Route through the torch state machine
    Torch(bool),
    /// Accepted and dropped; the machine has nothing to do
    Ignore,
    /// Not in the table
    Unsupported,
}

pub fn command_action(kind: &CommandKind) -> CommandAction {
    match kind {
        CommandKind::Stop => CommandAction::Code("M00"),
        CommandKind::OptionalStop => CommandAction::Code("M01"),
        CommandKind::End => CommandAction::Code("M02"),
        CommandKind::PowerOn => CommandAction::Torch(true),
        CommandKind::PowerOff => CommandAction::Torch(false),
        // no spindle and no coolant on a plasma table
        CommandKind::SpindleClockwise
        | CommandKind::SpindleCounterClockwise
        | CommandKind::StartSpindle
        | CommandKind::StopSpindle
        | CommandKind::CoolantOn
        | CommandKind::CoolantOff => CommandAction::Ignore,
        CommandKind::ToolMeasure | CommandKind::BreakControl | CommandKind::Other(_) => {
            CommandAction::Unsupported
        }
    }
}
