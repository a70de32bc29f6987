//! # torchpost Post
//!
//! Turns the toolpath event stream of the CAM planner into a program for a
//! plasma-table controller.
//!
//! ## Emission Engine
//!
//! - **Numeric Formatter**: unit-dependent fixed-decimal rendering of words
//! - **Modal Word Tracker**: suppresses words the controller already holds
//! - **Sequence Numberer**: wrapping N words
//! - **Circular Move Aggregator**: merges split arcs into single moves and full circles
//! - **Cutter Compensation**: deferred G41/G42 activation
//! - **Torch Power**: idempotent torch on/off
//! - **Section Transitions**: tool calls and work offsets
//! - **Emitter**: block assembly and comments
//!
//! [`PlasmaPost`] drives all of them in one forward pass with a single
//! event of lookahead.

pub mod arcs;
pub mod codes;
pub mod compensation;
pub mod cursor;
pub mod emitter;
pub mod error;
pub mod format;
pub mod linearize;
pub mod modal;
pub mod post;
pub mod section;
pub mod sequence;
pub mod torch;

pub use arcs::{ArcSegment, CircularMoveAggregator, CircularMoveBuffer, FULL_CIRCLE_EPSILON};
pub use compensation::{CompensationState, CutterCompensation};
pub use cursor::{EventCursor, Lookahead};
pub use emitter::Emitter;
pub use error::{PostError, PostResult, PostWarning};
pub use format::{FormatSpec, NumericFormatter, ValueKind};
pub use linearize::{ArcLinearizer, ChordalLinearizer};
pub use modal::{ModalGroup, ModalWordTracker};
pub use post::{PlasmaPost, Program, DWELL_MAX, DWELL_MIN};
pub use section::{SectionPlan, SectionTransitionHandler};
pub use sequence::SequenceNumberer;
pub use torch::{TorchPower, TorchState, TorchTransition};
