//! Plasma post-processor
//!
//! Drives a single forward pass over the toolpath events and writes the
//! controller program. All run state lives in a generation context that
//! exists for one pass only; any error discards it together with the
//! partial program.

use crate::arcs::{ArcSegment, CircularMoveAggregator, CircularMoveBuffer};
use crate::codes::{self, CommandAction};
use crate::compensation::CutterCompensation;
use crate::cursor::{EventCursor, Lookahead};
use crate::emitter::Emitter;
use crate::error::{PostError, PostResult, PostWarning};
use crate::format::{NumericFormatter, ValueKind};
use crate::linearize::{ArcLinearizer, ChordalLinearizer};
use crate::modal::{ModalGroup, ModalWordTracker};
use crate::section::{SectionPlan, SectionTransitionHandler};
use crate::sequence::SequenceNumberer;
use crate::torch::{TorchPower, TorchState, TorchTransition};
use torchpost_core::units::{self, get_unit_label};
use torchpost_core::{
    CommandKind, CompensationSide, MeasurementSystem, MovementKind, ParameterValue, Plane,
    Point2, Section, ToolpathEvent,
};
use torchpost_settings::{PostConfig, TorchControl};

/// Shortest dwell the controller accepts, seconds.
pub const DWELL_MIN: f64 = 0.001;
/// Longest dwell the controller accepts, seconds.
pub const DWELL_MAX: f64 = 99999.999;

/// A generated program and the warnings written into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub text: String,
    pub warnings: Vec<PostWarning>,
    pub blocks: usize,
}

/// Post-processor for plasma tables.
pub struct PlasmaPost {
    config: PostConfig,
    linearizer: Box<dyn ArcLinearizer>,
}

impl PlasmaPost {
    pub fn new(config: PostConfig) -> Self {
        Self {
            config,
            linearizer: Box::new(ChordalLinearizer::new()),
        }
    }

    /// Replace the geometry service used for arcs outside the XY plane.
    pub fn with_linearizer(mut self, linearizer: Box<dyn ArcLinearizer>) -> Self {
        self.linearizer = linearizer;
        self
    }

    pub fn config(&self) -> &PostConfig {
        &self.config
    }

    /// Generate the program text for `events`.
    pub fn generate<I>(&self, events: I) -> PostResult<String>
    where
        I: IntoIterator<Item = ToolpathEvent>,
    {
        self.generate_program(events).map(|program| program.text)
    }

    /// Generate the program and report the warnings raised along the way.
    pub fn generate_program<I>(&self, events: I) -> PostResult<Program>
    where
        I: IntoIterator<Item = ToolpathEvent>,
    {
        self.config.validate()?;
        if self.config.inch_only && self.config.unit_system != MeasurementSystem::Imperial {
            return Err(PostError::UnsupportedUnit {
                unit: self.config.unit_system,
            });
        }

        let mut ctx = GenerationContext::new(&self.config, self.linearizer.as_ref());
        ctx.write_header();

        let mut cursor = EventCursor::new(events);
        while let Some((index, event, lookahead)) = cursor.advance() {
            ctx.handle(index, event, lookahead)?;
        }

        ctx.write_footer();
        let warnings = ctx.warnings;
        let blocks = ctx.emitter.block_count();
        tracing::info!(
            blocks,
            sections = ctx.sections.sections_started(),
            warnings = warnings.len(),
            "program generated"
        );
        Ok(Program {
            text: ctx.emitter.finish(),
            warnings,
            blocks,
        })
    }
}

/// Everything one generation pass mutates.
struct GenerationContext<'a> {
    config: &'a PostConfig,
    linearizer: &'a dyn ArcLinearizer,
    format: NumericFormatter,
    modal: ModalWordTracker,
    emitter: Emitter,
    compensation: CutterCompensation,
    torch: TorchPower,
    arcs: CircularMoveAggregator,
    sections: SectionTransitionHandler,
    section: Option<Section>,
    position: Point2,
    chordal_tolerance: f64,
    warnings: Vec<PostWarning>,
}

impl<'a> GenerationContext<'a> {
    fn new(config: &'a PostConfig, linearizer: &'a dyn ArcLinearizer) -> Self {
        let system = config.unit_system;
        let sequence = config
            .sequencing
            .then(|| SequenceNumberer::new(config.sequence_start, config.sequence_increment));
        Self {
            config,
            linearizer,
            format: NumericFormatter::new(system),
            modal: ModalWordTracker::new(),
            emitter: Emitter::new(config.word_separator.as_str(), sequence),
            compensation: CutterCompensation::new(),
            torch: TorchPower::new(),
            arcs: CircularMoveAggregator::new(
                config.merge_circles,
                units::from_mm(config.arc_merge_tolerance, system),
            ),
            sections: SectionTransitionHandler::new(),
            section: None,
            position: Point2::ORIGIN,
            chordal_tolerance: units::from_mm(config.chordal_tolerance, system),
            warnings: Vec::new(),
        }
    }

    fn write_header(&mut self) {
        let config = self.config;
        if let Some(name) = &config.program_name {
            self.emitter.comment(name);
        }
        if let Some(comment) = &config.program_comment {
            self.emitter.comment(comment);
        }
        self.emitter.comment(&format!(
            "units {}",
            get_unit_label(config.unit_system)
        ));

        let unit = self
            .modal
            .emit_word(ModalGroup::Units, codes::unit_code(config.unit_system));
        self.emitter.emit_block(&[unit]);

        let distance = self.modal.emit_word(ModalGroup::Distance, codes::ABSOLUTE);
        let plane = self
            .modal
            .emit_word(ModalGroup::Plane, codes::plane_code(Plane::XY));
        self.emitter.emit_block(&[distance, plane]);

        let blend = units::from_mm(config.effective_blend_tolerance(), config.unit_system);
        let blend_word = self.modal.emit_word(ModalGroup::PathBlend, codes::PATH_BLEND);
        self.emitter.emit_block(&[
            blend_word,
            Some(self.format.word('P', blend, ValueKind::Coordinate)),
        ]);

        for code in [
            codes::MOTION_PAUSE_ENABLE,
            codes::REVERSE_RUN_ENABLE,
            codes::HEIGHT_CONTROL_ENABLE,
            codes::TORCH_ENABLE,
        ] {
            self.emitter.emit_block(&[Some(code.to_string())]);
        }
    }

    fn write_footer(&mut self) {
        if let Some(buffer) = self.arcs.finish() {
            self.write_arc(&buffer);
        }

        // return to the origin
        self.modal.force(ModalGroup::X);
        self.modal.force(ModalGroup::Y);
        let motion = self.modal.emit_word(ModalGroup::Motion, codes::RAPID);
        let x = self.coordinate_word(ModalGroup::X, 'X', 0.0);
        let y = self.coordinate_word(ModalGroup::Y, 'Y', 0.0);
        self.emitter.emit_block(&[motion, x, y]);
        self.position = Point2::ORIGIN;

        self.compensation.request(CompensationSide::Off);
        self.modal.force(ModalGroup::Compensation);
        let off = self.modal.emit_word(
            ModalGroup::Compensation,
            codes::compensation_code(CompensationSide::Off),
        );
        self.emitter.emit_block(&[off]);

        self.emitter
            .emit_block(&[Some(codes::HEIGHT_CONTROL_DISABLE.to_string())]);
        self.emitter.emit_block(&[Some(codes::TORCH_DISABLE.to_string())]);

        if self.torch.is_on() {
            tracing::warn!("torch still on at program end");
        }
        self.torch.force_off();
        self.emitter.emit_block(&[Some(codes::TORCH_OFF.to_string())]);
        self.emitter.emit_block(&[Some(codes::PROGRAM_END.to_string())]);
    }

    fn handle(&mut self, index: usize, event: ToolpathEvent, lookahead: Lookahead) -> PostResult<()> {
        match event {
            ToolpathEvent::RapidMove { x, y } => self.on_rapid(index, Point2::new(x, y)),
            ToolpathEvent::LinearMove { x, y, feed } => {
                self.on_linear(Point2::new(x, y), feed, lookahead);
                Ok(())
            }
            ToolpathEvent::CircularMove {
                clockwise,
                center,
                end,
                feed,
                plane,
            } => self.on_circular(index, clockwise, center, end, feed, plane, lookahead),
            ToolpathEvent::MultiAxisMove { .. } => Err(PostError::UnsupportedMotion { event: index }),
            ToolpathEvent::Dwell { seconds } => {
                self.on_dwell(seconds);
                Ok(())
            }
            ToolpathEvent::PowerRequest { on } => {
                self.on_power(on);
                Ok(())
            }
            ToolpathEvent::RadiusCompensation { side } => {
                self.on_radius_compensation(side);
                Ok(())
            }
            ToolpathEvent::Movement { kind } => {
                self.on_movement(kind);
                Ok(())
            }
            ToolpathEvent::ParameterChange { name, value } => {
                self.on_parameter(&name, &value);
                Ok(())
            }
            ToolpathEvent::SectionStart(section) => self.on_section_start(section),
            ToolpathEvent::SectionEnd => {
                self.on_section_end();
                Ok(())
            }
            ToolpathEvent::Command { kind } => self.on_command(index, &kind),
        }
    }

    fn coordinate_word(&mut self, group: ModalGroup, letter: char, value: f64) -> Option<String> {
        let word = self.format.word(letter, value, ValueKind::Coordinate);
        self.modal.emit_word(group, word)
    }

    fn feed_word(&mut self, feed: f64) -> Option<String> {
        let word = self.format.word('F', feed, ValueKind::Feed);
        self.modal.emit_word(ModalGroup::Feed, word)
    }

    /// Feed for a cutting move, reduced in small-hole sections.
    fn cutting_feed(&self, feed: f64) -> f64 {
        match &self.section {
            Some(section) if section.properties.small_hole => {
                feed * f64::from(self.config.slow_speed_percent) / 100.0
            }
            _ => feed,
        }
    }

    fn on_section_start(&mut self, section: Section) -> PostResult<()> {
        let plan = self.sections.begin(&section)?;
        tracing::info!(
            section = plan.index,
            tool = section.tool.number,
            tool_call = plan.insert_tool_call,
            "section start"
        );

        if self.config.show_notes {
            if let Some(comment) = &section.properties.comment {
                self.emitter.comment(comment);
            }
        }
        if plan.insert_tool_call {
            self.write_tool_call(&section);
        }
        if section.properties.small_hole {
            let percent = self.format.format(
                f64::from(self.config.slow_speed_percent),
                ValueKind::Percentage,
            );
            self.emitter
                .comment(&format!("small hole slow speed {} percent", percent));
        }

        self.write_work_offset(&plan);
        let initial = section.initial_position;
        self.section = Some(section);
        if let Some(position) = initial {
            self.write_rapid(position);
        }
        Ok(())
    }

    fn write_tool_call(&mut self, section: &Section) {
        let tool = &section.tool;
        if self.torch.is_on() {
            self.torch.force_off();
            self.emitter.emit_block(&[Some(codes::TORCH_OFF.to_string())]);
        }

        let number = self.format.format(f64::from(tool.number), ValueKind::Integer);
        let note = (self.config.show_notes && !tool.description.is_empty())
            .then_some(tool.description.as_str());
        self.emitter
            .emit_block_with_comment(&[Some(format!("T{}", number))], note);
        if self.config.automatic_material_selection {
            self.emitter.emit_block(&[
                Some(codes::MATERIAL_SELECT.to_string()),
                Some(format!("T{}", number)),
            ]);
        }

        // the tool is retracted: the controller may have forgotten motion and position
        self.modal.reset_group(ModalGroup::Motion);
        self.modal.reset_group(ModalGroup::X);
        self.modal.reset_group(ModalGroup::Y);
    }

    fn write_work_offset(&mut self, plan: &SectionPlan) {
        let word = self
            .modal
            .emit_word(ModalGroup::WorkOffset, plan.work_offset_code);
        self.emitter.emit_block(&[word]);
    }

    fn on_section_end(&mut self) {
        self.modal.reset_group(ModalGroup::X);
        self.modal.reset_group(ModalGroup::Y);
        self.modal.reset_group(ModalGroup::Feed);
        self.sections.end();
        self.section = None;
    }

    fn ensure_compensation_settled(&self, index: usize, motion: &'static str) -> PostResult<()> {
        if self.compensation.is_pending() {
            return Err(PostError::InvalidCompensationTiming {
                event: index,
                motion,
            });
        }
        Ok(())
    }

    fn on_rapid(&mut self, index: usize, target: Point2) -> PostResult<()> {
        self.ensure_compensation_settled(index, "rapid move")?;
        self.write_rapid(target);
        Ok(())
    }

    fn write_rapid(&mut self, target: Point2) {
        let x = self.coordinate_word(ModalGroup::X, 'X', target.x);
        let y = self.coordinate_word(ModalGroup::Y, 'Y', target.y);
        if x.is_some() || y.is_some() {
            let motion = self.modal.emit_word(ModalGroup::Motion, codes::RAPID);
            self.emitter.emit_block(&[motion, x, y]);
            self.modal.reset_group(ModalGroup::Feed);
        }
        self.position = target;
    }

    fn on_linear(&mut self, target: Point2, feed: f64, lookahead: Lookahead) {
        let feed = self.cutting_feed(feed);
        let x = self.coordinate_word(ModalGroup::X, 'X', target.x);
        let y = self.coordinate_word(ModalGroup::Y, 'Y', target.y);
        self.position = target;
        let stationary = x.is_none() && y.is_none();
        let pending = self.compensation.take_pending();

        if stationary && pending.is_none() {
            // zero-length move: carry a feed change only if nothing else will
            if !lookahead.next_is_motion {
                if let Some(f) = self.feed_word(feed) {
                    let motion = self.modal.emit_word(ModalGroup::Motion, codes::LINEAR);
                    self.emitter.emit_block(&[motion, Some(f)]);
                }
            }
            return;
        }

        let mut words = Vec::with_capacity(7);
        if let Some(side) = pending {
            // every resolved request restates the activation word
            self.modal.force(ModalGroup::Compensation);
            words.push(
                self.modal
                    .emit_word(ModalGroup::Compensation, codes::compensation_code(side)),
            );
            let register = self.section.as_ref().map_or(1, |s| s.tool.kerf_register());
            words.push(Some(format!(
                "D{}",
                self.format.format(f64::from(register), ValueKind::Integer)
            )));
            if stationary {
                self.modal.force(ModalGroup::Motion);
            }
        }
        words.push(self.modal.emit_word(ModalGroup::Motion, codes::LINEAR));
        words.push(x);
        words.push(y);
        words.push(self.feed_word(feed));
        self.emitter.emit_block(&words);
    }

    #[allow(clippy::too_many_arguments)]
    fn on_circular(
        &mut self,
        index: usize,
        clockwise: bool,
        center: Point2,
        end: Point2,
        feed: f64,
        plane: Plane,
        lookahead: Lookahead,
    ) -> PostResult<()> {
        self.ensure_compensation_settled(index, "circular move")?;
        let segment = ArcSegment {
            start: self.position,
            end,
            center,
            clockwise,
            feed: self.cutting_feed(feed),
            plane,
        };
        self.position = end;
        for buffer in self.arcs.push(segment, lookahead.next_is_circular) {
            self.write_arc(&buffer);
        }
        Ok(())
    }

    fn write_arc(&mut self, arc: &CircularMoveBuffer) {
        if arc.plane != Plane::XY {
            tracing::debug!(plane = ?arc.plane, "linearizing arc outside the XY plane");
            for point in self.linearizer.linearize(arc, self.chordal_tolerance) {
                let x = self.coordinate_word(ModalGroup::X, 'X', point.x);
                let y = self.coordinate_word(ModalGroup::Y, 'Y', point.y);
                if x.is_none() && y.is_none() {
                    continue;
                }
                let motion = self.modal.emit_word(ModalGroup::Motion, codes::LINEAR);
                let f = self.feed_word(arc.feed);
                self.emitter.emit_block(&[motion, x, y, f]);
            }
            return;
        }

        let target = if arc.is_full_circle() {
            arc.start
        } else {
            arc.end
        };
        let plane = self
            .modal
            .emit_word(ModalGroup::Plane, codes::plane_code(Plane::XY));
        let code = if arc.clockwise {
            codes::ARC_CW
        } else {
            codes::ARC_CCW
        };
        let motion = self.modal.emit_word(ModalGroup::Motion, code);
        let x = self.coordinate_word(ModalGroup::X, 'X', target.x);
        let y = self.coordinate_word(ModalGroup::Y, 'Y', target.y);
        let offset = arc.center_offset();
        let i = Some(self.format.word('I', offset.x, ValueKind::Coordinate));
        let j = Some(self.format.word('J', offset.y, ValueKind::Coordinate));
        let f = self.feed_word(arc.feed);
        self.emitter.emit_block(&[plane, motion, x, y, i, j, f]);
    }

    fn on_dwell(&mut self, seconds: f64) {
        let clamped = seconds.clamp(DWELL_MIN, DWELL_MAX);
        if clamped != seconds {
            let warning = PostWarning::DwellOutOfRange {
                requested: seconds,
                clamped,
            };
            tracing::warn!(%warning, "dwell clamped");
            self.emitter.comment(&warning.to_string());
            self.warnings.push(warning);
        }
        self.emitter.emit_block(&[
            Some(codes::DWELL.to_string()),
            Some(self.format.word('X', clamped, ValueKind::Time)),
        ]);
    }

    fn on_power(&mut self, on: bool) {
        match self.torch.request(on) {
            TorchTransition::Switched(TorchState::On) => {
                self.emitter.emit_block(&[Some(codes::TORCH_ON.to_string())]);
            }
            TorchTransition::Switched(TorchState::Off) => {
                self.emitter.emit_block(&[Some(codes::TORCH_OFF.to_string())]);
            }
            TorchTransition::Unchanged(state) => {
                let text = match state {
                    TorchState::On => "torch already on",
                    TorchState::Off => "torch already off",
                };
                tracing::debug!(text, "duplicate torch request");
                self.emitter.comment(text);
            }
        }
    }

    fn on_radius_compensation(&mut self, side: CompensationSide) {
        if self.compensation.request(side) {
            let word = self
                .modal
                .emit_word(ModalGroup::Compensation, codes::compensation_code(side));
            self.emitter.emit_block(&[word]);
        }
    }

    fn on_movement(&mut self, kind: MovementKind) {
        if self.config.torch_control != TorchControl::MotionHints {
            return;
        }
        if let Some(on) = TorchPower::hint(kind) {
            self.on_power(on);
        }
    }

    fn on_parameter(&mut self, name: &str, value: &ParameterValue) {
        match name {
            "operation-comment" if self.config.show_notes => {
                self.emitter.comment(&value.to_string());
            }
            "action" => self.emitter.comment(&format!("action {}", value)),
            _ => tracing::debug!(name, %value, "ignored parameter"),
        }
    }

    fn on_command(&mut self, index: usize, kind: &CommandKind) -> PostResult<()> {
        match codes::command_action(kind) {
            CommandAction::Code(code) => {
                self.emitter.emit_block(&[Some(code.to_string())]);
            }
            CommandAction::Torch(on) => self.on_power(on),
            CommandAction::Ignore => tracing::debug!(command = %kind, "command has no effect"),
            CommandAction::Unsupported => {
                return Err(PostError::UnsupportedCommand {
                    event: index,
                    command: kind.to_string(),
                })
            }
        }
        Ok(())
    }
}
