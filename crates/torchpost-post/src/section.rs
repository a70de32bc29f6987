//! Section transitions: tool calls and work offset changes.

use crate::codes;
use crate::error::{PostError, PostResult};
use torchpost_core::{JetMode, Section, ToolType};

/// What the start of a section requires from the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPlan {
    /// Zero-based section index
    pub index: usize,
    /// A tool call (setup blocks, fresh motion mode, positioning) is needed
    pub insert_tool_call: bool,
    /// Select code for the section's work offset
    pub work_offset_code: &'static str,
}

#[derive(Debug, Default)]
pub struct SectionTransitionHandler {
    previous_tool: Option<u32>,
    initial_work_offset: Option<u32>,
    sections_started: usize,
    in_section: bool,
}

impl SectionTransitionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, section: &Section) -> PostResult<SectionPlan> {
        let index = self.sections_started;
        let insert_tool_call = self.previous_tool.is_none()
            || section.properties.force_tool_change
            || self.previous_tool != Some(section.tool.number);

        if insert_tool_call && section.tool.tool_type != ToolType::Plasma {
            return Err(PostError::UnsupportedToolType {
                section: index,
                tool: section.tool.number,
                tool_type: section.tool.tool_type,
            });
        }
        if section.jet_mode != JetMode::Through {
            return Err(PostError::UnsupportedCutMode {
                section: index,
                mode: section.jet_mode,
            });
        }

        let offset = section.work_offset;
        match self.initial_work_offset {
            None => self.initial_work_offset = Some(offset),
            Some(0) if offset != 0 => {
                return Err(PostError::MixedWorkOffsetScheme {
                    section: index,
                    offset,
                })
            }
            Some(_) => {}
        }
        let work_offset_code = codes::work_offset_code(offset).ok_or(
            PostError::UnsupportedWorkOffset {
                section: index,
                offset,
            },
        )?;

        self.previous_tool = Some(section.tool.number);
        self.sections_started += 1;
        self.in_section = true;

        Ok(SectionPlan {
            index,
            insert_tool_call,
            work_offset_code,
        })
    }

    pub fn end(&mut self) {
        self.in_section = false;
    }

    pub fn in_section(&self) -> bool {
        self.in_section
    }

    pub fn sections_started(&self) -> usize {
        self.sections_started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torchpost_core::Tool;

    fn section(tool: u32) -> Section {
        Section::new(Tool::plasma(tool))
    }

    #[test]
    fn test_first_section_calls_tool() {
        let mut handler = SectionTransitionHandler::new();
        let plan = handler.begin(&section(1)).unwrap();
        assert!(plan.insert_tool_call);
        assert_eq!(plan.index, 0);
        assert_eq!(plan.work_offset_code, "G54");
        assert!(handler.in_section());
        handler.end();
        assert!(!handler.in_section());
    }

    #[test]
    fn test_same_tool_skips_call() {
        let mut handler = SectionTransitionHandler::new();
        handler.begin(&section(1)).unwrap();
        handler.end();
        assert!(!handler.begin(&section(1)).unwrap().insert_tool_call);
        handler.end();
        assert!(handler.begin(&section(2)).unwrap().insert_tool_call);
    }

    #[test]
    fn test_forced_tool_change() {
        let mut handler = SectionTransitionHandler::new();
        handler.begin(&section(1)).unwrap();
        let mut forced = section(1);
        forced.properties.force_tool_change = true;
        assert!(handler.begin(&forced).unwrap().insert_tool_call);
    }

    #[test]
    fn test_rejects_non_plasma_tool() {
        let mut handler = SectionTransitionHandler::new();
        let mut s = section(4);
        s.tool.tool_type = ToolType::Waterjet;
        let err = handler.begin(&s).unwrap_err();
        assert_eq!(
            err,
            PostError::UnsupportedToolType {
                section: 0,
                tool: 4,
                tool_type: ToolType::Waterjet
            }
        );
    }

    #[test]
    fn test_rejects_etching() {
        let mut handler = SectionTransitionHandler::new();
        handler.begin(&section(1)).unwrap();
        let err = handler
            .begin(&section(1).with_jet_mode(JetMode::Etching))
            .unwrap_err();
        assert!(matches!(err, PostError::UnsupportedCutMode { section: 1, .. }));
    }

    #[test]
    fn test_mixed_work_offsets() {
        let mut handler = SectionTransitionHandler::new();
        handler.begin(&section(1)).unwrap();
        handler.end();
        let err = handler
            .begin(&section(1).with_work_offset(2))
            .unwrap_err();
        assert_eq!(
            err,
            PostError::MixedWorkOffsetScheme {
                section: 1,
                offset: 2
            }
        );
    }

    #[test]
    fn test_non_zero_offsets_may_change() {
        let mut handler = SectionTransitionHandler::new();
        handler.begin(&section(1).with_work_offset(1)).unwrap();
        let plan = handler.begin(&section(1).with_work_offset(3)).unwrap();
        assert_eq!(plan.work_offset_code, "G56");
    }

    #[test]
    fn test_out_of_range_offset() {
        let mut handler = SectionTransitionHandler::new();
        let err = handler.begin(&section(1).with_work_offset(9)).unwrap_err();
        assert!(matches!(err, PostError::UnsupportedWorkOffset { offset: 9, .. }));
    }
}
