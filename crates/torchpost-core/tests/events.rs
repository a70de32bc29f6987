use torchpost_core::{
    parse_events, CommandKind, CompensationSide, JetMode, ParameterValue, Plane, Point2,
    ToolType, ToolpathEvent,
};

#[test]
fn test_parse_job_stream() {
    let json = r#"[
        {"type": "section_start", "tool": {"number": 3, "description": "45A fine cut"},
         "work_offset": 1, "initial_position": {"x": 1.0, "y": 2.0},
         "properties": {"small_hole": true}},
        {"type": "rapid_move", "x": 1.0, "y": 2.0},
        {"type": "radius_compensation", "side": "left"},
        {"type": "linear_move", "x": 3.0, "y": 2.0, "feed": 120.0},
        {"type": "circular_move", "clockwise": true, "center": {"x": 3.0, "y": 3.0},
         "end": {"x": 3.0, "y": 4.0}, "feed": 120.0},
        {"type": "parameter_change", "name": "operation-comment", "value": "outer profile"},
        {"type": "command", "kind": "optional_stop"},
        {"type": "command", "kind": {"other": "tool_break_check"}},
        {"type": "section_end"}
    ]"#;

    let events = parse_events(json).unwrap();
    assert_eq!(events.len(), 9);

    match &events[0] {
        ToolpathEvent::SectionStart(section) => {
            assert_eq!(section.tool.number, 3);
            assert_eq!(section.tool.tool_type, ToolType::Plasma);
            assert_eq!(section.tool.kerf_register(), 3);
            assert_eq!(section.jet_mode, JetMode::Through);
            assert_eq!(section.work_offset, 1);
            assert_eq!(section.initial_position, Some(Point2::new(1.0, 2.0)));
            assert!(section.properties.small_hole);
            assert!(!section.properties.force_tool_change);
        }
        other => panic!("unexpected event {:?}", other),
    }

    assert_eq!(
        events[2],
        ToolpathEvent::RadiusCompensation {
            side: CompensationSide::Left
        }
    );

    match &events[4] {
        ToolpathEvent::CircularMove { plane, clockwise, .. } => {
            assert_eq!(*plane, Plane::XY);
            assert!(*clockwise);
        }
        other => panic!("unexpected event {:?}", other),
    }

    assert_eq!(
        events[5],
        ToolpathEvent::ParameterChange {
            name: "operation-comment".into(),
            value: ParameterValue::Text("outer profile".into()),
        }
    );
    assert_eq!(
        events[7],
        ToolpathEvent::Command {
            kind: CommandKind::Other("tool_break_check".into())
        }
    );
    assert_eq!(events[8], ToolpathEvent::SectionEnd);
}

#[test]
fn test_rejects_non_finite_values() {
    // overflowing literals never reach the emitter
    let json = r#"[{"type": "linear_move", "x": 1e400, "y": 0.0, "feed": 10.0}]"#;
    assert!(parse_events(json).is_err());
}

#[test]
fn test_rejects_unknown_event_type() {
    let json = r#"[{"type": "teleport", "x": 1.0}]"#;
    let err = parse_events(json).unwrap_err();
    assert!(matches!(err, torchpost_core::Error::Json(_)));
}
