//! End-to-end behaviour of a drawing session over the in-memory engine.

use easel_core::shapes::Geometry;
use easel_core::{
    DrawingSession, KeyEvent, MemoryScene, MouseButton, RawPointer, SceneEngine, SessionConfig, Shape,
    Tool,
};

fn session() -> DrawingSession<MemoryScene> {
    DrawingSession::with_engine(&SessionConfig::default(), MemoryScene::new()).unwrap()
}

fn drag(session: &mut DrawingSession<MemoryScene>, from: (f64, f64), to: (f64, f64)) {
    session.handle_pointer_down(&RawPointer::at(from.0, from.1)).unwrap();
    session
        .handle_pointer_move(&RawPointer::at((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0))
        .unwrap();
    session.handle_pointer_up(&RawPointer::at(to.0, to.1)).unwrap();
}

fn scene(session: &DrawingSession<MemoryScene>) -> &MemoryScene {
    session.engine().unwrap()
}

fn committed_shapes(session: &DrawingSession<MemoryScene>) -> Vec<Shape> {
    scene(session).shapes_ordered().cloned().collect()
}

#[test]
fn test_rectangle_drag_geometry() {
    let mut session = session();
    session.set_tool(Tool::Rectangle);
    drag(&mut session, (10.0, 10.0), (110.0, 60.0));

    let shapes = committed_shapes(&session);
    assert_eq!(shapes.len(), 1);
    match &shapes[0].geometry {
        Geometry::Rectangle(rect) => {
            assert_eq!((rect.position.x, rect.position.y), (10.0, 10.0));
            assert!((rect.width - 100.0).abs() < f64::EPSILON);
            assert!((rect.height - 50.0).abs() < f64::EPSILON);
        }
        other => panic!("expected a rectangle, got {other:?}"),
    }
    assert_eq!(scene(&session).preview_count(), 0);
}

#[test]
fn test_two_undos_return_to_first_commit() {
    let mut session = session();
    session.set_tool(Tool::Line);
    drag(&mut session, (0.0, 0.0), (20.0, 20.0));
    let after_first = scene(&session).serialize_scene().unwrap();
    drag(&mut session, (30.0, 0.0), (50.0, 20.0));
    drag(&mut session, (60.0, 0.0), (80.0, 20.0));
    assert_eq!(scene(&session).len(), 3);

    assert!(session.undo().unwrap());
    assert!(session.undo().unwrap());
    assert_eq!(scene(&session).serialize_scene().unwrap(), after_first);
    assert_eq!(session.history().cursor(), Some(1));
}

#[test]
fn test_history_boundaries_are_noops() {
    let mut session = session();
    assert!(!session.undo().unwrap());
    assert!(!session.redo().unwrap());

    session.set_tool(Tool::Circle);
    drag(&mut session, (0.0, 0.0), (40.0, 40.0));
    assert!(!session.redo().unwrap());
    assert_eq!(session.history().cursor(), Some(1));
    assert_eq!(scene(&session).len(), 1);
}

#[test]
fn test_clear_records_one_empty_snapshot() {
    let mut session = session();
    session.set_tool(Tool::Triangle);
    drag(&mut session, (0.0, 0.0), (40.0, 40.0));
    drag(&mut session, (50.0, 0.0), (90.0, 40.0));
    let before = session.history().len();

    assert!(session.clear().unwrap());
    assert_eq!(session.history().len(), before + 1);
    assert!(scene(&session).objects().is_empty());

    // Replaying the clear entry yields an empty scene
    session.undo().unwrap();
    assert_eq!(scene(&session).len(), 2);
    session.redo().unwrap();
    assert!(scene(&session).objects().is_empty());
}

#[test]
fn test_cancelled_gestures_leave_no_trace() {
    for &tool in &[Tool::Line, Tool::Rectangle, Tool::Circle, Tool::Triangle, Tool::Brush, Tool::Eraser] {
        let mut session = session();
        session.set_tool(Tool::Rectangle);
        drag(&mut session, (0.0, 0.0), (30.0, 30.0));
        let committed = committed_shapes(&session);
        let entries = session.history().len();

        session.set_tool(tool);
        session.handle_pointer_down(&RawPointer::at(100.0, 100.0)).unwrap();
        session.handle_pointer_move(&RawPointer::at(140.0, 130.0)).unwrap();
        assert!(session.set_tool(Tool::Select), "{tool:?} gesture was not cancelled");

        assert_eq!(committed_shapes(&session), committed, "{tool:?}");
        assert_eq!(session.history().len(), entries, "{tool:?}");
        assert_eq!(scene(&session).preview_count(), 0, "{tool:?}");
        assert!(!scene(&session).is_stroking(), "{tool:?}");
    }
}

fn clear_mid_gesture(tool: Tool) -> DrawingSession<MemoryScene> {
    let mut session = session();
    session.set_tool(Tool::Line);
    drag(&mut session, (0.0, 0.0), (40.0, 0.0));

    session.set_tool(tool);
    session.handle_pointer_down(&RawPointer::at(100.0, 100.0)).unwrap();
    session.handle_pointer_move(&RawPointer::at(140.0, 130.0)).unwrap();
    assert!(session.clear().unwrap());
    let entries = session.history().len();

    assert!(!session.handle_pointer_up(&RawPointer::at(160.0, 150.0)).unwrap());
    assert_eq!(session.history().len(), entries, "{tool:?}");
    assert!(scene(&session).objects().is_empty(), "{tool:?}");
    assert_eq!(scene(&session).preview_count(), 0, "{tool:?}");
    assert!(!scene(&session).is_stroking(), "{tool:?}");
    session
}

#[test]
fn test_clear_during_drag_discards_gesture() {
    let session = clear_mid_gesture(Tool::Rectangle);
    assert!(session.tools().preview().is_none());
    assert!(!session.tools().is_active());
}

#[test]
fn test_clear_during_stroke_discards_gesture() {
    for tool in [Tool::Brush, Tool::Eraser] {
        let session = clear_mid_gesture(tool);
        assert!(!session.tools().is_active(), "{tool:?}");
    }
}

#[test]
fn test_secondary_button_drag_records_nothing() {
    let mut session = session();
    session.set_tool(Tool::Rectangle);
    let right = |x, y| RawPointer {
        button: MouseButton::Right,
        ..RawPointer::at(x, y)
    };
    assert!(!session.handle_pointer_down(&right(0.0, 0.0)).unwrap());
    session.handle_pointer_move(&right(30.0, 20.0)).unwrap();
    assert!(!session.handle_pointer_up(&right(60.0, 40.0)).unwrap());

    assert!(scene(&session).objects().is_empty());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_preview_removed_by_host_is_not_committed() {
    let mut session = session();
    session.set_tool(Tool::Rectangle);
    session.handle_pointer_down(&RawPointer::at(0.0, 0.0)).unwrap();
    session.handle_pointer_move(&RawPointer::at(60.0, 40.0)).unwrap();
    session.engine_mut().unwrap().clear_scene();

    assert!(session.handle_pointer_up(&RawPointer::at(60.0, 40.0)).unwrap());
    assert!(scene(&session).objects().is_empty());
    assert_eq!(session.history().len(), 1);
    assert!(!session.tools().is_active());
}

#[test]
fn test_pointer_cancel_and_escape() {
    let mut session = session();
    session.set_tool(Tool::Rectangle);
    session.handle_pointer_down(&RawPointer::at(0.0, 0.0)).unwrap();
    session.handle_pointer_move(&RawPointer::at(30.0, 30.0)).unwrap();
    assert!(session.handle_pointer_cancel().unwrap());
    assert!(scene(&session).objects().is_empty());
    assert!(!session.handle_pointer_cancel().unwrap());

    session.handle_pointer_down(&RawPointer::at(0.0, 0.0)).unwrap();
    session.handle_pointer_move(&RawPointer::at(30.0, 30.0)).unwrap();
    assert!(session.handle_key_down(&KeyEvent::plain("Escape")).unwrap());
    assert!(scene(&session).objects().is_empty());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_one_entry_per_gesture() {
    let mut session = session();
    let cases = [
        (Tool::Line, 2),
        (Tool::Rectangle, 3),
        (Tool::Circle, 4),
        (Tool::Triangle, 5),
        (Tool::Brush, 6),
        (Tool::Eraser, 7),
        (Tool::Text, 8),
    ];
    for (tool, expected) in cases {
        session.set_tool(tool);
        session.handle_pointer_down(&RawPointer::at(0.0, 0.0)).unwrap();
        for step in 1..=5 {
            let d = f64::from(step) * 8.0;
            session.handle_pointer_move(&RawPointer::at(d, d)).unwrap();
        }
        session.handle_pointer_up(&RawPointer::at(40.0, 40.0)).unwrap();
        assert_eq!(session.history().len(), expected, "{tool:?}");
        assert_eq!(session.history().cursor(), Some(expected - 1), "{tool:?}");
    }
}

#[test]
fn test_undo_redo_restores_at_any_depth() {
    let mut session = session();
    session.set_tool(Tool::Rectangle);
    for i in 0..4 {
        let x = f64::from(i) * 50.0;
        drag(&mut session, (x, 0.0), (x + 40.0, 40.0));
    }
    for depth in 1..=3 {
        for _ in 0..depth {
            session.undo().unwrap();
        }
        let before = committed_shapes(&session);
        session.undo().unwrap();
        session.redo().unwrap();
        assert_eq!(committed_shapes(&session), before, "depth {depth}");
        for _ in 0..depth {
            session.redo().unwrap();
        }
    }
    assert_eq!(scene(&session).len(), 4);
}

#[test]
fn test_commit_after_undo_drops_redo() {
    let mut session = session();
    session.set_tool(Tool::Line);
    drag(&mut session, (0.0, 0.0), (20.0, 0.0));
    drag(&mut session, (0.0, 10.0), (20.0, 10.0));
    session.undo().unwrap();
    assert!(session.can_redo());

    drag(&mut session, (0.0, 20.0), (20.0, 20.0));
    assert!(!session.can_redo());
    assert_eq!(session.history().len(), 3);
}

#[test]
fn test_snapshot_roundtrip_excludes_previews() {
    let mut session = session();
    session.set_tool(Tool::Brush);
    drag(&mut session, (0.0, 0.0), (30.0, 10.0));
    session.set_tool(Tool::Text);
    drag(&mut session, (5.0, 50.0), (5.0, 50.0));
    session.set_tool(Tool::Circle);
    drag(&mut session, (60.0, 60.0), (120.0, 140.0));

    // Leave a preview on screen while serializing
    session.handle_pointer_down(&RawPointer::at(0.0, 0.0)).unwrap();
    session.handle_pointer_move(&RawPointer::at(25.0, 25.0)).unwrap();
    assert_eq!(scene(&session).preview_count(), 1);

    let snapshot = scene(&session).serialize_scene().unwrap();
    let mut restored = MemoryScene::new();
    restored.deserialize_scene(&snapshot).unwrap();

    assert_eq!(restored.preview_count(), 0);
    assert_eq!(restored.objects().len(), 3);
    let restored: Vec<Shape> = restored.shapes_ordered().cloned().collect();
    assert_eq!(restored, committed_shapes(&session));
}

#[test]
fn test_keyboard_shortcuts() {
    let mut session = session();
    assert!(session.handle_key_down(&KeyEvent::plain("r")).unwrap());
    assert_eq!(session.tool(), Tool::Rectangle);
    drag(&mut session, (0.0, 0.0), (40.0, 40.0));

    assert!(session.handle_key_down(&KeyEvent::ctrl("z")).unwrap());
    assert!(scene(&session).is_empty());
    assert!(session.handle_key_down(&KeyEvent::ctrl_shift("z")).unwrap());
    assert_eq!(scene(&session).len(), 1);

    assert!(session.handle_key_down(&KeyEvent::plain("v")).unwrap());
    session.handle_pointer_down(&RawPointer::at(0.0, 20.0)).unwrap();
    session.handle_pointer_up(&RawPointer::at(0.0, 20.0)).unwrap();
    assert!(session.handle_key_down(&KeyEvent::plain("Delete")).unwrap());
    assert!(scene(&session).is_empty());

    assert!(!session.handle_key_down(&KeyEvent::plain("q")).unwrap());
}

#[test]
fn test_text_uses_configured_placeholder() {
    let config = SessionConfig {
        text_placeholder: "Note".to_string(),
        ..SessionConfig::default()
    };
    let mut session = DrawingSession::with_engine(&config, MemoryScene::new()).unwrap();
    session.set_tool(Tool::Text);
    assert!(session.handle_pointer_down(&RawPointer::at(7.0, 9.0)).unwrap());
    assert_eq!(session.history().len(), 2);
    session.handle_pointer_up(&RawPointer::at(7.0, 9.0)).unwrap();
    assert_eq!(session.history().len(), 2);

    match &committed_shapes(&session)[0].geometry {
        Geometry::Text(text) => assert_eq!(text.content, "Note"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_pan_moves_canvas_mapping() {
    let mut session = session();
    session.set_tool(Tool::Pan);
    drag(&mut session, (100.0, 100.0), (150.0, 100.0));
    assert!(scene(&session).is_empty());
    assert_eq!(session.history().len(), 1);

    // A press at the same screen spot now lands elsewhere on the canvas
    let mapped = scene(&session).get_pointer(&RawPointer::at(100.0, 100.0));
    assert!((mapped.x - 50.0).abs() < 1e-9);
    assert!((mapped.y - 100.0).abs() < 1e-9);
}
