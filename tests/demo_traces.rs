// Integration tests for the bundled demo traces

use pretty_assertions::assert_eq;

use stackdeck::canvas::ShapeKind;
use stackdeck::demos;
use stackdeck::memory::heap::CellId;
use stackdeck::memory::value::Value;
use stackdeck::trace::constants::STACK_ADDRESS_START;
use stackdeck::trace::engine::{FrameEvent, TraceEngine};

fn address(engine: &TraceEngine, index: usize) -> Option<u64> {
    engine.cell(CellId(index)).expect("cell exists").address
}

#[test]
fn test_factorial_frame_history() {
    let engine = demos::factorial().expect("fact demo failed");

    let pushed: Vec<(String, usize)> = engine
        .frame_events()
        .iter()
        .filter_map(|e| match e {
            FrameEvent::Pushed { function, depth } => Some((function.clone(), *depth)),
            _ => None,
        })
        .collect();
    assert_eq!(
        pushed,
        vec![
            ("main".to_string(), 0),
            ("fact".to_string(), 1),
            ("fact".to_string(), 2),
            ("fact".to_string(), 3),
            ("fact".to_string(), 4),
        ]
    );

    let popped: Vec<(usize, Value)> = engine
        .frame_events()
        .iter()
        .filter_map(|e| match e {
            FrameEvent::Popped {
                depth, returned, ..
            } => Some((*depth, returned.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        popped,
        vec![
            (4, Value::Int(1)),
            (3, Value::Int(2)),
            (2, Value::Int(6)),
            (1, Value::Int(24)),
            (0, Value::Int(0)),
        ]
    );

    assert_eq!(engine.console().get_output(), vec!["n? 4", "24"]);
}

#[test]
fn test_factorial_stack_addresses() {
    let engine = demos::factorial().expect("fact demo failed");

    // main's n, then one boundary word before every nested frame's n
    assert_eq!(address(&engine, 0), Some(0xFFFC));
    assert_eq!(address(&engine, 1), Some(0xFFF4));
    assert_eq!(address(&engine, 2), Some(0xFFEC));

    let viewer = engine.viewer().expect("viewer attached");
    assert_eq!(viewer.stack_pointer(), STACK_ADDRESS_START);
    assert_eq!(viewer.boundary_depth(), 0);
}

#[test]
fn test_sum_locals_take_consecutive_slots() {
    let engine = demos::sum_to().expect("sum demo failed");

    assert_eq!(address(&engine, 0), Some(0xFFFC));
    assert_eq!(address(&engine, 1), Some(0xFFF8));
    assert_eq!(address(&engine, 2), Some(0xFFF4));

    let labels: Vec<_> = (0..3)
        .map(|i| engine.cell(CellId(i)).expect("cell").label.clone())
        .collect();
    assert_eq!(
        labels,
        vec![
            Some("n".to_string()),
            Some("result".to_string()),
            Some("i".to_string()),
        ]
    );

    // Slots keep the final values of the outermost frame
    assert_eq!(engine.cell(CellId(1)).expect("result").value, Value::Int(6));
    assert_eq!(engine.cell(CellId(2)).expect("i").value, Value::Int(4));
    assert_eq!(engine.console().get_output(), vec!["sumTo(3) = 6"]);
}

#[test]
fn test_list_heap_words() {
    let engine = demos::linked_list().expect("list demo failed");

    // head's slot first, then the two nodes
    assert_eq!(address(&engine, 0), Some(0xFFFC));
    assert_eq!(address(&engine, 1), Some(0x1000));
    assert_eq!(address(&engine, 2), Some(0x1004));
    assert_eq!(address(&engine, 3), Some(0x1008));
    assert_eq!(address(&engine, 4), Some(0x100C));

    assert_eq!(engine.cell(CellId(0)).expect("head").value, Value::Pointer(0x1000));
    assert_eq!(engine.cell(CellId(1)).expect("data").value, Value::Int(7));
    assert_eq!(engine.cell(CellId(2)).expect("link").value, Value::Pointer(0x1008));
    assert_eq!(engine.cell(CellId(4)).expect("link").value, Value::Null);

    let scene = engine.scene();
    let live_connectors = scene
        .shapes()
        .iter()
        .filter(|s| matches!(s.kind, ShapeKind::Connector { .. }) && scene.is_live(s.id))
        .count();
    assert_eq!(live_connectors, 2);
}

#[test]
fn test_scene_survives_json() {
    let engine = demos::sum_to().expect("sum demo failed");
    let json = serde_json::to_string(engine.scene()).expect("serialize");
    assert!(json.contains("\"on click\""));

    let scene: stackdeck::canvas::Scene = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(scene.clicks(), engine.scene().clicks());
    assert_eq!(scene.steps(), engine.scene().steps());
}
