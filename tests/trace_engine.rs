// Integration tests for the trace engine

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

use stackdeck::canvas::{Canvas, ShapeId, ShapeKind, Start, StepAction};
use stackdeck::code::CodeFont;
use stackdeck::geometry::Rect;
use stackdeck::memory::heap::CellId;
use stackdeck::memory::value::{Value, VarType};
use stackdeck::memory::variable::{subscriber, VarId};
use stackdeck::trace::constants::STACK_ADDRESS_START;
use stackdeck::trace::engine::{FrameEvent, TraceEngine};
use stackdeck::trace::errors::TraceError;
use stackdeck::trace::function::FunctionDefinition;

const DOWN: &[&str] = &[
    "void down(int n) {",
    "  if (n > 0) {",
    "    down(n - 1);",
    "  }",
    "}",
];

/// `down(n)` recurses until n is 0, calling `probe` in every frame
fn define_down<F>(engine: &mut TraceEngine, probe: F)
where
    F: Fn(&mut TraceEngine) + 'static,
{
    engine
        .define_function(FunctionDefinition::new("down", DOWN).with_step_through(
            move |engine, args| {
                let n = engine.declare_param("n", VarType::Int, engine.arg(args, 0)?)?;
                engine.end_declarations()?;
                probe(engine);
                let value = engine.value(n)?.expect_int()?;
                if value > 0 {
                    engine.highlight("down(n - 1)")?;
                    engine.call("down", &[Value::Int(value - 1)])?;
                }
                Ok(Value::Unset)
            },
        ))
        .expect("define down");
}

#[test]
fn test_push_and_pop_are_balanced() {
    let mut engine = TraceEngine::new();
    engine.set_heap_stack_region(Rect::new(480.0, 20.0, 280.0, 400.0));
    define_down(&mut engine, |_| {});

    engine.call("down", &[Value::Int(3)]).expect("call failed");

    assert_eq!(engine.stack_depth(), 0);
    let pushes = engine
        .frame_events()
        .iter()
        .filter(|e| matches!(e, FrameEvent::Pushed { .. }))
        .count();
    assert_eq!(pushes, 4);
    assert_eq!(engine.frame_events().len(), 8);

    let viewer = engine.viewer().expect("viewer attached");
    assert_eq!(viewer.stack_pointer(), STACK_ADDRESS_START);
    assert_eq!(viewer.boundary_depth(), 0);
    assert!(viewer.address_table().is_empty());
}

#[test]
fn test_factorial_with_zero_base_case() {
    let mut engine = TraceEngine::new();
    engine
        .define_function(
            FunctionDefinition::new(
                "fact",
                &[
                    "int fact(int n) {",
                    "  if (n == 0) {",
                    "    return 1;",
                    "  }",
                    "  return n * fact(n - 1);",
                    "}",
                ],
            )
            .with_step_through(|engine, args| {
                let n = engine.declare_param("n", VarType::Int, engine.arg(args, 0)?)?;
                engine.end_declarations()?;
                engine.highlight("n == 0")?;
                let value = engine.value(n)?.expect_int()?;
                if value == 0 {
                    engine.highlight_line_of("return 1")?;
                    return Ok(Value::Int(1));
                }
                engine.highlight("fact(n - 1)")?;
                let rest = engine.call("fact", &[Value::Int(value - 1)])?.expect_int()?;
                Ok(Value::Int(value * rest))
            }),
        )
        .expect("define fact");

    assert_eq!(engine.call("fact", &[Value::Int(4)]), Ok(Value::Int(24)));

    let mut pushes = Vec::new();
    let mut pops = Vec::new();
    for event in engine.frame_events() {
        match event {
            FrameEvent::Pushed { depth, .. } => pushes.push(*depth),
            FrameEvent::Popped { depth, .. } => pops.push(*depth),
        }
    }
    assert_eq!(pushes, vec![0, 1, 2, 3, 4]);
    assert_eq!(pops, vec![4, 3, 2, 1, 0]);
    assert_eq!(engine.stack_depth(), 0);
}

#[test]
fn test_second_top_level_call_replaces_the_first() {
    let mut engine = TraceEngine::new();
    engine.set_heap_stack_region(Rect::new(480.0, 20.0, 280.0, 400.0));
    engine
        .define_function(
            FunctionDefinition::new("f", &["void f(int a) {", "}"]).with_step_through(
                |engine, args| {
                    engine.declare_param("a", VarType::Int, engine.arg(args, 0)?)?;
                    engine.end_declarations()?;
                    engine.highlight("f(int a)")?;
                    Ok(Value::Unset)
                },
            ),
        )
        .expect("define f");

    engine.call("f", &[Value::Int(1)]).expect("first call");
    engine.call("f", &[Value::Int(2)]).expect("second call");

    // Both calls used the same slot, but only the second one is drawn
    let first = engine.cell(CellId(0)).expect("first slot");
    let second = engine.cell(CellId(1)).expect("second slot");
    assert_eq!(first.address, Some(0xFFFC));
    assert_eq!(second.address, Some(0xFFFC));
    assert!(first.is_cleared());
    assert!(!second.is_cleared());

    let scene = engine.scene();
    let viewer = engine.viewer().expect("viewer attached");
    assert_eq!(viewer.stack_pointer(), STACK_ADDRESS_START);

    let frames: Vec<ShapeId> = scene
        .shapes()
        .iter()
        .filter(|s| matches!(s.kind, ShapeKind::Frame { .. }))
        .map(|s| s.id)
        .collect();
    assert_eq!(frames.len(), 2);
    assert!(!scene.is_live(frames[0]));
    assert!(scene.is_live(frames[1]));

    let live_values = |text: &str| {
        scene
            .shapes()
            .iter()
            .filter(|s| matches!(&s.kind, ShapeKind::Text { text: t } if t == text))
            .filter(|s| scene.is_live(s.id))
            .count()
    };
    // One text in the frame, one in the diagram slot
    assert_eq!(live_values("1"), 0);
    assert_eq!(live_values("2"), 2);
    let highlights = scene
        .shapes()
        .iter()
        .filter(|s| matches!(s.kind, ShapeKind::Highlight) && scene.is_live(s.id))
        .count();
    assert_eq!(highlights, 1);

    // The old frame leaves on the click that starts the new call
    let exit: Vec<_> = scene.steps_for(frames[0]).collect();
    assert_eq!(
        exit.last().and_then(|s| s.trigger.as_ref()).map(|t| t.start()),
        Some(Start::OnClick)
    );
}

#[test]
fn test_font_and_spacing_overrides() {
    let bounds = Rc::new(RefCell::new(Vec::new()));
    let mut engine = TraceEngine::new();
    engine.set_font(CodeFont::new("Menlo", 14.0, 8.0));
    engine.set_spacing(20.0);

    for def in [
        FunctionDefinition::new("plain", &["void plain(void) {", "  return;", "}"]),
        FunctionDefinition::new("styled", &["void styled(void) {", "  return;", "}"])
            .with_font(CodeFont::new("Courier", 10.0, 6.0))
            .with_spacing(12.0),
    ] {
        let seen = bounds.clone();
        engine
            .define_function(def.with_step_through(move |engine, _| {
                let frame = engine.current_frame().expect("frame");
                let family = frame.code.style().font.family.clone();
                seen.borrow_mut()
                    .push((family, engine.code_bounds(1, 2, 6)?));
                Ok(Value::Unset)
            }))
            .expect("define");
    }
    engine.call("plain", &[]).expect("plain");
    engine.call("styled", &[]).expect("styled");

    assert_eq!(
        *bounds.borrow(),
        vec![
            ("Menlo".to_string(), Rect::new(12.0 + 2.0 * 8.0, 8.0 + 20.0, 4.0 * 8.0, 20.0)),
            ("Courier".to_string(), Rect::new(12.0 + 2.0 * 6.0, 8.0 + 12.0, 4.0 * 6.0, 12.0)),
        ]
    );
}

#[test]
fn test_parameters_are_marked() {
    let mut engine = TraceEngine::new();
    engine
        .define_function(
            FunctionDefinition::new("f", &["int f(int a, int b) {", "  int c;", "}"])
                .with_step_through(|engine, args| {
                    engine.declare_param("a", VarType::Int, engine.arg(args, 0)?)?;
                    engine.declare_param("b", VarType::Int, engine.arg(args, 1)?)?;
                    let c = engine.declare_local("c", VarType::Int)?;
                    engine.end_declarations()?;

                    let frame = engine.current_frame().expect("frame");
                    let params: Vec<_> = frame.parameters().map(|v| v.name.as_str()).collect();
                    assert_eq!(params, vec!["a", "b"]);
                    assert!(!engine.var(c)?.is_parameter);
                    Ok(Value::Unset)
                }),
        )
        .expect("define f");
    engine
        .call("f", &[Value::Int(1), Value::Int(2)])
        .expect("call failed");
}

#[test]
fn test_handle_from_a_popped_frame_is_rejected() {
    let kept: Rc<RefCell<Option<VarId>>> = Rc::new(RefCell::new(None));
    let mut engine = TraceEngine::new();

    let store = kept.clone();
    engine
        .define_function(
            FunctionDefinition::new("first", &["void first(void) {", "  int x;", "}"])
                .with_step_through(move |engine, _| {
                    let x = engine.declare_local("x", VarType::Int)?;
                    engine.set(x, 1)?;
                    *store.borrow_mut() = Some(x);
                    Ok(Value::Unset)
                }),
        )
        .expect("define first");
    let stale = kept.clone();
    engine
        .define_function(
            FunctionDefinition::new("second", &["void second(void) {", "  int y;", "}"])
                .with_step_through(move |engine, _| {
                    engine.declare_local("y", VarType::Int)?;
                    let old = stale.borrow().expect("handle kept");
                    // Same depth and index as `y`, but another frame
                    assert!(matches!(
                        engine.value(old),
                        Err(TraceError::UnknownVariable { .. })
                    ));
                    assert!(matches!(
                        engine.set(old, 5),
                        Err(TraceError::UnknownVariable { .. })
                    ));
                    Ok(Value::Unset)
                }),
        )
        .expect("define second");

    engine.call("first", &[]).expect("first");
    let old = kept.borrow().expect("handle kept");
    assert!(engine.value(old).is_err());
    engine.call("second", &[]).expect("second");
}

#[test]
fn test_frames_are_staggered() {
    let regions = Rc::new(RefCell::new(Vec::new()));
    let mut engine = TraceEngine::new();
    engine.set_stack_frame_region(Rect::new(10.0, 20.0, 400.0, 300.0));
    engine.set_stagger(10.0, 8.0);
    engine.set_max_stack_depth(4);

    let seen = regions.clone();
    define_down(&mut engine, move |engine| {
        let frame = engine.current_frame().expect("frame");
        seen.borrow_mut().push(frame.region);
    });
    engine.call("down", &[Value::Int(5)]).expect("call failed");

    let regions = regions.borrow();
    assert_eq!(regions.len(), 6);
    for pair in regions.windows(2) {
        assert_eq!(pair[1].x - pair[0].x, 10.0);
        assert_eq!(pair[1].y - pair[0].y, 8.0);
        assert_eq!(pair[1].width, pair[0].width);
    }
    assert_eq!(regions[0].width, 370.0);
    assert_eq!(regions[0].height, 276.0);
}

#[test]
fn test_function_frame_height_overrides_engine() {
    let heights = Rc::new(RefCell::new(Vec::new()));
    let mut engine = TraceEngine::new();
    engine.set_frame_height(Some(150.0));

    let seen = heights.clone();
    engine
        .define_function(
            FunctionDefinition::new("tall", &["void tall(void) {", "}"])
                .with_frame_height(220.0)
                .with_step_through(move |engine, _| {
                    seen.borrow_mut()
                        .push(engine.current_frame().expect("frame").region.height);
                    engine.call("short", &[])
                }),
        )
        .expect("define tall");
    let seen = heights.clone();
    engine
        .define_function(
            FunctionDefinition::new("short", &["void short(void) {", "}"]).with_step_through(
                move |engine, _| {
                    seen.borrow_mut()
                        .push(engine.current_frame().expect("frame").region.height);
                    Ok(Value::Unset)
                },
            ),
        )
        .expect("define short");

    engine.call("tall", &[]).expect("call failed");
    assert_eq!(*heights.borrow(), vec![220.0, 150.0]);
}

#[test]
fn test_nested_frames_animate_in_and_out() {
    let mut engine = TraceEngine::new();
    define_down(&mut engine, |_| {});
    engine.call("down", &[Value::Int(1)]).expect("call failed");

    let frames: Vec<ShapeId> = engine
        .scene()
        .shapes()
        .iter()
        .filter(|s| matches!(s.kind, ShapeKind::Frame { .. }))
        .map(|s| s.id)
        .collect();
    assert_eq!(frames.len(), 2);

    // The outermost frame stays on the slide as the closing picture
    assert!(engine.scene().is_live(frames[0]));
    assert!(!engine.scene().is_live(frames[1]));

    let inner: Vec<_> = engine.scene().steps_for(frames[1]).collect();
    assert!(matches!(inner[0].action, StepAction::Appear));
    assert_eq!(
        inner[0].trigger.as_ref().map(|t| t.start()),
        Some(Start::OnClick)
    );
    assert!(matches!(inner[1].action, StepAction::MoveTo(_)));
    assert!(matches!(inner.last().map(|s| &s.action), Some(StepAction::Disappear)));
}

#[test]
fn test_at_most_one_live_value_per_variable() {
    let shapes = Rc::new(RefCell::new(Vec::new()));
    let seen = shapes.clone();

    let mut engine = TraceEngine::new();
    engine
        .define_function(
            FunctionDefinition::new("count", &["void count(void) {", "  int i;", "}"])
                .with_step_through(move |engine, _| {
                    let i = engine.declare_local("i", VarType::Int)?;
                    engine.end_declarations()?;
                    for k in 0..5 {
                        engine.set(i, k)?;
                        let shape = engine.var(i)?.value_shape().expect("value drawn");
                        seen.borrow_mut().push(shape);
                    }
                    Ok(Value::Unset)
                }),
        )
        .expect("define count");
    engine.call("count", &[]).expect("call failed");

    let shapes = shapes.borrow();
    let scene = engine.scene();
    let live: Vec<_> = shapes.iter().filter(|&&s| scene.is_live(s)).collect();
    assert_eq!(live, vec![&shapes[4]]);

    // New value in after the previous animation, old one out with it
    let steps = scene.steps();
    let n = steps.len();
    assert_eq!(steps[n - 2].shape, shapes[4]);
    assert!(matches!(steps[n - 2].action, StepAction::Appear));
    assert_eq!(
        steps[n - 2].trigger.as_ref().map(|t| t.start()),
        Some(Start::AfterPrevious)
    );
    assert_eq!(steps[n - 1].shape, shapes[3]);
    assert!(matches!(steps[n - 1].action, StepAction::Disappear));
    assert_eq!(
        steps[n - 1].trigger.as_ref().map(|t| t.start()),
        Some(Start::WithPrevious)
    );
}

#[test]
fn test_subscribers_see_every_change_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();

    let mut engine = TraceEngine::new();
    engine
        .define_function(
            FunctionDefinition::new("f", &["void f(void) {", "  int x;", "}"]).with_step_through(
                move |engine, _| {
                    let x = engine.declare_local("x", VarType::Int)?;
                    let first = sink.clone();
                    engine.subscribe(
                        x,
                        subscriber(move |change, _| {
                            first
                                .borrow_mut()
                                .push(format!("a {} -> {}", change.previous, change.value));
                        }),
                    )?;
                    let second = sink.clone();
                    engine.subscribe(
                        x,
                        subscriber(move |change, _| {
                            second.borrow_mut().push(format!("b {}", change.value));
                        }),
                    )?;
                    engine.set(x, 1)?;
                    engine.set(x, 2)?;
                    Ok(Value::Unset)
                },
            ),
        )
        .expect("define f");
    engine.call("f", &[]).expect("call failed");

    assert_eq!(
        *log.borrow(),
        vec![
            "a  -> 1".to_string(),
            "b 1".to_string(),
            "a 1 -> 2".to_string(),
            "b 2".to_string(),
        ]
    );
}

#[test]
fn test_stack_slots_mirror_variables() {
    let mut engine = TraceEngine::new();
    engine.set_heap_stack_region(Rect::new(480.0, 20.0, 280.0, 400.0));
    engine
        .define_function(
            FunctionDefinition::new("f", &["void f(int a) {", "  int b;", "}"])
                .with_step_through(|engine, args| {
                    let a = engine.declare_param("a", VarType::Int, engine.arg(args, 0)?)?;
                    let b = engine.declare_local("b", VarType::Int)?;
                    engine.end_declarations()?;
                    engine.set(b, 9)?;

                    let a_cell = engine.var(a)?.linked_cell.expect("a registered");
                    let b_cell = engine.var(b)?.linked_cell.expect("b registered");
                    assert_eq!(engine.cell(a_cell)?.address, Some(0xFFFC));
                    assert_eq!(engine.cell(a_cell)?.value, Value::Int(5));
                    assert_eq!(engine.cell(b_cell)?.address, Some(0xFFF8));
                    assert_eq!(engine.cell(b_cell)?.value, Value::Int(9));
                    Ok(Value::Unset)
                }),
        )
        .expect("define f");
    engine.call("f", &[Value::Int(5)]).expect("call failed");
}

#[test]
fn test_diagram_operations_without_viewer_are_noops() {
    let mut engine = TraceEngine::new();
    let word = engine.allocate_word(Some("data"));
    assert_eq!(engine.cell(word).expect("cell").address, None);
    assert_eq!(engine.address_of(word).expect("cell"), Value::Null);
    engine.set_cell(word, 3).expect("set cell");
    assert!(engine.scene().shapes().is_empty());

    engine
        .define_function(
            FunctionDefinition::new("f", &["void f(void) {", "  int x;", "}"]).with_step_through(
                |engine, _| {
                    let x = engine.declare_local("x", VarType::Int)?;
                    engine.end_declarations()?;
                    engine.register_variable(x)?;
                    assert_eq!(engine.var(x)?.linked_cell, None);
                    Ok(Value::Unset)
                },
            ),
        )
        .expect("define f");
    engine.call("f", &[]).expect("call failed");
}

#[test]
fn test_heap_words_get_consecutive_addresses() {
    let mut engine = TraceEngine::new();
    engine.set_heap_stack_region(Rect::new(480.0, 20.0, 280.0, 400.0));
    let data = engine.allocate_word(Some("data"));
    let link = engine.allocate_word(Some("link"));
    let spare = engine.allocate_word(None);

    assert_eq!(engine.address_of(data).expect("data"), Value::Pointer(0x1000));
    assert_eq!(engine.address_of(link).expect("link"), Value::Pointer(0x1004));
    assert_eq!(engine.address_of(spare).expect("spare"), Value::Pointer(0x1008));
    assert_eq!(engine.cell(link).expect("link").label.as_deref(), Some("link"));

    // Freed words leave the slide
    engine.clear_cell(data).expect("clear");
    let outline = engine.cell(data).expect("data").outline().expect("drawn");
    assert!(!engine.scene().is_live(outline));
}

#[test]
fn test_freed_word_is_not_drawn_again() {
    let mut engine = TraceEngine::new();
    engine.set_heap_stack_region(Rect::new(480.0, 20.0, 280.0, 400.0));
    let word = engine.allocate_word(Some("data"));
    let pointer = engine.allocate_word(Some("link"));
    engine.set_cell(word, 5).expect("set");
    engine.clear_cell(word).expect("clear");
    engine.clear_cell(pointer).expect("clear");

    let shapes_before = engine.scene().shapes().len();
    engine.set_cell(word, 6).expect("set freed");
    let target = engine.address_of(word).expect("address");
    engine.set_cell(pointer, target).expect("set freed pointer");

    let cell = engine.cell(word).expect("word");
    assert_eq!(cell.value, Value::Int(6));
    assert_eq!(cell.value_shape(), None);
    assert_eq!(engine.cell(pointer).expect("pointer").connector(), None);
    assert_eq!(engine.scene().shapes().len(), shapes_before);
}

#[test]
fn test_highlight_covers_pattern() {
    let mut engine = TraceEngine::new();
    engine
        .define_function(
            FunctionDefinition::new("f", &["int f(int n) {", "  return n + 1;", "}"])
                .with_step_through(|engine, _| {
                    assert_eq!(engine.find_code_line("return"), Some(1));
                    assert_eq!(engine.find_code_line("while"), None);
                    engine.highlight("n + 1")?;
                    engine.highlight_line(1)?;
                    let expected = engine.code_bounds(1, 2, 15)?;
                    let frame = engine.current_frame().expect("frame");
                    assert_eq!(frame.code.line_bounds(1)?, expected);
                    Ok(Value::Unset)
                }),
        )
        .expect("define f");
    engine.call("f", &[]).expect("call failed");

    let scene = engine.scene();
    let highlights: Vec<_> = scene
        .shapes()
        .iter()
        .filter(|s| matches!(s.kind, ShapeKind::Highlight))
        .collect();
    assert_eq!(highlights.len(), 2);
    // "n + 1" starts at column 9 of "  return n + 1;"
    assert_eq!(highlights[0].at, Rect::new(12.0 + 9.0 * 7.2, 8.0 + 16.0, 5.0 * 7.2, 16.0));
    // The second highlight replaces the first
    assert!(!scene.is_live(highlights[0].id));
    assert!(scene.is_live(highlights[1].id));
    assert_eq!(
        scene.bounds(highlights[1].id).map(|b| b.width),
        Some(13.0 * 7.2)
    );
}

#[test]
fn test_console_traffic_is_recorded() {
    let mut engine = TraceEngine::new();
    engine.set_console_region(Rect::new(20.0, 420.0, 440.0, 80.0));
    engine.print("Enter n: ");
    let typed = engine.read_line("", "7");
    engine.println("done");

    assert_eq!(typed, "7");
    assert_eq!(engine.console().get_output(), vec!["Enter n: 7", "done"]);
}

#[test]
fn test_undefined_function() {
    let mut engine = TraceEngine::new();
    assert_eq!(
        engine.call("missing", &[]),
        Err(TraceError::UndefinedFunction {
            name: "missing".to_string()
        })
    );
}

#[test]
fn test_definition_without_step_through_is_rejected() {
    let mut engine = TraceEngine::new();
    assert_eq!(
        engine.define_function(FunctionDefinition::new("f", &["void f(void) {}"])),
        Err(TraceError::MissingStepThrough {
            function: "f".to_string()
        })
    );
    assert!(engine.function("f").is_none());
}

#[test]
fn test_argument_that_does_not_fit_is_rejected() {
    let mut engine = TraceEngine::new();
    engine
        .define_function(
            FunctionDefinition::new("f", &["void f(int n) {}"]).with_step_through(
                |engine, args| {
                    engine.declare_param("n", VarType::Int, engine.arg(args, 0)?)?;
                    Ok(Value::Unset)
                },
            ),
        )
        .expect("define f");

    let err = engine.call("f", &[Value::str("four")]).unwrap_err();
    assert_eq!(
        err,
        TraceError::ArgumentBinding {
            function: "f".to_string(),
            variable: "n".to_string(),
            expected: "int".to_string(),
            got: Value::str("four").describe(),
        }
    );
    // The failing frame was still popped
    assert_eq!(engine.stack_depth(), 0);

    let err = engine.call("f", &[]).unwrap_err();
    assert!(matches!(err, TraceError::MissingArgument { index: 0, count: 0, .. }));
}

#[test]
fn test_custom_type_binder() {
    fn bool_binder(literal: &Value) -> Option<Value> {
        match literal.as_int() {
            Some(0) => Some(Value::Custom("false".to_string())),
            Some(1) => Some(Value::Custom("true".to_string())),
            _ => None,
        }
    }

    let mut engine = TraceEngine::new();
    engine
        .define_function(
            FunctionDefinition::new("f", &["void f(bool b) {}"]).with_step_through(
                |engine, args| {
                    let b = engine.declare_param(
                        "b",
                        VarType::custom("bool", bool_binder),
                        engine.arg(args, 0)?,
                    )?;
                    Ok(engine.value(b)?.clone())
                },
            ),
        )
        .expect("define f");

    assert_eq!(
        engine.call("f", &[Value::Int(1)]),
        Ok(Value::Custom("true".to_string()))
    );
    assert!(matches!(
        engine.call("f", &[Value::Int(7)]),
        Err(TraceError::ArgumentBinding { .. })
    ));
}

#[test]
fn test_missing_code_pattern_is_lookup_error() {
    let mut engine = TraceEngine::new();
    engine
        .define_function(
            FunctionDefinition::new("f", &["void f(void) {}"]).with_step_through(|engine, _| {
                engine.highlight("while")?;
                Ok(Value::Unset)
            }),
        )
        .expect("define f");

    let err = engine.call("f", &[]).unwrap_err();
    assert!(err.is_lookup_error());
    assert_eq!(engine.stack_depth(), 0);
}

#[test]
fn test_duplicate_variable() {
    let mut engine = TraceEngine::new();
    engine
        .define_function(
            FunctionDefinition::new("f", &["void f(void) {}"]).with_step_through(|engine, _| {
                engine.declare_local("x", VarType::Int)?;
                engine.declare_local("x", VarType::Str)?;
                Ok(Value::Unset)
            }),
        )
        .expect("define f");

    assert_eq!(
        engine.call("f", &[]),
        Err(TraceError::DuplicateVariable {
            function: "f".to_string(),
            variable: "x".to_string()
        })
    );
}

#[test]
fn test_recursion_limit() {
    let mut engine = TraceEngine::new();
    engine.set_recursion_limit(3);
    engine
        .define_function(
            FunctionDefinition::new("forever", &["void forever(void) {", "  forever();", "}"])
                .with_step_through(|engine, _| engine.call("forever", &[])),
        )
        .expect("define forever");

    assert_eq!(
        engine.call("forever", &[]),
        Err(TraceError::RecursionLimitExceeded {
            function: "forever".to_string(),
            limit: 3
        })
    );
    assert_eq!(engine.stack_depth(), 0);
    assert_eq!(engine.frame_events().len(), 6);
}

#[test]
fn test_step_through_operations_need_a_frame() {
    let mut engine = TraceEngine::new();
    assert!(matches!(
        engine.declare_local("x", VarType::Int),
        Err(TraceError::NoActiveFrame { .. })
    ));
    assert!(matches!(
        engine.highlight("x"),
        Err(TraceError::NoActiveFrame { .. })
    ));
}
