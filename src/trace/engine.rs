// Trace engine: call stack, function registry and frame geometry

use super::errors::{Result, TraceError};
use super::function::FunctionDefinition;
use super::layout::LayoutConfig;
use super::viewer::{redraw_connector, HeapStackViewer};
use crate::canvas::{fills, Canvas, Scene, ShapeId, ShapeKind, Trigger};
use crate::code::{CodeBlock, CodeFont, CodeStyle};
use crate::console::Console;
use crate::geometry::Rect;
use crate::memory::heap::{CellArena, CellId, LabelSide, ValueCell};
use crate::memory::stack::{CallStack, StackFrame};
use crate::memory::value::{Value, VarType};
use crate::memory::variable::{ChangeContext, Subscriber, VarId, Variable};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use tracing::{debug, info};

/// Push and pop history, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    Pushed {
        function: String,
        depth: usize,
    },
    Popped {
        function: String,
        depth: usize,
        returned: Value,
    },
}

/// What a finished top-level call left on the slide
#[derive(Debug)]
struct RetiredFrame {
    /// The frame card first, then the values still drawn inside it
    shapes: Vec<ShapeId>,
    /// Diagram slots that mirrored its variables
    cells: Vec<CellId>,
}

/// Builds the visual narrative of one traced execution
pub struct TraceEngine {
    /// Function definitions (name -> definition)
    functions: FxHashMap<String, Rc<FunctionDefinition>>,

    /// Frames of every call still running
    stack: CallStack,

    /// Heap words and diagram slots
    cells: CellArena,

    /// Memory diagram, once a region has been given for it
    viewer: Option<HeapStackViewer>,

    /// Simulated console
    console: Console,

    /// Everything drawn so far
    scene: Scene,

    layout: LayoutConfig,

    /// Push/pop history of the whole trace
    frame_events: Vec<FrameEvent>,
    /// Outermost frame of the last top-level call, until the next one starts
    retired: Option<RetiredFrame>,
}

impl Default for TraceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceEngine {
    pub fn new() -> Self {
        Self::with_layout(LayoutConfig::default())
    }

    pub fn with_layout(layout: LayoutConfig) -> Self {
        TraceEngine {
            functions: FxHashMap::default(),
            stack: CallStack::new(),
            cells: CellArena::new(),
            viewer: None,
            console: Console::new(),
            scene: Scene::new(),
            layout,
            frame_events: Vec::new(),
            retired: None,
        }
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    pub fn set_max_stack_depth(&mut self, depth: usize) {
        self.layout.max_stack_depth = depth.max(1);
    }

    pub fn set_stack_frame_region(&mut self, region: Rect) {
        self.layout.frame_region = region;
    }

    pub fn set_stagger(&mut self, dx: f64, dy: f64) {
        self.layout.stagger_dx = dx;
        self.layout.stagger_dy = dy;
    }

    /// Attach a memory diagram drawn in `region` (heap left, stack right).
    /// Replaces any diagram attached before.
    pub fn set_heap_stack_region(&mut self, region: Rect) {
        self.viewer = Some(HeapStackViewer::split(region));
    }

    pub fn set_frame_height(&mut self, height: Option<f64>) {
        self.layout.frame_height = height;
    }

    pub fn set_font(&mut self, font: CodeFont) {
        self.layout.code_style.font = font;
    }

    pub fn set_spacing(&mut self, spacing: f64) {
        self.layout.code_style.spacing = spacing;
    }

    pub fn set_console_region(&mut self, region: Rect) {
        self.console.set_region(Some(region));
    }

    pub fn set_recursion_limit(&mut self, limit: usize) {
        self.layout.recursion_limit = limit;
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn viewer(&self) -> Option<&HeapStackViewer> {
        self.viewer.as_ref()
    }

    pub fn frames(&self) -> &[StackFrame] {
        self.stack.frames()
    }

    pub fn current_frame(&self) -> Option<&StackFrame> {
        self.stack.current_frame()
    }

    pub fn frame_events(&self) -> &[FrameEvent] {
        &self.frame_events
    }

    /// Number of frames currently pushed
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.get(name).map(|def| &**def)
    }

    // ---------------------------------------------------------------------
    // Functions and calls
    // ---------------------------------------------------------------------

    /// Register `def`, replacing any definition with the same name
    pub fn define_function(&mut self, def: FunctionDefinition) -> Result<()> {
        if def.step_through().is_none() {
            return Err(TraceError::MissingStepThrough { function: def.name });
        }
        info!(function = %def.name, lines = def.source_lines.len(), "function defined");
        self.functions.insert(def.name.clone(), Rc::new(def));
        Ok(())
    }

    /// Run `name`'s step-through in a new frame and return its result.
    ///
    /// The frame is popped again even when the step-through fails, so the
    /// call stack stays balanced while the error propagates.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let def = self
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| TraceError::UndefinedFunction {
                name: name.to_string(),
            })?;
        let step_through = def
            .step_through()
            .cloned()
            .ok_or_else(|| TraceError::MissingStepThrough {
                function: name.to_string(),
            })?;

        let depth = self.stack.depth();
        if depth >= self.layout.recursion_limit {
            return Err(TraceError::RecursionLimitExceeded {
                function: name.to_string(),
                limit: self.layout.recursion_limit,
            });
        }
        if depth == 0 {
            info!(function = name, args = args.len(), "tracing top-level call");
        }

        self.push_frame(&def, depth);
        let outcome = step_through(self, args);
        let returned = outcome.as_ref().cloned().unwrap_or_default();
        self.pop_frame(returned)?;
        outcome
    }

    fn push_frame(&mut self, def: &FunctionDefinition, depth: usize) {
        let region = self.layout.frame_rect(depth, def.frame_height);
        let base = &self.layout.code_style;
        let style = CodeStyle {
            font: def.font.clone().unwrap_or_else(|| base.font.clone()),
            spacing: def.spacing.unwrap_or(base.spacing),
            left_margin: base.left_margin,
            top_margin: base.top_margin,
        };
        let code = CodeBlock::new(&def.name, def.source_lines.clone(), style);

        // The outermost frame is simply there; nested frames slide in
        let animate = depth > 0;
        if !animate {
            self.clear_retired_frame();
        }
        let start = if animate {
            region.offset(self.layout.stagger_dx, self.layout.stagger_dy)
        } else {
            region
        };
        let shape = self.scene.add_shape(
            ShapeKind::Frame {
                function: def.name.clone(),
            },
            None,
            start,
        );
        self.scene.set_fill(shape, fills::FRAME);
        self.scene.add_shape(
            ShapeKind::Code {
                lines: def.source_lines.clone(),
            },
            Some(shape),
            Rect::new(0.0, 0.0, region.width, code.height()),
        );

        if animate {
            self.scene.appear(shape, Trigger::on_click());
            self.scene.move_to(
                shape,
                region.origin(),
                Trigger::with_previous().duration(0.3).decelerate(),
            );
            if let Some(viewer) = self.viewer.as_mut() {
                viewer.push_frame(&mut self.scene);
            }
        }

        self.stack
            .push_frame(StackFrame::new(&def.name, depth, region, code, shape));
        self.frame_events.push(FrameEvent::Pushed {
            function: def.name.clone(),
            depth,
        });
        debug!(function = %def.name, depth, "frame pushed");
    }

    fn pop_frame(&mut self, returned: Value) -> Result<()> {
        let Some(mut frame) = self.stack.pop_frame() else {
            return Ok(());
        };
        let animate = frame.depth > 0;

        if animate {
            // Values go first, then the card itself
            let mut trigger = Some(Trigger::on_click());
            for variable in frame.variables_mut() {
                if variable.value_shape().is_some() {
                    variable.clear(
                        &mut self.scene,
                        trigger.take().unwrap_or_else(Trigger::with_previous),
                    );
                }
            }
            if let Some(highlight) = frame.replace_highlight(None) {
                self.scene.disappear(
                    highlight,
                    trigger.take().unwrap_or_else(Trigger::with_previous),
                );
            }
            let exit = frame
                .region
                .offset(self.layout.stagger_dx, self.layout.stagger_dy)
                .origin();
            self.scene.move_to(
                frame.shape,
                exit,
                trigger
                    .take()
                    .unwrap_or_else(Trigger::after_previous)
                    .duration(0.3)
                    .accelerate(),
            );
            self.scene.disappear(frame.shape, Trigger::with_previous());
        }

        if let Some(viewer) = self.viewer.as_mut() {
            for variable in frame.variables() {
                if let Some(cell) = variable.linked_cell {
                    viewer.release_variable(&mut self.cells, &mut self.scene, cell, animate)?;
                }
            }
            if animate {
                viewer.pop_frame(&mut self.scene);
            }
        }

        if !animate {
            let shapes = std::iter::once(frame.shape)
                .chain(frame.variables().iter().filter_map(Variable::value_shape))
                .chain(frame.highlight())
                .collect();
            let cells = frame
                .variables()
                .iter()
                .filter_map(|v| v.linked_cell)
                .collect();
            self.retired = Some(RetiredFrame { shapes, cells });
        }

        debug!(function = %frame.function_name, depth = frame.depth, returned = %returned, "frame popped");
        self.frame_events.push(FrameEvent::Popped {
            function: frame.function_name,
            depth: frame.depth,
            returned,
        });
        Ok(())
    }

    /// Take down what the previous top-level call left drawn, so a new
    /// outermost frame and its slots never land on top of old ones
    fn clear_retired_frame(&mut self) {
        let Some(retired) = self.retired.take() else {
            return;
        };
        let mut trigger = Some(Trigger::on_click());
        for shape in retired.shapes {
            self.scene.disappear(
                shape,
                trigger.take().unwrap_or_else(Trigger::with_previous),
            );
        }
        for id in retired.cells {
            if let Ok(cell) = self.cells.get_mut(id) {
                cell.clear(&mut self.scene, Trigger::with_previous());
            }
        }
        debug!("previous top-level frame cleared");
    }

    // ---------------------------------------------------------------------
    // Step-through operations on the current frame
    // ---------------------------------------------------------------------

    fn current(&self, operation: &str) -> Result<&StackFrame> {
        self.stack
            .current_frame()
            .ok_or_else(|| TraceError::NoActiveFrame {
                operation: operation.to_string(),
            })
    }

    fn current_mut(&mut self, operation: &str) -> Result<&mut StackFrame> {
        self.stack
            .current_frame_mut()
            .ok_or_else(|| TraceError::NoActiveFrame {
                operation: operation.to_string(),
            })
    }

    /// Argument `index` of the running call
    pub fn arg<'a>(&self, args: &'a [Value], index: usize) -> Result<&'a Value> {
        args.get(index).ok_or_else(|| TraceError::MissingArgument {
            function: self
                .stack
                .current_frame()
                .map(|f| f.function_name.clone())
                .unwrap_or_default(),
            index,
            count: args.len(),
        })
    }

    /// Declare a parameter and bind the literal argument to it
    pub fn declare_param(&mut self, name: &str, var_type: VarType, arg: &Value) -> Result<VarId> {
        let id = self.declare(name, var_type, true)?;
        if arg.is_set() {
            self.set(id, arg.clone())?;
        }
        self.register_if_late(id)?;
        Ok(id)
    }

    /// Declare a local variable with no value yet
    pub fn declare_local(&mut self, name: &str, var_type: VarType) -> Result<VarId> {
        let id = self.declare(name, var_type, false)?;
        self.register_if_late(id)?;
        Ok(id)
    }

    fn declare(&mut self, name: &str, var_type: VarType, is_parameter: bool) -> Result<VarId> {
        let TraceEngine { stack, scene, .. } = self;
        let frame = stack
            .current_frame_mut()
            .ok_or_else(|| TraceError::NoActiveFrame {
                operation: "declare".to_string(),
            })?;
        if frame.index_of(name).is_some() {
            return Err(TraceError::DuplicateVariable {
                function: frame.function_name.clone(),
                variable: name.to_string(),
            });
        }
        let mut variable = Variable::new(name, var_type, is_parameter, frame.next_variable_bounds());
        variable.draw(scene, frame.shape);
        let index = frame.declare(variable)?;
        Ok(VarId {
            depth: frame.depth,
            generation: frame.generation,
            index,
        })
    }

    /// Variables declared after `end_declarations` are registered at once
    fn register_if_late(&mut self, var: VarId) -> Result<()> {
        if self.current("declare")?.declarations_ended() {
            self.register_variable(var)?;
        }
        Ok(())
    }

    /// Mark the end of the current frame's declarations: every variable
    /// declared so far gets its diagram slot, in declaration order
    pub fn end_declarations(&mut self) -> Result<()> {
        let frame = self.current_mut("end_declarations")?;
        frame.end_declarations();
        let (depth, generation) = (frame.depth, frame.generation);
        let count = frame.variables().len();
        for index in 0..count {
            self.register_variable(VarId {
                depth,
                generation,
                index,
            })?;
        }
        Ok(())
    }

    /// Give `var` a stack slot on the diagram and keep the slot in sync.
    /// Without a diagram, or for a variable already registered, nothing
    /// happens.
    pub fn register_variable(&mut self, var: VarId) -> Result<()> {
        let TraceEngine {
            stack,
            cells,
            viewer,
            scene,
            ..
        } = self;
        let Some(viewer) = viewer.as_mut() else {
            return Ok(());
        };
        let variable = lookup_variable_mut(stack, var)?;
        if variable.is_registered() {
            return Ok(());
        }

        let cell = viewer.register_variable(cells, scene, &variable.name, variable.value());
        variable.linked_cell = Some(cell);
        variable.subscribe(HeapStackViewer::mirror(cell));
        variable.mark_registered();
        // A pointer value set before registration still needs its line
        redraw_connector(scene, cells, Some(viewer.address_table()), cell);
        Ok(())
    }

    /// Handle of a variable in the current frame
    pub fn variable(&self, name: &str) -> Result<VarId> {
        let frame = self.current("variable")?;
        frame
            .index_of(name)
            .map(|index| VarId {
                depth: frame.depth,
                generation: frame.generation,
                index,
            })
            .ok_or_else(|| TraceError::UnknownVariable {
                variable: name.to_string(),
            })
    }

    pub fn var(&self, var: VarId) -> Result<&Variable> {
        self.stack
            .live_frame(var.depth, var.generation)
            .and_then(|f| f.variable(var.index))
            .ok_or_else(|| unknown_variable(var))
    }

    pub fn value(&self, var: VarId) -> Result<&Value> {
        self.var(var).map(Variable::value)
    }

    /// Assign a variable. The value must fit the variable's type.
    pub fn set(&mut self, var: VarId, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let TraceEngine {
            stack,
            cells,
            viewer,
            scene,
            ..
        } = self;
        let function = stack
            .live_frame(var.depth, var.generation)
            .map(|f| f.function_name.clone())
            .unwrap_or_default();
        let variable = lookup_variable_mut(stack, var)?;
        let value = variable
            .var_type
            .bind(&value)
            .ok_or_else(|| TraceError::ArgumentBinding {
                function,
                variable: variable.name.clone(),
                expected: variable.var_type.type_name().to_string(),
                got: value.describe(),
            })?;
        tracing::trace!(variable = %variable.name, value = %value, "set");

        let previous = variable.set(scene, value);
        let mut ctx = ChangeContext {
            canvas: scene,
            cells,
            address_table: viewer.as_ref().map(|v| v.address_table()),
        };
        variable.notify(&previous, &mut ctx);
        Ok(())
    }

    /// Add an extra subscriber to a variable
    pub fn subscribe(&mut self, var: VarId, subscriber: Subscriber) -> Result<()> {
        lookup_variable_mut(&mut self.stack, var)?.subscribe(subscriber);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Code lookups and highlighting
    // ---------------------------------------------------------------------

    pub fn find_code_line(&self, pattern: &str) -> Option<usize> {
        self.stack
            .current_frame()
            .and_then(|f| f.code.find_code_line(pattern))
    }

    pub fn code_line(&self, pattern: &str) -> Result<usize> {
        self.current("code_line")?.code.code_line(pattern)
    }

    pub fn code_bounds(&self, line: usize, start: usize, end: usize) -> Result<Rect> {
        self.current("code_bounds")?.code.code_bounds(line, start, end)
    }

    /// Highlight the first occurrence of `pattern` in the current frame
    pub fn highlight(&mut self, pattern: &str) -> Result<()> {
        let bounds = self.current("highlight")?.code.pattern_bounds(pattern)?;
        self.show_highlight(bounds)
    }

    /// Highlight a whole line, surrounding spaces excluded
    pub fn highlight_line(&mut self, line: usize) -> Result<()> {
        let bounds = self.current("highlight_line")?.code.line_bounds(line)?;
        self.show_highlight(bounds)
    }

    /// Highlight the whole line containing `pattern`
    pub fn highlight_line_of(&mut self, pattern: &str) -> Result<()> {
        let line = self.code_line(pattern)?;
        self.highlight_line(line)
    }

    fn show_highlight(&mut self, bounds: Rect) -> Result<()> {
        let TraceEngine { stack, scene, .. } = self;
        let frame = stack
            .current_frame_mut()
            .ok_or_else(|| TraceError::NoActiveFrame {
                operation: "highlight".to_string(),
            })?;
        let shape = scene.add_shape(ShapeKind::Highlight, Some(frame.shape), bounds);
        scene.set_fill(shape, fills::HIGHLIGHT);
        scene.appear(shape, Trigger::on_click());
        if let Some(old) = frame.replace_highlight(Some(shape)) {
            scene.disappear(old, Trigger::with_previous());
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Heap
    // ---------------------------------------------------------------------

    /// Allocate one heap word. With a diagram it gets the next heap address
    /// and is drawn; otherwise it only exists in the model.
    pub fn allocate_word(&mut self, label: Option<&str>) -> CellId {
        let id = self.cells.insert(ValueCell::new(label, LabelSide::Right));
        if let Some(viewer) = self.viewer.as_mut() {
            if let Ok(cell) = self.cells.get_mut(id) {
                viewer.place_heap_word(id, cell, &mut self.scene);
            }
        }
        id
    }

    pub fn cell(&self, id: CellId) -> Result<&ValueCell> {
        self.cells.get(id)
    }

    pub fn set_cell(&mut self, id: CellId, value: impl Into<Value>) -> Result<()> {
        self.cells.get_mut(id)?.set(&mut self.scene, value.into());
        let table = self.viewer.as_ref().map(|v| v.address_table());
        redraw_connector(&mut self.scene, &mut self.cells, table, id);
        Ok(())
    }

    /// Take a heap word off the slide (an explicit free)
    pub fn clear_cell(&mut self, id: CellId) -> Result<()> {
        self.cells
            .get_mut(id)?
            .clear(&mut self.scene, Trigger::on_click());
        Ok(())
    }

    /// Address of a drawn cell, as a pointer value
    pub fn address_of(&self, id: CellId) -> Result<Value> {
        Ok(self
            .cells
            .get(id)?
            .address
            .map(Value::Pointer)
            .unwrap_or(Value::Null))
    }

    // ---------------------------------------------------------------------
    // Console
    // ---------------------------------------------------------------------

    pub fn print(&mut self, text: &str) {
        self.console.print(&mut self.scene, text);
    }

    pub fn println(&mut self, text: &str) {
        self.console.println(&mut self.scene, text);
    }

    pub fn read_line(&mut self, prompt: &str, input: &str) -> String {
        self.console.read_line(&mut self.scene, prompt, input)
    }
}

fn unknown_variable(var: VarId) -> TraceError {
    TraceError::UnknownVariable {
        variable: format!("#{} in frame {}", var.index, var.depth),
    }
}

fn lookup_variable_mut(stack: &mut CallStack, var: VarId) -> Result<&mut Variable> {
    stack
        .live_frame_mut(var.depth, var.generation)
        .and_then(|f| f.variable_mut(var.index))
        .ok_or_else(|| unknown_variable(var))
}
