//! Variables bound into a stack frame
//!
//! A [`Variable`] owns its box inside the frame and the text shape showing
//! its current value. Anything that mirrors the variable elsewhere (the
//! memory diagram, an author's own decoration) subscribes with a callback.
//! Callbacks run synchronously, in subscription order, exactly once per
//! [`Variable::set`], after the new value has been scheduled on the canvas.

use super::heap::{CellArena, CellId};
use super::replace_rendered_value;
use super::value::{Address, Value, VarType};
use crate::canvas::{Canvas, ShapeId, ShapeKind, Trigger};
use crate::geometry::Rect;
use crate::trace::constants::VARIABLE_LABEL_HEIGHT;
use rustc_hash::FxHashMap;

/// Handle to a variable: the frame depth, the frame's generation and the
/// declaration index. A handle outlives its frame only as a dangling id;
/// lookups reject it once another frame sits at the same depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId {
    pub depth: usize,
    pub generation: u64,
    pub index: usize,
}

/// What subscribers are told
#[derive(Debug)]
pub struct VariableChange<'a> {
    pub variable: &'a str,
    pub value: &'a Value,
    pub previous: &'a Value,
}

/// Engine state a subscriber may touch
pub struct ChangeContext<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub cells: &'a mut CellArena,
    /// Diagram address table, when a diagram is attached
    pub address_table: Option<&'a FxHashMap<Address, CellId>>,
}

pub type Subscriber = Box<dyn FnMut(&VariableChange<'_>, &mut ChangeContext<'_>)>;

/// Box a closure as a [`Subscriber`]
pub fn subscriber<F>(callback: F) -> Subscriber
where
    F: FnMut(&VariableChange<'_>, &mut ChangeContext<'_>) + 'static,
{
    Box::new(callback)
}

pub struct Variable {
    pub name: String,
    pub var_type: VarType,
    pub is_parameter: bool,
    /// Box position relative to the owning frame
    pub bounds: Rect,
    /// Mirror on the memory diagram
    pub linked_cell: Option<CellId>,
    value: Value,
    frame_shape: Option<ShapeId>,
    value_shape: Option<ShapeId>,
    subscribers: Vec<Subscriber>,
    registered: bool,
}

impl std::fmt::Debug for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("type", &self.var_type.type_name())
            .field("is_parameter", &self.is_parameter)
            .field("value", &self.value)
            .field("linked_cell", &self.linked_cell)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Variable {
    pub fn new(name: &str, var_type: VarType, is_parameter: bool, bounds: Rect) -> Self {
        Variable {
            name: name.to_string(),
            var_type,
            is_parameter,
            bounds,
            linked_cell: None,
            value: Value::Unset,
            frame_shape: None,
            value_shape: None,
            subscribers: Vec::new(),
            registered: false,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_shape(&self) -> Option<ShapeId> {
        self.value_shape
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub(crate) fn mark_registered(&mut self) {
        self.registered = true;
    }

    /// Add the box and name label to the frame. They are part of the
    /// frame card and show whenever the frame does.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, frame_shape: ShapeId) {
        canvas.add_shape(ShapeKind::Box, Some(frame_shape), self.bounds);
        canvas.add_shape(
            ShapeKind::Text {
                text: self.name.clone(),
            },
            Some(frame_shape),
            Rect::new(
                self.bounds.x,
                self.bounds.y - VARIABLE_LABEL_HEIGHT,
                self.bounds.width,
                VARIABLE_LABEL_HEIGHT,
            ),
        );
        self.frame_shape = Some(frame_shape);
    }

    /// Store and render a new value. Returns the previous one; the caller
    /// is expected to [`notify`](Self::notify) right after.
    pub fn set(&mut self, canvas: &mut dyn Canvas, value: Value) -> Value {
        let previous = std::mem::replace(&mut self.value, value);
        self.value_shape = replace_rendered_value(
            canvas,
            self.frame_shape,
            self.bounds,
            self.value_shape,
            &self.value,
        );
        previous
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Tell every subscriber about the change that `set` just made
    pub fn notify(&mut self, previous: &Value, ctx: &mut ChangeContext<'_>) {
        let change = VariableChange {
            variable: &self.name,
            value: &self.value,
            previous,
        };
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&change, ctx);
        }
    }

    /// Retire the rendered value (first step of popping a frame)
    pub fn clear(&mut self, canvas: &mut dyn Canvas, trigger: Trigger) {
        if let Some(shape) = self.value_shape.take() {
            canvas.disappear(shape, trigger);
        }
    }
}
