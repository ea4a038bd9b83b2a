//! Addressable memory cells
//!
//! A [`ValueCell`] is one word of simulated memory: a box with a value, an
//! optional label and, once the memory diagram has placed it, an address.
//! Heap words come from `TraceEngine::allocate_word`; the diagram also uses
//! cells to mirror stack variables.
//!
//! Cells live in a [`CellArena`] owned by the engine and are referred to by
//! [`CellId`]. They are never removed from the arena, so an id stays valid
//! for the whole trace even after the cell is cleared.

use super::replace_rendered_value;
use super::value::{Address, Value};
use crate::canvas::{fills, Canvas, ShapeId, ShapeKind, Trigger};
use crate::geometry::Rect;
use crate::trace::constants::CELL_LABEL_WIDTH;
use crate::trace::errors::TraceError;

/// Handle to a cell in the engine's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(pub usize);

/// Which side of the box the label is drawn on; the address goes opposite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Left,
    Right,
}

/// One word of memory
#[derive(Debug, Clone)]
pub struct ValueCell {
    pub address: Option<Address>,
    pub label: Option<String>,
    pub value: Value,
    pub label_side: LabelSide,
    /// Absolute position once drawn
    pub bounds: Option<Rect>,
    outline: Option<ShapeId>,
    value_shape: Option<ShapeId>,
    decorations: Vec<ShapeId>,
    /// Line to the cell this one points at
    pub(crate) connector: Option<ShapeId>,
    cleared: bool,
}

impl ValueCell {
    pub fn new(label: Option<&str>, label_side: LabelSide) -> Self {
        ValueCell {
            address: None,
            label: label.map(str::to_string),
            value: Value::Unset,
            label_side,
            bounds: None,
            outline: None,
            value_shape: None,
            decorations: Vec::new(),
            connector: None,
            cleared: false,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Shape currently showing the value
    pub fn value_shape(&self) -> Option<ShapeId> {
        self.value_shape
    }

    pub fn outline(&self) -> Option<ShapeId> {
        self.outline
    }

    /// Line drawn to the cell this one points at
    pub fn connector(&self) -> Option<ShapeId> {
        self.connector
    }

    /// Place the cell at `bounds` and schedule it to appear
    pub fn draw(&mut self, canvas: &mut dyn Canvas, bounds: Rect, trigger: Trigger) {
        let outline = canvas.add_shape(ShapeKind::Box, None, bounds);
        canvas.set_fill(outline, fills::CELL);
        canvas.appear(outline, trigger);

        let (label_x, address_x) = match self.label_side {
            LabelSide::Left => (bounds.x - CELL_LABEL_WIDTH, bounds.right()),
            LabelSide::Right => (bounds.right(), bounds.x - CELL_LABEL_WIDTH),
        };
        let mut texts = Vec::new();
        if let Some(label) = &self.label {
            texts.push((label.clone(), label_x));
        }
        if let Some(address) = self.address {
            texts.push((format!("0x{:04X}", address), address_x));
        }
        for (text, x) in texts {
            let shape = canvas.add_shape(
                ShapeKind::Text { text },
                None,
                Rect::new(x, bounds.y, CELL_LABEL_WIDTH, bounds.height),
            );
            canvas.appear(shape, Trigger::with_previous());
            self.decorations.push(shape);
        }

        self.outline = Some(outline);
        self.bounds = Some(bounds);
        if self.value.is_set() {
            self.value_shape =
                replace_rendered_value(canvas, None, bounds, None, &self.value);
        }
    }

    /// Store a new value; drawn cells update on the canvas as well. A
    /// cleared cell keeps the value without drawing it.
    pub fn set(&mut self, canvas: &mut dyn Canvas, value: Value) {
        self.value = value;
        if self.cleared {
            return;
        }
        if let Some(bounds) = self.bounds {
            self.value_shape =
                replace_rendered_value(canvas, None, bounds, self.value_shape, &self.value);
        }
    }

    /// Remove the cell from the slide. The first shape uses `trigger`, the
    /// rest go with it. Clearing twice is a no-op.
    pub fn clear(&mut self, canvas: &mut dyn Canvas, trigger: Trigger) {
        if self.cleared {
            return;
        }
        self.cleared = true;
        let shapes: Vec<ShapeId> = self
            .value_shape
            .take()
            .into_iter()
            .chain(self.connector.take())
            .chain(self.outline)
            .chain(self.decorations.drain(..))
            .collect();
        let mut next = Some(trigger);
        for shape in shapes {
            canvas.disappear(shape, next.take().unwrap_or_else(Trigger::with_previous));
        }
    }
}

/// Every cell created during a trace
#[derive(Debug, Clone, Default)]
pub struct CellArena {
    cells: Vec<ValueCell>,
}

impl CellArena {
    pub fn new() -> Self {
        CellArena::default()
    }

    pub fn insert(&mut self, cell: ValueCell) -> CellId {
        self.cells.push(cell);
        CellId(self.cells.len() - 1)
    }

    pub fn get(&self, id: CellId) -> Result<&ValueCell, TraceError> {
        self.cells
            .get(id.0)
            .ok_or(TraceError::UnknownCell { index: id.0 })
    }

    pub fn get_mut(&mut self, id: CellId) -> Result<&mut ValueCell, TraceError> {
        self.cells
            .get_mut(id.0)
            .ok_or(TraceError::UnknownCell { index: id.0 })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, &ValueCell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }
}
