//! Memory diagram: heap and stack columns with simulated addresses
//!
//! The diagram splits one flat address space by convention:
//!
//! ```text
//!   heap column                 stack column
//!   0x1000 ┌──────┐ top         ┌──────┐
//!   0x1004 ├──────┤  │          │      │   ▲
//!   0x1008 ├──────┤  ▼          ├──────┤   │  0xFFF4
//!          │      │             ├──────┤      0xFFF8
//!          └──────┘             └──────┘ bottom  0xFFFC
//! ```
//!
//! Heap words get increasing addresses from [`HEAP_ADDRESS_START`] and are
//! drawn downward from the heap column's top margin. Stack slots get
//! decreasing addresses from [`STACK_ADDRESS_START`] and are drawn upward
//! from the stack column's bottom margin. Every nested frame adds a thin
//! boundary marker between its slots and its caller's; markers sit on their
//! own LIFO side stack, separate from the call stack.

use super::constants::{
    BOUNDARY_HEIGHT, CELL_HEIGHT, CELL_LABEL_WIDTH, CELL_WIDTH, DIAGRAM_BOTTOM_MARGIN,
    DIAGRAM_TOP_MARGIN, HEAP_ADDRESS_START, STACK_ADDRESS_START, WORD_SIZE,
};
use super::errors::Result;
use crate::canvas::{fills, Canvas, ShapeId, ShapeKind, Trigger};
use crate::geometry::{Point, Rect};
use crate::memory::heap::{CellArena, CellId, LabelSide, ValueCell};
use crate::memory::value::{Address, Value};
use crate::memory::variable::{subscriber, Subscriber};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct HeapStackViewer {
    heap_pointer: Address,
    stack_pointer: Address,
    heap_region: Rect,
    stack_region: Rect,
    address_table: FxHashMap<Address, CellId>,
    /// Boundary marker shapes, innermost last
    boundaries: Vec<ShapeId>,
    /// Top edge of the next heap word
    heap_next_y: f64,
    /// Bottom edge of the next stack slot
    stack_next_y: f64,
}

impl HeapStackViewer {
    pub fn new(heap_region: Rect, stack_region: Rect) -> Self {
        HeapStackViewer {
            heap_pointer: HEAP_ADDRESS_START,
            stack_pointer: STACK_ADDRESS_START,
            heap_region,
            stack_region,
            address_table: FxHashMap::default(),
            boundaries: Vec::new(),
            heap_next_y: heap_region.y + DIAGRAM_TOP_MARGIN,
            stack_next_y: stack_region.bottom() - DIAGRAM_BOTTOM_MARGIN,
        }
    }

    /// Split one region into a heap column (left) and a stack column (right)
    pub fn split(region: Rect) -> Self {
        let half = region.width / 2.0;
        HeapStackViewer::new(
            region.with_size(half, region.height),
            region.offset(half, 0.0).with_size(half, region.height),
        )
    }

    pub fn heap_pointer(&self) -> Address {
        self.heap_pointer
    }

    pub fn stack_pointer(&self) -> Address {
        self.stack_pointer
    }

    pub fn heap_region(&self) -> Rect {
        self.heap_region
    }

    pub fn stack_region(&self) -> Rect {
        self.stack_region
    }

    pub fn address_table(&self) -> &FxHashMap<Address, CellId> {
        &self.address_table
    }

    pub fn lookup(&self, address: Address) -> Option<CellId> {
        self.address_table.get(&address).copied()
    }

    /// Boundary markers currently pushed
    pub fn boundary_depth(&self) -> usize {
        self.boundaries.len()
    }

    /// Give a fresh cell the next heap address and draw it
    pub fn place_heap_word(&mut self, cell_id: CellId, cell: &mut ValueCell, canvas: &mut dyn Canvas) {
        let address = self.heap_pointer;
        self.heap_pointer += WORD_SIZE;

        let bounds = Rect::new(
            self.heap_region.x + CELL_LABEL_WIDTH,
            self.heap_next_y,
            CELL_WIDTH,
            CELL_HEIGHT,
        );
        self.heap_next_y += CELL_HEIGHT;

        cell.address = Some(address);
        cell.draw(canvas, bounds, Trigger::after_previous());
        self.address_table.insert(address, cell_id);
        debug!("heap word 0x{:04X} allocated", address);
    }

    /// Take one stack slot for a variable and draw its mirror cell
    pub fn register_variable(
        &mut self,
        cells: &mut CellArena,
        canvas: &mut dyn Canvas,
        name: &str,
        value: &Value,
    ) -> CellId {
        self.stack_pointer -= WORD_SIZE;
        let address = self.stack_pointer;

        let bounds = Rect::new(
            self.stack_region.x + CELL_LABEL_WIDTH,
            self.stack_next_y - CELL_HEIGHT,
            CELL_WIDTH,
            CELL_HEIGHT,
        );
        self.stack_next_y -= CELL_HEIGHT;

        let mut cell = ValueCell::new(Some(name), LabelSide::Left);
        cell.address = Some(address);
        cell.value = value.clone();
        cell.draw(canvas, bounds, Trigger::after_previous());
        let id = cells.insert(cell);
        self.address_table.insert(address, id);
        debug!("stack slot 0x{:04X} assigned to '{}'", address, name);
        id
    }

    /// Give back a variable's slot. With `erase` the mirror cell disappears
    /// after the previous animation; otherwise it stays drawn.
    pub fn release_variable(
        &mut self,
        cells: &mut CellArena,
        canvas: &mut dyn Canvas,
        cell_id: CellId,
        erase: bool,
    ) -> Result<()> {
        let cell = cells.get_mut(cell_id)?;
        if erase {
            cell.clear(canvas, Trigger::after_previous());
        }
        if let Some(address) = cell.address {
            self.address_table.remove(&address);
        }
        self.stack_pointer += WORD_SIZE;
        self.stack_next_y += CELL_HEIGHT;
        Ok(())
    }

    /// Separate a new frame's slots from its caller's
    pub fn push_frame(&mut self, canvas: &mut dyn Canvas) {
        self.stack_pointer -= WORD_SIZE;
        let bounds = Rect::new(
            self.stack_region.x + CELL_LABEL_WIDTH,
            self.stack_next_y - BOUNDARY_HEIGHT,
            CELL_WIDTH,
            BOUNDARY_HEIGHT,
        );
        self.stack_next_y -= BOUNDARY_HEIGHT;

        let shape = canvas.add_shape(ShapeKind::Marker, None, bounds);
        canvas.set_fill(shape, fills::MARKER);
        canvas.appear(shape, Trigger::with_previous());
        self.boundaries.push(shape);
        debug!(depth = self.boundaries.len(), "frame boundary pushed");
    }

    /// Remove the most recent boundary marker; no-op when none is pushed
    pub fn pop_frame(&mut self, canvas: &mut dyn Canvas) {
        let Some(marker) = self.boundaries.pop() else {
            return;
        };
        canvas.disappear(marker, Trigger::after_previous());
        self.stack_pointer += WORD_SIZE;
        self.stack_next_y += BOUNDARY_HEIGHT;
        debug!(depth = self.boundaries.len(), "frame boundary popped");
    }

    /// Callback keeping a mirror cell in step with its variable
    pub fn mirror(cell_id: CellId) -> Subscriber {
        subscriber(move |change, ctx| {
            trace!(variable = change.variable, value = %change.value, "mirroring change");
            if let Ok(cell) = ctx.cells.get_mut(cell_id) {
                cell.set(ctx.canvas, change.value.clone());
            }
            redraw_connector(ctx.canvas, ctx.cells, ctx.address_table, cell_id);
        })
    }
}

/// Point `source`'s connector at the cell its value addresses, dropping the
/// old line. Values that are not pointers, or that point at addresses not on
/// the diagram, get no line. A cleared source never gets one.
pub(crate) fn redraw_connector(
    canvas: &mut dyn Canvas,
    cells: &mut CellArena,
    address_table: Option<&FxHashMap<Address, CellId>>,
    source: CellId,
) {
    let Ok(cell) = cells.get(source) else {
        return;
    };
    if cell.is_cleared() {
        return;
    }
    let (Some(from_bounds), target) = (cell.bounds, cell.value.as_pointer()) else {
        return;
    };
    let target_bounds = target
        .and_then(|address| address_table?.get(&address).copied())
        .and_then(|id| cells.get(id).ok())
        .filter(|target| !target.is_cleared())
        .and_then(|target| target.bounds);

    let new_line = target_bounds.map(|to_bounds| {
        let (from, to) = if to_bounds.center().x < from_bounds.center().x {
            (from_bounds.left_anchor(), to_bounds.right_anchor())
        } else if to_bounds.center().x > from_bounds.center().x {
            (from_bounds.right_anchor(), to_bounds.left_anchor())
        } else {
            // Same column: loop out to the right
            (from_bounds.right_anchor(), to_bounds.right_anchor())
        };
        let shape = canvas.add_shape(ShapeKind::Connector { from, to }, None, span(from, to));
        canvas.appear(shape, Trigger::with_previous());
        shape
    });

    if let Ok(cell) = cells.get_mut(source) {
        if let Some(old) = std::mem::replace(&mut cell.connector, new_line) {
            canvas.disappear(old, Trigger::with_previous());
        }
    }
}

/// Smallest rectangle containing both points
fn span(a: Point, b: Point) -> Rect {
    Rect::new(
        a.x.min(b.x),
        a.y.min(b.y),
        (a.x - b.x).abs(),
        (a.y - b.y).abs(),
    )
}
