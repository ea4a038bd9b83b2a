//! Call stack of the trace
//!
//! This module provides:
//! - [`CallStack`]: the frames of every activation still running
//! - [`StackFrame`]: one activation, with its card on the slide, its source
//!   lines and its variables in declaration order
//!
//! # Variable layout
//!
//! Variable boxes sit below the code, left to right in declaration order,
//! wrapping to a new row when the frame is too narrow.

use super::variable::Variable;
use crate::canvas::ShapeId;
use crate::code::CodeBlock;
use crate::geometry::Rect;
use crate::trace::constants::{
    VARIABLE_GAP, VARIABLE_HEIGHT, VARIABLE_LABEL_HEIGHT, VARIABLE_MARGIN, VARIABLE_WIDTH,
};
use crate::trace::errors::TraceError;
use rustc_hash::FxHashMap;

/// One function activation
#[derive(Debug)]
pub struct StackFrame {
    pub function_name: String,
    pub depth: usize,
    /// Sequence number handed out by the call stack on push
    pub generation: u64,
    /// Absolute rectangle, fixed at creation
    pub region: Rect,
    pub code: CodeBlock,
    /// The frame card; everything inside the frame is its child
    pub shape: ShapeId,
    variables: Vec<Variable>,
    bindings: FxHashMap<String, usize>, // Name -> index into `variables`
    highlight: Option<ShapeId>,
    declarations_ended: bool,
}

impl StackFrame {
    pub fn new(
        function_name: &str,
        depth: usize,
        region: Rect,
        code: CodeBlock,
        shape: ShapeId,
    ) -> Self {
        StackFrame {
            function_name: function_name.to_string(),
            depth,
            generation: 0,
            region,
            code,
            shape,
            variables: Vec::new(),
            bindings: FxHashMap::default(),
            highlight: None,
            declarations_ended: false,
        }
    }

    /// Where the next declared variable's box goes, relative to the frame
    pub fn next_variable_bounds(&self) -> Rect {
        let usable = (self.region.width - 2.0 * VARIABLE_MARGIN).max(VARIABLE_WIDTH);
        let per_row = ((usable + VARIABLE_GAP) / (VARIABLE_WIDTH + VARIABLE_GAP))
            .floor()
            .max(1.0) as usize;
        let index = self.variables.len();
        let (row, col) = (index / per_row, index % per_row);

        let top = self.code.height() + VARIABLE_LABEL_HEIGHT;
        Rect::new(
            VARIABLE_MARGIN + col as f64 * (VARIABLE_WIDTH + VARIABLE_GAP),
            top + row as f64 * (VARIABLE_HEIGHT + VARIABLE_LABEL_HEIGHT + VARIABLE_GAP),
            VARIABLE_WIDTH,
            VARIABLE_HEIGHT,
        )
    }

    /// Add a variable at the end of the declaration order
    pub fn declare(&mut self, variable: Variable) -> Result<usize, TraceError> {
        if self.bindings.contains_key(&variable.name) {
            return Err(TraceError::DuplicateVariable {
                function: self.function_name.clone(),
                variable: variable.name,
            });
        }
        let index = self.variables.len();
        self.bindings.insert(variable.name.clone(), index);
        self.variables.push(variable);
        Ok(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bindings.get(name).copied()
    }

    pub fn variable(&self, index: usize) -> Option<&Variable> {
        self.variables.get(index)
    }

    pub fn variable_mut(&mut self, index: usize) -> Option<&mut Variable> {
        self.variables.get_mut(index)
    }

    /// Variables in declaration order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut [Variable] {
        &mut self.variables
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| v.is_parameter)
    }

    pub fn highlight(&self) -> Option<ShapeId> {
        self.highlight
    }

    /// Swap in a new highlight shape, returning the one it replaces
    pub fn replace_highlight(&mut self, shape: Option<ShapeId>) -> Option<ShapeId> {
        std::mem::replace(&mut self.highlight, shape)
    }

    pub fn declarations_ended(&self) -> bool {
        self.declarations_ended
    }

    pub(crate) fn end_declarations(&mut self) {
        self.declarations_ended = true;
    }
}

/// The call stack, most recent frame last
#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<StackFrame>,
    next_generation: u64,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack::default()
    }

    /// Push a new stack frame, stamping it with a fresh generation
    pub fn push_frame(&mut self, mut frame: StackFrame) {
        frame.generation = self.next_generation;
        self.next_generation += 1;
        self.frames.push(frame);
    }

    /// Pop the top stack frame
    pub fn pop_frame(&mut self) -> Option<StackFrame> {
        self.frames.pop()
    }

    /// Get the current (top) frame
    pub fn current_frame(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    /// Get a mutable reference to the current frame
    pub fn current_frame_mut(&mut self) -> Option<&mut StackFrame> {
        self.frames.last_mut()
    }

    /// Get all frames, outermost first
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn frame(&self, depth: usize) -> Option<&StackFrame> {
        self.frames.get(depth)
    }

    pub fn frame_mut(&mut self, depth: usize) -> Option<&mut StackFrame> {
        self.frames.get_mut(depth)
    }

    /// Frame at `depth`, only if it is still the one stamped `generation`
    pub fn live_frame(&self, depth: usize, generation: u64) -> Option<&StackFrame> {
        self.frame(depth).filter(|f| f.generation == generation)
    }

    pub fn live_frame_mut(&mut self, depth: usize, generation: u64) -> Option<&mut StackFrame> {
        self.frame_mut(depth).filter(|f| f.generation == generation)
    }

    /// Get the depth of the call stack
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
