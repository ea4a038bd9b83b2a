//! Author-written function definitions

use super::engine::TraceEngine;
use super::errors::Result;
use crate::code::CodeFont;
use crate::memory::value::Value;
use std::fmt;
use std::rc::Rc;

/// The walkthrough of one function for one concrete execution path.
///
/// It receives the engine (to declare variables, highlight code, call other
/// functions) and the literal arguments, and returns the function's result.
pub type StepThrough = Rc<dyn Fn(&mut TraceEngine, &[Value]) -> Result<Value>>;

/// A traced function: its source as shown on the slide and its step-through
#[derive(Clone)]
pub struct FunctionDefinition {
    pub name: String,
    pub source_lines: Vec<String>,
    pub frame_height: Option<f64>,
    pub font: Option<CodeFont>,
    pub spacing: Option<f64>,
    step_through: Option<StepThrough>,
}

impl FunctionDefinition {
    pub fn new(name: &str, source_lines: &[&str]) -> Self {
        FunctionDefinition {
            name: name.to_string(),
            source_lines: source_lines.iter().map(|s| s.to_string()).collect(),
            frame_height: None,
            font: None,
            spacing: None,
            step_through: None,
        }
    }

    pub fn with_step_through<F>(mut self, step_through: F) -> Self
    where
        F: Fn(&mut TraceEngine, &[Value]) -> Result<Value> + 'static,
    {
        self.step_through = Some(Rc::new(step_through));
        self
    }

    pub fn with_frame_height(mut self, height: f64) -> Self {
        self.frame_height = Some(height);
        self
    }

    pub fn with_font(mut self, font: CodeFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn step_through(&self) -> Option<&StepThrough> {
        self.step_through.as_ref()
    }
}

impl fmt::Debug for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDefinition")
            .field("name", &self.name)
            .field("source_lines", &self.source_lines.len())
            .field("frame_height", &self.frame_height)
            .field("font", &self.font)
            .field("spacing", &self.spacing)
            .field("has_step_through", &self.step_through.is_some())
            .finish()
    }
}
