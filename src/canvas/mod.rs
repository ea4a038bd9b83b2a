//! Drawing interface consumed by the trace engine
//!
//! The engine never draws anything itself. It adds shapes to a [`Canvas`],
//! positions them, and schedules their appearance, disappearance and motion
//! with opaque [`Trigger`]s. Everything else (fonts, colors on a real slide,
//! document output) belongs to whoever implements the trait.
//!
//! [`Scene`] is the implementation shipped with the crate: it records every
//! shape and step so the result can be inspected, replayed click by click
//! (see [`Scene::state_at`]) or dumped as JSON.

pub mod scene;
pub mod trigger;

pub use scene::{Scene, SceneState, ShapeView, Step, StepAction};
pub use trigger::{Cue, Start, Trigger};

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle to a shape added to a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub usize);

/// Fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// What a shape is, from the substrate's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Card holding one function activation
    Frame { function: String },
    /// Rendered source lines of a frame
    Code { lines: Vec<String> },
    /// Outline of a variable or memory cell
    Box,
    /// A single run of text (values, labels, addresses, console lines)
    Text { text: String },
    /// Background band behind a range of code
    Highlight,
    /// Thin separator between frames on the stack column
    Marker,
    /// Line from one cell to the cell it points at
    Connector { from: Point, to: Point },
}

/// The narrow drawing surface the engine talks to.
///
/// `at` is relative to `parent` when one is given, absolute otherwise.
pub trait Canvas {
    fn add_shape(&mut self, kind: ShapeKind, parent: Option<ShapeId>, at: Rect) -> ShapeId;

    fn appear(&mut self, shape: ShapeId, trigger: Trigger);

    fn disappear(&mut self, shape: ShapeId, trigger: Trigger);

    fn move_to(&mut self, shape: ShapeId, to: Point, trigger: Trigger);

    fn curve_to(&mut self, shape: ShapeId, to: Point, control: Point, trigger: Trigger);

    fn set_text(&mut self, shape: ShapeId, text: &str);

    fn set_fill(&mut self, shape: ShapeId, fill: Rgb);

    /// Absolute bounds of a shape at its final position
    fn bounds(&self, shape: ShapeId) -> Option<Rect>;
}

/// Fills used by the engine
pub mod fills {
    use super::Rgb;

    pub const FRAME: Rgb = Rgb(242, 242, 236);
    pub const HIGHLIGHT: Rgb = Rgb(255, 236, 153);
    pub const CELL: Rgb = Rgb(255, 255, 255);
    pub const MARKER: Rgb = Rgb(96, 96, 96);
    pub const CONSOLE_INPUT: Rgb = Rgb(0, 102, 204);
}
