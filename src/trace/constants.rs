// Constants for the trace engine

use crate::geometry::Rect;

/// Starting address for heap words.
/// Low enough that every heap address prints as four hex digits.
pub const HEAP_ADDRESS_START: u64 = 0x1000;

/// Stack addresses count down from here; the first slot is 0xFFFC
pub const STACK_ADDRESS_START: u64 = 0x1_0000;

/// Every variable, heap word and boundary marker takes one word
pub const WORD_SIZE: u64 = 4;

/// Frames deeper than this overlap on the slide
pub const DEFAULT_MAX_STACK_DEPTH: usize = 4;

/// Per-depth displacement of nested frames
pub const DEFAULT_STAGGER_DX: f64 = 14.0;
pub const DEFAULT_STAGGER_DY: f64 = 14.0;

/// Slide area used for stack frames
pub const DEFAULT_FRAME_REGION: Rect = Rect::new(20.0, 20.0, 440.0, 380.0);

/// Guard against exhausting the host stack in runaway recursive traces
pub const DEFAULT_RECURSION_LIMIT: usize = 1024;

// Code layout
pub const DEFAULT_FONT_FAMILY: &str = "Courier New";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_CHAR_WIDTH: f64 = 7.2;
pub const DEFAULT_LINE_SPACING: f64 = 16.0;
pub const CODE_LEFT_MARGIN: f64 = 12.0;
pub const CODE_TOP_MARGIN: f64 = 8.0;

// Variable boxes inside a frame
pub const VARIABLE_WIDTH: f64 = 64.0;
pub const VARIABLE_HEIGHT: f64 = 24.0;
pub const VARIABLE_GAP: f64 = 16.0;
pub const VARIABLE_LABEL_HEIGHT: f64 = 14.0;
pub const VARIABLE_MARGIN: f64 = 12.0;
/// Offset of a value's text from its box
pub const VALUE_INSET: f64 = 4.0;

// Memory diagram
pub const DIAGRAM_TOP_MARGIN: f64 = 12.0;
pub const DIAGRAM_BOTTOM_MARGIN: f64 = 12.0;
pub const CELL_WIDTH: f64 = 64.0;
pub const CELL_HEIGHT: f64 = 22.0;
pub const CELL_LABEL_WIDTH: f64 = 48.0;
pub const BOUNDARY_HEIGHT: f64 = 4.0;

// Console
pub const CONSOLE_LINE_HEIGHT: f64 = 16.0;
pub const CONSOLE_MARGIN: f64 = 6.0;
