//! # Introduction
//!
//! stackdeck builds animated call-stack and heap walkthroughs for slide
//! decks. An author writes, for each function of a small program, the source
//! lines shown on the slide and a *step-through*: a fixed sequence of
//! operations (declare a parameter, highlight a piece of code, assign a
//! variable, call another function) matching one concrete execution. The
//! engine turns those into shapes and click-triggered animation steps.
//!
//! ## Pipeline
//!
//! ```text
//! FunctionDefinitions → TraceEngine::call → Canvas (Scene) → TUI / JSON
//! ```
//!
//! 1. [`trace`]: the engine, function definitions, frame layout and the
//!    optional heap/stack memory diagram.
//! 2. [`memory`]: values, typed binders, variables, memory cells and the
//!    call stack.
//! 3. [`code`]: source lines and the character-range geometry used for
//!    highlights.
//! 4. [`console`]: simulated `println`/`read_line` traffic.
//! 5. [`canvas`]: the drawing interface, animation triggers and
//!    [`canvas::Scene`], the recording canvas that can be replayed.
//! 6. [`ui`]: ratatui previewer; not part of the stable library API.
//!
//! Ready-made traces live in [`demos`].

pub mod canvas;
pub mod code;
pub mod console;
pub mod demos;
pub mod geometry;
pub mod memory;
pub mod trace;
pub mod ui;
