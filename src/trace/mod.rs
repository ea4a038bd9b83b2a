//! Trace engine
//!
//! This module provides:
//! - [`engine`]: [`engine::TraceEngine`], which runs step-throughs and owns
//!   the call stack, the heap cells and the recorded scene
//! - [`function`]: author-written [`function::FunctionDefinition`]s
//! - [`viewer`]: the optional heap/stack memory diagram
//! - [`layout`]: frame geometry and run-time settings
//! - [`constants`]: addresses, layout defaults and font metrics
//! - [`errors`]: [`errors::TraceError`] and the crate-wide `Result`
//!
//! # Example
//!
//! ```
//! use stackdeck::memory::value::{Value, VarType};
//! use stackdeck::trace::engine::TraceEngine;
//! use stackdeck::trace::function::FunctionDefinition;
//!
//! let mut engine = TraceEngine::new();
//! engine
//!     .define_function(
//!         FunctionDefinition::new("twice", &["int twice(int x) {", "  return 2 * x;", "}"])
//!             .with_step_through(|engine, args| {
//!                 let x = engine.declare_param("x", VarType::Int, engine.arg(args, 0)?)?;
//!                 engine.end_declarations()?;
//!                 engine.highlight("2 * x")?;
//!                 Ok(Value::Int(2 * engine.value(x)?.expect_int()?))
//!             }),
//!     )
//!     .unwrap();
//! assert_eq!(engine.call("twice", &[Value::Int(21)]).unwrap(), Value::Int(42));
//! ```

pub mod constants;
pub mod engine;
pub mod errors;
pub mod function;
pub mod layout;
pub mod viewer;
