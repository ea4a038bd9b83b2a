//! Error types for trace construction
//!
//! Every error is fatal for the slide being built: traces are deterministic,
//! so there is nothing to retry. Each variant names the function, variable or
//! token at fault so the author can find the bad line in their script.
//!
//! Two families exist:
//! - configuration errors (unknown function, missing step-through, a literal
//!   that does not fit the variable it is bound to, ...)
//! - lookup errors (a code pattern or character range that is not in the
//!   frame's source)

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    /// `call` named a function that was never defined
    #[error("Undefined function '{name}'")]
    UndefinedFunction { name: String },

    /// `define_function` got a definition without a step-through
    #[error("Function '{function}' has no step-through")]
    MissingStepThrough { function: String },

    /// A literal does not fit the declared variable type
    #[error("Cannot bind {got} to {expected} variable '{variable}' in '{function}'")]
    ArgumentBinding {
        function: String,
        variable: String,
        expected: String,
        got: String,
    },

    /// A value read back by a step-through had the wrong shape
    #[error("Type error: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// A step-through asked for `index` arguments but the call passed fewer
    #[error("Function '{function}' reads argument {index} but was called with {count}")]
    MissingArgument {
        function: String,
        index: usize,
        count: usize,
    },

    /// Frame operation with nothing on the call stack
    #[error("No active stack frame for '{operation}'")]
    NoActiveFrame { operation: String },

    /// Two declarations with the same name in one frame
    #[error("Variable '{variable}' is already declared in '{function}'")]
    DuplicateVariable { function: String, variable: String },

    /// Lookup of a variable that does not exist (or whose frame was popped)
    #[error("Unknown variable '{variable}'")]
    UnknownVariable { variable: String },

    /// A cell handle that was never handed out by this engine
    #[error("Unknown memory cell #{index}")]
    UnknownCell { index: usize },

    /// Text that is not part of the animation trigger vocabulary
    #[error("Invalid animation trigger '{token}'")]
    InvalidTrigger { token: String },

    /// Recursion went deeper than the configured limit
    #[error("Recursion limit of {limit} frames exceeded calling '{function}'")]
    RecursionLimitExceeded { function: String, limit: usize },

    /// `find_code_line` found nothing and the result was used anyway
    #[error("No line of '{function}' contains '{pattern}'")]
    CodeLineNotFound { function: String, pattern: String },

    /// Character range outside the frame's source
    #[error("Code range {start}..{end} on line {line} is outside '{function}'")]
    CodeRangeOutOfBounds {
        function: String,
        line: usize,
        start: usize,
        end: usize,
    },
}

impl TraceError {
    /// Lookup errors are authoring bugs in highlight patterns; everything
    /// else is a configuration error
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            TraceError::CodeLineNotFound { .. } | TraceError::CodeRangeOutOfBounds { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;
