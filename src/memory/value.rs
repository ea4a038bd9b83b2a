//! Values shown in cells, and the typed binders that accept them
//!
//! [`Value`] is what a variable or heap word currently displays. [`VarType`]
//! is fixed when a variable is declared and decides which literals may be
//! bound to it, so an author passing a string to an `int` parameter fails at
//! the declaration instead of rendering nonsense.

use crate::trace::errors::TraceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated memory address
pub type Address = u64;

/// Displayable values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Str(String),
    Pointer(Address),
    Null,
    /// Any author-defined rendering, shown verbatim
    Custom(String),
    #[default]
    Unset, // Declared, never assigned
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(s.to_string())
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Value::Unset)
    }

    /// Get the integer value, returns None if not an Int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Pointer target; `Null` has none
    pub fn as_pointer(&self) -> Option<Address> {
        match self {
            Value::Pointer(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn expect_int(&self) -> Result<i64, TraceError> {
        self.as_int().ok_or_else(|| TraceError::TypeMismatch {
            expected: "int".to_string(),
            got: self.describe(),
        })
    }

    /// Kind and rendering, for error messages
    pub fn describe(&self) -> String {
        match self {
            Value::Int(n) => format!("int {}", n),
            Value::Str(s) => format!("string {:?}", s),
            Value::Pointer(addr) => format!("pointer 0x{:04X}", addr),
            Value::Null => "null".to_string(),
            Value::Custom(text) => format!("value '{}'", text),
            Value::Unset => "nothing".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Pointer(addr) => write!(f, "0x{:04X}", addr),
            Value::Null => write!(f, "NULL"),
            Value::Custom(text) => write!(f, "{}", text),
            Value::Unset => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

/// Converts a literal into the value a custom variable displays
pub type Binder = fn(&Value) -> Option<Value>;

/// Declared type of a variable
#[derive(Debug, Clone)]
pub enum VarType {
    Int,
    Str,
    Pointer,
    Custom { type_name: String, binder: Binder },
}

impl VarType {
    pub fn custom(type_name: &str, binder: Binder) -> Self {
        VarType::Custom {
            type_name: type_name.to_string(),
            binder,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            VarType::Int => "int",
            VarType::Str => "string",
            VarType::Pointer => "pointer",
            VarType::Custom { type_name, .. } => type_name,
        }
    }

    /// The value `literal` becomes when stored in a variable of this type,
    /// or None when it does not fit
    pub fn bind(&self, literal: &Value) -> Option<Value> {
        match (self, literal) {
            (_, Value::Unset) => Some(Value::Unset),
            (VarType::Int, Value::Int(_)) => Some(literal.clone()),
            (VarType::Str, Value::Str(_)) => Some(literal.clone()),
            (VarType::Pointer, Value::Pointer(_) | Value::Null) => Some(literal.clone()),
            (VarType::Custom { binder, .. }, _) => binder(literal),
            _ => None,
        }
    }
}
