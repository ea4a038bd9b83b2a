//! Logical memory model behind the slides
//!
//! This module provides the state the engine keeps for everything drawn:
//! - [`value`]: displayable values and typed binders
//! - [`heap`]: addressable memory cells (heap words and diagram slots)
//! - [`variable`]: named variables bound into a frame, with subscribers
//! - [`stack`]: stack frames and the call stack
//!
//! # Value propagation
//!
//! Variables and cells share one update contract: a new text shape is
//! created, it appears after the previous animation, the old shape
//! disappears together with it, and only then are subscribers told. A
//! replaced value is therefore never visible at the same time as its
//! successor, and an observer never sees the old value.

pub mod heap;
pub mod stack;
pub mod value;
pub mod variable;

use crate::canvas::{Canvas, ShapeId, ShapeKind, Trigger};
use crate::geometry::Rect;
use crate::trace::constants::VALUE_INSET;
use value::Value;

/// Draw `value` inside `bounds` and retire `previous`.
///
/// `bounds` is relative to `parent` when one is given. Returns the shape now
/// showing the value, None for [`Value::Unset`].
pub(crate) fn replace_rendered_value(
    canvas: &mut dyn Canvas,
    parent: Option<ShapeId>,
    bounds: Rect,
    previous: Option<ShapeId>,
    value: &Value,
) -> Option<ShapeId> {
    if !value.is_set() {
        if let Some(old) = previous {
            canvas.disappear(old, Trigger::after_previous());
        }
        return None;
    }

    let at = bounds.inset(VALUE_INSET, VALUE_INSET);
    let shape = canvas.add_shape(
        ShapeKind::Text {
            text: value.to_string(),
        },
        parent,
        at,
    );
    canvas.appear(shape, Trigger::after_previous());
    if let Some(old) = previous {
        canvas.disappear(old, Trigger::with_previous());
    }
    Some(shape)
}
