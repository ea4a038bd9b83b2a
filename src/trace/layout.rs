//! Frame geometry and run-time layout settings
//!
//! Frames are laid out as a staggered stack of cards: the frame at depth `d`
//! is the frame region moved by `(d·dx, d·dy)`. Every frame is narrowed by
//! `(max_depth − 1)·dx` so that the deepest expected frame still ends at the
//! region's right edge. Deeper frames simply overlap; nothing fails.

use super::constants::{
    DEFAULT_FRAME_REGION, DEFAULT_MAX_STACK_DEPTH, DEFAULT_RECURSION_LIMIT, DEFAULT_STAGGER_DX,
    DEFAULT_STAGGER_DY,
};
use crate::code::CodeStyle;
use crate::geometry::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub frame_region: Rect,
    pub max_stack_depth: usize,
    pub stagger_dx: f64,
    pub stagger_dy: f64,
    /// Explicit frame height; derived from the region when unset
    pub frame_height: Option<f64>,
    /// Font, spacing and margins inherited by every function's code
    pub code_style: CodeStyle,
    pub recursion_limit: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            frame_region: DEFAULT_FRAME_REGION,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            stagger_dx: DEFAULT_STAGGER_DX,
            stagger_dy: DEFAULT_STAGGER_DY,
            frame_height: None,
            code_style: CodeStyle::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl LayoutConfig {
    /// Depth steps reserved inside the region
    fn reserved_steps(&self) -> f64 {
        self.max_stack_depth.saturating_sub(1) as f64
    }

    pub fn frame_width(&self) -> f64 {
        (self.frame_region.width - self.reserved_steps() * self.stagger_dx).max(0.0)
    }

    /// Height used when neither the function nor the engine sets one
    pub fn default_frame_height(&self) -> f64 {
        (self.frame_region.height - self.reserved_steps() * self.stagger_dy).max(0.0)
    }

    /// Rectangle of a frame created at `depth`
    pub fn frame_rect(&self, depth: usize, height_override: Option<f64>) -> Rect {
        let height = height_override
            .or(self.frame_height)
            .unwrap_or_else(|| self.default_frame_height());
        Rect::new(
            self.frame_region.x + depth as f64 * self.stagger_dx,
            self.frame_region.y + depth as f64 * self.stagger_dy,
            self.frame_width(),
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LayoutConfig {
        LayoutConfig {
            frame_region: Rect::new(10.0, 20.0, 400.0, 300.0),
            max_stack_depth: 4,
            stagger_dx: 10.0,
            stagger_dy: 8.0,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn test_consecutive_depths_differ_by_stagger() {
        let layout = layout();
        for depth in 0..6 {
            let a = layout.frame_rect(depth, None);
            let b = layout.frame_rect(depth + 1, None);
            assert_eq!(b.x - a.x, 10.0);
            assert_eq!(b.y - a.y, 8.0);
            assert_eq!(a.width, b.width);
        }
    }

    #[test]
    fn test_width_reserves_max_depth() {
        let layout = layout();
        let top = layout.frame_rect(0, None);
        assert_eq!(top.width, 370.0);
        assert_eq!(top.height, 276.0);
        // The deepest expected frame ends at the region's right edge
        let deepest = layout.frame_rect(3, None);
        assert_eq!(deepest.right(), 410.0);
        // Going past max depth overlaps but never changes the width
        assert_eq!(layout.frame_rect(9, None).width, 370.0);
    }

    #[test]
    fn test_height_override_wins() {
        let mut layout = layout();
        layout.frame_height = Some(120.0);
        assert_eq!(layout.frame_rect(0, None).height, 120.0);
        assert_eq!(layout.frame_rect(0, Some(90.0)).height, 90.0);
    }
}
