//! Source lines of a traced function and their geometry
//!
//! Code is measured as if set in a fixed-width font: every character is
//! `char_width` wide and every line is `spacing` tall. The real glyph
//! rendering belongs to the drawing substrate; the engine only needs to know
//! where a range of characters lands inside its frame.

use crate::geometry::Rect;
use crate::trace::constants::{
    CODE_LEFT_MARGIN, CODE_TOP_MARGIN, DEFAULT_CHAR_WIDTH, DEFAULT_FONT_FAMILY,
    DEFAULT_FONT_SIZE, DEFAULT_LINE_SPACING,
};
use crate::trace::errors::TraceError;
use serde::{Deserialize, Serialize};

/// Font used to render code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeFont {
    pub family: String,
    pub size: f64,
    /// Advance width of one character
    pub char_width: f64,
}

impl CodeFont {
    pub fn new(family: &str, size: f64, char_width: f64) -> Self {
        CodeFont {
            family: family.to_string(),
            size,
            char_width,
        }
    }
}

impl Default for CodeFont {
    fn default() -> Self {
        CodeFont::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_CHAR_WIDTH)
    }
}

/// Everything that decides where a character lands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeStyle {
    pub font: CodeFont,
    pub spacing: f64,
    pub left_margin: f64,
    pub top_margin: f64,
}

impl Default for CodeStyle {
    fn default() -> Self {
        CodeStyle {
            font: CodeFont::default(),
            spacing: DEFAULT_LINE_SPACING,
            left_margin: CODE_LEFT_MARGIN,
            top_margin: CODE_TOP_MARGIN,
        }
    }
}

/// The source lines shown in one frame
#[derive(Debug, Clone)]
pub struct CodeBlock {
    function: String,
    lines: Vec<String>,
    style: CodeStyle,
}

impl CodeBlock {
    pub fn new(function: &str, lines: Vec<String>, style: CodeStyle) -> Self {
        CodeBlock {
            function: function.to_string(),
            lines,
            style,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn style(&self) -> &CodeStyle {
        &self.style
    }

    /// Index of the first line containing `pattern`
    pub fn find_code_line(&self, pattern: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.contains(pattern))
    }

    /// Like [`find_code_line`](Self::find_code_line), but a miss is an error
    pub fn code_line(&self, pattern: &str) -> Result<usize, TraceError> {
        self.find_code_line(pattern)
            .ok_or_else(|| TraceError::CodeLineNotFound {
                function: self.function.clone(),
                pattern: pattern.to_string(),
            })
    }

    /// Rectangle covering columns `start..end` of `line`, in frame coordinates
    pub fn code_bounds(&self, line: usize, start: usize, end: usize) -> Result<Rect, TraceError> {
        let text = self.lines.get(line).ok_or(TraceError::CodeRangeOutOfBounds {
            function: self.function.clone(),
            line,
            start,
            end,
        })?;
        if start > end || end > text.chars().count() {
            return Err(TraceError::CodeRangeOutOfBounds {
                function: self.function.clone(),
                line,
                start,
                end,
            });
        }

        let cw = self.style.font.char_width;
        Ok(Rect::new(
            self.style.left_margin + start as f64 * cw,
            self.style.top_margin + line as f64 * self.style.spacing,
            (end - start) as f64 * cw,
            self.style.spacing,
        ))
    }

    /// Bounds of a whole line, ignoring leading and trailing spaces
    pub fn line_bounds(&self, line: usize) -> Result<Rect, TraceError> {
        let text = self.lines.get(line).ok_or(TraceError::CodeRangeOutOfBounds {
            function: self.function.clone(),
            line,
            start: 0,
            end: 0,
        })?;
        let total = text.chars().count();
        let leading = text.chars().take_while(|&c| c == ' ').count();
        let trailing = text.chars().rev().take_while(|&c| c == ' ').count();
        let end = total.saturating_sub(trailing).max(leading);
        self.code_bounds(line, leading, end)
    }

    /// Bounds of the first occurrence of `pattern`
    pub fn pattern_bounds(&self, pattern: &str) -> Result<Rect, TraceError> {
        let line = self.code_line(pattern)?;
        let text = &self.lines[line];
        // `code_line` guarantees a match on this line
        let byte_start = text.find(pattern).unwrap_or(0);
        let start = text[..byte_start].chars().count();
        self.code_bounds(line, start, start + pattern.chars().count())
    }

    /// Height taken by the code, margins included
    pub fn height(&self) -> f64 {
        2.0 * self.style.top_margin + self.lines.len() as f64 * self.style.spacing
    }
}
