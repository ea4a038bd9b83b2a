//! Simulated console for `println`/`readLine` in traced programs

use crate::canvas::{fills, Canvas, ShapeId, ShapeKind, Trigger};
use crate::geometry::Rect;
use crate::trace::constants::{CONSOLE_LINE_HEIGHT, CONSOLE_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Output,
    /// A prompt followed by what the "user" typed
    Input,
}

/// A line of console output
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleLine {
    pub text: String,
    pub kind: LineKind,
    /// Column where typed input starts (input lines only)
    pub input_start: usize,
    shape: Option<ShapeId>,
}

impl ConsoleLine {
    /// Text shape on the slide, when the console has a region
    pub fn shape(&self) -> Option<ShapeId> {
        self.shape
    }
}

/// Records console traffic and, given a region, draws it
#[derive(Debug, Clone, Default)]
pub struct Console {
    lines: Vec<ConsoleLine>,
    region: Option<Rect>,
    /// Last line was started by `print` and is still open
    open: bool,
}

impl Console {
    pub fn new() -> Self {
        Console::default()
    }

    pub fn set_region(&mut self, region: Option<Rect>) {
        self.region = region;
    }

    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    /// Print without newline
    pub fn print(&mut self, canvas: &mut dyn Canvas, text: &str) {
        if self.open {
            if let Some(last) = self.lines.last_mut() {
                last.text.push_str(text);
                if let Some(shape) = last.shape {
                    canvas.set_text(shape, &last.text);
                }
                return;
            }
        }
        self.push_line(canvas, text.to_string(), LineKind::Output, 0);
        self.open = true;
    }

    pub fn println(&mut self, canvas: &mut dyn Canvas, text: &str) {
        self.print(canvas, text);
        self.open = false;
    }

    /// Show `prompt` followed by `input` as if typed, and hand `input` back
    pub fn read_line(&mut self, canvas: &mut dyn Canvas, prompt: &str, input: &str) -> String {
        let mut text = prompt.to_string();
        if self.open {
            // The prompt continues an open line: redraw it as one input line
            if let Some(last) = self.lines.pop() {
                if let Some(shape) = last.shape {
                    canvas.disappear(shape, Trigger::after_previous());
                }
                text = format!("{}{}", last.text, prompt);
            }
        }
        let input_start = text.chars().count();
        self.push_line(
            canvas,
            format!("{}{}", text, input),
            LineKind::Input,
            input_start,
        );
        self.open = false;
        input.to_string()
    }

    /// All lines as plain strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }

    fn push_line(&mut self, canvas: &mut dyn Canvas, text: String, kind: LineKind, input_start: usize) {
        let shape = self.region.map(|region| {
            let y = region.y + CONSOLE_MARGIN + self.lines.len() as f64 * CONSOLE_LINE_HEIGHT;
            let shape = canvas.add_shape(
                ShapeKind::Text { text: text.clone() },
                None,
                Rect::new(
                    region.x + CONSOLE_MARGIN,
                    y,
                    region.width - 2.0 * CONSOLE_MARGIN,
                    CONSOLE_LINE_HEIGHT,
                ),
            );
            if kind == LineKind::Input {
                canvas.set_fill(shape, fills::CONSOLE_INPUT);
            }
            canvas.appear(shape, Trigger::after_previous());
            shape
        });
        self.lines.push(ConsoleLine {
            text,
            kind,
            input_start,
            shape,
        });
    }
}
