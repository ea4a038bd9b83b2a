//! Stage pane: the slide as it looks after the current click
//!
//! Shapes are drawn on a ratatui [`Canvas`] widget scaled to the extent of
//! every shape in the scene, so the picture does not jump as shapes come
//! and go. Slide coordinates grow downward; the canvas grows upward, so
//! every y is flipped against the stage height.

use crate::canvas::{fills, SceneState, ShapeKind, ShapeView};
use crate::trace::constants::CODE_TOP_MARGIN;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line, Rectangle},
        Block, Borders,
    },
    Frame,
};

/// Render the stage pane
pub fn render_stage_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    state: &SceneState,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Stage: {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let (width, height) = extent(state);
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            // Outlines first, text on top
            for shape in state.visible() {
                draw_outline(ctx, shape, height);
            }
            for shape in state.visible() {
                draw_text(ctx, shape, height);
            }
        });

    frame.render_widget(canvas, area);
}

/// Width and height covering every shape, visible or not
fn extent(state: &SceneState) -> (f64, f64) {
    state
        .shapes
        .iter()
        .fold((1.0_f64, 1.0_f64), |(w, h), shape| {
            (w.max(shape.bounds.right()), h.max(shape.bounds.bottom()))
        })
}

fn draw_outline(ctx: &mut Context, shape: &ShapeView, height: f64) {
    let b = shape.bounds;
    let color = match shape.kind {
        ShapeKind::Frame { .. } => DEFAULT_THEME.primary,
        ShapeKind::Box => DEFAULT_THEME.comment,
        ShapeKind::Highlight => DEFAULT_THEME.secondary,
        ShapeKind::Marker => DEFAULT_THEME.error,
        ShapeKind::Connector { from, to } => {
            ctx.draw(&Line {
                x1: from.x,
                y1: height - from.y,
                x2: to.x,
                y2: height - to.y,
                color: DEFAULT_THEME.return_value,
            });
            return;
        }
        ShapeKind::Code { .. } | ShapeKind::Text { .. } => return,
    };
    ctx.draw(&Rectangle {
        x: b.x,
        y: height - b.bottom(),
        width: b.width,
        height: b.height,
        color,
    });
}

fn draw_text(ctx: &mut Context, shape: &ShapeView, height: f64) {
    let b = shape.bounds;
    match &shape.kind {
        ShapeKind::Frame { function } => {
            ctx.print(
                b.right() - 8.0 * function.len() as f64,
                height - b.y,
                Span::styled(function.clone(), Style::default().fg(DEFAULT_THEME.function)),
            );
        }
        ShapeKind::Code { lines } => {
            let spacing = (b.height - 2.0 * CODE_TOP_MARGIN) / lines.len().max(1) as f64;
            for (i, line) in lines.iter().enumerate() {
                let y = b.y + CODE_TOP_MARGIN + (i as f64 + 0.5) * spacing;
                ctx.print(
                    b.x,
                    height - y,
                    Span::styled(line.clone(), Style::default().fg(DEFAULT_THEME.fg)),
                );
            }
        }
        ShapeKind::Text { text } => {
            let color = if shape.fill == Some(fills::CONSOLE_INPUT) {
                DEFAULT_THEME.string
            } else {
                DEFAULT_THEME.fg
            };
            ctx.print(
                b.x,
                height - (b.y + b.height / 2.0),
                Span::styled(text.clone(), Style::default().fg(color)),
            );
        }
        _ => {}
    }
}
