//! Console pane: output and input lines shown so far

use crate::canvas::SceneState;
use crate::console::{Console, LineKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the console pane. Lines drawn on the slide are listed once their
/// shape is visible; lines without a shape are always listed.
pub fn render_console_pane(
    frame: &mut Frame,
    area: Rect,
    console: &Console,
    state: &SceneState,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Console ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let shown: Vec<_> = console
        .lines()
        .iter()
        .filter(|line| {
            line.shape()
                .map_or(true, |id| state.shape(id).is_some_and(|s| s.visible))
        })
        .collect();

    if shown.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = shown
        .iter()
        .map(|line| match line.kind {
            LineKind::Output => {
                ListItem::new(line.text.as_str()).style(Style::default().fg(DEFAULT_THEME.fg))
            }
            LineKind::Input => {
                let split = line
                    .text
                    .char_indices()
                    .nth(line.input_start)
                    .map_or(line.text.len(), |(i, _)| i);
                let (prompt, typed) = line.text.split_at(split);
                ListItem::new(Line::from(vec![
                    Span::styled(prompt, Style::default().fg(DEFAULT_THEME.fg)),
                    Span::styled(
                        typed,
                        Style::default()
                            .fg(DEFAULT_THEME.string)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]))
            }
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
