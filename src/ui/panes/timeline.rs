//! Timeline pane: every recorded animation step, grouped by click

use crate::canvas::{Step, StepAction};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn describe(action: &StepAction) -> String {
    match action {
        StepAction::Appear => "appear".to_string(),
        StepAction::Disappear => "disappear".to_string(),
        StepAction::MoveTo(p) => format!("move to ({:.0}, {:.0})", p.x, p.y),
        StepAction::CurveTo { to, .. } => format!("curve to ({:.0}, {:.0})", to.x, to.y),
        StepAction::SetText(text) => format!("text {:?}", text),
        StepAction::SetFill(rgb) => format!("fill #{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2),
    }
}

/// Render the timeline pane
pub fn render_timeline_pane(
    frame: &mut Frame,
    area: Rect,
    steps: &[Step],
    step_clicks: &[usize],
    current_click: usize,
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
        .title(" Timeline ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if steps.is_empty() {
        let paragraph = Paragraph::new("(no animation steps)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = steps
        .iter()
        .zip(step_clicks)
        .map(|(step, &click)| {
            let played = click <= current_click;
            let text_style = if click == current_click {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .bg(DEFAULT_THEME.current_line_bg)
            } else if played {
                Style::default().fg(DEFAULT_THEME.fg)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            let trigger = step
                .trigger
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3} ", click),
                    Style::default().fg(DEFAULT_THEME.number),
                ),
                Span::styled(format!("#{:<4}", step.shape.0), text_style),
                Span::styled(describe(&step.action), text_style),
                Span::styled(
                    format!("  {}", trigger),
                    Style::default().fg(DEFAULT_THEME.type_name),
                ),
            ]))
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
