//! Page controls
//!
//! Previous and next buttons around the page indicator. Buttons are dimmed
//! when the indicator says they cannot be used.

use keepsake_app::App;
use keepsake_core::Environment;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

const PREV_LABEL: &str = "◀ Prev";
const NEXT_LABEL: &str = "Next ▶";

/// Render both buttons and the indicator.
pub fn render<E: Environment>(
    frame: &mut Frame,
    app: &App<E>,
    prev: Rect,
    indicator: Rect,
    next: Rect,
) {
    let affordances = app.affordances();
    render_button(frame, PREV_LABEL, affordances.can_retreat, prev);
    render_button(frame, NEXT_LABEL, affordances.can_advance, next);

    if indicator.is_empty() {
        return;
    }
    let position = format!(
        "{} · {}/{}",
        affordances.label.title(),
        app.navigator().current_index(),
        app.navigator().len()
    );
    let paragraph = Paragraph::new(Line::from(position))
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM));
    frame.render_widget(paragraph, indicator);
}

fn render_button(frame: &mut Frame, label: &str, enabled: bool, area: Rect) {
    if area.is_empty() {
        return;
    }
    let style = if enabled {
        Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(Line::from(label))
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(paragraph, area);
}
