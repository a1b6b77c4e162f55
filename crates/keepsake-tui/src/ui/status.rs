//! Status bar
//!
//! Key hints, the effects toggle state, and the latest status message.

use keepsake_app::App;
use keepsake_core::Environment;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const HINTS: &str = " ←/→ turn · Home/End jump · t effects · q quit";

/// Render the status bar.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    if area.is_empty() {
        return;
    }

    let effects = if app.effects().is_enabled() {
        Span::styled(" ♥ on ", Style::default().fg(Color::LightMagenta))
    } else {
        Span::styled(" ♡ off ", Style::default().fg(Color::Gray))
    };
    let message = app.status().map_or_else(String::new, |m| format!(" | {m}"));

    let status_line = Line::from(vec![
        effects,
        Span::raw(HINTS),
        Span::styled(message, Style::default().fg(Color::Yellow)),
    ]);
    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
