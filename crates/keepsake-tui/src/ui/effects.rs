//! Effects overlay
//!
//! Draws live cues over the book: hearts drift upwards over their lifetime,
//! sparkles dim as they fade, and the newest banner sits in the middle.

use keepsake_app::{App, Banner, CueKind};
use keepsake_core::Environment;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Sparkles dim after this share of their lifetime.
const SPARKLE_FADE_AT: f64 = 0.6;

/// Render live cues inside `area`.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    if area.is_empty() {
        return;
    }

    let now = app.now();
    let effects = app.effects();
    for cue in effects.live_cues(now) {
        let progress = cue.progress(now);
        match &cue.kind {
            CueKind::Heart { glyph, enhanced } => {
                let style = if *enhanced {
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red)
                };
                put(frame, area, cue.x, cue.y * (1.0 - progress), *glyph, style);
            },
            CueKind::Sparkle { glyph } => {
                let mut style = Style::default().fg(Color::Yellow);
                if progress > SPARKLE_FADE_AT {
                    style = style.add_modifier(Modifier::DIM);
                }
                put(frame, area, cue.x, cue.y, *glyph, style);
            },
            CueKind::Glow | CueKind::Banner(_) => {},
        }
    }

    if let Some(banner) = effects.banner() {
        render_banner(frame, banner, area);
    }
}

/// Draw `glyph` at fractional position `(x, y)` of `area`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn put(frame: &mut Frame, area: Rect, x: f64, y: f64, glyph: char, style: Style) {
    let col = area.x + (x.clamp(0.0, 1.0) * f64::from(area.width - 1)).round() as u16;
    let row = area.y + (y.clamp(0.0, 1.0) * f64::from(area.height - 1)).round() as u16;
    if let Some(cell) = frame.buffer_mut().cell_mut((col, row)) {
        cell.set_char(glyph).set_style(style);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_banner(frame: &mut Frame, banner: &Banner, area: Rect) {
    let lines = banner.lines();
    let text_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let width = (text_width + 4).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let style = match banner {
        Banner::Boundary { .. } => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
    };
    let paragraph = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
