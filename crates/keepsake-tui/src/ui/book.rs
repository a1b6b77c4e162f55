//! The book surface
//!
//! Draws the deck as a strip of page markers above the current page. The
//! page being turned is highlighted while a flip is in flight, and the border
//! glows after a milestone page settles.

use keepsake_app::App;
use keepsake_core::{Environment, Page, PageLabel};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const FLIPPED_MARKER: &str = "▮";
const UNFLIPPED_MARKER: &str = "▯";
const FLIPPING_MARKER: &str = "◆";
const BORDER_COLOR: Color = Color::Rgb(193, 154, 107);

/// Render the book.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    if area.is_empty() {
        return;
    }

    let navigator = app.navigator();
    let index = navigator.current_index();

    let border_style = if app.effects().is_glowing() {
        Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BORDER_COLOR)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", app.album().title));

    let strip: Vec<Span> = navigator.deck().iter().map(page_marker).collect();

    let (heading, caption) = match (navigator.current_label(), app.album().page(index)) {
        (PageLabel::End, _) | (_, None) => (PageLabel::End.title(), String::new()),
        (_, Some(memory)) => (memory.title.clone(), memory.caption.clone()),
    };

    let mut lines = vec![
        Line::from(strip),
        Line::default(),
        Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))),
        Line::default(),
        Line::from(caption),
    ];
    if navigator.is_animating() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "~ turning the page ~",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let paragraph =
        Paragraph::new(lines).block(block).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn page_marker(page: &Page) -> Span<'static> {
    if page.is_flipping() {
        Span::styled(FLIPPING_MARKER, Style::default().fg(Color::Yellow))
    } else if page.is_flipped() {
        Span::styled(FLIPPED_MARKER, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(UNFLIPPED_MARKER, Style::default().fg(BORDER_COLOR))
    }
}
