//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into the frame.
//!
//! Regions come from [`keepsake_app::ScreenLayout`] so that what is drawn
//! and what is hit-tested always agree.

mod book;
mod controls;
mod effects;
mod status;

use keepsake_app::{App, CellRect};
use keepsake_core::Environment;
use ratatui::{Frame, layout::Rect};

/// Render the entire UI.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>) {
    let layout = app.layout();
    let area = frame.area();
    let rect = |cells: CellRect| to_rect(cells).intersection(area);

    let book = rect(layout.book);
    let (prev, indicator, next) =
        (rect(layout.prev_button), rect(layout.indicator), rect(layout.next_button));

    book::render(frame, app, book);
    controls::render(frame, app, prev, indicator, next);
    status::render(frame, app, rect(layout.status));
    effects::render(frame, app, book);
}

fn to_rect(cells: CellRect) -> Rect {
    Rect::new(cells.x, cells.y, cells.width, cells.height)
}

#[cfg(test)]
pub(crate) mod tests {
    use keepsake_app::{Album, AppConfig, AppEvent, EffectsConfig, KeyInput};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::SystemEnv;

    pub(crate) fn quiet_app() -> App<SystemEnv> {
        let config = AppConfig {
            effects: EffectsConfig { enabled: false, ..EffectsConfig::default() },
            ..AppConfig::default()
        };
        App::new(SystemEnv::new(), Album::default(), config).unwrap()
    }

    pub(crate) fn draw(app: &App<SystemEnv>) -> String {
        let (cols, rows) = app.terminal_size();
        let mut terminal = Terminal::new(TestBackend::new(cols, rows)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    pub(crate) fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buffer.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn cover_shows_album_and_disabled_prev() {
        let app = quiet_app();
        let screen = draw(&app);
        assert!(screen.contains("Our Story"), "{screen}");
        assert!(screen.contains("Cover"));
        assert!(screen.contains("Prev"));
        assert!(screen.contains("Next"));
    }

    #[test]
    fn end_page_after_jump() {
        let mut app = quiet_app();
        app.handle(AppEvent::Key(KeyInput::End));
        let screen = draw(&app);
        assert!(screen.contains("The End"), "{screen}");
        assert!(screen.contains("25/25"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = quiet_app();
        app.handle(AppEvent::Resize(4, 2));
        draw(&app);
        app.handle(AppEvent::Resize(0, 0));
        let mut terminal = Terminal::new(TestBackend::new(1, 1)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }
}
