//! Reading the book in a real terminal.
//!
//! crossterm supplies keyboard, mouse, and focus events; ratatui draws the
//! frame. Mouse
//! positions are converted to surface pixels through a nominal [`CellSize`].

use std::{
    io::{self, Stdout, Write, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use keepsake_app::{App, AppEvent, CellSize, Driver, KeyInput};
use keepsake_core::Environment;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::ui;

/// Interval between ticks while no input arrives.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Failure talking to the terminal.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Reading input or writing a frame failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// [`Driver`] over stdout.
///
/// Enables raw mode, the alternate screen, mouse capture, and focus
/// reporting on creation and restores the terminal on [`Driver::stop`] or
/// drop.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    cell: CellSize,
    /// Event to deliver before reading the stream.
    pending: Option<AppEvent>,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched into raw mode or
    /// the alternate screen.
    pub fn new(cell: CellSize) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        let mut out = stdout();
        out.execute(EnterAlternateScreen)?;
        out.execute(EnableMouseCapture)?;
        out.execute(EnableFocusChange)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let size = terminal.size()?;

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            cell,
            pending: Some(AppEvent::Resize(size.width, size.height)),
            restored: false,
        })
    }

    /// Convert crossterm `KeyEvent` to `KeyInput`.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(KeyInput::Esc)
            },
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    /// Convert a left-button mouse event to a pointer event.
    fn convert_mouse(cell: CellSize, mouse: MouseEvent) -> Option<AppEvent> {
        let at = cell.cell_center(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(AppEvent::PointerDown(at)),
            MouseEventKind::Drag(MouseButton::Left) => Some(AppEvent::PointerDrag(at)),
            MouseEventKind::Up(MouseButton::Left) => Some(AppEvent::PointerUp(at)),
            _ => None,
        }
    }

    /// Convert a crossterm event. `None` for events the app ignores.
    fn convert_event(cell: CellSize, event: Event) -> Option<AppEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::convert_key(key).map(AppEvent::Key)
            },
            Event::Mouse(mouse) => Self::convert_mouse(cell, mouse),
            Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
            Event::FocusGained => Some(AppEvent::Visibility(true)),
            Event::FocusLost => Some(AppEvent::Visibility(false)),
            _ => None,
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        let mut out = stdout();
        out.execute(DisableFocusChange)?;
        out.execute(DisableMouseCapture)?;
        out.execute(LeaveAlternateScreen)?;
        disable_raw_mode()?;
        self.terminal.show_cursor()
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        Ok(Some(Self::convert_event(self.cell, event).unwrap_or(AppEvent::Tick)))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    None => Ok(None),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(TICK_INTERVAL) => {
                Ok(Some(AppEvent::Tick))
            }
        }
    }

    fn render<E: Environment>(&mut self, app: &App<E>) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn bell(&mut self) -> Result<(), Self::Error> {
        let mut out = stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!("failed to restore terminal: {e}");
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use keepsake_app::Point;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    #[test]
    fn keys_convert() {
        let cell = CellSize::default();
        assert_eq!(
            TerminalDriver::convert_event(cell, press(KeyCode::Right, KeyModifiers::NONE)),
            Some(AppEvent::Key(KeyInput::Right))
        );
        assert_eq!(
            TerminalDriver::convert_event(cell, press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(AppEvent::Key(KeyInput::Char(' ')))
        );
        assert_eq!(
            TerminalDriver::convert_event(cell, press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppEvent::Key(KeyInput::Esc))
        );
        let f1 = press(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(TerminalDriver::convert_event(cell, f1), None);
    }

    #[test]
    fn left_button_becomes_pointer_events() {
        let cell = CellSize { width: 10.0, height: 20.0 };
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 3, 1);
        assert_eq!(
            TerminalDriver::convert_event(cell, down),
            Some(AppEvent::PointerDown(Point::new(35.0, 30.0)))
        );

        let right = mouse(MouseEventKind::Down(MouseButton::Right), 3, 1);
        assert_eq!(TerminalDriver::convert_event(cell, right), None);
    }

    #[test]
    fn focus_maps_to_visibility() {
        let cell = CellSize::default();
        assert_eq!(
            TerminalDriver::convert_event(cell, Event::FocusLost),
            Some(AppEvent::Visibility(false))
        );
        assert_eq!(
            TerminalDriver::convert_event(cell, Event::FocusGained),
            Some(AppEvent::Visibility(true))
        );
    }
}
