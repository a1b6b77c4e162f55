//! Terminal-agnostic keyboard input and the keyboard adapter.
//!
//! [`KeyInput`] decouples the application from terminal libraries.
//! [`KeyboardAdapter`] turns navigation keys into [`Intent`]s; keys it does not
//! recognise are left for the application to interpret.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character. Space arrives as `Char(' ')`.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (previous page).
    Backspace,
    /// Tab key.
    Tab,
    /// Escape key (quit).
    Esc,
    /// Left arrow key (previous page).
    Left,
    /// Right arrow key (next page).
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key (jump to cover).
    Home,
    /// End key (jump to back cover).
    End,
}

/// A navigation request produced by an input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Turn forward one page.
    Advance,
    /// Turn back one page.
    Retreat,
    /// Jump to an index without animating.
    JumpTo(usize),
}

/// Maps navigation keys to intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardAdapter {
    last_index: usize,
}

impl KeyboardAdapter {
    /// Adapter for a deck whose back cover sits at `last_index` (N).
    pub fn new(last_index: usize) -> Self {
        Self { last_index }
    }

    /// Intent for `key`, if it is a navigation key.
    ///
    /// Right and Space advance; Left and Backspace retreat; Home and End jump
    /// to the covers.
    pub fn intent(&self, key: KeyInput) -> Option<Intent> {
        match key {
            KeyInput::Right | KeyInput::Char(' ') => Some(Intent::Advance),
            KeyInput::Left | KeyInput::Backspace => Some(Intent::Retreat),
            KeyInput::Home => Some(Intent::JumpTo(0)),
            KeyInput::End => Some(Intent::JumpTo(self.last_index)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_keys() {
        let keys = KeyboardAdapter::new(25);
        assert_eq!(keys.intent(KeyInput::Right), Some(Intent::Advance));
        assert_eq!(keys.intent(KeyInput::Char(' ')), Some(Intent::Advance));
        assert_eq!(keys.intent(KeyInput::Left), Some(Intent::Retreat));
        assert_eq!(keys.intent(KeyInput::Backspace), Some(Intent::Retreat));
        assert_eq!(keys.intent(KeyInput::Home), Some(Intent::JumpTo(0)));
        assert_eq!(keys.intent(KeyInput::End), Some(Intent::JumpTo(25)));
    }

    #[test]
    fn other_keys_pass_through() {
        let keys = KeyboardAdapter::new(25);
        for key in [KeyInput::Char('x'), KeyInput::Enter, KeyInput::Up, KeyInput::Esc] {
            assert_eq!(keys.intent(key), None);
        }
    }
}
