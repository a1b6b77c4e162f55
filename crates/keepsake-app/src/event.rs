//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine. Frontends translate their native events into
//! these; pointer positions are in surface pixels (see [`crate::CellSize`]).

use crate::{KeyInput, Point};

/// Events processed by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// A complete click, for hosts that report clicks directly.
    Click(Point),

    /// Primary button or finger pressed.
    PointerDown(Point),

    /// Pointer moved while pressed.
    PointerDrag(Point),

    /// Primary button or finger released.
    PointerUp(Point),

    /// Periodic tick. Fires settle timers and advances effects.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Host surface shown or hidden (terminal focus gained or lost).
    Visibility(bool),
}
