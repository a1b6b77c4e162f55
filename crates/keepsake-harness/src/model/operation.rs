//! Operations for model-based testing.
//!
//! Operations represent everything a reader can do to the book. They are
//! generated randomly by proptest or the fuzzer and applied to both the model
//! and the real implementation.

use arbitrary::Arbitrary;

/// Input channel used to request a single-page turn.
///
/// Every channel must produce the same navigation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Via {
    /// Arrow key.
    Key,
    /// Space bar (forward) or backspace (backward).
    AltKey,
    /// Previous / next button in the footer.
    Button,
    /// Click on the book surface.
    BookClick,
    /// Horizontal swipe across the book.
    Swipe,
}

/// Operations that can be applied to the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Turn forward one page.
    Advance(Via),

    /// Turn back one page.
    Retreat(Via),

    /// Jump to an index without animating. May be out of range.
    JumpTo(u8),

    /// Jump to the cover.
    Home,

    /// Jump past the last page.
    End,

    /// Advance simulation time by this many milliseconds, then tick.
    Wait(u16),

    /// Toggle decorative effects. Never affects navigation.
    ToggleEffects,
}

/// How the model classified an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelOutcome {
    /// Navigation changed.
    Accepted,
    /// Rejected because a flip was in flight.
    Busy,
    /// Rejected because the target is outside `[0, N]`.
    OutOfBounds,
    /// Did not request navigation.
    Passive,
}
