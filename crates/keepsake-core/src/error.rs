//! Error types for the navigation core.
//!
//! Navigation requests that cannot be honoured are not failures of the system:
//! they come back as a [`Rejection`] value, state is left untouched, and the
//! same value is broadcast to subscribers.

use thiserror::Error;

/// Errors constructing a [`crate::Deck`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    /// A deck needs at least one page.
    #[error("deck must contain at least one page")]
    Empty,
}

/// Classification of a rejected navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectKind {
    /// Request would leave `[0, N]`.
    OutOfBounds,
    /// A flip is still in flight.
    Busy,
}

/// Why a navigation request was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// `advance` at the back cover.
    #[error("already at end")]
    AtEnd,

    /// `retreat` at the front cover.
    #[error("already at beginning")]
    AtBeginning,

    /// `jump_to` outside `[0, N]`.
    #[error("target {target} outside 0..={last}")]
    TargetOutOfRange {
        /// Requested index.
        target: usize,
        /// Largest valid index (N).
        last: usize,
    },

    /// Another navigation has not settled yet.
    #[error("animation in progress")]
    AnimationInProgress,
}

impl RejectReason {
    /// Coarse classification of this reason.
    pub fn kind(&self) -> RejectKind {
        match self {
            Self::AtEnd | Self::AtBeginning | Self::TargetOutOfRange { .. } => {
                RejectKind::OutOfBounds
            },
            Self::AnimationInProgress => RejectKind::Busy,
        }
    }
}

/// A navigation request that was not applied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("navigation rejected at page {at}: {reason}")]
pub struct Rejection {
    /// Why the request was rejected.
    pub reason: RejectReason,
    /// Current index when the request arrived.
    pub at: usize,
}

impl Rejection {
    /// Coarse classification of this rejection.
    pub fn kind(&self) -> RejectKind {
        self.reason.kind()
    }

    /// Returns true if retrying after the current flip settles may succeed.
    pub fn is_transient(&self) -> bool {
        self.kind() == RejectKind::Busy
    }
}
