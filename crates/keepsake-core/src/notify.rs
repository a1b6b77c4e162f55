//! Lifecycle notifications and their subscribers.
//!
//! The navigator publishes a [`NavigationEvent`] for every accepted, settled,
//! or rejected request. Decorative collaborators subscribe per [`EventKind`].
//!
//! Handlers are isolated from one another and from the navigator: an error
//! return or a panic inside one handler is logged and counted, and dispatch
//! carries on with the next handler. Nothing a handler does can change
//! navigation state; it only sees a read-only [`NavigatorView`].

use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
};

use crate::{error::Rejection, label::PageLabel, navigator::Direction};

// cargo-fuzz always builds with `-Cpanic=abort`.
#[cfg(all(panic = "abort", not(fuzzing)))]
compile_error!("subscriber isolation relies on catch_unwind; build with panic = \"unwind\"");

/// Result type returned by subscribers.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

type Handler = Box<dyn FnMut(&NavigationEvent, &NavigatorView) -> HandlerResult>;

/// Notification categories a handler can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A flip was accepted and has started animating.
    Started,
    /// Navigation came to rest.
    Settled,
    /// A request was rejected.
    Rejected,
}

/// Navigation lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A flip was accepted. Emitted synchronously from `advance` / `retreat`.
    Started {
        /// Which way the page turns.
        direction: Direction,
        /// Index before the flip.
        from: usize,
        /// Index after the flip.
        to: usize,
    },

    /// Navigation came to rest at `index`.
    Settled {
        /// Index navigation settled on.
        index: usize,
        /// `false` for instantaneous jumps.
        animated: bool,
    },

    /// A request was not applied.
    Rejected {
        /// Why, and where the reader was.
        rejection: Rejection,
    },
}

impl NavigationEvent {
    /// Category of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Started { .. } => EventKind::Started,
            Self::Settled { .. } => EventKind::Settled,
            Self::Rejected { .. } => EventKind::Rejected,
        }
    }
}

/// Read-only copy of navigator state handed to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorView {
    /// Current index in `[0, N]`.
    pub current_index: usize,
    /// Number of pages (N).
    pub len: usize,
    /// Whether a flip is in flight.
    pub is_animating: bool,
}

impl NavigatorView {
    /// Display token for the current index.
    pub fn label(&self) -> PageLabel {
        PageLabel::for_index(self.current_index, self.len)
    }

    /// `current_index > 0`.
    pub fn can_retreat(&self) -> bool {
        self.current_index > 0
    }

    /// `current_index < N`.
    pub fn can_advance(&self) -> bool {
        self.current_index < self.len
    }
}

/// Identifies a subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler,
}

/// Ordered list of subscribers.
#[derive(Default)]
pub struct Subscribers {
    subscriptions: Vec<Subscription>,
    next_id: u64,
    failures: u64,
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.subscriptions.len())
            .field("failures", &self.failures)
            .finish()
    }
}

impl Subscribers {
    /// Create an empty subscriber list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`.
    ///
    /// Handlers run in registration order.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&NavigationEvent, &NavigatorView) -> HandlerResult + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscriptions.push(Subscription { id, kind, handler: Box::new(handler) });
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver `event` to every handler subscribed to its kind.
    ///
    /// Returns the number of handlers that failed during this dispatch.
    /// Panics are caught with `catch_unwind`, which only works when the
    /// profile unwinds.
    pub fn dispatch(&mut self, event: &NavigationEvent, view: &NavigatorView) -> usize {
        let kind = event.kind();
        let mut failed = 0;

        for sub in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (sub.handler)(event, view)));
            match outcome {
                Ok(Ok(())) => {},
                Ok(Err(e)) => {
                    tracing::warn!(subscription = sub.id.0, ?kind, "subscriber failed: {e}");
                    failed += 1;
                },
                Err(_) => {
                    tracing::warn!(subscription = sub.id.0, ?kind, "subscriber panicked");
                    failed += 1;
                },
            }
        }

        self.failures += failed as u64;
        failed
    }

    /// Number of registered subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether no subscriptions are registered.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Total handler failures since creation.
    pub fn failures(&self) -> u64 {
        self.failures
    }
}
