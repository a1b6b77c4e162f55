//! Page navigation state machine.
//!
//! [`PageNavigator`] owns the current index, the deck, and the in-flight flip.
//! It is a pure state machine: callers pass the current time into every
//! operation that schedules or fires a timer, and drive settle completion by
//! calling [`PageNavigator::handle_tick`].
//!
//! # States
//!
//! ```text
//!            advance / retreat (accepted)
//!   Idle  ─────────────────────────────────▶  Animating
//!    ▲                                            │
//!    └──────────── settle timer fires ◀───────────┘
//! ```
//!
//! `jump_to` moves between indices without passing through `Animating`.
//! While `Animating`, every request is rejected with
//! [`RejectReason::AnimationInProgress`]; requests are never queued.

use std::{fmt, ops::Sub, time::Duration};

use crate::{
    deck::{Deck, PageFace, PageMotion},
    error::{DeckError, RejectReason, Rejection},
    label::PageLabel,
    notify::{
        EventKind, HandlerResult, NavigationEvent, NavigatorView, Subscribers, SubscriptionId,
    },
    timer::{TimerHandle, TimerQueue},
};

/// Settle delay used when none is configured.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(600);

/// Navigator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Time from an accepted flip to its settle.
    pub settle_delay: Duration,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self { settle_delay: DEFAULT_SETTLE_DELAY }
    }
}

/// Direction of a page turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the back cover.
    Forward,
    /// Towards the front cover.
    Backward,
}

/// State machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No flip in flight; requests are accepted.
    Idle,
    /// A flip is in flight; requests are rejected.
    Animating,
}

/// An accepted flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    /// Which way the page turns.
    pub direction: Direction,
    /// Index before the flip.
    pub from: usize,
    /// Index after the flip.
    pub to: usize,
    /// Deck position of the page being turned.
    pub page: usize,
    /// Handle of the scheduled settle.
    pub settle: TimerHandle,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    direction: Direction,
    page: usize,
    to: usize,
    /// `None` while the settle is cancelled (paused).
    timer: Option<TimerHandle>,
}

/// Page navigation state machine.
///
/// Generic over the instant type so production uses `std::time::Instant` and
/// simulation uses a virtual clock.
#[derive(Debug)]
pub struct PageNavigator<I> {
    deck: Deck,
    current_index: usize,
    in_flight: Option<InFlight>,
    timers: TimerQueue<I, ()>,
    subscribers: Subscribers,
    config: NavigatorConfig,
}

impl<I> PageNavigator<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create a navigator at the cover of `deck`.
    pub fn new(deck: Deck, config: NavigatorConfig) -> Self {
        Self {
            deck,
            current_index: 0,
            in_flight: None,
            timers: TimerQueue::new(),
            subscribers: Subscribers::new(),
            config,
        }
    }

    /// Create a navigator over a fresh deck of `len` pages.
    pub fn with_len(len: usize, config: NavigatorConfig) -> Result<Self, DeckError> {
        Ok(Self::new(Deck::new(len)?, config))
    }

    /// Turn forward one page.
    ///
    /// Accepted only when idle and not at the back cover. The turned page is
    /// marked flipping, the index moves immediately, and `Started` is emitted
    /// before this returns. The page becomes flipped when the settle fires.
    pub fn advance(&mut self, now: I) -> Result<Flip, Rejection> {
        if self.in_flight.is_some() {
            return Err(self.reject(RejectReason::AnimationInProgress));
        }
        if self.current_index >= self.deck.len() {
            return Err(self.reject(RejectReason::AtEnd));
        }

        let from = self.current_index;
        let page = from;
        self.current_index = from + 1;
        Ok(self.begin_flip(now, Direction::Forward, from, page))
    }

    /// Turn back one page.
    ///
    /// Symmetric to [`Self::advance`]: the page being returned to is marked
    /// flipping and becomes unflipped when the settle fires.
    pub fn retreat(&mut self, now: I) -> Result<Flip, Rejection> {
        if self.in_flight.is_some() {
            return Err(self.reject(RejectReason::AnimationInProgress));
        }
        if self.current_index == 0 {
            return Err(self.reject(RejectReason::AtBeginning));
        }

        let from = self.current_index;
        self.current_index = from - 1;
        let page = self.current_index;
        Ok(self.begin_flip(now, Direction::Backward, from, page))
    }

    /// Jump straight to `target` without animating.
    ///
    /// Pages before `target` become flipped, the rest unflipped, and
    /// `Settled` is emitted before this returns.
    pub fn jump_to(&mut self, target: usize) -> Result<usize, Rejection> {
        if self.in_flight.is_some() {
            return Err(self.reject(RejectReason::AnimationInProgress));
        }
        let last = self.deck.len();
        if target > last {
            return Err(self.reject(RejectReason::TargetOutOfRange { target, last }));
        }

        tracing::debug!(from = self.current_index, to = target, "jump");
        self.deck.reset_to(target);
        self.current_index = target;
        self.emit(NavigationEvent::Settled { index: target, animated: false });
        Ok(target)
    }

    /// Fire settle timers due at `now`.
    ///
    /// Returns the index navigation settled on, if a flip completed.
    pub fn handle_tick(&mut self, now: I) -> Option<usize> {
        let mut settled = None;
        for (handle, ()) in self.timers.expire(now) {
            let Some(flight) = self.in_flight else {
                continue;
            };
            if flight.timer != Some(handle) {
                continue;
            }
            settled = Some(self.complete_flip(flight));
        }
        settled
    }

    /// Display token for the current index.
    pub fn current_label(&self) -> PageLabel {
        PageLabel::for_index(self.current_index, self.deck.len())
    }

    /// Current index in `[0, N]`.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of pages (N).
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    /// Always `false`: a navigator is built over a non-empty deck.
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Whether a flip is in flight.
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Current state machine phase.
    pub fn phase(&self) -> Phase {
        if self.is_animating() { Phase::Animating } else { Phase::Idle }
    }

    /// `current_index > 0`.
    pub fn can_retreat(&self) -> bool {
        self.current_index > 0
    }

    /// `current_index < N`.
    pub fn can_advance(&self) -> bool {
        self.current_index < self.deck.len()
    }

    /// Read-only copy of the navigation state.
    pub fn view(&self) -> NavigatorView {
        NavigatorView {
            current_index: self.current_index,
            len: self.deck.len(),
            is_animating: self.is_animating(),
        }
    }

    /// The pages and their flags.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Active configuration.
    pub fn config(&self) -> NavigatorConfig {
        self.config
    }

    /// Handle of the scheduled settle, if a flip is in flight and not paused.
    pub fn pending_settle(&self) -> Option<TimerHandle> {
        self.in_flight.and_then(|f| f.timer)
    }

    /// Time until the pending settle is due.
    pub fn next_settle_in(&self, now: I) -> Option<Duration> {
        self.timers.next_due_in(now)
    }

    /// Cancel the pending settle timer, leaving the flip in flight.
    ///
    /// The navigator stays `Animating` until [`Self::resume_settle`] is called
    /// and the rescheduled timer fires. Returns the cancelled handle.
    pub fn cancel_settle(&mut self) -> Option<TimerHandle> {
        let flight = self.in_flight.as_mut()?;
        let handle = flight.timer.take()?;
        self.timers.cancel(handle);
        tracing::debug!(page = flight.page, timer = handle.id(), "settle paused");
        Some(handle)
    }

    /// Reschedule a settle cancelled by [`Self::cancel_settle`].
    ///
    /// Returns `None` if no flip is in flight or its timer is still pending.
    pub fn resume_settle(&mut self, now: I) -> Option<TimerHandle> {
        let delay = self.config.settle_delay;
        let flight = self.in_flight.as_mut()?;
        if flight.timer.is_some() {
            return None;
        }
        let handle = self.timers.schedule(now, delay, ());
        flight.timer = Some(handle);
        tracing::debug!(page = flight.page, timer = handle.id(), "settle resumed");
        Some(handle)
    }

    /// Register a lifecycle handler.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&NavigationEvent, &NavigatorView) -> HandlerResult + 'static,
    {
        self.subscribers.subscribe(kind, handler)
    }

    /// Remove a lifecycle handler.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Total subscriber failures caught so far.
    pub fn subscriber_failures(&self) -> u64 {
        self.subscribers.failures()
    }

    /// Debug snapshot of the full navigation state.
    pub fn dump_state(&self) -> NavigatorSnapshot {
        NavigatorSnapshot {
            current_index: self.current_index,
            len: self.deck.len(),
            label: self.current_label(),
            phase: self.phase(),
            settle_paused: self.in_flight.is_some_and(|f| f.timer.is_none()),
            pages: self.deck.iter().map(|p| (p.face(), p.motion())).collect(),
        }
    }

    fn begin_flip(&mut self, now: I, direction: Direction, from: usize, page: usize) -> Flip {
        let to = self.current_index;
        self.deck.set_motion(page, PageMotion::Flipping);
        let settle = self.timers.schedule(now, self.config.settle_delay, ());
        self.in_flight = Some(InFlight { direction, page, to, timer: Some(settle) });

        tracing::debug!(?direction, from, to, page, timer = settle.id(), "flip started");
        self.emit(NavigationEvent::Started { direction, from, to });

        Flip { direction, from, to, page, settle }
    }

    fn complete_flip(&mut self, flight: InFlight) -> usize {
        let face = match flight.direction {
            Direction::Forward => PageFace::Flipped,
            Direction::Backward => PageFace::Unflipped,
        };
        self.deck.settle(flight.page, face);
        self.in_flight = None;

        tracing::debug!(index = flight.to, page = flight.page, "flip settled");
        self.emit(NavigationEvent::Settled { index: flight.to, animated: true });
        flight.to
    }

    fn reject(&mut self, reason: RejectReason) -> Rejection {
        let rejection = Rejection { reason, at: self.current_index };
        tracing::debug!(at = rejection.at, %reason, "navigation rejected");
        self.emit(NavigationEvent::Rejected { rejection });
        rejection
    }

    fn emit(&mut self, event: NavigationEvent) {
        let view = self.view();
        self.subscribers.dispatch(&event, &view);
    }
}

/// Debug dump produced by [`PageNavigator::dump_state`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorSnapshot {
    /// Current index in `[0, N]`.
    pub current_index: usize,
    /// Number of pages (N).
    pub len: usize,
    /// Display token for the current index.
    pub label: PageLabel,
    /// State machine phase.
    pub phase: Phase,
    /// Whether an in-flight flip has its settle cancelled.
    pub settle_paused: bool,
    /// Face and motion of each page, in deck order.
    pub pages: Vec<(PageFace, PageMotion)>,
}

impl fmt::Display for NavigatorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match (self.phase, self.settle_paused) {
            (Phase::Idle, _) => "idle",
            (Phase::Animating, false) => "animating",
            (Phase::Animating, true) => "paused",
        };
        writeln!(f, "page {}/{} ({}) {phase}", self.current_index, self.len, self.label)?;
        for (i, (face, motion)) in self.pages.iter().enumerate() {
            let face = match face {
                PageFace::Flipped => "flipped",
                PageFace::Unflipped => "unflipped",
            };
            match motion {
                PageMotion::Idle => writeln!(f, "  #{i:02} {face}")?,
                PageMotion::Flipping => writeln!(f, "  #{i:02} {face} flipping")?,
            }
        }
        Ok(())
    }
}
