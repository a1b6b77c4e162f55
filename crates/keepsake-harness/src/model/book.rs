//! Reference book model.
//!
//! A deliberately naive rendition of page navigation: a list of flipped
//! flags, an index, and at most one flip with its start time. It is the oracle
//! against which the real navigator and application are verified.

use std::time::Duration;

use keepsake_core::PageLabel;

use super::operation::{ModelOutcome, Operation};

/// Observable state for oracle comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Current index.
    pub index: usize,
    /// Display token for the index.
    pub label: PageLabel,
    /// Whether a flip is in flight.
    pub animating: bool,
    /// Page in motion, if any.
    pub flipping: Option<usize>,
    /// Settled face of every page.
    pub flipped: Vec<bool>,
}

#[derive(Debug, Clone, Copy)]
struct ModelFlip {
    forward: bool,
    page: usize,
    started: Duration,
}

/// Model book - the reference implementation.
#[derive(Debug, Clone)]
pub struct ModelBook {
    flipped: Vec<bool>,
    index: usize,
    flip: Option<ModelFlip>,
    now: Duration,
    settle_delay: Duration,
}

impl ModelBook {
    /// Book of `len` pages at the cover.
    pub fn new(len: usize, settle_delay: Duration) -> Self {
        Self { flipped: vec![false; len], index: 0, flip: None, now: Duration::ZERO, settle_delay }
    }

    /// Number of pages (N).
    pub fn len(&self) -> usize {
        self.flipped.len()
    }

    /// Whether the book has no pages.
    pub fn is_empty(&self) -> bool {
        self.flipped.is_empty()
    }

    /// Time since the model started.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Apply an operation.
    pub fn apply(&mut self, op: &Operation) -> ModelOutcome {
        match *op {
            Operation::Advance(_) => self.turn(true),
            Operation::Retreat(_) => self.turn(false),
            Operation::JumpTo(target) => self.jump(usize::from(target)),
            Operation::Home => self.jump(0),
            Operation::End => self.jump(self.len()),
            Operation::Wait(ms) => {
                self.now += Duration::from_millis(u64::from(ms));
                self.settle_if_due();
                ModelOutcome::Passive
            },
            Operation::ToggleEffects => ModelOutcome::Passive,
        }
    }

    /// Current observable state.
    pub fn observe(&self) -> ObservableState {
        ObservableState {
            index: self.index,
            label: self.label(),
            animating: self.flip.is_some(),
            flipping: self.flip.map(|f| f.page),
            flipped: self.flipped.clone(),
        }
    }

    fn label(&self) -> PageLabel {
        if self.index == 0 {
            PageLabel::Cover
        } else if self.index == self.len() {
            PageLabel::End
        } else {
            PageLabel::Memory(self.index)
        }
    }

    fn turn(&mut self, forward: bool) -> ModelOutcome {
        if self.flip.is_some() {
            return ModelOutcome::Busy;
        }
        let page = if forward {
            if self.index == self.len() {
                return ModelOutcome::OutOfBounds;
            }
            self.index += 1;
            self.index - 1
        } else {
            if self.index == 0 {
                return ModelOutcome::OutOfBounds;
            }
            self.index -= 1;
            self.index
        };
        self.flip = Some(ModelFlip { forward, page, started: self.now });
        ModelOutcome::Accepted
    }

    fn jump(&mut self, target: usize) -> ModelOutcome {
        if self.flip.is_some() {
            return ModelOutcome::Busy;
        }
        if target > self.len() {
            return ModelOutcome::OutOfBounds;
        }
        for (i, flipped) in self.flipped.iter_mut().enumerate() {
            *flipped = i < target;
        }
        self.index = target;
        ModelOutcome::Accepted
    }

    fn settle_if_due(&mut self) {
        let Some(flip) = self.flip else {
            return;
        };
        if self.now.saturating_sub(flip.started) >= self.settle_delay {
            self.flipped[flip.page] = flip.forward;
            self.flip = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Via;

    const SETTLE: Duration = Duration::from_millis(600);

    #[test]
    fn flip_settles_after_delay() {
        let mut book = ModelBook::new(3, SETTLE);
        assert_eq!(book.apply(&Operation::Advance(Via::Key)), ModelOutcome::Accepted);
        assert_eq!(book.observe().flipping, Some(0));
        assert_eq!(book.apply(&Operation::Advance(Via::Key)), ModelOutcome::Busy);

        book.apply(&Operation::Wait(599));
        assert!(book.observe().animating);
        book.apply(&Operation::Wait(1));

        let state = book.observe();
        assert!(!state.animating);
        assert_eq!(state.index, 1);
        assert_eq!(state.flipped, vec![true, false, false]);
    }

    #[test]
    fn bounds_are_rejected() {
        let mut book = ModelBook::new(2, SETTLE);
        assert_eq!(book.apply(&Operation::Retreat(Via::Button)), ModelOutcome::OutOfBounds);
        assert_eq!(book.apply(&Operation::JumpTo(3)), ModelOutcome::OutOfBounds);
        assert_eq!(book.apply(&Operation::End), ModelOutcome::Accepted);
        assert_eq!(book.observe().label, PageLabel::End);
        assert_eq!(book.apply(&Operation::Advance(Via::Swipe)), ModelOutcome::OutOfBounds);
    }
}
