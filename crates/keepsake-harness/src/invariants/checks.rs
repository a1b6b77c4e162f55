//! Standard invariant checks.
//!
//! Each check names one property of the book that every reachable state
//! satisfies, independent of how the state was reached.

use keepsake_core::{PageFace, PageLabel, PageMotion, Phase};

use super::{Invariant, InvariantResult, SystemSnapshot, Violation};

/// Current index stays within `[0, N]` and the deck is never empty.
pub struct IndexInBounds;

impl Invariant for IndexInBounds {
    fn name(&self) -> &'static str {
        "index_in_bounds"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if state.len == 0 || state.pages.len() != state.len {
            return Err(Violation {
                invariant: self.name(),
                message: format!("deck of {} pages reports len {}", state.pages.len(), state.len),
            });
        }
        if state.current_index > state.len {
            return Err(Violation {
                invariant: self.name(),
                message: format!("index {} past last page {}", state.current_index, state.len),
            });
        }
        Ok(())
    }
}

/// At most one page is flipping at any instant.
pub struct AtMostOneFlipping;

impl Invariant for AtMostOneFlipping {
    fn name(&self) -> &'static str {
        "at_most_one_flipping"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let flipping = state.flipping_count();
        if flipping > 1 {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{flipping} pages flipping at once"),
            });
        }
        Ok(())
    }
}

/// The navigator is animating exactly when a page is flipping.
///
/// The flipping page is the one between the old and new index: the page
/// just left behind when turning forward, the page now shown when turning
/// back. Either way it is the page at `current_index - 1` or
/// `current_index`.
pub struct AnimatingIffFlipping;

impl Invariant for AnimatingIffFlipping {
    fn name(&self) -> &'static str {
        "animating_iff_flipping"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let animating = state.phase == Phase::Animating;
        let flipping = state.pages.iter().position(|(_, m)| *m == PageMotion::Flipping);
        let adjacent = |page: usize| page + 1 == state.current_index || page == state.current_index;

        match (animating, flipping) {
            (false, None) => Ok(()),
            (true, Some(page)) if adjacent(page) => Ok(()),
            (true, Some(page)) => Err(Violation {
                invariant: self.name(),
                message: format!("page {page} flipping while at index {}", state.current_index),
            }),
            (animating, flipping) => Err(Violation {
                invariant: self.name(),
                message: format!("animating={animating} but flipping page is {flipping:?}"),
            }),
        }
    }
}

/// When idle, pages before the index are flipped and the rest unflipped.
pub struct IdleLayout;

impl Invariant for IdleLayout {
    fn name(&self) -> &'static str {
        "idle_layout"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if state.phase != Phase::Idle {
            return Ok(());
        }
        for (i, (face, _)) in state.pages.iter().enumerate() {
            let expected =
                if i < state.current_index { PageFace::Flipped } else { PageFace::Unflipped };
            if *face != expected {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "page {i} is {face:?} at index {}, expected {expected:?}",
                        state.current_index
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The label is a pure function of index and length, cover first.
pub struct LabelMatchesIndex;

impl Invariant for LabelMatchesIndex {
    fn name(&self) -> &'static str {
        "label_matches_index"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let expected = match state.current_index {
            0 => PageLabel::Cover,
            i if i == state.len => PageLabel::End,
            i => PageLabel::Memory(i),
        };
        if state.label != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "index {} of {} labelled {}, expected {expected}",
                    state.current_index, state.len, state.label
                ),
            });
        }
        Ok(())
    }
}

/// Once idle, the page indicator agrees with the navigator.
///
/// The indicator only updates on settle and rejection, so it may lag while a
/// flip is in flight.
pub struct IndicatorInStep;

impl Invariant for IndicatorInStep {
    fn name(&self) -> &'static str {
        "indicator_in_step"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(indicator) = state.indicator else {
            return Ok(());
        };
        if state.phase != Phase::Idle {
            return Ok(());
        }

        let in_step = indicator.label == state.label
            && indicator.can_retreat == (state.current_index > 0)
            && indicator.can_advance == (state.current_index < state.len);
        if !in_step {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "indicator shows {indicator:?} at index {} ({})",
                    state.current_index, state.label
                ),
            });
        }
        Ok(())
    }
}
