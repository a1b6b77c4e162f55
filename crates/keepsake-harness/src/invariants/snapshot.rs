//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the book at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use std::{ops::Sub, time::Duration};

use keepsake_app::{Affordances, App};
use keepsake_core::{Environment, PageFace, PageLabel, PageMotion, PageNavigator, Phase};

/// Snapshot of navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSnapshot {
    /// Current index.
    pub current_index: usize,
    /// Number of pages (N).
    pub len: usize,
    /// Label the navigator reports.
    pub label: PageLabel,
    /// State machine phase.
    pub phase: Phase,
    /// Face and motion of each page, in deck order.
    pub pages: Vec<(PageFace, PageMotion)>,
    /// What the page indicator shows. `None` for a bare navigator.
    pub indicator: Option<Affordances>,
}

impl SystemSnapshot {
    /// Snapshot a bare navigator.
    pub fn from_navigator<I>(navigator: &PageNavigator<I>) -> Self
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        let state = navigator.dump_state();
        Self {
            current_index: state.current_index,
            len: state.len,
            label: state.label,
            phase: state.phase,
            pages: state.pages,
            indicator: None,
        }
    }

    /// Snapshot an application, including its indicator.
    pub fn from_app<E: Environment>(app: &App<E>) -> Self {
        Self { indicator: Some(app.affordances()), ..Self::from_navigator(app.navigator()) }
    }

    /// Number of pages in motion.
    pub fn flipping_count(&self) -> usize {
        self.pages.iter().filter(|(_, motion)| *motion == PageMotion::Flipping).count()
    }
}
