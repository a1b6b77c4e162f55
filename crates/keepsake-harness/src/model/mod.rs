//! Reference model for model-based testing.
//!
//! [`ModelBook`] is a simple, obviously-correct book; [`Operation`] is the
//! vocabulary shared by the model, the property tests, and the fuzzer.

mod book;
mod operation;

use keepsake_core::{PageFace, PageMotion, Phase};

pub use book::{ModelBook, ObservableState};
pub use operation::{ModelOutcome, Operation, Via};

use crate::SystemSnapshot;

impl ObservableState {
    /// Project a real snapshot onto the model's vocabulary.
    pub fn from_snapshot(snapshot: &SystemSnapshot) -> Self {
        Self {
            index: snapshot.current_index,
            label: snapshot.label,
            animating: snapshot.phase == Phase::Animating,
            flipping: snapshot.pages.iter().position(|(_, m)| *m == PageMotion::Flipping),
            flipped: snapshot.pages.iter().map(|(face, _)| *face == PageFace::Flipped).collect(),
        }
    }
}
