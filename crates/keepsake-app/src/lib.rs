//! Application layer for Keepsake
//!
//! Pure state machines and a generic runtime around the page navigator,
//! enabling deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`App`]: input routing, navigation, effects, and indicator state
//! - [`KeyboardAdapter`], [`PointerAdapter`], [`TouchAdapter`]: raw input to
//!   [`Intent`]s
//! - [`Effects`]: decorative cues driven by navigation events
//! - [`Indicator`]: page label and button states
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]

mod action;
mod album;
mod app;
mod driver;
mod effects;
mod event;
mod indicator;
mod input;
mod layout;
mod pointer;
mod runtime;
mod secret;
#[cfg(test)]
mod testing;
mod touch;

pub use action::AppAction;
pub use album::{Album, Memory};
pub use app::{App, AppConfig, DEFAULT_SECRET};
pub use driver::Driver;
pub use effects::{Banner, Cue, CueKind, Effects, EffectsConfig};
pub use event::AppEvent;
pub use indicator::{Affordances, Indicator};
pub use input::{Intent, KeyInput, KeyboardAdapter};
pub use layout::{CellRect, CellSize, ScreenLayout};
pub use pointer::{Bounds, ClickOutcome, GestureConfig, Point, PointerAdapter};
pub use runtime::Runtime;
pub use secret::SecretWord;
pub use touch::{Gesture, TouchAdapter};
