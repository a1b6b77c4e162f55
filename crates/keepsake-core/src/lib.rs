//! Navigation core for Keepsake
//!
//! Sans-IO state machine that turns pages of a memory book. Time is passed in
//! explicitly and animation completion is an explicit timer, so the same code
//! runs in the terminal frontend and in deterministic simulation.
//!
//! # Components
//!
//! - [`Deck`]: ordered pages with their flipped / flipping flags
//! - [`PageNavigator`]: the `Idle` / `Animating` state machine
//! - [`TimerQueue`]: scheduled tasks with cancel handles
//! - [`Subscribers`]: lifecycle notification fan-out with per-handler isolation
//! - [`Environment`]: time and randomness supplied by the host

#![forbid(unsafe_code)]

pub mod deck;
pub mod env;
pub mod error;
pub mod label;
pub mod navigator;
pub mod notify;
pub mod timer;

pub use deck::{Deck, Page, PageFace, PageMotion};
pub use env::Environment;
pub use error::{DeckError, RejectKind, RejectReason, Rejection};
pub use label::PageLabel;
pub use navigator::{
    Direction, Flip, NavigatorConfig, NavigatorSnapshot, PageNavigator, Phase,
    DEFAULT_SETTLE_DELAY,
};
pub use notify::{
    EventKind, HandlerResult, NavigationEvent, NavigatorView, Subscribers, SubscriptionId,
};
pub use timer::{TimerHandle, TimerQueue};
