//! Deterministic simulation harness for Keepsake.
//!
//! Virtual-clock implementations of the [`keepsake_core::Environment`] and
//! [`keepsake_app::Driver`] traits, so the production runtime can be replayed
//! against a script with reproducible timing and randomness.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference book. Operations are applied to
//! both the model and the real application, and their observable states are
//! compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the
//! navigation invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod model;
pub mod scenario;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    AnimatingIffFlipping, AtMostOneFlipping, IdleLayout, IndexInBounds, IndicatorInStep,
    Invariant, InvariantRegistry, InvariantResult, LabelMatchesIndex, SystemSnapshot, Violation,
};
pub use model::{ModelBook, ModelOutcome, ObservableState, Operation, Via};
pub use sim_driver::{Record, Recorder, SimDriver, SimDriverError, Step};
pub use sim_env::{SimEnv, SimInstant};
