//! Terminal UI for Keepsake
//!
//! A thin shell over [`keepsake_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`keepsake_app::Runtime`].
//!
//! This crate handles terminal rendering, album file loading, and the
//! production [`keepsake_core::Environment`].

#![forbid(unsafe_code)]

pub mod config;
pub mod system_env;
pub mod terminal;
pub mod ui;

pub use config::{AlbumFile, ConfigError};
pub use keepsake_app::{App, AppAction, AppConfig, AppEvent, Driver, KeyInput, Runtime};
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
