//! Fuzz target for album file parsing
//!
//! # Invariants
//!
//! - Arbitrary text either parses or returns a `ConfigError`
//! - A parsed album always has at least one page and builds an App
//! - NEVER panic

#![no_main]

use keepsake_app::{App, AppConfig};
use keepsake_harness::SimEnv;
use keepsake_tui::AlbumFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(file) = AlbumFile::parse(text) else {
        return;
    };

    let album = file.album();
    assert!(!album.is_empty());

    let mut config = AppConfig::default();
    file.apply(&mut config);
    assert!(App::new(SimEnv::default(), album, config).is_ok());
});
