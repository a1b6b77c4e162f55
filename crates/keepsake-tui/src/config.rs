//! Album file loading.
//!
//! An album is a TOML file:
//!
//! ```toml
//! title = "Our Story"
//! settle_ms = 600
//! secret = "forever"
//! milestones = [1, 8, 9, 15, 24]
//!
//! [[pages]]
//! title = "Cover"
//! caption = "Where it all began"
//! ```
//!
//! Everything except `title` and `pages` is optional and falls back to the
//! application defaults.

use std::{fs, path::Path, time::Duration};

use keepsake_app::{Album, AppConfig, Memory};
use serde::Deserialize;
use thiserror::Error;

/// Keys the application binds to commands; a secret word may not use them.
const RESERVED_KEYS: [char; 3] = ['q', 't', 'd'];

/// Errors that can occur when loading an album.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read album '{path}': {source}")]
    Read {
        /// File that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid album TOML.
    #[error("failed to parse album '{path}': {source}")]
    Parse {
        /// File that failed.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The album parsed but is unusable.
    #[error("invalid album: {message}")]
    Validation {
        /// What is wrong.
        message: String,
    },
}

/// One `[[pages]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PageEntry {
    title: String,
    #[serde(default)]
    caption: String,
}

/// Album file contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlbumFile {
    title: String,
    settle_ms: Option<u64>,
    secret: Option<String>,
    milestones: Option<Vec<usize>>,
    pages: Vec<PageEntry>,
}

impl AlbumFile {
    /// Read and validate an album file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: display.clone(), source })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path: display, source },
            other => other,
        })
    }

    /// Parse and validate album TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid album TOML or fails
    /// validation.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: Self = toml::from_str(content)
            .map_err(|source| ConfigError::Parse { path: "<inline>".to_string(), source })?;
        file.validate()?;
        Ok(file)
    }

    /// Checks:
    /// - at least one page
    /// - milestones within `0..=pages`
    /// - secret word avoids command keys and whitespace
    fn validate(&self) -> Result<(), ConfigError> {
        if self.pages.is_empty() {
            return Err(ConfigError::Validation {
                message: "album must have at least one page".to_string(),
            });
        }

        let last = self.pages.len();
        if let Some(bad) = self.milestones.iter().flatten().find(|&&m| m > last) {
            return Err(ConfigError::Validation {
                message: format!("milestone {bad} is past the last page ({last})"),
            });
        }

        if let Some(secret) = &self.secret {
            let lowered = secret.to_lowercase();
            let reserved = |c: &char| RESERVED_KEYS.contains(c) || c.is_whitespace();
            if let Some(c) = lowered.chars().find(reserved) {
                return Err(ConfigError::Validation {
                    message: format!("secret word may not contain {c:?}"),
                });
            }
        }

        Ok(())
    }

    /// The album content.
    pub fn album(&self) -> Album {
        let pages = self.pages.iter().map(|p| Memory::new(&p.title, &p.caption)).collect();
        Album::new(&self.title, pages)
    }

    /// Overlay the file's settings onto `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(ms) = self.settle_ms {
            config.navigator.settle_delay = Duration::from_millis(ms);
        }
        if let Some(secret) = &self.secret {
            config.secret.clone_from(secret);
        }
        if let Some(milestones) = &self.milestones {
            config.effects.milestones.clone_from(milestones);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALBUM: &str = r#"
        title = "Summer"
        settle_ms = 250
        milestones = [2]

        [[pages]]
        title = "Cover"
        caption = "Where it all began"

        [[pages]]
        title = "Beach"

        [[pages]]
        title = "Home"
        caption = "Back again"
    "#;

    #[test]
    fn parses_pages_and_settings() {
        let file = AlbumFile::parse(ALBUM).unwrap();
        let album = file.album();
        assert_eq!(album.title, "Summer");
        assert_eq!(album.len(), 3);
        assert_eq!(album.page(1), Some(&Memory::new("Beach", "")));

        let mut config = AppConfig::default();
        file.apply(&mut config);
        assert_eq!(config.navigator.settle_delay, Duration::from_millis(250));
        assert_eq!(config.effects.milestones, vec![2]);
        assert_eq!(config.secret, keepsake_app::DEFAULT_SECRET);
    }

    #[test]
    fn rejects_empty_album() {
        let err = AlbumFile::parse("title = \"Empty\"\npages = []").unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"invalid album: album must have at least one page"
        );
    }

    #[test]
    fn rejects_milestone_past_end() {
        let toml = r#"
            title = "Short"
            milestones = [5]
            [[pages]]
            title = "Only"
        "#;
        let err = AlbumFile::parse(toml).unwrap_err();
        assert_eq!(err.to_string(), "invalid album: milestone 5 is past the last page (1)");
    }

    #[test]
    fn rejects_reserved_secret() {
        let toml = r#"
            title = "Secret"
            secret = "Today"
            [[pages]]
            title = "Only"
        "#;
        let err = AlbumFile::parse(toml).unwrap_err();
        assert_eq!(err.to_string(), "invalid album: secret word may not contain 't'");
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let err = AlbumFile::parse("title = \"x\"\ncolour = 1\npages = []").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = AlbumFile::load(Path::new("/nonexistent/album.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
