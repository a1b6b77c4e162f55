//! Keepsake entry point.
//!
//! # Usage
//!
//! ```bash
//! # Built-in album
//! keepsake
//!
//! # Your own album, with a debug log
//! keepsake --album album.toml --log-file keepsake.log --log-level debug
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use keepsake_app::Album;
use keepsake_tui::{AlbumFile, App, AppConfig, Runtime, SystemEnv, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Keepsake terminal memory book
#[derive(Parser, Debug)]
#[command(name = "keepsake")]
#[command(about = "Page through a book of memories in your terminal")]
#[command(version)]
struct Args {
    /// Album file (TOML). Uses the built-in album if omitted.
    #[arg(short, long)]
    album: Option<PathBuf>,

    /// Page-turn settle time in milliseconds (overrides the album)
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Start with decorative effects off
    #[arg(long)]
    no_effects: bool,

    /// Do not ring the terminal bell on page turns
    #[arg(long)]
    no_bell: bool,

    /// Write logs to this file. The terminal belongs to the UI, so logs are
    /// discarded without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init();
    }

    let mut config = AppConfig::default();
    let album = match &args.album {
        Some(path) => {
            let file = AlbumFile::load(path)?;
            file.apply(&mut config);
            file.album()
        },
        None => Album::default(),
    };
    if let Some(ms) = args.settle_ms {
        config.navigator.settle_delay = Duration::from_millis(ms);
    }
    config.effects.enabled = !args.no_effects;
    config.bell = !args.no_bell;
    config.mouse_release_clicks = true;

    tracing::info!(
        pages = album.len(),
        settle = ?config.navigator.settle_delay,
        effects = config.effects.enabled,
        "Keepsake starting"
    );

    let cell = config.cell;
    let app = App::new(SystemEnv::new(), album, config)?;
    let driver = TerminalDriver::new(cell)?;

    Ok(Runtime::new(driver, app).run().await?)
}
