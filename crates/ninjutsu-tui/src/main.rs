//! ninjutsu terminal client entry point.
//!
//! # Usage
//!
//! ```bash
//! # Join a room as a participant
//! ninjutsu https://poker.example.com/room/42
//!
//! # Watch without voting, log to a file
//! ninjutsu https://poker.example.com/room/42 --observer --log-file ninjutsu.log
//! ```

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use clap::Parser;
use ninjutsu_app::{CueConfig, DEFAULT_VOLUME, SessionConfig, VoteDeck};
use ninjutsu_proto::{JoinMode, RoomEndpoint};
use ninjutsu_tui::{Runtime, TerminalDriver, TerminalError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ninjutsu voting room client
#[derive(Parser, Debug)]
#[command(name = "ninjutsu")]
#[command(about = "Terminal client for live planning-poker rooms")]
#[command(version)]
struct Args {
    /// Room page URL (http, https, ws or wss)
    ///
    /// A query string containing `observer` joins as an observer.
    page_url: String,

    /// Watch the room without voting
    #[arg(long)]
    observer: bool,

    /// Start with sound cues off
    #[arg(long)]
    mute: bool,

    /// Base cue volume (0.0 to 1.0)
    #[arg(long, default_value_t = DEFAULT_VOLUME)]
    volume: f32,

    /// Vote values, comma separated
    #[arg(long)]
    deck: Option<VoteDeck>,

    /// Write logs to this file
    ///
    /// Nothing is logged without it, so the terminal stays clean.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Build the session configuration.
    fn session_config(&self) -> Result<SessionConfig, TerminalError> {
        let mut endpoint = RoomEndpoint::from_page_url(&self.page_url)?;
        if self.observer {
            endpoint = endpoint.with_mode(JoinMode::Observer);
        }

        Ok(SessionConfig::new(endpoint)
            .with_sound(!self.mute)
            .with_cue(CueConfig { volume: self.volume })
            .with_deck(self.deck.clone().unwrap_or_default()))
    }

    /// Install the file logger, if a log file was given.
    fn init_logging(&self) -> Result<(), TerminalError> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.init_logging()?;

    let config = args.session_config()?;
    tracing::info!("ninjutsu starting for {}", config.endpoint);

    let driver = TerminalDriver::new()?;
    let app = Runtime::new(driver, config).run().await?;

    tracing::info!(state = ?app.connection_state(), "ninjutsu exiting");
    Ok(())
}
