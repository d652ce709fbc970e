//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The room connection is a
//! [`SessionLink`].

use std::{
    io::{self, Stdout, Write, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ninjutsu_app::{App, AppAction, AppEvent, CueSample, Driver, KeyInput};
use ninjutsu_client::ConnectionError;
use ninjutsu_proto::{Command, ProtocolError, RoomEndpoint};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tracing::debug;

use crate::{link::SessionLink, ui};

/// Terminal bell, the only sound a terminal can make.
const BELL: &[u8] = b"\x07";

/// How long to wait for input before emitting a tick.
const TICK: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Session channel error.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Room address or wire error.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the room
/// connection (WebSocket session channel).
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    link: SessionLink,
}

impl TerminalDriver {
    /// Create a new terminal driver.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, link: SessionLink::new() })
    }
}

/// Convert a crossterm key event to a [`KeyInput`].
///
/// Ctrl-C maps to [`KeyInput::Esc`] since raw mode swallows the signal.
pub fn convert_key(event: KeyEvent) -> Option<KeyInput> {
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyInput::Esc)
        },
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Esc => Some(KeyInput::Esc),
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        match convert_key(key_event) {
                            Some(key_input) => Ok(app.handle(AppEvent::Key(key_input))),
                            None => Ok(vec![]),
                        }
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        Ok(app.handle(AppEvent::Resize(cols, rows)))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(vec![]),
                }
            }

            // Peer lines, handed to the runtime through recv_line
            () = self.link.fill() => Ok(vec![]),

            // Tick timeout
            () = tokio::time::sleep(TICK) => {
                Ok(app.handle(AppEvent::Tick))
            }
        }
    }

    async fn send_command(&mut self, command: Command) -> Result<(), Self::Error> {
        self.link.send(&command);
        Ok(())
    }

    async fn recv_line(&mut self) -> Option<String> {
        self.link.next_line()
    }

    async fn connect(&mut self, endpoint: &RoomEndpoint) -> Result<(), Self::Error> {
        self.link.open(endpoint).await?;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.link.is_connected()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn play_cue(&mut self, sample: &CueSample) {
        debug!(cue = ?sample.cue, name = sample.name, volume = sample.volume, "playing cue");
        if sample.volume <= 0.0 {
            return;
        }
        let mut out = stdout();
        if let Err(e) = out.write_all(BELL).and_then(|()| out.flush()) {
            debug!("bell failed: {e}");
        }
    }

    fn stop(&mut self) {
        self.link.close();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
