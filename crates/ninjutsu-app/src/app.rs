//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the
//! [`RoomView`] of the current connection and turns inputs into actions,
//! completely decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Folds peer messages into the view through [`crate::apply`].
//! - Turns transition metadata into cue actions when sound is enabled.
//! - Builds outbound commands for user intents (vote, reset).
//! - Tracks connection state; once the connection is lost the view is frozen
//!   until the user reconnects, which starts from a fresh view.

use ninjutsu_proto::{Choice, Command, JoinMode, RoomEndpoint, ServerMessage};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::{
    AppAction, AppEvent, ConnectionState, Cue, CueBank, KeyInput, RoomView, SessionConfig,
    VoteDeck, apply,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state.
    state: ConnectionState,
    /// Room socket and join mode.
    endpoint: RoomEndpoint,
    /// View of the current connection.
    view: RoomView,
    /// Values offered for voting.
    deck: VoteDeck,
    /// Cue sample pools.
    cues: CueBank,
    /// Source for cue sample selection.
    rng: StdRng,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App from session configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a new App with a seeded cue selection.
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SessionConfig, rng: StdRng) -> Self {
        let view = RoomView::new(config.endpoint.mode()).with_sound(config.sound_enabled);
        Self {
            state: ConnectionState::Disconnected,
            endpoint: config.endpoint,
            view,
            deck: config.deck,
            cues: CueBank::new(config.cue),
            rng,
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(..) => vec![AppAction::Render],
            AppEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                self.status_message = Some(format!("Connecting to {}...", self.endpoint));
                vec![AppAction::Render]
            },
            AppEvent::Connected => {
                info!(endpoint = %self.endpoint, mode = ?self.view.mode(), "session open");
                self.state = ConnectionState::Connected;
                self.status_message = match self.view.mode() {
                    JoinMode::Participant => Some("Joined, waiting for the room".to_owned()),
                    JoinMode::Observer => Some("Observing".to_owned()),
                };
                vec![AppAction::Render]
            },
            AppEvent::Message(message) => self.handle_message(&message),
            AppEvent::Disconnected { reason } => {
                info!(%reason, "session closed");
                self.status_message = Some(format!("Disconnected: {reason}"));
                self.state = ConnectionState::Lost { reason };
                vec![AppAction::Render]
            },
        }
    }

    /// Apply a peer message and emit the actions its transition calls for.
    fn handle_message(&mut self, message: &ServerMessage) -> Vec<AppAction> {
        if !self.state.is_connected() {
            debug!(?message, "dropping message received while not connected");
            return vec![];
        }

        let (view, transition) = apply(&self.view, message);
        self.view = view;

        let mut actions = Vec::new();
        if transition.identity_assigned
            && let Some(id) = self.view.self_id()
        {
            self.status_message = Some(format!("Joined as player {id}"));
        }
        if transition.caused_reveal {
            self.status_message = Some("Votes revealed".to_owned());
        }
        if self.view.sound_enabled() {
            if transition.peer_voted {
                actions.extend(self.cue(Cue::PeerVoted));
            }
            if transition.caused_reveal {
                actions.extend(self.cue(Cue::Reveal));
            }
        }
        if transition.changed || transition.identity_assigned || transition.caused_reveal {
            actions.push(AppAction::Render);
        }
        actions
    }

    /// Map a key to a user intent.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc | KeyInput::Char('q') => self.quit(),
            KeyInput::Char('r') => self.reset(),
            KeyInput::Char('s') => self.toggle_sound(),
            KeyInput::Char('c') => self.reconnect(),
            KeyInput::Char(c) if c.is_ascii_digit() => match self.deck.for_digit(c) {
                Some(value) => self.vote(value),
                None => vec![],
            },
            KeyInput::Char(_) => vec![],
        }
    }

    /// Open the session for the configured endpoint.
    pub fn connect(&mut self) -> Vec<AppAction> {
        self.state = ConnectionState::Connecting;
        vec![AppAction::Connect { endpoint: self.endpoint.clone() }, AppAction::Render]
    }

    /// Start over with a fresh view after the connection was lost.
    ///
    /// Only the join mode and sound preference carry over.
    pub fn reconnect(&mut self) -> Vec<AppAction> {
        if !matches!(self.state, ConnectionState::Lost { .. } | ConnectionState::Disconnected) {
            return vec![];
        }
        self.view = RoomView::new(self.view.mode()).with_sound(self.view.sound_enabled());
        self.connect()
    }

    /// Cast a vote.
    ///
    /// The value is recorded locally right away and reconciled by the next
    /// room state. Observers cannot vote, and nothing is sent while the
    /// connection is down.
    pub fn vote(&mut self, value: Choice) -> Vec<AppAction> {
        if !self.view.mode().can_vote() {
            self.status_message = Some("Observers cannot vote".to_owned());
            return vec![AppAction::Render];
        }
        if !self.state.is_connected() {
            self.status_message = Some("Not connected".to_owned());
            return vec![AppAction::Render];
        }
        self.view.record_vote(value);
        self.status_message = Some(format!("Voted {value}"));
        vec![AppAction::Send(Command::Vote(value)), AppAction::Render]
    }

    /// Ask the peer to start a new round.
    ///
    /// Nothing changes locally; the next room state reflects the reset.
    pub fn reset(&mut self) -> Vec<AppAction> {
        if !self.state.is_connected() {
            self.status_message = Some("Not connected".to_owned());
            return vec![AppAction::Render];
        }
        self.status_message = Some("Reset requested".to_owned());
        vec![AppAction::Send(Command::Reset), AppAction::Render]
    }

    /// Toggle feedback cues.
    pub fn toggle_sound(&mut self) -> Vec<AppAction> {
        let enabled = self.view.toggle_sound();
        self.status_message = Some(if enabled { "Sound on" } else { "Sound off" }.to_owned());
        vec![AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn cue(&mut self, cue: Cue) -> Option<AppAction> {
        self.cues.pick(cue, &mut self.rng).map(AppAction::PlayCue)
    }

    /// Current connection state.
    pub fn connection_state(&self) -> &ConnectionState {
        &self.state
    }

    /// Room socket and join mode.
    pub fn endpoint(&self) -> &RoomEndpoint {
        &self.endpoint
    }

    /// View of the current connection.
    pub fn view(&self) -> &RoomView {
        &self.view
    }

    /// Values offered for voting.
    pub fn deck(&self) -> &VoteDeck {
        &self.deck
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
