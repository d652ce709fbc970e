//! Application layer for ninjutsu
//!
//! Pure state machines and generic runtime for a live voting room, enabling
//! deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`RoomView`] and [`apply`]: the room state machine. A pure reducer that
//!   folds decoded peer messages into the client's view of the room and
//!   reports what happened through [`Transition`].
//! - [`App`]: orchestration state machine (connection state, user intents,
//!   cue selection)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod config;
mod cue;
mod driver;
mod event;
mod input;
mod reducer;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use config::{DeckError, SessionConfig, VoteDeck};
pub use cue::{Cue, CueBank, CueConfig, CueSample, DEFAULT_VOLUME};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use reducer::{Transition, apply};
pub use runtime::Runtime;
pub use state::{ConnectionState, DisplayedVote, Phase, RoomView, Round, VoteDisplay};
