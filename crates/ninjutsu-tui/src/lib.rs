//! Terminal UI for ninjutsu
//!
//! A thin shell over [`ninjutsu_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`ninjutsu_app::Runtime`]
//!
//! This crate only handles terminal rendering, key mapping and the session
//! channel plumbing.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod link;
pub mod terminal;
pub mod ui;

pub use ninjutsu_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime, SessionConfig};
pub use link::SessionLink;
pub use terminal::{TerminalDriver, TerminalError};
