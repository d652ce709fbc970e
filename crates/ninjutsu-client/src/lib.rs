//! Client
//!
//! The session channel for a ninjutsu voting room: one WebSocket connection
//! that carries text commands out and raw text lines in. Protocol logic stays
//! in `ninjutsu-app`; this crate only moves lines.
//!
//! # Components
//!
//! - [`SessionChannel`]: handle to an open room connection
//! - [`ConnectionError`]: failures while opening or using the channel

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod channel;
mod error;

pub use channel::SessionChannel;
pub use error::ConnectionError;
