//! Peer side of the terminal driver.
//!
//! [`SessionLink`] owns the [`SessionChannel`] and the lines picked up while
//! the driver was waiting for input. The link counts as connected until the
//! inbound stream has ended and every line received before that has been
//! handed out, so a peer that sends a burst and hangs up still gets every
//! frame applied.

use std::collections::VecDeque;

use ninjutsu_client::{ConnectionError, SessionChannel};
use ninjutsu_proto::{Command, RoomEndpoint};
use tracing::debug;

/// Session channel plus the lines buffered from it.
#[derive(Debug, Default)]
pub struct SessionLink {
    channel: Option<SessionChannel>,
    /// Lines received but not yet handed out.
    pending: VecDeque<String>,
    /// Set once the inbound stream has ended.
    drained: bool,
}

impl SessionLink {
    /// Create a link with no connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session, closing any previous one.
    pub async fn open(&mut self, endpoint: &RoomEndpoint) -> Result<(), ConnectionError> {
        self.close();
        self.channel = Some(SessionChannel::open(endpoint).await?);
        Ok(())
    }

    /// Queue a command for the peer. Dropped without a session.
    pub fn send(&self, command: &Command) {
        if let Some(channel) = &self.channel {
            channel.send(command);
        }
    }

    /// Wait for the next peer line and buffer it.
    ///
    /// Pends forever without a session or once the stream has ended.
    /// Cancel safe.
    pub async fn fill(&mut self) {
        let channel = match self.channel.as_mut() {
            Some(channel) if !self.drained => channel,
            _ => return std::future::pending().await,
        };
        match channel.recv().await {
            Some(line) => self.pending.push_back(line),
            None => {
                debug!("session channel drained");
                self.drained = true;
            },
        }
    }

    /// Next line in arrival order, if one is ready.
    pub fn next_line(&mut self) -> Option<String> {
        if let Some(line) = self.pending.pop_front() {
            return Some(line);
        }
        match self.channel.as_mut() {
            Some(channel) if !self.drained => channel.try_recv(),
            _ => None,
        }
    }

    /// Whether lines may still arrive or are still waiting to be handed out.
    pub fn is_connected(&self) -> bool {
        self.channel.is_some() && (!self.drained || !self.pending.is_empty())
    }

    /// Close the session. Lines not yet handed out are dropped.
    pub fn close(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            channel.close();
        }
        self.pending.clear();
        self.drained = false;
    }
}
