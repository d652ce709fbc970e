//! Session endpoint derivation.
//!
//! A room is addressed by the URL of its page, e.g.
//! `https://poker.example/room/5c1d...`. The session socket lives next to
//! it: same host and port, the path gets a `/ws` suffix, and the transport
//! security mirrors the page scheme (`https` pages use `wss`).
//!
//! The join mode rides along in the page query: any query containing
//! `observer` opens the session read-only.

use std::fmt;

use url::Url;

use crate::{
    Command,
    errors::{ProtocolError, Result},
};

/// Query marker selecting observer mode.
const OBSERVER_MARKER: &str = "observer";

/// Path suffix of the session socket relative to the room page.
const SOCKET_SUFFIX: &str = "/ws";

/// How a connection takes part in the room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum JoinMode {
    /// Gets a player id and may vote.
    #[default]
    Participant,
    /// Only reads room state; never votes.
    Observer,
}

impl JoinMode {
    /// Command that must open every session in this mode.
    pub const fn join_command(self) -> Command {
        match self {
            Self::Participant => Command::Join,
            Self::Observer => Command::GetState,
        }
    }

    /// Whether connections in this mode may cast votes.
    pub const fn can_vote(self) -> bool {
        matches!(self, Self::Participant)
    }
}

/// Socket address of a room session plus the mode to join it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEndpoint {
    url: Url,
    mode: JoinMode,
}

impl RoomEndpoint {
    /// Derive the session endpoint from a room page URL.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::InvalidAddress`] if the URL does not parse, has no
    /// host, or uses a scheme other than `http`, `https`, `ws` or `wss`.
    pub fn from_page_url(page: &str) -> Result<Self> {
        let invalid = |reason: String| ProtocolError::InvalidAddress { reason };

        let page = Url::parse(page).map_err(|e| invalid(format!("{page}: {e}")))?;
        if page.host_str().is_none() {
            return Err(invalid(format!("{page}: missing host")));
        }

        let scheme = match page.scheme() {
            "https" | "wss" => "wss",
            "http" | "ws" => "ws",
            other => return Err(invalid(format!("unsupported scheme {other:?}"))),
        };

        let mode = if page.query().is_some_and(|query| query.contains(OBSERVER_MARKER)) {
            JoinMode::Observer
        } else {
            JoinMode::Participant
        };

        let mut url = page.clone();
        url.set_scheme(scheme).map_err(|()| invalid(format!("cannot use {scheme} for {page}")))?;
        let path = format!("{}{SOCKET_SUFFIX}", page.path().trim_end_matches('/'));
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self { url, mode })
    }

    /// Override the join mode derived from the page query.
    #[must_use]
    pub fn with_mode(mut self, mode: JoinMode) -> Self {
        self.mode = mode;
        self
    }

    /// Socket URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Mode the session is joined in.
    pub fn mode(&self) -> JoinMode {
        self.mode
    }

    /// Whether the socket uses TLS.
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "wss"
    }
}

impl fmt::Display for RoomEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
