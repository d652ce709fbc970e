//! Session channel errors.

use thiserror::Error;

/// Errors from opening or writing to a session channel.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The endpoint cannot be dialed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The WebSocket handshake failed.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The connection closed before the join intent was written.
    #[error("connection closed: {0}")]
    Closed(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for ConnectionError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error;

        match err {
            Error::Url(e) => Self::InvalidAddress(e.to_string()),
            Error::ConnectionClosed | Error::AlreadyClosed => Self::Closed(err.to_string()),
            e => Self::Connect(e.to_string()),
        }
    }
}
