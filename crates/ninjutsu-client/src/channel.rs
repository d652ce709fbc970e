//! WebSocket session channel.
//!
//! Provides [`SessionChannel`], a thin handle over one WebSocket connection.
//! An internal task bridges the socket and two queues: outbound commands are
//! queued without blocking the caller, inbound text frames are delivered in
//! arrival order.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use futures::{SinkExt, StreamExt};
use ninjutsu_proto::{Command, RoomEndpoint};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::ConnectionError;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Handle to an open room connection.
///
/// Dropping the handle closes the connection.
#[derive(Debug)]
pub struct SessionChannel {
    endpoint: RoomEndpoint,
    /// Lines for the peer. `None` once closed.
    outbound: Option<mpsc::UnboundedSender<String>>,
    /// Text frames from the peer.
    inbound: mpsc::UnboundedReceiver<String>,
    /// Cleared by the connection task when the socket goes away.
    alive: Arc<AtomicBool>,
    closed: bool,
}

impl SessionChannel {
    /// Open a connection to the room and write the join intent.
    ///
    /// The join intent (`JOIN`, or `GETSTATE` for observers) is the first
    /// frame on the socket; it is written before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] if the socket cannot be established or
    /// closes before the join intent is written. There is no retry.
    pub async fn open(endpoint: &RoomEndpoint) -> Result<Self, ConnectionError> {
        if endpoint.is_secure() {
            // Fails if a provider is already installed, which is fine.
            let _ = rustls::crypto::ring::default_provider().install_default();
        }

        let (mut socket, _response) =
            tokio_tungstenite::connect_async(endpoint.url().as_str()).await?;

        let join = endpoint.mode().join_command();
        socket.send(Message::text(join.encode())).await?;
        info!(%endpoint, %join, "session channel open");

        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let alive = Arc::new(AtomicBool::new(true));

        tokio::spawn(run_connection(socket, out_rx, in_tx, Arc::clone(&alive)));

        Ok(Self {
            endpoint: endpoint.clone(),
            outbound: Some(out_tx),
            inbound: in_rx,
            alive,
            closed: false,
        })
    }

    /// Queue a command for the peer.
    ///
    /// Never blocks. Sending on a closed channel is a silent no-op.
    pub fn send(&self, command: &Command) {
        let Some(outbound) = self.outbound.as_ref().filter(|_| self.is_open()) else {
            debug!(%command, "dropping command on closed channel");
            return;
        };
        if outbound.send(command.encode()).is_err() {
            debug!(%command, "dropping command, connection task is gone");
        }
    }

    /// Receive the next text frame from the peer.
    ///
    /// Returns `None` once the channel is closed or the peer has gone away
    /// and every frame received before that has been delivered.
    pub async fn recv(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        self.inbound.recv().await
    }

    /// Receive the next text frame if one is ready.
    pub fn try_recv(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        self.inbound.try_recv().ok()
    }

    /// Close the connection.
    ///
    /// Idempotent. Frames still in flight are dropped.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // Dropping the sender makes the connection task send a close frame.
        self.outbound = None;
        self.inbound.close();
        info!(endpoint = %self.endpoint, "session channel closed");
    }

    /// Whether the channel can still carry frames.
    ///
    /// False after [`close`](Self::close) or after the peer disconnects.
    /// Frames that arrived before a disconnect are still returned by
    /// [`recv`](Self::recv).
    pub fn is_open(&self) -> bool {
        !self.closed && self.alive.load(Ordering::Acquire)
    }

    /// The socket this channel is connected to.
    pub fn endpoint(&self) -> &RoomEndpoint {
        &self.endpoint
    }
}

impl Drop for SessionChannel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Run the connection, bridging between the queues and the socket.
async fn run_connection(
    socket: Socket,
    mut outbound: mpsc::UnboundedReceiver<String>,
    inbound: mpsc::UnboundedSender<String>,
    alive: Arc<AtomicBool>,
) {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if inbound.send(text.as_str().to_owned()).is_err() {
                        break;
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    info!(?frame, "peer closed the session");
                    break;
                },
                // Pings are answered by tungstenite on the next read.
                Some(Ok(_)) => {},
                Some(Err(e)) => {
                    warn!("WebSocket read failed: {e}");
                    break;
                },
                None => break,
            },
            line = outbound.recv() => match line {
                Some(line) => {
                    if let Err(e) = sink.send(Message::text(line)).await {
                        warn!("WebSocket write failed: {e}");
                        break;
                    }
                },
                None => {
                    if let Err(e) = sink.close().await {
                        debug!("close handshake failed: {e}");
                    }
                    break;
                },
            },
        }
    }

    alive.store(false, Ordering::Release);
}
