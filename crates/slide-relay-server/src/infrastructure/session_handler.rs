//! Per-connection message loop.
//!
//! A [`SessionHandler`] owns one remote's WebSocket for its whole lifetime:
//!
//! ```text
//! receive frame → decode request → dispatch command → send reply → repeat
//! ```
//!
//! The loop is strictly sequential: a reply is sent before the next frame is
//! read, so replies always come back in request order.
//!
//! # Termination
//!
//! The loop runs until the [`Session`] reaches `Closed`:
//!
//! - the remote sends a Close frame, drops the TCP connection, or resets it
//!   (`PeerClosed`, logged at info);
//! - the transport fails in any other way (`Fault`, logged at error);
//! - the server cancels the session's token (`Open → Closing → Closed`): a
//!   Close frame with code 1001 "going away" is sent and no further replies
//!   are written.
//!
//! None of these escape the handler: [`SessionHandler::run`] always returns a
//! [`SessionOutcome`], never an error or a panic, so one broken remote cannot
//! disturb the listener or any other session.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio_tungstenite::tungstenite::{
    error::ProtocolError,
    protocol::{frame::coding::CloseCode, CloseFrame},
    Error as WsError, Message as WsMessage,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use slide_relay_core::{CommandRequest, CommandResult, DecodeError};

use crate::application::CommandDispatcher;
use crate::domain::session::{Session, SessionOutcome};

/// Close reason sent to remotes when the server shuts down.
pub const SHUTDOWN_CLOSE_REASON: &str = "server shutting down";

/// Drives one session's receive → dispatch → reply loop.
pub struct SessionHandler {
    session: Session,
    dispatcher: Arc<CommandDispatcher>,
}

impl SessionHandler {
    /// Creates a handler for a freshly accepted connection from `remote_addr`.
    pub fn new(remote_addr: SocketAddr, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self {
            session: Session::new(remote_addr),
            dispatcher,
        }
    }

    /// The session this handler owns.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handles one text frame and returns the reply.
    ///
    /// Malformed payloads are treated as a request with no command.
    pub fn handle_text(&mut self, payload: &str) -> CommandResult {
        info!("session {}: received message: {payload}", self.session.id());
        let request = CommandRequest::decode(payload);
        self.answer(request)
    }

    /// Handles one binary frame; it must hold UTF-8 JSON like a text frame.
    pub fn handle_binary(&mut self, payload: &[u8]) -> CommandResult {
        info!(
            "session {}: received binary message ({} bytes)",
            self.session.id(),
            payload.len()
        );
        let request = CommandRequest::decode_bytes(payload);
        self.answer(request)
    }

    fn answer(&mut self, request: Result<CommandRequest, DecodeError>) -> CommandResult {
        let request = request.unwrap_or_else(|e| {
            warn!("session {}: invalid JSON received: {e}", self.session.id());
            CommandRequest::empty()
        });
        let result = self.dispatcher.dispatch(request.command());
        self.session.record_request();
        result
    }

    /// Runs the message loop until the session is closed.
    ///
    /// `channel` is any WebSocket-shaped stream/sink; in production it is a
    /// `WebSocketStream<TcpStream>`.  `cancel` is the session's shutdown
    /// signal; it is observed while waiting for the next frame.
    pub async fn run<S>(mut self, mut channel: S, cancel: CancellationToken) -> SessionOutcome
    where
        S: Stream<Item = Result<WsMessage, WsError>> + Sink<WsMessage, Error = WsError> + Unpin,
    {
        let id = self.session.id();
        let peer = self.session.remote_addr();
        info!("session {id}: client connected: {peer}");

        while !self.session.is_closed() {
            // The only suspension point that can block indefinitely.  Checking
            // cancellation first makes shutdown win over a ready frame.
            let frame = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    self.close_for_shutdown(&mut channel).await;
                    continue;
                }
                frame = channel.next() => frame,
            };

            let reply = match frame {
                None => {
                    self.session.close(SessionOutcome::PeerClosed);
                    continue;
                }
                Some(Err(e)) => {
                    self.session.close(classify_channel_error(e));
                    continue;
                }
                Some(Ok(WsMessage::Text(text))) => self.handle_text(&text),
                Some(Ok(WsMessage::Binary(bytes))) => self.handle_binary(&bytes),
                Some(Ok(WsMessage::Close(frame))) => {
                    debug!("session {id}: Close frame received: {frame:?}");
                    // Flushes the Close reply tungstenite has queued.
                    if let Err(e) = channel.close().await {
                        debug!("session {id}: close handshake not completed: {e}");
                    }
                    self.session.close(SessionOutcome::PeerClosed);
                    continue;
                }
                Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_))) => {
                    // Control traffic; tungstenite answers pings itself.
                    continue;
                }
            };

            if cancel.is_cancelled() {
                debug!("session {id}: dropping reply, shutdown in progress");
                self.close_for_shutdown(&mut channel).await;
                continue;
            }

            if let Err(e) = channel.send(WsMessage::Text(reply.into_text())).await {
                self.session.close(classify_channel_error(e));
            }
        }

        let outcome = self
            .session
            .outcome()
            .cloned()
            .unwrap_or(SessionOutcome::PeerClosed);
        let handled = self.session.requests_handled();
        match &outcome {
            SessionOutcome::Fault(e) => {
                error!("session {id}: error in handler for {peer}: {e} ({handled} requests)");
            }
            other => info!("session {id}: client disconnected: {peer}, {other} ({handled} requests)"),
        }
        outcome
    }

    /// `Open → Closing → Closed` with a best-effort "going away" Close frame.
    async fn close_for_shutdown<S>(&mut self, channel: &mut S)
    where
        S: Sink<WsMessage, Error = WsError> + Unpin,
    {
        if self.session.begin_closing() {
            let frame = CloseFrame {
                code: CloseCode::Away,
                reason: SHUTDOWN_CLOSE_REASON.into(),
            };
            if let Err(e) = channel.send(WsMessage::Close(Some(frame))).await {
                debug!("session {}: Close frame not delivered: {e}", self.session.id());
            }
        }
        self.session.close(SessionOutcome::Shutdown);
    }
}

/// Separates "the remote went away" from genuine transport faults.
pub fn classify_channel_error(err: WsError) -> SessionOutcome {
    match err {
        WsError::ConnectionClosed
        | WsError::AlreadyClosed
        | WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
            SessionOutcome::PeerClosed
        }
        WsError::Io(ref io_err)
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) =>
        {
            SessionOutcome::PeerClosed
        }
        other => SessionOutcome::Fault(other.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
