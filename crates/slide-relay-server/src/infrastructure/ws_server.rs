//! WebSocket server: accept loop, per-session task management, shutdown.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming TCP connections from remotes.
//! 3. Upgrading each connection to a WebSocket session.
//! 4. Running one [`SessionHandler`] task per session.
//! 5. Shutting everything down when the shutdown token is cancelled.
//!
//! # Scalability
//!
//! Each session runs in its own Tokio task inside a [`JoinSet`].  The accept
//! loop never waits on a session: it accepts a connection, spawns its task,
//! and goes straight back to `accept()`.  Finished sessions are reaped from
//! the set as they complete, so the set only ever holds live sessions.
//!
//! # Shutdown
//!
//! ```text
//! shutdown token cancelled
//!   ├─ accept loop stops, listener dropped (port released)
//!   ├─ every session's child token is cancelled → each sends Close(1001)
//!   ├─ wait up to `shutdown_grace` for the sessions to finish
//!   └─ abort whatever is still running
//! ```
//!
//! Cancelling a `CancellationToken` twice is a no-op, so shutdown is
//! idempotent from any number of callers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::application::CommandDispatcher;
use crate::domain::config::RelayConfig;
use crate::domain::session::SessionOutcome;
use crate::infrastructure::session_handler::SessionHandler;

/// Pause after a failed `accept()` so a persistent error (e.g. too many open
/// files) does not spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

// ── Error and report types ────────────────────────────────────────────────────

/// Listener-level failures.  These are the only process-fatal errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The port is in use, or the process may not bind it.
    #[error("failed to bind WebSocket listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The OS could not report the bound address.
    #[error("failed to read listener address: {0}")]
    LocalAddr(#[source] std::io::Error),
}

/// Summary of one server run, returned once shutdown has completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerReport {
    /// Connections accepted over the server's lifetime.
    pub sessions_accepted: u64,
    /// Sessions still running when the grace period expired.
    pub sessions_aborted: usize,
}

// ── Server ────────────────────────────────────────────────────────────────────

/// A bound, not yet running relay server.
///
/// Binding and running are separate steps so callers (and tests) can learn
/// the actual port when binding to port 0.
pub struct RelayServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    dispatcher: Arc<CommandDispatcher>,
    shutdown_grace: Duration,
    handshake_timeout: Duration,
}

impl RelayServer {
    /// Binds the listener described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address cannot be bound.
    pub async fn bind(
        config: &RelayConfig,
        dispatcher: Arc<CommandDispatcher>,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.bind_addr,
                source,
            })?;
        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

        Ok(Self {
            listener,
            local_addr,
            dispatcher,
            shutdown_grace: config.shutdown_grace,
            handshake_timeout: config.handshake_timeout,
        })
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Runs the server on a background task and returns a handle to it.
    pub fn spawn(self) -> ServerHandle {
        let shutdown = CancellationToken::new();
        let local_addr = self.local_addr;
        let task = tokio::spawn(self.run(shutdown.clone()));
        ServerHandle {
            local_addr,
            shutdown,
            task,
        }
    }

    /// Accepts connections until `shutdown` is cancelled, then shuts down all
    /// sessions within the grace period.
    pub async fn run(self, shutdown: CancellationToken) -> ServerReport {
        let RelayServer {
            listener,
            local_addr,
            dispatcher,
            shutdown_grace,
            handshake_timeout,
        } = self;

        info!("WebSocket relay listening on {local_addr}");
        let commands: Vec<&str> = dispatcher.table().names().collect();
        info!("supported commands: {}", commands.join(", "));

        let mut sessions: JoinSet<SessionOutcome> = JoinSet::new();
        let mut report = ServerReport::default();

        loop {
            tokio::select! {
                biased;

                () = shutdown.cancelled() => {
                    info!("shutdown requested; stopping accept loop");
                    break;
                }

                Some(joined) = sessions.join_next(), if !sessions.is_empty() => {
                    log_join_result(joined);
                }

                accepted = listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => {
                        debug!("new connection from {peer_addr}");
                        report.sessions_accepted += 1;
                        sessions.spawn(serve_connection(
                            stream,
                            peer_addr,
                            Arc::clone(&dispatcher),
                            handshake_timeout,
                            shutdown.child_token(),
                        ));
                    }
                    Err(e) => {
                        // Transient accept error; never fatal once bound.
                        error!("accept error: {e}");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                },
            }
        }

        // Release the port before waiting on sessions.
        drop(listener);
        debug!("listener on {local_addr} released");

        report.sessions_aborted = drain_sessions(&mut sessions, shutdown_grace).await;
        info!(
            "relay stopped: {} sessions served, {} aborted",
            report.sessions_accepted, report.sessions_aborted
        );
        report
    }
}

/// Handle to a server started with [`RelayServer::spawn`].
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<ServerReport>,
}

impl ServerHandle {
    /// The address the server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Requests shutdown.  Safe to call any number of times.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// A clone of the shutdown token, for wiring to signals.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Waits for the server to finish shutting down.
    ///
    /// # Errors
    ///
    /// Returns an error only if the server task panicked.
    pub async fn join(self) -> anyhow::Result<ServerReport> {
        self.task.await.context("relay server task failed")
    }
}

/// Binds `config.bind_addr` and serves until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn run_server(
    config: RelayConfig,
    dispatcher: Arc<CommandDispatcher>,
    shutdown: CancellationToken,
) -> anyhow::Result<ServerReport> {
    let server = RelayServer::bind(&config, dispatcher)
        .await
        .with_context(|| format!("cannot start relay on {}", config.bind_addr))?;
    Ok(server.run(shutdown).await)
}

// ── Per-connection task ───────────────────────────────────────────────────────

/// Completes the WebSocket handshake and runs the session loop.
///
/// A client that connects and never sends its upgrade request is dropped
/// after `handshake_timeout`, or sooner if shutdown begins.
async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    dispatcher: Arc<CommandDispatcher>,
    handshake_timeout: Duration,
    cancel: CancellationToken,
) -> SessionOutcome {
    let ws_stream = tokio::select! {
        biased;
        () = cancel.cancelled() => return SessionOutcome::Shutdown,
        handshake = timeout(handshake_timeout, accept_async(stream)) => match handshake {
            Ok(Ok(ws)) => ws,
            Ok(Err(e)) => {
                warn!("WebSocket handshake failed with {peer_addr}: {e}");
                return SessionOutcome::HandshakeFailed(e.to_string());
            }
            Err(_) => {
                warn!("WebSocket handshake with {peer_addr} timed out after {handshake_timeout:?}");
                return SessionOutcome::HandshakeFailed(format!(
                    "no upgrade request within {handshake_timeout:?}"
                ));
            }
        },
    };

    SessionHandler::new(peer_addr, dispatcher)
        .run(ws_stream, cancel)
        .await
}

// ── Shutdown helpers ──────────────────────────────────────────────────────────

/// Waits up to `grace` for every session to finish, then aborts the rest.
///
/// Returns the number of sessions that had to be aborted.
async fn drain_sessions(sessions: &mut JoinSet<SessionOutcome>, grace: Duration) -> usize {
    if sessions.is_empty() {
        return 0;
    }
    info!(
        "waiting up to {grace:?} for {} open sessions to close",
        sessions.len()
    );

    let drained = timeout(grace, async {
        while let Some(joined) = sessions.join_next().await {
            log_join_result(joined);
        }
    })
    .await;

    if drained.is_ok() {
        return 0;
    }

    let remaining = sessions.len();
    warn!("grace period elapsed; aborting {remaining} sessions");
    sessions.abort_all();
    while sessions.join_next().await.is_some() {}
    remaining
}

fn log_join_result(joined: Result<SessionOutcome, JoinError>) {
    match joined {
        Ok(outcome) => debug!("session task finished: {outcome}"),
        Err(e) if e.is_cancelled() => debug!("session task aborted"),
        Err(e) => error!("session task panicked: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
