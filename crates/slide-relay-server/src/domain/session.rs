//! Per-connection session state.
//!
//! A [`Session`] is created when a connection is accepted and is owned by
//! exactly one session task.  Nothing else holds a reference to it, so its
//! state needs no synchronization.
//!
//! # State machine
//!
//! ```text
//!            shutdown requested
//!   Open ───────────────────────► Closing
//!    │                               │
//!    │ peer closed / channel fault   │ close frame sent
//!    ▼                               ▼
//!  Closed ◄──────────────────────────┘
//! ```
//!
//! `Closed` is terminal.  The first recorded [`SessionOutcome`] wins; later
//! close attempts are ignored.

use std::fmt;
use std::net::SocketAddr;

use uuid::Uuid;

/// Unique identifier of one session, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The first UUID group is plenty to tell sessions apart in logs.
        let full = self.0.to_string();
        f.write_str(&full[..8])
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closing,
    Closed,
}

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The remote closed the channel, gracefully or abruptly.
    PeerClosed,
    /// The server shut down while the session was open.
    Shutdown,
    /// The WebSocket opening handshake failed; no session loop ran.
    HandshakeFailed(String),
    /// An unexpected transport failure ended the session.
    Fault(String),
}

impl SessionOutcome {
    /// `true` for outcomes that indicate something went wrong.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::HandshakeFailed(_) | Self::Fault(_))
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerClosed => f.write_str("closed by peer"),
            Self::Shutdown => f.write_str("closed by server shutdown"),
            Self::HandshakeFailed(e) => write!(f, "handshake failed: {e}"),
            Self::Fault(e) => write!(f, "channel fault: {e}"),
        }
    }
}

/// One client connection's server-side state.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    remote_addr: SocketAddr,
    state: SessionState,
    requests_handled: u64,
    outcome: Option<SessionOutcome>,
}

impl Session {
    /// A new session in the `Open` state.
    pub fn new(remote_addr: SocketAddr) -> Self {
        Self {
            id: SessionId::new(),
            remote_addr,
            state: SessionState::Open,
            requests_handled: 0,
            outcome: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Number of requests answered so far.
    pub fn requests_handled(&self) -> u64 {
        self.requests_handled
    }

    /// Counts one answered request.
    pub fn record_request(&mut self) {
        self.requests_handled += 1;
    }

    /// `Open → Closing`.  Returns `false` (and changes nothing) from any
    /// other state.
    pub fn begin_closing(&mut self) -> bool {
        if self.state != SessionState::Open {
            return false;
        }
        self.state = SessionState::Closing;
        true
    }

    /// Moves to `Closed`, recording `outcome` unless one is already recorded.
    pub fn close(&mut self, outcome: SessionOutcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
        self.state = SessionState::Closed;
    }

    /// Why the session ended, once it has.
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "192.168.1.20:51234".parse().unwrap()
    }

    #[test]
    fn test_new_session_is_open() {
        let session = Session::new(addr());
        assert_eq!(session.state(), SessionState::Open);
        assert!(session.is_open());
        assert_eq!(session.remote_addr(), addr());
        assert_eq!(session.requests_handled(), 0);
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_peer_close_goes_straight_to_closed() {
        let mut session = Session::new(addr());

        session.close(SessionOutcome::PeerClosed);

        assert!(session.is_closed());
        assert_eq!(session.outcome(), Some(&SessionOutcome::PeerClosed));
    }

    #[test]
    fn test_shutdown_passes_through_closing() {
        let mut session = Session::new(addr());

        assert!(session.begin_closing());
        assert_eq!(session.state(), SessionState::Closing);
        assert!(!session.is_open());

        session.close(SessionOutcome::Shutdown);
        assert!(session.is_closed());
    }

    #[test]
    fn test_begin_closing_only_from_open() {
        let mut session = Session::new(addr());
        session.close(SessionOutcome::PeerClosed);

        assert!(!session.begin_closing());
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn test_first_outcome_wins() {
        let mut session = Session::new(addr());
        session.close(SessionOutcome::Fault("reset".into()));
        session.close(SessionOutcome::PeerClosed);
        assert_eq!(session.outcome(), Some(&SessionOutcome::Fault("reset".into())));
    }

    #[test]
    fn test_record_request_counts() {
        let mut session = Session::new(addr());
        session.record_request();
        session.record_request();
        assert_eq!(session.requests_handled(), 2);
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = Session::new(addr());
        let b = Session::new(addr());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_session_id_display_is_short() {
        let id = SessionId::new();
        assert_eq!(id.to_string().len(), 8);
        assert!(id.to_string().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_outcome_fault_classification() {
        assert!(!SessionOutcome::PeerClosed.is_fault());
        assert!(!SessionOutcome::Shutdown.is_fault());
        assert!(SessionOutcome::Fault("x".into()).is_fault());
        assert!(SessionOutcome::HandshakeFailed("x".into()).is_fault());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(SessionOutcome::PeerClosed.to_string(), "closed by peer");
        assert_eq!(
            SessionOutcome::Fault("broken pipe".into()).to_string(),
            "channel fault: broken pipe"
        );
    }
}
