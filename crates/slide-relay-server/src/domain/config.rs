//! Relay configuration types.
//!
//! [`RelayConfig`] is the single source of truth for all runtime settings.
//! It can be constructed from CLI arguments and an optional config file
//! (see `main.rs`) or from defaults (useful for local development and tests).
//!
//! # Design rationale
//!
//! Configuration is a plain struct: no global state, no environment variable
//! reads inside the domain.  The binary populates it; the server only
//! consumes it.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Port that existing remote apps connect to out of the box.
pub const DEFAULT_PORT: u16 = 5000;

/// Listen on every interface so phones on the LAN can reach the relay.
pub const DEFAULT_BIND_IP: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// How long shutdown waits for sessions to close before aborting them.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// How long a new connection may take to send its WebSocket upgrade request.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// All runtime configuration for the relay server.
///
/// # Example
///
/// ```rust
/// use slide_relay_server::domain::RelayConfig;
///
/// let cfg = RelayConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// The address and port the WebSocket server binds to.
    ///
    /// `0.0.0.0` accepts connections from any network interface.  Use
    /// `127.0.0.1` to accept only local connections.
    pub bind_addr: SocketAddr,

    /// Upper bound on how long shutdown waits for open sessions to finish
    /// their close handshake.  Sessions still running afterwards are aborted.
    pub shutdown_grace: Duration,

    /// Connections that have not completed the WebSocket handshake within
    /// this time are dropped.
    pub handshake_timeout: Duration,
}

impl RelayConfig {
    /// Config bound to `ip:port` with the default grace period.
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self {
            bind_addr: SocketAddr::new(ip, port),
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }

    /// Replaces the shutdown grace period.
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Replaces the handshake timeout.
    pub fn with_handshake_timeout(mut self, limit: Duration) -> Self {
        self.handshake_timeout = limit;
        self
    }
}

impl Default for RelayConfig {
    /// | Field             | Default         |
    /// |-------------------|-----------------|
    /// | bind_addr         | `0.0.0.0:5000`  |
    /// | shutdown_grace    | 5 seconds       |
    /// | handshake_timeout | 10 seconds      |
    fn default() -> Self {
        Self::new(DEFAULT_BIND_IP, DEFAULT_PORT)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
