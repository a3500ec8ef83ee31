//! Domain layer for slide-relay-server.
//!
//! The domain layer contains pure types that have no dependencies on I/O,
//! networking, or external frameworks.
//!
//! # What belongs in the domain layer?
//!
//! - Configuration structures
//! - Session identity and lifecycle state
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `TcpStream`, or `WebSocket` types
//! - File I/O or environment variable reading

pub mod config;
pub mod session;

pub use config::RelayConfig;
pub use session::{Session, SessionId, SessionOutcome, SessionState};
