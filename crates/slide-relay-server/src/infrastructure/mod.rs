//! Infrastructure layer for the slide relay.
//!
//! The infrastructure layer handles all I/O: accepting WebSocket connections
//! from remotes, driving each session, and pressing keys on the host.
//!
//! # Responsibilities
//!
//! - Binding a TCP listener for remote WebSocket connections
//! - Performing the WebSocket HTTP upgrade handshake
//! - Spawning per-session Tokio tasks and shutting them down
//! - Platform key injection (XTest, SendInput, CGEvent)
//! - Reading the optional TOML config file
//!
//! # What does NOT belong here?
//!
//! - Command resolution (that is the application layer)
//! - Session and config types (that is the domain layer)
//! - Command-line parsing (that is done in `main.rs`)

pub mod config_file;
pub mod key_injection;
pub mod session_handler;
pub mod ws_server;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use config_file::{ConfigError, FileConfig};
pub use key_injection::{platform_injector, DryRunKeyInjector, MockKeyInjector};
pub use session_handler::SessionHandler;
pub use ws_server::{run_server, RelayServer, ServerError, ServerHandle, ServerReport};
