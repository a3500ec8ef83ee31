//! slide-relay-server library crate.
//!
//! A WebSocket relay that lets a phone or browser drive a slide presentation
//! on the host: each JSON command received is turned into one key press, and
//! the outcome is sent back as a line of plain text.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Remote (JSON over WebSocket)
//!         ↕
//! [slide-relay-server]
//!   ├── domain/               Pure types: RelayConfig, Session lifecycle
//!   ├── application/          CommandDispatcher and the KeyInjector seam
//!   └── infrastructure/
//!         ├── ws_server/       Accept loop, session set, shutdown
//!         ├── session_handler/ Per-session read → dispatch → reply loop
//!         ├── key_injection/   XTest / SendInput / CGEvent / mock / dry run
//!         └── config_file/     Optional TOML config
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `slide-relay-core` only.
//! - `infrastructure` depends on all other layers plus `tokio` and `tungstenite`.

/// Domain layer: pure types (no I/O).
pub mod domain;

/// Application layer: command resolution and dispatch.
pub mod application;

/// Infrastructure layer: WebSocket server, sessions and key injection.
pub mod infrastructure;
