//! Application layer for slide-relay-server.
//!
//! The application layer orchestrates the business logic: it knows *what* to
//! do with a command, but delegates *how* a key is pressed to the
//! infrastructure layer through the [`KeyInjector`] trait.
//!
//! # Responsibilities
//!
//! - Resolving command names against the command table
//! - Invoking the key injector exactly once per resolved command
//! - Converting every outcome, including injection failures, into a reply
//!
//! # What does NOT belong here?
//!
//! - Opening sockets or listening for connections (that is infrastructure)
//! - Tokio task spawning (that happens in the infrastructure layer)
//! - OS input APIs (XTest, SendInput, CoreGraphics)

pub mod dispatcher;

pub use dispatcher::{CommandDispatcher, InjectionError, KeyInjector};
