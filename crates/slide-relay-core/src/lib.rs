//! # slide-relay-core
//!
//! Shared library for the slide relay containing the command vocabulary, the
//! request/reply protocol, and key name translation tables.
//!
//! It has zero dependencies on OS APIs, async runtimes, or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! The slide relay lets a phone or tablet drive presentation software on a
//! laptop.  The remote sends a JSON request such as `{"command":"next_slide"}`
//! over WebSocket; the relay presses the matching key (Right arrow) on the
//! laptop and answers with a short text status.
//!
//! This crate is the pure foundation:
//!
//! - **`domain`** – The [`CommandTable`]: which command names exist, which key
//!   each one presses, and its human-readable description.
//!
//! - **`protocol`** – How a text frame becomes a [`CommandRequest`], and the
//!   exact wording of every [`CommandResult`] reply.
//!
//! - **`keymap`** – [`KeyName`] and the tables that turn it into a Windows VK
//!   code, an X11 KeySym, or a macOS CGKeyCode.

pub mod domain;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `slide_relay_core::CommandTable` instead of the full module path.
pub use domain::command_table::{CommandEntry, CommandTable};
pub use keymap::key_name::{KeyName, KeyNameError};
pub use protocol::reply::{CommandResult, ResultKind, INVALID_COMMAND_FORMAT};
pub use protocol::request::{CommandRequest, DecodeError};
