//! Request/reply protocol between a remote and the relay.
//!
//! - `request` – decoding inbound JSON frames into a [`CommandRequest`]
//! - `reply`   – the four plain-text reply shapes ([`CommandResult`])

pub mod reply;
pub mod request;

pub use reply::{CommandResult, ResultKind, INVALID_COMMAND_FORMAT};
pub use request::{CommandRequest, DecodeError};
