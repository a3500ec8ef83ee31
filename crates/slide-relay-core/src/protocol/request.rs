//! Decoding of inbound remote requests.
//!
//! Wire format: one WebSocket frame holds one JSON object with an optional
//! string field `command`:
//!
//! ```json
//! {"command":"next_slide"}
//! ```
//!
//! Any other fields are ignored so newer remotes can add metadata without
//! breaking older relays.
//!
//! A `command` that is present but not a string (`{"command": 5}`,
//! `{"command": true}`) is a decode error and gets `Invalid command format`,
//! not `Unknown command: 5` as a loosely typed relay would answer.

use serde_json::Value;
use thiserror::Error;

/// Name of the only field the relay reads from a request object.
pub const COMMAND_FIELD: &str = "command";

/// Errors produced while decoding an inbound payload.
///
/// Every variant is recoverable: the session answers with
/// `"Invalid command format"` and keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload is not JSON at all (or not UTF-8, for binary frames).
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The payload is JSON but not an object (e.g. an array or a bare string).
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The `command` field is present but is not a string.
    #[error("`command` must be a string, got {0}")]
    CommandNotAString(&'static str),
}

/// A decoded request: the command name the remote asked for, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRequest {
    /// `None` when the field is missing or `null`.
    pub command: Option<String>,
}

impl CommandRequest {
    /// Builds a request for `command`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
        }
    }

    /// A request that carries no command; used when decoding fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Borrowed view of the command name.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Decodes a request from a text frame.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if `payload` is not a JSON object or its
    /// `command` field is not a string.
    pub fn decode(payload: &str) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }

    /// Decodes a request from a binary frame holding UTF-8 JSON.
    ///
    /// # Errors
    ///
    /// Same as [`CommandRequest::decode`]; invalid UTF-8 is reported as
    /// [`DecodeError::InvalidJson`].
    pub fn decode_bytes(payload: &[u8]) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_slice(payload).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(mut fields) = value else {
            return Err(DecodeError::NotAnObject(json_type_name(&value)));
        };

        match fields.remove(COMMAND_FIELD) {
            None | Some(Value::Null) => Ok(Self::empty()),
            Some(Value::String(command)) => Ok(Self::new(command)),
            Some(other) => Err(DecodeError::CommandNotAString(json_type_name(&other))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
