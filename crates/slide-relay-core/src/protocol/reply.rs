//! Outbound replies.
//!
//! Replies are plain text frames, not JSON.  Requests are JSON and replies
//! are text; existing remotes display the reply string as-is, so the
//! asymmetry is part of the protocol.
//!
//! | Outcome            | Text                                         |
//! |--------------------|----------------------------------------------|
//! | key pressed        | `Action performed: <description>`            |
//! | injection failed   | `Error performing <description>: <detail>`   |
//! | name not in table  | `Unknown command: <command>`                 |
//! | no usable command  | `Invalid command format`                     |

use std::fmt;

/// Reply sent when a request has no usable `command`.
pub const INVALID_COMMAND_FORMAT: &str = "Invalid command format";

/// Which of the four reply shapes a [`CommandResult`] has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Performed,
    Failed,
    Unknown,
    InvalidFormat,
}

/// The outcome of handling one request, ready to send verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    kind: ResultKind,
    text: String,
}

impl CommandResult {
    /// The key press succeeded.
    pub fn performed(description: &str) -> Self {
        Self {
            kind: ResultKind::Performed,
            text: format!("Action performed: {description}"),
        }
    }

    /// The key press was attempted and failed with `detail`.
    pub fn failed(description: &str, detail: impl fmt::Display) -> Self {
        Self {
            kind: ResultKind::Failed,
            text: format!("Error performing {description}: {detail}"),
        }
    }

    /// The command name is not in the table.
    pub fn unknown(command: &str) -> Self {
        Self {
            kind: ResultKind::Unknown,
            text: format!("Unknown command: {command}"),
        }
    }

    /// The request carried no usable command.
    pub fn invalid_format() -> Self {
        Self {
            kind: ResultKind::InvalidFormat,
            text: INVALID_COMMAND_FORMAT.to_string(),
        }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    /// The reply text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the result, returning the reply text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// `true` only for [`ResultKind::Performed`].
    pub fn is_success(&self) -> bool {
        self.kind == ResultKind::Performed
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
