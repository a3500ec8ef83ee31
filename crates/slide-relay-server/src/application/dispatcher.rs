//! CommandDispatcher: turns a command name into a key press and a reply.
//!
//! This use case sits at the application layer and delegates the actual key
//! press to a [`KeyInjector`] trait object.  The platform-specific injectors
//! live in the infrastructure layer.
//!
//! # Decision table
//!
//! | Command                  | Injector called? | Reply                                     |
//! |--------------------------|------------------|-------------------------------------------|
//! | absent or `""`           | no               | `Invalid command format`                  |
//! | not in the table         | no               | `Unknown command: <command>`              |
//! | in the table, press ok   | once             | `Action performed: <description>`         |
//! | in the table, press fails| once             | `Error performing <description>: <error>` |
//!
//! A failed key press is part of the reply, never a panic or an `Err`: the
//! session that asked for it keeps running.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use slide_relay_core::keymap::KeyName;
use slide_relay_core::{CommandResult, CommandTable};

/// Error type for key injection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectionError {
    /// The OS rejected or failed the synthetic key event.
    #[error("platform error: {0}")]
    Platform(String),

    /// The host keyboard layout has no key for this name.
    #[error("no key code for {0} on this host")]
    UnmappedKey(KeyName),

    /// No injector is available on this platform or it failed to start.
    #[error("key injector not initialized")]
    NotInitialized,
}

/// Platform-agnostic key injection.
///
/// One press means key-down immediately followed by key-up.  Implementations
/// must be safe to call from many session tasks at once.
#[cfg_attr(test, mockall::automock)]
pub trait KeyInjector: Send + Sync {
    /// Presses and releases `key` on the local machine.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] on any platform or permission failure.
    fn press(&self, key: KeyName) -> Result<(), InjectionError>;
}

/// Resolves command names and drives the key injector.
///
/// Holds only shared, read-only state, so one dispatcher is wrapped in an
/// `Arc` and used by every session.
pub struct CommandDispatcher {
    table: Arc<CommandTable>,
    injector: Arc<dyn KeyInjector>,
}

impl CommandDispatcher {
    /// Creates a dispatcher over `table` that presses keys with `injector`.
    pub fn new(table: Arc<CommandTable>, injector: Arc<dyn KeyInjector>) -> Self {
        Self { table, injector }
    }

    /// Creates a dispatcher over the built-in command table.
    pub fn with_builtin_table(injector: Arc<dyn KeyInjector>) -> Self {
        Self::new(Arc::new(CommandTable::builtin()), injector)
    }

    /// The command table this dispatcher resolves against.
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Handles one command.
    ///
    /// Performs at most one key press and never fails: every outcome is
    /// expressed as a [`CommandResult`].
    pub fn dispatch(&self, command: Option<&str>) -> CommandResult {
        let Some(command) = command.filter(|c| !c.is_empty()) else {
            return CommandResult::invalid_format();
        };

        let Some(entry) = self.table.lookup(command) else {
            warn!("unknown command received: {command}");
            return CommandResult::unknown(command);
        };

        match self.injector.press(entry.key) {
            Ok(()) => {
                info!("performed action: {} (key {})", entry.description, entry.key);
                CommandResult::performed(entry.description)
            }
            Err(e) => {
                error!("error performing {}: {e}", entry.description);
                CommandResult::failed(entry.description, &e)
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
