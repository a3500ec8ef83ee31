//! The fixed table of remote commands.
//!
//! A remote sends a command *name* (`"next_slide"`); the table resolves it to
//! the key to press and a human-readable description used in the reply.
//!
//! # Immutability
//!
//! The table is built once at startup and never written again.  Every session
//! reads it concurrently through a shared reference (`Arc<CommandTable>`), so
//! no lock is needed on the command path.
//!
//! # Interoperability
//!
//! Command names and descriptions are part of the wire contract: existing
//! remote apps match on reply strings such as `"Action performed: Next Slide"`.
//! Do not rename or reword entries.

use std::collections::HashMap;

use crate::keymap::KeyName;

/// What a single command does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    /// Key pressed when the command runs.
    pub key: KeyName,
    /// Human-readable description echoed back to the remote.
    pub description: &'static str,
}

/// `(name, key, description)` rows in the order they are documented.
const BUILTIN_COMMANDS: [(&str, KeyName, &str); 7] = [
    ("start_slide", KeyName::F5, "Start Slide Show (Full Screen)"),
    ("next_slide", KeyName::Right, "Next Slide"),
    ("previous_slide", KeyName::Left, "Previous Slide"),
    ("stop_slide", KeyName::Esc, "Stop Slide Show / Exit Full Screen"),
    ("pause_slide", KeyName::Space, "Pause Slide"),
    ("end_slide", KeyName::Esc, "End Slide Show"),
    ("blackout", KeyName::B, "Blackout Screen"),
];

/// Immutable mapping from command name to [`CommandEntry`].
///
/// Lookups are exact and case-sensitive.  A name that is not in the table is
/// a normal outcome (`None`), never an error.
///
/// # Example
///
/// ```rust
/// use slide_relay_core::domain::CommandTable;
/// use slide_relay_core::keymap::KeyName;
///
/// let table = CommandTable::builtin();
/// let entry = table.lookup("next_slide").unwrap();
/// assert_eq!(entry.key, KeyName::Right);
/// assert_eq!(entry.description, "Next Slide");
/// assert!(table.lookup("Next_Slide").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: HashMap<&'static str, CommandEntry>,
    /// Command names in documentation order, for stable iteration.
    order: Vec<&'static str>,
}

impl CommandTable {
    /// Builds the table of built-in presentation commands.
    pub fn builtin() -> Self {
        let mut entries = HashMap::with_capacity(BUILTIN_COMMANDS.len());
        let mut order = Vec::with_capacity(BUILTIN_COMMANDS.len());
        for (name, key, description) in BUILTIN_COMMANDS {
            entries.insert(name, CommandEntry { key, description });
            order.push(name);
        }
        Self { entries, order }
    }

    /// Resolves a command name.
    pub fn lookup(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.get(name)
    }

    /// Number of commands in the table.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false` for the built-in table; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates `(name, entry)` pairs in documentation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CommandEntry)> + '_ {
        self.order
            .iter()
            .filter_map(move |name| self.entries.get(name).map(|entry| (*name, entry)))
    }

    /// Iterates the command names in documentation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
