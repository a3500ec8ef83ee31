//! Logical key names understood by the relay.
//!
//! The command table refers to keys by short, platform-neutral names such as
//! `"right"` or `"f5"`.  [`KeyName`] is the typed form of those names.  The
//! platform key injectors translate a `KeyName` into an OS-native code through
//! [`KeyMapper`](super::KeyMapper) at the very last moment, so nothing above
//! the injection boundary ever sees a platform code.
//!
//! # Why an enum instead of a string?
//!
//! The set of keys the relay can press is fixed at compile time by the
//! command table.  An enum turns "press a key we have no mapping for" into a
//! compile error instead of a runtime surprise, and lets every platform table
//! be an exhaustive `match`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a string does not name a known key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key name: {0:?}")]
pub struct KeyNameError(pub String);

/// A logical keyboard key that a relay command can press.
///
/// The string form (see [`KeyName::as_str`]) matches the key names used by
/// existing presentation remotes, e.g. `"esc"` rather than `"escape"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyName {
    /// Function key F5: starts the slide show in most presentation software.
    F5,
    /// Right arrow: next slide.
    Right,
    /// Left arrow: previous slide.
    Left,
    /// Escape: leaves the slide show / full screen.
    Esc,
    /// Space bar.
    Space,
    /// Letter B: toggles a black screen in PowerPoint, Keynote and Impress.
    B,
}

impl KeyName {
    /// Every key, in declaration order.
    pub const ALL: [KeyName; 6] = [
        KeyName::F5,
        KeyName::Right,
        KeyName::Left,
        KeyName::Esc,
        KeyName::Space,
        KeyName::B,
    ];

    /// Returns the canonical lowercase name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyName::F5 => "f5",
            KeyName::Right => "right",
            KeyName::Left => "left",
            KeyName::Esc => "esc",
            KeyName::Space => "space",
            KeyName::B => "b",
        }
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyName {
    type Err = KeyNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyName::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| KeyNameError(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
