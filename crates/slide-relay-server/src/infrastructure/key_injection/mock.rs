//! Mock key injector for tests.
//!
//! # Why a mock injector?
//!
//! The real injectors make OS API calls that:
//!
//! - Require a desktop session to run.
//! - Actually press keys on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! `MockKeyInjector` replaces the OS call with in-memory recording.  Each
//! press is pushed into a `Mutex<Vec<KeyName>>` so assertions can inspect
//! exactly which keys were pressed and in what order, even when many sessions
//! share one injector through an `Arc`.
//!
//! # Usage in tests
//!
//! ```ignore
//! let injector = Arc::new(MockKeyInjector::failing_on([KeyName::B]));
//! let dispatcher = CommandDispatcher::with_builtin_table(injector.clone());
//!
//! dispatcher.dispatch(Some("next_slide"));
//! dispatcher.dispatch(Some("blackout")); // → "Error performing ..."
//!
//! assert_eq!(injector.pressed(), vec![KeyName::Right]);
//! ```

use std::collections::HashSet;
use std::sync::Mutex;

use slide_relay_core::keymap::KeyName;

use crate::application::dispatcher::{InjectionError, KeyInjector};

/// Detail string carried by simulated failures.
pub const MOCK_FAILURE_DETAIL: &str = "mock failure";

/// A key injector that records presses instead of performing them.
#[derive(Debug, Default)]
pub struct MockKeyInjector {
    /// Successful presses, in call order.
    presses: Mutex<Vec<KeyName>>,
    /// Number of `press` calls, including failed ones.
    attempts: Mutex<usize>,
    /// Keys whose press fails with `InjectionError::Platform`.
    fail_on: HashSet<KeyName>,
}

impl MockKeyInjector {
    /// An injector where every press succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// An injector where pressing any key in `keys` fails.
    pub fn failing_on(keys: impl IntoIterator<Item = KeyName>) -> Self {
        Self {
            fail_on: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    /// An injector where every press fails.
    pub fn always_failing() -> Self {
        Self::failing_on(KeyName::ALL)
    }

    /// Snapshot of the successfully pressed keys.
    pub fn pressed(&self) -> Vec<KeyName> {
        self.presses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Total `press` calls, successful or not.
    pub fn attempts(&self) -> usize {
        *self
            .attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyInjector for MockKeyInjector {
    /// Records the press, or fails if `key` is configured to fail.
    fn press(&self, key: KeyName) -> Result<(), InjectionError> {
        *self
            .attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;

        if self.fail_on.contains(&key) {
            return Err(InjectionError::Platform(MOCK_FAILURE_DETAIL.into()));
        }
        self.presses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_presses_in_order() {
        let injector = MockKeyInjector::new();

        injector.press(KeyName::Right).unwrap();
        injector.press(KeyName::Left).unwrap();

        assert_eq!(injector.pressed(), vec![KeyName::Right, KeyName::Left]);
        assert_eq!(injector.attempts(), 2);
    }

    #[test]
    fn test_failing_key_is_not_recorded() {
        let injector = MockKeyInjector::failing_on([KeyName::B]);

        let err = injector.press(KeyName::B).unwrap_err();
        injector.press(KeyName::Space).unwrap();

        assert_eq!(err, InjectionError::Platform("mock failure".into()));
        assert_eq!(injector.pressed(), vec![KeyName::Space]);
        assert_eq!(injector.attempts(), 2);
    }

    #[test]
    fn test_always_failing_fails_every_key() {
        let injector = MockKeyInjector::always_failing();
        for key in KeyName::ALL {
            assert!(injector.press(key).is_err());
        }
        assert!(injector.pressed().is_empty());
    }
}
