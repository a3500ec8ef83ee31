//! Log-only key injector.
//!
//! Used with `--dry-run` to exercise a remote against a host that has no
//! desktop session (a CI box, a headless server, a container).  Every press
//! succeeds and is logged; nothing reaches the OS.

use tracing::info;

use slide_relay_core::keymap::KeyName;

use crate::application::dispatcher::{InjectionError, KeyInjector};

/// Key injector that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunKeyInjector;

impl KeyInjector for DryRunKeyInjector {
    fn press(&self, key: KeyName) -> Result<(), InjectionError> {
        info!("dry run: would press {key}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_always_succeeds() {
        let injector = DryRunKeyInjector;
        for key in KeyName::ALL {
            assert_eq!(injector.press(key), Ok(()));
        }
    }
}
