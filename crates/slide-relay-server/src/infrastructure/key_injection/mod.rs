//! Platform-specific key injection implementations.
//!
//! The correct implementation is selected at compile time via
//! `#[cfg(target_os = ...)]`:
//!
//! | Target  | Injector                    | Mechanism                         |
//! |---------|-----------------------------|-----------------------------------|
//! | Linux   | `LinuxXTestInjector`        | XTest (needs the `xtest` feature) |
//! | Windows | `WindowsSendInputInjector`  | `SendInput`                       |
//! | macOS   | `MacosCgEventInjector`      | `CGEventPost`                     |
//!
//! `MockKeyInjector` (recording) and `DryRunKeyInjector` (log-only) work on
//! every platform.

use std::sync::Arc;

use crate::application::dispatcher::{InjectionError, KeyInjector};

pub mod dry_run;
pub mod mock;

#[cfg(all(target_os = "linux", feature = "xtest"))]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub mod macos;

pub use dry_run::DryRunKeyInjector;
pub use mock::MockKeyInjector;

/// Creates the key injector for the platform this binary was built for.
///
/// # Errors
///
/// Returns [`InjectionError`] if the platform input facility cannot be
/// opened, or [`InjectionError::NotInitialized`] when this build has no
/// injector for the target.
pub fn platform_injector() -> Result<Arc<dyn KeyInjector>, InjectionError> {
    #[cfg(all(target_os = "linux", feature = "xtest"))]
    {
        Ok(Arc::new(linux::LinuxXTestInjector::new()?))
    }

    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::WindowsSendInputInjector::new()))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(Arc::new(macos::MacosCgEventInjector::new()))
    }

    #[cfg(not(any(
        all(target_os = "linux", feature = "xtest"),
        target_os = "windows",
        target_os = "macos"
    )))]
    {
        Err(InjectionError::NotInitialized)
    }
}
