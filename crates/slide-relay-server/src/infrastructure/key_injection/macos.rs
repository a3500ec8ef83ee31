//! macOS CoreGraphics key injection.
//!
//! Uses `CGEventCreateKeyboardEvent` and `CGEventPost` to inject key events at
//! the `kCGHIDEventTap` level, the same level as physical keyboard input.
//!
//! # Accessibility permission
//!
//! Posting at `kCGHIDEventTap` requires the **Accessibility** permission
//! (System Settings → Privacy & Security → Accessibility).  Without it the
//! events are silently dropped by the OS; the relay cannot detect this.

#![cfg(target_os = "macos")]

use core_graphics::event::{CGEvent, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

use slide_relay_core::keymap::{KeyMapper, KeyName};

use crate::application::dispatcher::{InjectionError, KeyInjector};

/// macOS implementation of [`KeyInjector`] using CoreGraphics events.
pub struct MacosCgEventInjector;

impl MacosCgEventInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacosCgEventInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInjector for MacosCgEventInjector {
    fn press(&self, key: KeyName) -> Result<(), InjectionError> {
        let keycode = KeyMapper::to_macos_cgkeycode(key);
        post_key(keycode, true)?;
        post_key(keycode, false)
    }
}

fn post_key(keycode: u16, down: bool) -> Result<(), InjectionError> {
    let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
        .map_err(|()| InjectionError::Platform("CGEventSourceCreate failed".into()))?;
    let event = CGEvent::new_keyboard_event(source, keycode, down)
        .map_err(|()| InjectionError::Platform("CGEventCreateKeyboardEvent failed".into()))?;
    event.post(CGEventTapLocation::HID);
    Ok(())
}
