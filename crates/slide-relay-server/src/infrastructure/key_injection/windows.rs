//! Windows key injection via the SendInput API.
//!
//! Translates [`KeyName`] to a Windows Virtual Key code and injects a
//! key-down / key-up pair in a single `SendInput` call, so no other input can
//! land between the two halves of the press.

#![cfg(target_os = "windows")]

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, VIRTUAL_KEY,
};

use slide_relay_core::keymap::{KeyMapper, KeyName};

use crate::application::dispatcher::{InjectionError, KeyInjector};

/// Windows implementation of [`KeyInjector`] using SendInput.
pub struct WindowsSendInputInjector;

impl WindowsSendInputInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsSendInputInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInjector for WindowsSendInputInjector {
    fn press(&self, key: KeyName) -> Result<(), InjectionError> {
        let vk = KeyMapper::to_windows_vk(key);
        let mut flags = KEYBD_EVENT_FLAGS(0);
        if KeyMapper::is_windows_extended(key) {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }

        let inputs = [keyboard_input(vk, flags), keyboard_input(vk, flags | KEYEVENTF_KEYUP)];

        // SAFETY: `inputs` is a valid array of KEYBDINPUT structures.
        let sent = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            // UIPI blocks injection into windows of a higher integrity level.
            return Err(InjectionError::Platform(format!(
                "SendInput injected {sent} of {} events",
                inputs.len()
            )));
        }
        Ok(())
    }
}

fn keyboard_input(vk: u8, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(u16::from(vk)),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}
