//! [`KeyName`] to Windows Virtual Key (VK) code translation.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h),
//! https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes
//!
//! # What is a Windows Virtual Key (VK) code? (for beginners)
//!
//! Windows assigns each keyboard key a number called a "Virtual Key code".
//! These are defined in `<winuser.h>` and named `VK_*` (e.g., `VK_ESCAPE =
//! 0x1B`, `VK_SPACE = 0x20`).  They are "virtual" because they represent
//! *logical* keys rather than physical scan codes: `VK_B = 0x42` is the B key
//! whatever the keyboard layout.
//!
//! `SendInput` accepts a VK code directly in `KEYBDINPUT::wVk`, so this is
//! the only translation step the Windows injector needs.

use super::key_name::KeyName;

pub const VK_F5: u8 = 0x74;
pub const VK_RIGHT: u8 = 0x27;
pub const VK_LEFT: u8 = 0x25;
pub const VK_ESCAPE: u8 = 0x1B;
pub const VK_SPACE: u8 = 0x20;
pub const VK_B: u8 = 0x42;

/// Translates a [`KeyName`] to its Windows VK code.
pub fn key_to_vk(key: KeyName) -> u8 {
    match key {
        KeyName::F5 => VK_F5,
        KeyName::Right => VK_RIGHT,
        KeyName::Left => VK_LEFT,
        KeyName::Esc => VK_ESCAPE,
        KeyName::Space => VK_SPACE,
        KeyName::B => VK_B,
    }
}

/// Returns `true` for keys that Windows treats as "extended" keys.
///
/// Arrow keys share scan codes with the numeric keypad; `SendInput` must be
/// told they are extended or some applications see a keypad arrow instead.
pub fn is_extended(key: KeyName) -> bool {
    matches!(key, KeyName::Right | KeyName::Left)
}
