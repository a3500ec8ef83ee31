//! [`KeyName`] to macOS `CGKeyCode` translation.
//!
//! `CGKeyCode` values identify physical key positions on an ANSI keyboard.
//! Source: `HIToolbox/Events.h` (`kVK_*` constants).

use super::key_name::KeyName;

/// `kVK_F5`
pub const KVK_F5: u16 = 0x60;
/// `kVK_RightArrow`
pub const KVK_RIGHT_ARROW: u16 = 0x7C;
/// `kVK_LeftArrow`
pub const KVK_LEFT_ARROW: u16 = 0x7B;
/// `kVK_Escape`
pub const KVK_ESCAPE: u16 = 0x35;
/// `kVK_Space`
pub const KVK_SPACE: u16 = 0x31;
/// `kVK_ANSI_B`
pub const KVK_ANSI_B: u16 = 0x0B;

/// Translates a [`KeyName`] to its macOS `CGKeyCode`.
pub fn key_to_cgkeycode(key: KeyName) -> u16 {
    match key {
        KeyName::F5 => KVK_F5,
        KeyName::Right => KVK_RIGHT_ARROW,
        KeyName::Left => KVK_LEFT_ARROW,
        KeyName::Esc => KVK_ESCAPE,
        KeyName::Space => KVK_SPACE,
        KeyName::B => KVK_ANSI_B,
    }
}
