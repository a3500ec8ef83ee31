//! Key name translation tables for cross-platform key injection.
//!
//! The canonical representation is [`KeyName`], the short name the command
//! table uses (`"right"`, `"f5"`, ...).  Platform-specific codes are produced
//! only at the injection boundary.

pub mod key_name;
pub mod linux_x11;
pub mod macos_cg;
pub mod windows_vk;

pub use key_name::{KeyName, KeyNameError};

/// Unified key mapper providing every translation direction the injectors need.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a [`KeyName`] to a Windows Virtual Key code.
    pub fn to_windows_vk(key: KeyName) -> u8 {
        windows_vk::key_to_vk(key)
    }

    /// Returns `true` if Windows must flag the key as an extended key.
    pub fn is_windows_extended(key: KeyName) -> bool {
        windows_vk::is_extended(key)
    }

    /// Translates a [`KeyName`] to an X11 KeySym value for Linux hosts.
    pub fn to_x11_keysym(key: KeyName) -> u32 {
        linux_x11::key_to_keysym(key)
    }

    /// Translates a [`KeyName`] to a macOS `CGKeyCode` value.
    pub fn to_macos_cgkeycode(key: KeyName) -> u16 {
        macos_cg::key_to_cgkeycode(key)
    }
}
