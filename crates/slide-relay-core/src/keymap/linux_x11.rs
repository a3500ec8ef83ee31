//! [`KeyName`] to X11 KeySym translation for Linux hosts.
//!
//! X11 KeySym values are defined in X11/keysymdef.h.
//! Reference: https://gitlab.freedesktop.org/xorg/proto/xorgproto/-/blob/master/include/X11/keysymdef.h
//!
//! # KeySym vs keycode
//!
//! `XTestFakeKeyEvent` takes a server-specific *keycode*, not a KeySym.  The
//! injector converts with `XKeysymToKeycode(display, keysym)` at press time:
//!
//! ```text
//! KeyName → X11 KeySym (this table) → XKeysymToKeycode → X11 keycode
//! ```
//!
//! Letters use their lowercase ASCII value (`XK_b` = 0x0062) so no Shift
//! modifier is implied.

use super::key_name::KeyName;

/// `XK_F5`
pub const XK_F5: u32 = 0xFFC2;
/// `XK_Right`
pub const XK_RIGHT: u32 = 0xFF53;
/// `XK_Left`
pub const XK_LEFT: u32 = 0xFF51;
/// `XK_Escape`
pub const XK_ESCAPE: u32 = 0xFF1B;
/// `XK_space`
pub const XK_SPACE: u32 = 0x0020;
/// `XK_b`
pub const XK_B: u32 = 0x0062;

/// Translates a [`KeyName`] to its X11 KeySym.
pub fn key_to_keysym(key: KeyName) -> u32 {
    match key {
        KeyName::F5 => XK_F5,
        KeyName::Right => XK_RIGHT,
        KeyName::Left => XK_LEFT,
        KeyName::Esc => XK_ESCAPE,
        KeyName::Space => XK_SPACE,
        KeyName::B => XK_B,
    }
}
