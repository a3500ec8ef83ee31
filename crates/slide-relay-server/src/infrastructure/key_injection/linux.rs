//! Linux X11 key injection via the XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! events as if the user had physically pressed a key.  The focused window
//! (the presentation) cannot tell them apart from real input.
//!
//! One press is:
//!
//! ```text
//! KeyName → X11 KeySym → XKeysymToKeycode(display, keysym) → keycode
//! XTestFakeKeyEvent(display, keycode, True,  CurrentTime)   key down
//! XTestFakeKeyEvent(display, keycode, False, CurrentTime)   key up
//! XFlush(display)
//! ```
//!
//! # Permissions
//!
//! The process must be able to open the X display named by `DISPLAY`.  This is
//! normally true when it runs in the user's desktop session.  Under Wayland
//! the events only reach XWayland applications.

use std::ptr;
use std::sync::Mutex;

use x11::{xlib, xtest};

use slide_relay_core::keymap::{KeyMapper, KeyName};

use crate::application::dispatcher::{InjectionError, KeyInjector};

/// `CurrentTime`: let the X server timestamp the event.
const CURRENT_TIME: std::os::raw::c_ulong = 0;

/// Owned connection to the X server.
struct DisplayHandle(*mut xlib::Display);

// SAFETY: the pointer is only ever dereferenced by Xlib while the owning
// `Mutex` is held, so at most one thread uses the connection at a time.
unsafe impl Send for DisplayHandle {}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        // SAFETY: the pointer came from a successful XOpenDisplay and is
        // closed exactly once.
        unsafe {
            xlib::XCloseDisplay(self.0);
        }
    }
}

/// Linux X11/XTest key injector.
pub struct LinuxXTestInjector {
    display: Mutex<DisplayHandle>,
}

impl LinuxXTestInjector {
    /// Connects to the X display named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns `InjectionError::Platform` if the display cannot be opened.
    pub fn new() -> Result<Self, InjectionError> {
        // SAFETY: a null name makes Xlib read the DISPLAY environment variable.
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(InjectionError::Platform(
                "cannot open X display (is DISPLAY set?)".into(),
            ));
        }
        Ok(Self {
            display: Mutex::new(DisplayHandle(display)),
        })
    }
}

impl KeyInjector for LinuxXTestInjector {
    fn press(&self, key: KeyName) -> Result<(), InjectionError> {
        let keysym = KeyMapper::to_x11_keysym(key);
        let handle = self
            .display
            .lock()
            .map_err(|_| InjectionError::Platform("X display lock poisoned".into()))?;
        let display = handle.0;

        // SAFETY: `display` is a live connection guarded by the mutex above.
        unsafe {
            let keycode = xlib::XKeysymToKeycode(display, xlib::KeySym::from(keysym));
            if keycode == 0 {
                return Err(InjectionError::UnmappedKey(key));
            }
            let keycode = std::os::raw::c_uint::from(keycode);

            if xtest::XTestFakeKeyEvent(display, keycode, xlib::True, CURRENT_TIME) == 0 {
                return Err(InjectionError::Platform("XTestFakeKeyEvent (down) failed".into()));
            }
            if xtest::XTestFakeKeyEvent(display, keycode, xlib::False, CURRENT_TIME) == 0 {
                return Err(InjectionError::Platform("XTestFakeKeyEvent (up) failed".into()));
            }
            xlib::XFlush(display);
        }
        Ok(())
    }
}
