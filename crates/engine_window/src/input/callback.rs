//! Keyboard callback capability
//!
//! Applications implement [`KeyboardCallback`] and hand it to the window via
//! its configuration. The window's backend invokes it; application code never
//! calls these methods directly.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use super::{Action, Key, Modifiers};

/// Result returned by keyboard callback methods
///
/// An `Err` is reported to the event loop for that event only; delivery of
/// the remaining queued input continues.
pub type CallbackResult = Result<(), Box<dyn std::error::Error>>;

/// Keyboard input receiver implemented by application code
pub trait KeyboardCallback {
    /// A text character was produced
    ///
    /// Called once per character after platform dead-key / IME composition.
    /// There is no fixed relation to `key_typed`: one keystroke may produce
    /// zero, one or several characters.
    fn char_typed(&mut self, codepoint: char, mods: Modifiers) -> CallbackResult {
        let _ = (codepoint, mods);
        Ok(())
    }

    /// A key changed state
    ///
    /// For a single physical key the actions arrive as `Press`, any number of
    /// `Repeat`, then `Release`. `scancode` is the raw platform scancode and is
    /// the only way to tell apart keys that resolve to [`Key::Unknown`].
    fn key_typed(
        &mut self,
        key: Key,
        scancode: i32,
        action: Action,
        mods: Modifiers,
    ) -> CallbackResult;
}

/// Callback handle shared between the application and its window
pub type SharedKeyboardCallback = Rc<RefCell<dyn KeyboardCallback>>;

/// Wrap a callback into a [`SharedKeyboardCallback`]
///
/// Returns the typed handle so the caller can keep inspecting its callback;
/// it coerces to the shared handle when cloned into a configuration.
pub fn shared<C: KeyboardCallback + 'static>(callback: C) -> Rc<RefCell<C>> {
    Rc::new(RefCell::new(callback))
}

/// Why a single callback invocation failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    /// The callback returned an error
    #[error("keyboard callback failed: {0}")]
    Failed(String),

    /// The callback panicked; the panic was contained
    #[error("keyboard callback panicked: {0}")]
    Panicked(String),

    /// The callback was already borrowed when the event was delivered
    #[error("keyboard callback is already in use")]
    Busy,
}
