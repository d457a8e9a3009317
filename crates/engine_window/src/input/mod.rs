//! Keyboard input model and delivery
//!
//! - **`key`**: closed table of physical keys with their interop codes
//! - **`action`**: press / repeat / release transitions
//! - **`modifiers`**: modifier key bit set
//! - **`callback`**: the capability trait applications implement
//! - **`dispatch`**: per-window queue that orders and delivers events

pub mod action;
pub mod callback;
pub mod dispatch;
pub mod key;
pub mod modifiers;

pub use action::Action;
pub use callback::{shared, CallbackError, CallbackResult, KeyboardCallback, SharedKeyboardCallback};
pub use dispatch::{CallbackFailure, DispatchReport, InputDispatcher, InputEvent, KeyTracker};
pub use key::Key;
pub use modifiers::Modifiers;
