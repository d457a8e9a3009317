//! Keyboard event queue and delivery
//!
//! The dispatcher sits between a window backend and the application's
//! [`KeyboardCallback`](super::KeyboardCallback). It owns the per-window
//! input queue, enforces the per-key `Press, Repeat*, Release` ordering and
//! contains callback failures so one bad keystroke never stops delivery.

use std::any::Any;
use std::collections::{HashSet, VecDeque};
use std::panic::{self, AssertUnwindSafe};

use super::callback::{CallbackError, KeyboardCallback, SharedKeyboardCallback};
use super::{Action, Key, Modifiers};

/// A translated keyboard event waiting for delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Text input
    Char {
        /// Unicode scalar value produced
        codepoint: char,
        /// Modifiers active for the character
        mods: Modifiers,
    },
    /// Key state transition
    Key {
        /// Resolved key ([`Key::Unknown`] when unmapped)
        key: Key,
        /// Raw platform scancode
        scancode: i32,
        /// Transition
        action: Action,
        /// Modifiers active for the transition
        mods: Modifiers,
    },
}

/// Identity of a physical key for ordering purposes
///
/// Unmapped keys are told apart by scancode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PhysicalKey {
    Mapped(Key),
    Scancode(i32),
}

impl PhysicalKey {
    fn of(key: Key, scancode: i32) -> Self {
        if key == Key::Unknown {
            Self::Scancode(scancode)
        } else {
            Self::Mapped(key)
        }
    }
}

/// Tracks which physical keys are held down
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashSet<PhysicalKey>,
}

impl KeyTracker {
    /// Create a tracker with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a transition against the key's current state
    ///
    /// Returns the action to deliver, or `None` when the transition has no
    /// preceding `Press` and must be dropped. A `Press` for a key already held
    /// is delivered as `Repeat`.
    pub fn admit(&mut self, key: Key, scancode: i32, action: Action) -> Option<Action> {
        let id = PhysicalKey::of(key, scancode);
        match action {
            Action::Press if self.held.insert(id) => Some(Action::Press),
            Action::Press => Some(Action::Repeat),
            Action::Repeat => self.held.contains(&id).then_some(Action::Repeat),
            Action::Release => self.held.remove(&id).then_some(Action::Release),
        }
    }

    /// Whether the key is currently held
    pub fn is_held(&self, key: Key, scancode: i32) -> bool {
        self.held.contains(&PhysicalKey::of(key, scancode))
    }

    /// Number of keys currently held
    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Forget all held keys
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// A callback invocation that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackFailure {
    /// Event that was being delivered
    pub event: InputEvent,
    /// What went wrong
    pub error: CallbackError,
}

/// Outcome of one dispatch pass, returned to the event loop
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Events handed to the callback (including ones whose handler failed)
    pub delivered: usize,
    /// Events discarded by ordering rules or because no callback was set
    pub dropped: usize,
    /// Per-event callback failures, in delivery order
    pub failures: Vec<CallbackFailure>,
}

impl DispatchReport {
    /// True if every delivered event was handled without error
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Per-window input queue
#[derive(Debug, Default)]
pub struct InputDispatcher {
    queue: VecDeque<InputEvent>,
    tracker: KeyTracker,
}

impl InputDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event observed from the platform
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Held-key state
    pub fn tracker(&self) -> &KeyTracker {
        &self.tracker
    }

    /// Deliver every queued event to `callback`
    ///
    /// Each event is delivered to the callback passed in for this pass; the
    /// handle cannot change while the pass runs.
    pub fn dispatch(&mut self, callback: Option<&SharedKeyboardCallback>) -> DispatchReport {
        let mut report = DispatchReport::default();

        let Some(callback) = callback else {
            report.dropped = self.queue.len();
            self.queue.clear();
            return report;
        };

        while let Some(event) = self.queue.pop_front() {
            // Borrow before admitting so an undelivered event leaves the
            // held-key state untouched.
            let Ok(mut target) = callback.try_borrow_mut() else {
                log::error!("Keyboard callback busy, dropping {:?}", event);
                report.failures.push(CallbackFailure { event, error: CallbackError::Busy });
                continue;
            };

            let event = match event {
                InputEvent::Key { key, scancode, action, mods } => {
                    match self.tracker.admit(key, scancode, action) {
                        Some(action) => InputEvent::Key { key, scancode, action, mods },
                        None => {
                            log::debug!(
                                "Dropping {:?} for {} (scancode {}): key is not held",
                                action,
                                key,
                                scancode
                            );
                            report.dropped += 1;
                            continue;
                        }
                    }
                }
                InputEvent::Char { .. } => event,
            };

            report.delivered += 1;
            if let Err(error) = invoke(&mut *target, &event) {
                log::error!("Keyboard callback failed for {:?}: {}", event, error);
                report.failures.push(CallbackFailure { event, error });
            }
        }

        report
    }

    /// Drop queued events and held-key state
    pub fn clear(&mut self) {
        self.queue.clear();
        self.tracker.clear();
    }
}

fn invoke(target: &mut dyn KeyboardCallback, event: &InputEvent) -> Result<(), CallbackError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match *event {
        InputEvent::Char { codepoint, mods } => target.char_typed(codepoint, mods),
        InputEvent::Key { key, scancode, action, mods } => {
            target.key_typed(key, scancode, action, mods)
        }
    }));

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(CallbackError::Failed(err.to_string())),
        Err(payload) => Err(CallbackError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
