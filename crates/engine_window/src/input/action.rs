//! Key state transitions

use serde::{Deserialize, Serialize};

/// A discrete key-state transition reported by the platform
///
/// `Repeat` is an OS-generated repeated key-down while the key is held and is
/// distinct from the initial `Press`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Action {
    /// Key went up
    Release = 0,
    /// Key went down
    Press = 1,
    /// Key is held and the OS generated another key-down
    Repeat = 2,
}

impl Action {
    /// Native action code (`0`, `1`, `2`)
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Look up the action for a native action code
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Action::Release),
            1 => Some(Action::Press),
            2 => Some(Action::Repeat),
            _ => None,
        }
    }

    /// Whether the key is down after this transition
    pub const fn is_down(self) -> bool {
        !matches!(self, Action::Release)
    }
}
