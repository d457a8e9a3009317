//! Physical keyboard keys
//!
//! The key table is closed: every variant carries the canonical interop code
//! used by native key-code tables. The numbering follows GLFW except for
//! `GraveAccent`, which keeps its historical code 94. Those codes are part of
//! the compatibility surface and must never be renumbered.

use serde::{Deserialize, Serialize};

macro_rules! define_keys {
    ($($variant:ident = $code:literal,)*) => {
        /// Platform-neutral identifier for a physical keyboard key
        ///
        /// Variants are named after the US layout position of the key. Use
        /// [`Key::code`] for the numeric interop value and [`Key::from_code`]
        /// for the reverse lookup.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "i32", into = "i32")]
        #[repr(i32)]
        pub enum Key {
            $($variant = $code,)*
        }

        impl Key {
            /// Every key in the table, ordered by code
            pub const ALL: &'static [Key] = &[$(Key::$variant,)*];

            /// Look up the key for a native key code
            ///
            /// Total: codes outside the table resolve to [`Key::Unknown`].
            pub const fn from_code(code: i32) -> Self {
                match code {
                    $($code => Key::$variant,)*
                    _ => Key::Unknown,
                }
            }

            /// Identifier of the key, e.g. `"LeftShift"`
            pub const fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => stringify!($variant),)*
                }
            }
        }
    };
}

define_keys! {
    Unknown = -1,

    // Printable keys
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,
    Semicolon = 59,
    Equal = 61,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    GraveAccent = 94,
    World1 = 161,
    World2 = 162,

    // Function and navigation keys
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    CapsLock = 280,
    ScrollLock = 281,
    NumLock = 282,
    PrintScreen = 283,
    Pause = 284,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    F13 = 302,
    F14 = 303,
    F15 = 304,
    F16 = 305,
    F17 = 306,
    F18 = 307,
    F19 = 308,
    F20 = 309,
    F21 = 310,
    F22 = 311,
    F23 = 312,
    F24 = 313,
    F25 = 314,

    // Keypad
    Kp0 = 320,
    Kp1 = 321,
    Kp2 = 322,
    Kp3 = 323,
    Kp4 = 324,
    Kp5 = 325,
    Kp6 = 326,
    Kp7 = 327,
    Kp8 = 328,
    Kp9 = 329,
    KpDecimal = 330,
    KpDivide = 331,
    KpMultiply = 332,
    KpSubtract = 333,
    KpAdd = 334,
    KpEnter = 335,
    KpEqual = 336,

    // Modifier keys
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    LeftSuper = 343,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
    RightSuper = 347,
    Menu = 348,
}

impl Key {
    /// Canonical interop code of this key (`-1` for [`Key::Unknown`])
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Whether this is one of the left/right shift, control, alt or super keys
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LeftShift
                | Key::LeftControl
                | Key::LeftAlt
                | Key::LeftSuper
                | Key::RightShift
                | Key::RightControl
                | Key::RightAlt
                | Key::RightSuper
        )
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::Unknown
    }
}

impl From<i32> for Key {
    fn from(code: i32) -> Self {
        Key::from_code(code)
    }
}

impl From<Key> for i32 {
    fn from(key: Key) -> Self {
        key.code()
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
