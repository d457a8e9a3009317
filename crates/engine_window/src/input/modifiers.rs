//! Modifier key bit set

use bitflags::bitflags;

bitflags! {
    /// Modifier keys active at the time of an input event
    ///
    /// Only the low six bits are defined; values built from native masks
    /// drop anything else.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key held
        const SHIFT = 0x01;
        /// Either control key held
        const CONTROL = 0x02;
        /// Either alt key held
        const ALT = 0x04;
        /// Either super (logo) key held
        const SUPER = 0x08;
        /// Caps lock engaged
        const CAPS_LOCK = 0x10;
        /// Num lock engaged
        const NUM_LOCK = 0x20;
    }
}

impl Modifiers {
    /// Build from a native modifier mask, dropping undefined bits
    pub fn from_native(mask: i32) -> Self {
        // Only the low byte can carry defined bits; the rest is discarded.
        Self::from_bits_truncate((mask & 0xFF) as u8)
    }

    /// Native mask value, always in `0..=0x3F`
    pub fn to_native(self) -> i32 {
        i32::from(self.bits())
    }
}
