//! Hotkey model (pure Rust, no FFI).
//!
//! A hotkey is a key code plus an exact set of tracked modifiers. Flag values
//! mirror the CGEventFlags bits so raw event flags can be masked directly.

use std::fmt;

use super::constants::*;

/// Bitset of the four modifiers considered for hotkey matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u64);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(FLAG_SHIFT);
    pub const CONTROL: Modifiers = Modifiers(FLAG_CONTROL);
    pub const OPTION: Modifiers = Modifiers(FLAG_OPTION);
    pub const COMMAND: Modifiers = Modifiers(FLAG_COMMAND);

    /// Union of all tracked bits.
    pub const TRACKED_MASK: u64 = FLAG_SHIFT | FLAG_CONTROL | FLAG_OPTION | FLAG_COMMAND;

    /// Keep only the tracked bits of a raw flag word (drops Caps Lock,
    /// Fn, device-dependent bits and so on).
    pub const fn from_raw(raw: u64) -> Self {
        Modifiers(raw & Self::TRACKED_MASK)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

/// The live toggle hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeySpec {
    pub modifiers: Modifiers,
    pub key_code: i64,
}

impl Default for HotkeySpec {
    fn default() -> Self {
        Self {
            modifiers: Modifiers::from_raw(DEFAULT_HOTKEY_FLAGS),
            key_code: DEFAULT_HOTKEY_KEYCODE,
        }
    }
}

impl HotkeySpec {
    pub fn new(modifiers: Modifiers, key_code: i64) -> Self {
        Self {
            modifiers,
            key_code,
        }
    }

    /// Sentinel installed while a new binding is being captured.
    pub fn disabled() -> Self {
        Self {
            modifiers: Modifiers::NONE,
            key_code: KEYCODE_DISABLED,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.key_code == KEYCODE_DISABLED
    }

    /// True when a key-down with these (already masked) modifiers fires this hotkey.
    pub fn matches(&self, modifiers: Modifiers, key_code: i64) -> bool {
        !self.is_disabled() && self.key_code == key_code && self.modifiers == modifiers
    }
}

impl fmt::Display for HotkeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_disabled() {
            return write!(f, "<disabled>");
        }
        f.write_str(&super::format::format_combo(self.modifiers, self.key_code, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_drops_untracked_bits() {
        let raw = FLAG_COMMAND | FLAG_CAPS_LOCK | 0x100;
        assert_eq!(Modifiers::from_raw(raw), Modifiers::COMMAND);
    }

    #[test]
    fn test_default_is_command_space() {
        let spec = HotkeySpec::default();
        assert_eq!(spec.modifiers, Modifiers::COMMAND);
        assert_eq!(spec.key_code, KEYCODE_SPACE);
    }

    #[test]
    fn test_disabled_never_matches() {
        let spec = HotkeySpec::disabled();
        assert!(spec.is_disabled());
        assert!(!spec.matches(Modifiers::NONE, KEYCODE_DISABLED));
    }

    #[test]
    fn test_match_requires_exact_modifiers() {
        let spec = HotkeySpec::default();
        assert!(spec.matches(Modifiers::COMMAND, KEYCODE_SPACE));
        assert!(!spec.matches(Modifiers::COMMAND | Modifiers::SHIFT, KEYCODE_SPACE));
        assert!(!spec.matches(Modifiers::NONE, KEYCODE_SPACE));
        assert!(!spec.matches(Modifiers::COMMAND, 0));
    }

    #[test]
    fn test_contains() {
        let m = Modifiers::CONTROL | Modifiers::OPTION;
        assert!(m.contains(Modifiers::CONTROL));
        assert!(!m.contains(Modifiers::SHIFT));
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn test_display_uses_formatter() {
        assert_eq!(HotkeySpec::default().to_string(), "Command + Space");
        assert_eq!(HotkeySpec::disabled().to_string(), "<disabled>");
    }
}
