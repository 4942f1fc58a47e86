//! Application events for inter-module communication.
//!
//! These events represent high-level application actions that can be
//! published by any module (including the event-tap thread) and handled
//! by the dispatcher on the main thread.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

use crate::model::Modifiers;

/// Application-level events for decoupled communication between modules.
///
/// Events flow from producers (event tap, status bar menu, observers)
/// through the EventBus to the dispatcher, which executes the actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // === Input Events ===
    /// Toggle overlay window visibility (global hotkey or menu)
    ToggleWindow,

    /// Hide the overlay window (close button)
    HideWindow,

    /// Key-down captured while the rebinding flow is listening.
    HotkeyCaptured {
        modifiers: Modifiers,
        key_code: i64,
        /// Characters ignoring modifiers, for keys outside the name table.
        characters: Option<String>,
    },

    // === Menu Events ===
    /// "Set Toggle Hotkey…" chosen
    BeginHotkeyRebind,

    /// Provider chosen in the "Change Provider" submenu
    SelectProvider(String),

    // === System Events ===
    /// The event tap must be re-enabled (wake, session became active)
    ReenableEventTap,
}

impl AppEvent {
    /// Returns true if the event originates from the global event tap.
    pub fn is_from_tap(&self) -> bool {
        matches!(self, AppEvent::ToggleWindow | AppEvent::HotkeyCaptured { .. })
    }

    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::ToggleWindow => "Toggle overlay window",
            AppEvent::HideWindow => "Hide overlay window",
            AppEvent::HotkeyCaptured { .. } => "Key captured for rebinding",
            AppEvent::BeginHotkeyRebind => "Begin hotkey rebinding",
            AppEvent::SelectProvider(_) => "Select provider",
            AppEvent::ReenableEventTap => "Re-enable event tap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_equality() {
        assert_eq!(AppEvent::ToggleWindow, AppEvent::ToggleWindow);
        assert_ne!(AppEvent::ToggleWindow, AppEvent::HideWindow);
        assert_ne!(
            AppEvent::SelectProvider("Grok".into()),
            AppEvent::SelectProvider("Claude".into())
        );
    }

    #[test]
    fn test_event_debug() {
        let event = AppEvent::ToggleWindow;
        let debug_str = format!("{:?}", event);
        assert_eq!(debug_str, "ToggleWindow");
    }

    #[test]
    fn test_captured_key_carries_data() {
        let event = AppEvent::HotkeyCaptured {
            modifiers: Modifiers::CONTROL,
            key_code: 40,
            characters: Some("k".into()),
        };
        let cloned = event.clone();
        assert_eq!(event, cloned);
        assert!(event.is_from_tap());
    }

    #[test]
    fn test_all_events_have_descriptions() {
        let events = [
            AppEvent::ToggleWindow,
            AppEvent::HideWindow,
            AppEvent::HotkeyCaptured {
                modifiers: Modifiers::NONE,
                key_code: 0,
                characters: None,
            },
            AppEvent::BeginHotkeyRebind,
            AppEvent::SelectProvider("Gemini".into()),
            AppEvent::ReenableEventTap,
        ];

        for event in events {
            assert!(!event.description().is_empty());
        }
    }
}
