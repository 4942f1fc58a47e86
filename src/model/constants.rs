//! Configuration constants and default values.
//!
//! This module contains all application constants including window geometry,
//! NSUserDefaults keys, hotkey defaults and user-facing strings.

// === Application ===

/// Display name used in menu titles.
pub const APP_TITLE: &str = "LLM Overlay App";

/// Directory name under `~/Library/Logs`.
pub const LOG_DIR_NAME: &str = "macos-llm-overlay";

/// File name of the persisted hotkey record inside the log directory.
pub const HOTKEY_FILE_NAME: &str = "custom_toggle.json";

/// File name of the plain-text application log inside the log directory.
pub const LOG_FILE_NAME: &str = "llm-overlay.log";

// === NSUserDefaults Keys ===

/// Key for the string-encoded window frame.
pub const PREF_WINDOW_FRAME: &str = "OverlayWindowFrame";

/// Key for the selected provider name.
pub const PREF_CURRENT_PROVIDER: &str = "CurrentLLMProvider";

// === Window Geometry ===

/// Width of the window when no frame has been saved.
pub const DEFAULT_WINDOW_WIDTH: f64 = 800.0;

/// Height of the window when no frame has been saved.
pub const DEFAULT_WINDOW_HEIGHT: f64 = 600.0;

/// Height of the draggable strip along the top edge.
pub const DRAG_AREA_HEIGHT: f64 = 20.0;

/// Corner radius of the content view.
pub const CONTENT_CORNER_RADIUS: f64 = 10.0;

/// Side length of the close button.
pub const CLOSE_BUTTON_SIZE: f64 = 15.0;

// === Modifier Flags (CGEventFlags bit values) ===

pub const FLAG_SHIFT: u64 = 0x0002_0000;
pub const FLAG_CONTROL: u64 = 0x0004_0000;
pub const FLAG_OPTION: u64 = 0x0008_0000;
pub const FLAG_COMMAND: u64 = 0x0010_0000;

/// Caps Lock. Never part of a hotkey.
pub const FLAG_CAPS_LOCK: u64 = 0x0001_0000;

// === Key Codes ===

pub const KEYCODE_SPACE: i64 = 49;
pub const KEYCODE_ESCAPE: i64 = 53;

/// Key code marking a disabled hotkey while rebinding is in progress.
pub const KEYCODE_DISABLED: i64 = -1;

/// Default hotkey: Command + Space.
pub const DEFAULT_HOTKEY_FLAGS: u64 = FLAG_COMMAND;
pub const DEFAULT_HOTKEY_KEYCODE: i64 = KEYCODE_SPACE;

// === Rebinding Flow ===

/// Seconds the result message stays visible before the prompt is dismissed.
pub const REBIND_FEEDBACK_DELAY_SECS: f64 = 1.0;

pub const MSG_REBIND_PROMPT: &str = "Press the new toggle key combination.\n(Press Escape to cancel)";
pub const MSG_REBIND_CANCELLED: &str = "Operation cancelled. Reverted to previous hotkey.";
pub const MSG_REBIND_FAILED: &str = "Error saving hotkey! Reverted.";
pub const MSG_REBIND_SUCCESS_PREFIX: &str = "New hotkey set:\n";

// === Web View ===

/// Desktop Safari user agent so providers serve their full site.
pub const CUSTOM_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

// === Status Bar ===

/// Icon file looked up in the bundle resources.
pub const STATUS_ICON_FILE: &str = "macos_llm_overlay-icon.png";

/// Title shown when the icon cannot be loaded.
pub const STATUS_FALLBACK_TITLE: &str = "LLM";

/// Interval of the main-thread timer that drains the event bus.
pub const EVENT_POLL_INTERVAL_SECS: f64 = 0.016;
