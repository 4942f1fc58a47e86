//! Preference persistence.
//!
//! Two channels, both fail-soft:
//! - `hotkey_file`: the toggle hotkey as a small JSON file
//! - `prefs`: window frame and selected provider in a key/value store

pub mod hotkey_file;
pub mod prefs;

pub use hotkey_file::{HotkeyFile, HotkeyStore};
pub use prefs::{
    load_frame, load_provider, save_frame, save_provider, switch_provider, MemoryPreferences,
    PreferenceStore,
};
