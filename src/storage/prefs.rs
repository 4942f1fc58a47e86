//! Window frame and provider preferences.
//!
//! The macOS build backs `PreferenceStore` with NSUserDefaults; tests use
//! `MemoryPreferences`.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::constants::{PREF_CURRENT_PROVIDER, PREF_WINDOW_FRAME};
use crate::model::provider::{self, Provider};
use crate::model::WindowFrame;

/// String-valued key/value preference storage.
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&self, key: &str, value: &str);
}

/// Saved frame, if present and parseable.
pub fn load_frame(store: &impl PreferenceStore) -> Option<WindowFrame> {
    let raw = store.get_string(PREF_WINDOW_FRAME)?;
    match WindowFrame::from_pref_string(&raw) {
        Ok(frame) => Some(frame),
        Err(e) => {
            warn!("[Prefs] {e}; ignoring saved frame");
            None
        }
    }
}

pub fn save_frame(store: &impl PreferenceStore, frame: &WindowFrame) {
    debug!("[Prefs] Saving frame {frame}");
    store.set_string(PREF_WINDOW_FRAME, &frame.to_pref_string());
}

/// Selected provider; unknown or missing names resolve to the default.
pub fn load_provider(store: &impl PreferenceStore) -> &'static Provider {
    let saved = store.get_string(PREF_CURRENT_PROVIDER);
    provider::resolve_selected(saved.as_deref())
}

pub fn save_provider(store: &impl PreferenceStore, provider: &Provider) {
    store.set_string(PREF_CURRENT_PROVIDER, provider.name);
}

/// Menu selection: look the name up and persist it. An unknown name writes
/// nothing.
pub fn switch_provider(store: &impl PreferenceStore, name: &str) -> Result<&'static Provider> {
    let selected = provider::find(name)?;
    debug!("[Prefs] Saving provider {}", selected.name);
    save_provider(store, selected);
    Ok(selected)
}

/// In-memory store. Counts writes so callers can check that no-op paths
/// really do not persist anything.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set_string(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
        *self.writes.lock() += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_round_trip_through_store() {
        let prefs = MemoryPreferences::new();
        let frame = WindowFrame::new(12.0, 34.0, 700.0, 500.0);
        save_frame(&prefs, &frame);
        assert_eq!(load_frame(&prefs), Some(frame));
        assert_eq!(
            prefs.get_string(PREF_WINDOW_FRAME).as_deref(),
            Some("{{12, 34}, {700, 500}}")
        );
    }

    #[test]
    fn test_corrupt_frame_is_ignored() {
        let prefs = MemoryPreferences::new();
        prefs.set_string(PREF_WINDOW_FRAME, "not a rect");
        assert_eq!(load_frame(&prefs), None);
    }

    #[test]
    fn test_provider_defaults_and_persists() {
        let prefs = MemoryPreferences::new();
        assert_eq!(load_provider(&prefs).name, provider::DEFAULT_PROVIDER_NAME);

        let claude = provider::find("Claude").unwrap();
        save_provider(&prefs, claude);
        assert_eq!(load_provider(&prefs).name, "Claude");
    }

    #[test]
    fn test_switch_to_unknown_provider_writes_nothing() {
        let prefs = MemoryPreferences::new();
        assert!(switch_provider(&prefs, "Bard").is_err());
        assert_eq!(prefs.write_count(), 0);
    }

    #[test]
    fn test_unknown_saved_provider_falls_back() {
        let prefs = MemoryPreferences::new();
        prefs.set_string(PREF_CURRENT_PROVIDER, "Nonexistent");
        assert_eq!(load_provider(&prefs).name, provider::DEFAULT_PROVIDER_NAME);
    }
}
