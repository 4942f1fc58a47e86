//! Tests for the hotkey file and the key/value preferences.

use std::fs;

use llm_overlay::model::constants::*;
use llm_overlay::model::provider::{self, PROVIDERS};
use llm_overlay::storage::{
    load_frame, load_provider, save_frame, save_provider, switch_provider, HotkeyFile, HotkeyStore,
    MemoryPreferences, PreferenceStore,
};
use llm_overlay::{AppPaths, HotkeySpec, Modifiers, WindowFrame};

fn hotkey_file(dir: &tempfile::TempDir) -> HotkeyFile {
    HotkeyFile::new(AppPaths::in_dir(dir.path()).hotkey_file)
}

// === Hotkey file ===

#[test]
fn saved_hotkey_loads_back() {
    let tmp = tempfile::tempdir().unwrap();
    let file = hotkey_file(&tmp);
    let spec = HotkeySpec::new(Modifiers::SHIFT | Modifiers::COMMAND, 12);
    file.save(&spec).unwrap();
    assert_eq!(file.load().unwrap(), Some(spec));
    assert_eq!(file.load_or_default(), spec);
}

#[test]
fn save_creates_missing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let file = HotkeyFile::new(tmp.path().join("nested").join(HOTKEY_FILE_NAME));
    file.save(&HotkeySpec::default()).unwrap();
    assert!(file.path().exists());
}

#[test]
fn corrupt_file_falls_back_to_default() {
    let tmp = tempfile::tempdir().unwrap();
    let file = hotkey_file(&tmp);
    fs::write(file.path(), "{not json").unwrap();
    assert!(file.load().is_err());
    assert_eq!(file.load_or_default(), HotkeySpec::default());
    assert_eq!(file.load_or_default().to_string(), "Command + Space");
}

#[test]
fn record_missing_a_field_falls_back_to_default() {
    let tmp = tempfile::tempdir().unwrap();
    let file = hotkey_file(&tmp);
    fs::write(file.path(), r#"{"flags": 1048576}"#).unwrap();
    assert_eq!(file.load_or_default(), HotkeySpec::default());
}

#[test]
fn untracked_flag_bits_are_dropped() {
    let tmp = tempfile::tempdir().unwrap();
    let file = hotkey_file(&tmp);
    let raw = FLAG_CONTROL | FLAG_CAPS_LOCK | 0x0080_0000;
    fs::write(file.path(), format!(r#"{{"flags": {raw}, "key": 40}}"#)).unwrap();
    assert_eq!(
        file.load().unwrap(),
        Some(HotkeySpec::new(Modifiers::CONTROL, 40))
    );
}

#[test]
fn written_file_has_flags_and_key_only() {
    let tmp = tempfile::tempdir().unwrap();
    let file = hotkey_file(&tmp);
    file.save(&HotkeySpec::new(Modifiers::CONTROL | Modifiers::OPTION, 40))
        .unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj["flags"], 786432);
    assert_eq!(obj["key"], 40);
}

// === Preferences ===

#[test]
fn provider_selection_persists() {
    let prefs = MemoryPreferences::new();
    save_provider(&prefs, provider::find("Gemini").unwrap());
    assert_eq!(
        prefs.get_string(PREF_CURRENT_PROVIDER).as_deref(),
        Some("Gemini")
    );
    let loaded = load_provider(&prefs);
    assert_eq!(loaded.name, "Gemini");
    assert_eq!(loaded.url, "https://gemini.google.com/app");
}

#[test]
fn switching_provider_returns_url_and_persists() {
    let prefs = MemoryPreferences::new();
    let selected = switch_provider(&prefs, "Gemini").unwrap();
    assert_eq!(selected.url, "https://gemini.google.com/app");
    assert_eq!(
        prefs.get_string(PREF_CURRENT_PROVIDER).as_deref(),
        Some("Gemini")
    );
    assert_eq!(load_provider(&prefs).name, "Gemini");
}

#[test]
fn switching_to_unknown_provider_keeps_saved_one() {
    let prefs = MemoryPreferences::new();
    switch_provider(&prefs, "Claude").unwrap();

    assert!(switch_provider(&prefs, "Copilot").is_err());
    assert_eq!(prefs.write_count(), 1);
    assert_eq!(load_provider(&prefs).name, "Claude");
}

#[test]
fn default_provider_is_aistudio() {
    let prefs = MemoryPreferences::new();
    assert_eq!(load_provider(&prefs).url, "https://aistudio.google.com");
}

#[test]
fn provider_table_is_in_menu_order() {
    let names: Vec<&str> = PROVIDERS.iter().map(|p| p.name).collect();
    assert_eq!(names, ["ChatGPT", "Gemini", "AIStudio", "Claude", "Grok"]);
}

#[test]
fn provider_lookup_is_exact() {
    assert!(provider::find("claude").is_err());
    assert!(provider::find("Claude").is_ok());
}

#[test]
fn frame_survives_store_round_trip() {
    let prefs = MemoryPreferences::new();
    let frame = WindowFrame::new(40.5, 60.0, 900.0, 650.0);
    save_frame(&prefs, &frame);
    assert_eq!(load_frame(&prefs), Some(frame));
}
