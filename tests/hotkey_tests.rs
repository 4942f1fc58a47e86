//! Tests for hotkey labels, the interceptor decision and the rebinding flow.

use llm_overlay::hotkey::{decide, CapturedKey, RebindOutcome, RebindPhase, TapDecision};
use llm_overlay::model::constants::*;
use llm_overlay::model::format_combo;
use llm_overlay::storage::{HotkeyFile, HotkeyStore};
use llm_overlay::{
    HotkeySpec, InterceptorMode, Modifiers, OverlayError, RebindingController, SharedHotkeyState,
};

fn key(modifiers: Modifiers, key_code: i64) -> CapturedKey {
    CapturedKey {
        modifiers,
        key_code,
    }
}

// === Formatter ===

#[test]
fn format_is_deterministic() {
    let mods = Modifiers::CONTROL | Modifiers::OPTION;
    let first = format_combo(mods, 40, Some("k"));
    let second = format_combo(mods, 40, Some("k"));
    assert_eq!(first, second);
    assert_eq!(first, "Control + Option + K");
}

#[test]
fn format_orders_modifiers_regardless_of_insertion() {
    let a = Modifiers::COMMAND | Modifiers::SHIFT;
    let b = Modifiers::SHIFT | Modifiers::COMMAND;
    assert_eq!(format_combo(a, 12, None), "Shift + Command + Q");
    assert_eq!(format_combo(a, 12, None), format_combo(b, 12, None));
}

#[test]
fn format_default_hotkey() {
    assert_eq!(format_combo(Modifiers::COMMAND, KEYCODE_SPACE, None), "Command + Space");
}

#[test]
fn format_unknown_key_without_characters() {
    assert_eq!(format_combo(Modifiers::SHIFT, 105, None), "Shift + Keycode 105");
}

// === Interceptor ===

#[test]
fn normal_mode_only_consumes_the_live_hotkey() {
    let state = SharedHotkeyState::default();
    assert!(decide(&state, KEYCODE_SPACE, FLAG_COMMAND).consumes());
    assert!(!decide(&state, KEYCODE_SPACE, 0).consumes());
    assert!(!decide(&state, 0, FLAG_COMMAND).consumes());
}

#[test]
fn listening_mode_consumes_plain_keys_too() {
    let state = SharedHotkeyState::default();
    state.enter_listening();
    assert_eq!(
        decide(&state, 0, 0),
        TapDecision::Delegate(key(Modifiers::NONE, 0))
    );
}

// === Rebinding flow ===

#[test]
fn escape_cancels_and_restores_previous_hotkey() {
    let tmp = tempfile::tempdir().unwrap();
    let file = HotkeyFile::new(tmp.path().join(HOTKEY_FILE_NAME));
    let state = SharedHotkeyState::default();
    let mut flow = RebindingController::new(state.clone());

    flow.begin().unwrap();
    let outcome = flow
        .handle_key(key(Modifiers::NONE, KEYCODE_ESCAPE), None, &file)
        .unwrap();

    assert!(matches!(outcome, RebindOutcome::Cancelled));
    assert_eq!(outcome.message(), MSG_REBIND_CANCELLED);
    assert_eq!(state.spec(), HotkeySpec::default());
    assert!(!file.path().exists());

    // Still listening until the prompt goes away.
    assert_eq!(state.mode(), InterceptorMode::Listening);
    assert!(flow.begin_dismiss());
    flow.finish();
    assert_eq!(state.mode(), InterceptorMode::Normal);
    assert_eq!(flow.phase(), RebindPhase::Idle);
}

#[test]
fn new_combo_is_saved_and_goes_live() {
    let tmp = tempfile::tempdir().unwrap();
    let file = HotkeyFile::new(tmp.path().join(HOTKEY_FILE_NAME));
    let state = SharedHotkeyState::default();
    let mut flow = RebindingController::new(state.clone());

    flow.begin().unwrap();
    let mods = Modifiers::CONTROL | Modifiers::OPTION;
    let outcome = flow.handle_key(key(mods, 40), Some("k"), &file).unwrap();

    assert_eq!(outcome.message(), "New hotkey set:\nControl + Option + K");
    assert_eq!(state.spec(), HotkeySpec::new(mods, 40));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    assert_eq!(written["flags"], 786432);
    assert_eq!(written["key"], 40);

    assert!(flow.begin_dismiss());
    flow.finish();
    assert_eq!(decide(&state, 40, FLAG_CONTROL | FLAG_OPTION), TapDecision::Toggle);
    assert_eq!(decide(&state, KEYCODE_SPACE, FLAG_COMMAND), TapDecision::PassThrough);
}

#[test]
fn hotkey_is_disabled_while_listening() {
    let state = SharedHotkeyState::default();
    let mut flow = RebindingController::new(state.clone());
    flow.begin().unwrap();
    assert!(state.spec().is_disabled());
    // The old combo is delegated to the flow, never toggles.
    assert!(matches!(
        decide(&state, KEYCODE_SPACE, FLAG_COMMAND),
        TapDecision::Delegate(_)
    ));
}

#[test]
fn flow_can_run_again_after_finishing() {
    let tmp = tempfile::tempdir().unwrap();
    let file = HotkeyFile::new(tmp.path().join(HOTKEY_FILE_NAME));
    let mut flow = RebindingController::new(SharedHotkeyState::default());

    for code in [1, 2] {
        flow.begin().unwrap();
        flow.handle_key(key(Modifiers::COMMAND, code), None, &file).unwrap();
        assert!(flow.begin_dismiss());
        flow.finish();
    }
    assert_eq!(
        file.load().unwrap(),
        Some(HotkeySpec::new(Modifiers::COMMAND, 2))
    );
}

#[test]
fn unwritable_file_reverts() {
    let tmp = tempfile::tempdir().unwrap();
    // Parent of the target is a regular file, so the write must fail.
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();
    let file = HotkeyFile::new(blocker.join(HOTKEY_FILE_NAME));

    let state = SharedHotkeyState::default();
    let mut flow = RebindingController::new(state.clone());
    flow.begin().unwrap();
    let outcome = flow.handle_key(key(Modifiers::SHIFT, 0), None, &file).unwrap();

    assert_eq!(outcome.message(), MSG_REBIND_FAILED);
    assert_eq!(state.spec(), HotkeySpec::default());
    assert!(file.save(&HotkeySpec::default()).is_err());
}

#[test]
fn rebind_is_refused_without_key_capture() {
    let state = SharedHotkeyState::default();
    let mut flow = RebindingController::new(state.clone());
    flow.set_capture_available(false);

    assert!(matches!(flow.begin(), Err(OverlayError::CaptureUnavailable)));
    assert!(!flow.is_active());
    assert_eq!(state.spec(), HotkeySpec::default());
    assert_eq!(state.mode(), InterceptorMode::Normal);
    assert!(!flow.begin_dismiss());

    // The live hotkey still fires.
    assert_eq!(
        decide(&state, KEYCODE_SPACE, FLAG_COMMAND),
        TapDecision::Toggle
    );

    flow.set_capture_available(true);
    flow.begin().unwrap();
    assert_eq!(state.mode(), InterceptorMode::Listening);
}
