//! Per-event decision of the global key interceptor.
//!
//! The platform tap extracts the key code and raw flags, calls [`decide`],
//! and maps the result to "swallow" or "pass through". Nothing here touches
//! UI; the caller forwards effects to the main thread.

use crate::model::Modifiers;

use super::state::{InterceptorMode, SharedHotkeyState};

/// A key-down as seen by the rebinding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedKey {
    pub modifiers: Modifiers,
    pub key_code: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapDecision {
    /// Listening: forward to the rebinding flow.
    Delegate(CapturedKey),
    /// The live hotkey matched: toggle the window.
    Toggle,
    PassThrough,
}

impl TapDecision {
    /// Whether the event is withheld from the focused application.
    pub fn consumes(&self) -> bool {
        !matches!(self, TapDecision::PassThrough)
    }
}

/// Decide what to do with one key-down. Untracked modifier bits (Caps Lock
/// and the like) are masked off before anything else.
pub fn decide(state: &SharedHotkeyState, key_code: i64, raw_flags: u64) -> TapDecision {
    let modifiers = Modifiers::from_raw(raw_flags);
    let snapshot = state.snapshot();

    match snapshot.mode {
        InterceptorMode::Listening => TapDecision::Delegate(CapturedKey {
            modifiers,
            key_code,
        }),
        InterceptorMode::Normal if snapshot.spec.matches(modifiers, key_code) => {
            TapDecision::Toggle
        }
        InterceptorMode::Normal => TapDecision::PassThrough,
    }
}
