//! Hotkey rebinding flow.
//!
//! ```text
//! Idle ──begin──▶ AwaitingKey ──handle_key──▶ Applying ──begin_dismiss──▶ Dismissing ──finish──▶ Idle
//! ```
//!
//! The controller owns the flow state and drives [`SharedHotkeyState`]; the
//! platform layer shows the prompt, the result message and schedules the
//! dismissal timer.

use tracing::{error, info, warn};

use crate::error::{OverlayError, Result};
use crate::model::constants::*;
use crate::model::{format_combo, HotkeySpec};
use crate::storage::HotkeyStore;

use super::interceptor::CapturedKey;
use super::state::{InterceptorMode, SharedHotkeyState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebindPhase {
    Idle,
    /// Waiting for a key-down. Holds the spec to restore on cancel or failure.
    AwaitingKey { snapshot: HotkeySpec },
    /// Result message visible; dismissal pending.
    Applying,
    Dismissing,
}

#[derive(Debug)]
pub enum RebindOutcome {
    Cancelled,
    Saved { spec: HotkeySpec, label: String },
    SaveFailed(OverlayError),
}

impl RebindOutcome {
    /// Text shown in the prompt after the key press.
    pub fn message(&self) -> String {
        match self {
            RebindOutcome::Cancelled => MSG_REBIND_CANCELLED.to_string(),
            RebindOutcome::Saved { label, .. } => format!("{MSG_REBIND_SUCCESS_PREFIX}{label}"),
            RebindOutcome::SaveFailed(_) => MSG_REBIND_FAILED.to_string(),
        }
    }
}

pub struct RebindingController {
    phase: RebindPhase,
    state: SharedHotkeyState,
    /// Whether anything can deliver the captured key. Without a tap the
    /// flow could never leave `AwaitingKey`.
    capture_available: bool,
}

impl RebindingController {
    pub fn new(state: SharedHotkeyState) -> Self {
        Self {
            phase: RebindPhase::Idle,
            state,
            capture_available: true,
        }
    }

    pub fn set_capture_available(&mut self, available: bool) {
        self.capture_available = available;
    }

    pub fn phase(&self) -> RebindPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != RebindPhase::Idle
    }

    /// Start listening for a new combo. Refused while another flow is in
    /// any non-idle phase, and when no key can be captured. A refusal leaves
    /// the live hotkey untouched.
    pub fn begin(&mut self) -> Result<()> {
        if !self.capture_available {
            warn!("[Rebind] Request ignored, no event tap to capture the key");
            return Err(OverlayError::CaptureUnavailable);
        }
        if self.is_active() {
            warn!("[Rebind] Request ignored, flow already in {:?}", self.phase);
            return Err(OverlayError::RebindBusy);
        }
        let snapshot = self.state.spec();
        self.state.enter_listening();
        self.phase = RebindPhase::AwaitingKey { snapshot };
        info!("[Rebind] Listening for new hotkey (was {snapshot})");
        Ok(())
    }

    /// Apply a captured key-down. Returns `None` when no key is awaited, e.g.
    /// a second key pressed while the result message is still showing.
    pub fn handle_key(
        &mut self,
        key: CapturedKey,
        chars_ignoring_modifiers: Option<&str>,
        store: &dyn HotkeyStore,
    ) -> Option<RebindOutcome> {
        let RebindPhase::AwaitingKey { snapshot } = self.phase else {
            return None;
        };

        let outcome = if key.key_code == KEYCODE_ESCAPE {
            self.state.set_spec(snapshot);
            info!("[Rebind] Cancelled, keeping {snapshot}");
            RebindOutcome::Cancelled
        } else {
            let candidate = HotkeySpec::new(key.modifiers, key.key_code);
            match store.save(&candidate) {
                Ok(()) => {
                    self.state.set_spec(candidate);
                    let label = format_combo(key.modifiers, key.key_code, chars_ignoring_modifiers);
                    info!("[Rebind] New hotkey set: {label}");
                    RebindOutcome::Saved {
                        spec: candidate,
                        label,
                    }
                }
                Err(e) => {
                    self.state.set_spec(snapshot);
                    error!("[Rebind] Could not save hotkey, reverting to {snapshot}: {e}");
                    RebindOutcome::SaveFailed(e)
                }
            }
        };

        self.phase = RebindPhase::Applying;
        Some(outcome)
    }

    /// Feedback delay elapsed. Returns false if there was nothing to dismiss.
    pub fn begin_dismiss(&mut self) -> bool {
        if self.phase != RebindPhase::Applying {
            return false;
        }
        self.phase = RebindPhase::Dismissing;
        true
    }

    /// Prompt removed: resume normal interception.
    pub fn finish(&mut self) {
        if self.phase != RebindPhase::Dismissing {
            warn!("[Rebind] finish() called in {:?}", self.phase);
            return;
        }
        self.state.set_mode(InterceptorMode::Normal);
        self.phase = RebindPhase::Idle;
    }
}
