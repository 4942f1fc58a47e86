//! Hotkey state shared between the event-tap thread and the main thread.
//!
//! The tap thread only reads. Every write happens on the main thread, from
//! the rebinding controller.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::model::HotkeySpec;

/// What the interceptor does with a key-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterceptorMode {
    /// Match against the live hotkey.
    #[default]
    Normal,
    /// Hand every key-down to the rebinding flow and swallow it.
    Listening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeySnapshot {
    pub spec: HotkeySpec,
    pub mode: InterceptorMode,
}

/// Cloneable handle to the live hotkey and interceptor mode.
#[derive(Debug, Clone)]
pub struct SharedHotkeyState {
    inner: Arc<Mutex<HotkeySnapshot>>,
}

impl SharedHotkeyState {
    pub fn new(spec: HotkeySpec) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HotkeySnapshot {
                spec,
                mode: InterceptorMode::Normal,
            })),
        }
    }

    /// Both fields under one lock, so the tap never sees a torn pair.
    pub fn snapshot(&self) -> HotkeySnapshot {
        *self.inner.lock()
    }

    pub fn spec(&self) -> HotkeySpec {
        self.inner.lock().spec
    }

    pub fn set_spec(&self, spec: HotkeySpec) {
        self.inner.lock().spec = spec;
    }

    pub fn mode(&self) -> InterceptorMode {
        self.inner.lock().mode
    }

    pub fn set_mode(&self, mode: InterceptorMode) {
        self.inner.lock().mode = mode;
    }

    /// Disable the hotkey and start listening in one step.
    pub fn enter_listening(&self) {
        let mut guard = self.inner.lock();
        guard.spec = HotkeySpec::disabled();
        guard.mode = InterceptorMode::Listening;
    }
}

impl Default for SharedHotkeyState {
    fn default() -> Self {
        Self::new(HotkeySpec::default())
    }
}
