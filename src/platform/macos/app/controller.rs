//! Main-thread owner of the running app's state.
//!
//! The controller ties the platform-free pieces (hotkey state, rebinding
//! flow, window controller, stores) to the AppKit objects. Each method is one
//! user-visible action; the dispatcher picks which one to run.

use tracing::{debug, info, warn};

use crate::error::ResultExt;
use crate::hotkey::{CapturedKey, RebindingController, SharedHotkeyState};
use crate::model::constants::{MSG_REBIND_PROMPT, REBIND_FEEDBACK_DELAY_SECS};
use crate::model::provider::Provider;
use crate::model::Modifiers;
use crate::platform::macos::ffi::bridge::id;
use crate::platform::macos::input::EventTapHandle;
use crate::platform::macos::storage::UserDefaultsStore;
use crate::platform::macos::ui::{schedule_prompt_dismissal, HotkeyPrompt, MacSurface, StatusMenu};
use crate::storage::{switch_provider, HotkeyFile};
use crate::window::{self, OverlaySurface, Visibility};

pub struct AppController {
    pub hotkeys: SharedHotkeyState,
    pub rebinding: RebindingController,
    pub hotkey_file: HotkeyFile,
    pub prefs: UserDefaultsStore,
    pub surface: MacSurface,
    pub status_menu: StatusMenu,
    pub provider: &'static Provider,
    pub prompt: Option<HotkeyPrompt>,
    /// `LLMOverlayTarget` instance for timers.
    pub target: id,
    pub tap: Option<EventTapHandle>,
}

impl AppController {
    pub fn toggle_window(&mut self) {
        match window::toggle(&mut self.surface, &self.prefs) {
            Visibility::Shown => info!("[Window] Toggled on"),
            Visibility::Hidden => info!("[Window] Toggled off"),
        }
    }

    pub fn show_window(&mut self) {
        window::show(&mut self.surface, &self.prefs);
    }

    pub fn hide_window(&mut self) {
        window::hide(&mut self.surface, &self.prefs);
    }

    /// "Set Toggle Hotkey…": show the window and the prompt, then wait for
    /// the tap to deliver one key. Refused without a tap.
    pub fn begin_rebind(&mut self) {
        if let Err(e) = self.rebinding.begin() {
            warn!("[Rebind] {e}");
            return;
        }
        self.show_window();
        let prompt = unsafe { HotkeyPrompt::show(self.surface.content_view(), MSG_REBIND_PROMPT) };
        self.prompt = Some(prompt);
    }

    /// Key delivered by the tap while listening.
    pub fn capture_key(&mut self, modifiers: Modifiers, key_code: i64, characters: Option<&str>) {
        let key = CapturedKey {
            modifiers,
            key_code,
        };
        let Some(outcome) = self.rebinding.handle_key(key, characters, &self.hotkey_file) else {
            debug!("[Rebind] Ignoring key {key_code} outside AwaitingKey");
            return;
        };

        let message = outcome.message();
        unsafe {
            if let Some(prompt) = &self.prompt {
                prompt.set_message(&message);
            }
            schedule_prompt_dismissal(self.target, REBIND_FEEDBACK_DELAY_SECS);
        }
    }

    /// Feedback delay elapsed: take the prompt down and resume interception.
    pub fn dismiss_prompt(&mut self) {
        if !self.rebinding.begin_dismiss() {
            return;
        }
        if let Some(prompt) = self.prompt.take() {
            unsafe { prompt.remove() };
        }
        self.rebinding.finish();
        self.surface.focus_content();
        debug!("[Rebind] Prompt dismissed, live hotkey {}", self.hotkeys.spec());
    }

    /// Provider chosen from the menu. Unknown names leave everything as is.
    pub fn select_provider(&mut self, name: &str) {
        let Some(selected) = switch_provider(&self.prefs, name).log_err() else {
            return;
        };
        info!("[Provider] Switching {} -> {}", self.provider.name, selected.name);
        self.provider = selected;
        self.surface.load_provider(selected);
        unsafe { self.status_menu.check_provider(selected.name) };
    }

    pub fn reenable_tap(&self) {
        match &self.tap {
            Some(tap) => tap.reenable(),
            None => debug!("[Hotkey] No event tap to re-enable"),
        }
    }

    /// Termination path: stop the tap and keep the latest geometry.
    pub fn shutdown(&mut self) {
        if let Some(mut tap) = self.tap.take() {
            tap.stop();
        }
        self.rebinding.set_capture_available(false);
        if self.surface.is_visible() {
            window::persist_frame(&self.surface, &self.prefs);
        }
    }
}
