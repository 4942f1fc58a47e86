//! Event dispatcher for handling application events.
//!
//! Called from the main-thread timer. Drains everything the tap, the menu
//! and the observers published since the last tick and runs the matching
//! controller action.
//!
//! ```text
//! dispatch_pending() → dispatch_events() → AppController::<action>
//! ```
//!
//! The queue is drained only while the controller is borrowed, so a tick
//! that finds it busy leaves the events for the next one.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::events::{dispatch_pending, AppEvent};
use crate::platform::macos::app::{with_controller, AppController};

/// Set while a batch is being dispatched. A timer tick that arrives from a
/// nested run loop (e.g. menu tracking) leaves the queue for the outer one.
static DISPATCH_GUARD: AtomicBool = AtomicBool::new(false);

/// Drain and dispatch all pending events.
pub fn dispatch_events() {
    if DISPATCH_GUARD
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }

    let delivered = dispatch_pending(
        |run: &mut dyn FnMut(&mut AppController)| {
            with_controller(|controller| run(controller));
        },
        dispatch_single_event,
    );
    if delivered.is_none() {
        debug!("[Startup] Controller unavailable, events kept for next tick");
    }

    DISPATCH_GUARD.store(false, Ordering::SeqCst);
}

fn dispatch_single_event(controller: &mut AppController, event: AppEvent) {
    trace!("Dispatching: {}", event.description());
    match event {
        AppEvent::ToggleWindow => controller.toggle_window(),
        AppEvent::HideWindow => controller.hide_window(),
        AppEvent::BeginHotkeyRebind => controller.begin_rebind(),
        AppEvent::HotkeyCaptured {
            modifiers,
            key_code,
            characters,
        } => controller.capture_key(modifiers, key_code, characters.as_deref()),
        AppEvent::SelectProvider(name) => controller.select_provider(&name),
        AppEvent::ReenableEventTap => controller.reenable_tap(),
    }
}

/// One-shot timer callback ending the rebinding feedback.
pub fn dismiss_hotkey_prompt() {
    with_controller(AppController::dismiss_prompt);
}
