//! Session-wide key-down tap on its own thread.
//!
//! The callback runs on the tap thread's run loop. It only reads the shared
//! hotkey state, decides, and publishes to the event bus; all UI work
//! happens later on the main thread. A slow callback here would stall
//! keyboard input for every application, so nothing in it blocks on the UI.

use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use crate::error::{OverlayError, Result};
use crate::events::{AppEvent, EventPublisher};
use crate::hotkey::{decide, SharedHotkeyState, TapDecision};
use crate::platform::macos::ffi::bridge::{
    autoreleasepool, get_class, id, msg_send, nil, nsstring_to_string,
};
use crate::platform::macos::ffi::corefoundation::*;
use crate::platform::macos::ffi::event_tap::*;

/// Run-loop slice between checks of the stop flag.
const RUN_SLICE_SECS: f64 = 0.1;

/// State shared between the handle and the tap thread.
struct TapShared {
    running: AtomicBool,
    port: AtomicPtr<c_void>,
}

impl TapShared {
    fn set_enabled(&self, enabled: bool) -> bool {
        let port = self.port.load(Ordering::SeqCst);
        if port.is_null() {
            return false;
        }
        unsafe { CGEventTapEnable(port, enabled) };
        true
    }
}

/// Data the C callback receives through `user_info`.
struct TapContext {
    hotkeys: SharedHotkeyState,
    publisher: EventPublisher,
    shared: Arc<TapShared>,
}

/// Owner of the running tap. Dropping it stops the thread.
pub struct EventTapHandle {
    shared: Arc<TapShared>,
    thread: Option<JoinHandle<()>>,
}

impl EventTapHandle {
    /// Create the tap on a new thread and wait until it is live.
    ///
    /// Fails with `TapInstall` when the system refuses the tap, usually
    /// because Accessibility access has not been granted.
    pub fn install(hotkeys: SharedHotkeyState, publisher: EventPublisher) -> Result<Self> {
        let shared = Arc::new(TapShared {
            running: AtomicBool::new(true),
            port: AtomicPtr::new(ptr::null_mut()),
        });
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();

        let context = TapContext {
            hotkeys,
            publisher,
            shared: shared.clone(),
        };
        let thread = thread::Builder::new()
            .name("hotkey-event-tap".into())
            .spawn(move || {
                if let Err(e) = run_event_tap(context, &ready_tx) {
                    let _ = ready_tx.send(Err(e));
                }
                debug!("[Hotkey] Event tap thread exiting");
            })
            .map_err(|e| OverlayError::TapInstall(format!("cannot spawn tap thread: {e}")))?;

        let status = ready_rx
            .recv()
            .unwrap_or_else(|_| Err(OverlayError::TapInstall("tap thread died".into())));

        let mut handle = Self {
            shared,
            thread: Some(thread),
        };
        match status {
            Ok(()) => {
                info!("[Hotkey] Event tap installed");
                Ok(handle)
            }
            Err(e) => {
                handle.stop();
                Err(e)
            }
        }
    }

    /// Turn the tap back on after the system or a sleep cycle disabled it.
    pub fn reenable(&self) {
        if self.shared.set_enabled(true) {
            debug!("[Hotkey] Event tap re-enabled");
        }
    }

    /// Disable the tap and wait for its thread to finish. Idempotent.
    pub fn stop(&mut self) {
        if !self.shared.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.shared.set_enabled(false);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        info!("[Hotkey] Event tap stopped");
    }
}

impl Drop for EventTapHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Body of the tap thread: create, attach to this thread's run loop, spin
/// until stopped, tear down.
fn run_event_tap(context: TapContext, ready: &mpsc::Sender<Result<()>>) -> Result<()> {
    let shared = context.shared.clone();
    let context_ptr = Box::into_raw(Box::new(context));

    unsafe {
        let port = CGEventTapCreate(
            kCGSessionEventTap,
            kCGHeadInsertEventTap,
            kCGEventTapOptionDefault,
            KEY_DOWN_MASK,
            tap_callback,
            context_ptr as *mut c_void,
        );
        if port.is_null() {
            drop(Box::from_raw(context_ptr));
            return Err(OverlayError::TapInstall(
                "CGEventTapCreate returned NULL (Accessibility permission?)".into(),
            ));
        }

        let source = CFMachPortCreateRunLoopSource(ptr::null(), port, 0);
        if source.is_null() {
            CFMachPortInvalidate(port);
            CFRelease(port as CFTypeRef);
            drop(Box::from_raw(context_ptr));
            return Err(OverlayError::TapInstall(
                "cannot create run loop source for the tap".into(),
            ));
        }

        let run_loop = CFRunLoopGetCurrent();
        CFRunLoopAddSource(run_loop, source, kCFRunLoopCommonModes);
        CGEventTapEnable(port, true);
        shared.port.store(port, Ordering::SeqCst);
        let _ = ready.send(Ok(()));

        while shared.running.load(Ordering::SeqCst) {
            let result = CFRunLoopRunInMode(kCFRunLoopDefaultMode, RUN_SLICE_SECS, true);
            if result == kCFRunLoopRunFinished {
                warn!("[Hotkey] Event tap run loop finished unexpectedly");
                break;
            }
        }

        shared.port.store(ptr::null_mut(), Ordering::SeqCst);
        CGEventTapEnable(port, false);
        CFRunLoopRemoveSource(run_loop, source, kCFRunLoopCommonModes);
        CFMachPortInvalidate(port);
        CFRelease(source as CFTypeRef);
        CFRelease(port as CFTypeRef);
        drop(Box::from_raw(context_ptr));
    }
    Ok(())
}

extern "C" fn tap_callback(
    _proxy: CGEventTapProxy,
    event_type: u32,
    event: CGEventRef,
    user_info: *mut c_void,
) -> CGEventRef {
    if user_info.is_null() {
        return event;
    }
    let context = unsafe { &*(user_info as *const TapContext) };

    if event_type == kCGEventTapDisabledByTimeout || event_type == kCGEventTapDisabledByUserInput {
        warn!("[Hotkey] Event tap disabled by the system (type {event_type:#x}), re-enabling");
        context.shared.set_enabled(true);
        return event;
    }
    if event_type != kCGEventKeyDown {
        return event;
    }

    // Nothing may unwind into CoreGraphics: a dead tap freezes the keyboard.
    match panic::catch_unwind(AssertUnwindSafe(|| handle_key_down(context, event))) {
        Ok(true) => ptr::null_mut(),
        Ok(false) => event,
        Err(_) => {
            error!("[Hotkey] Panic in event tap callback, passing event through");
            event
        }
    }
}

/// Returns true when the event should be consumed.
fn handle_key_down(context: &TapContext, event: CGEventRef) -> bool {
    let (key_code, raw_flags) = unsafe {
        (
            CGEventGetIntegerValueField(event, kCGKeyboardEventKeycode),
            CGEventGetFlags(event),
        )
    };

    let decision = decide(&context.hotkeys, key_code, raw_flags);
    match decision {
        TapDecision::Toggle => {
            debug!("[Hotkey] Toggle hotkey pressed");
            context.publisher.publish(AppEvent::ToggleWindow);
        }
        TapDecision::Delegate(key) => {
            context.publisher.publish(AppEvent::HotkeyCaptured {
                modifiers: key.modifiers,
                key_code: key.key_code,
                characters: characters_ignoring_modifiers(event),
            });
        }
        TapDecision::PassThrough => {}
    }
    decision.consumes()
}

/// Characters of the key ignoring modifiers, for labels of keys that are
/// not in the name table.
fn characters_ignoring_modifiers(event: CGEventRef) -> Option<String> {
    autoreleasepool(|_| unsafe {
        let ns_event: id = msg_send![get_class("NSEvent"), eventWithCGEvent: event];
        if ns_event == nil {
            return None;
        }
        let chars: id = msg_send![ns_event, charactersIgnoringModifiers];
        nsstring_to_string(chars)
    })
}
