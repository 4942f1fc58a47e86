//! Action target and window delegate.
//!
//! One `LLMOverlayTarget` instance receives menu actions, the close button,
//! both timers and the window delegate callbacks. Actions only publish
//! events; the dispatcher does the work on the next timer tick so that no
//! callback re-enters the app controller while it is borrowed.

use objc2::runtime::{AnyClass, AnyObject, Bool, ClassBuilder, Sel};
use objc2::sel;
use tracing::debug;

use crate::error::Result;
use crate::events::{publish, AppEvent};
use crate::model::constants::EVENT_POLL_INTERVAL_SECS;
use crate::platform::macos::ffi::bridge::{
    declare_class, get_class, id, msg_send, nil, nsstring_id, nsstring_to_string, ObjectExt, NO,
    YES,
};
use crate::platform::macos::handlers::{dismiss_hotkey_prompt, dispatch_events};
use crate::platform::macos::storage::UserDefaultsStore;
use crate::platform::macos::ui::overlay_window::MacSurface;
use crate::window;

fn target_class() -> Result<&'static AnyClass> {
    declare_class(c"LLMOverlayTarget", "NSObject", |builder| unsafe {
        register_ivars(builder);
        register_methods(builder);
    })
}

unsafe fn register_ivars(builder: &mut ClassBuilder) {
    builder.add_ivar::<id>(c"_updateTimer");
    builder.add_ivar::<id>(c"_dismissTimer");
}

unsafe fn register_methods(builder: &mut ClassBuilder) {
    // Menu and button actions
    builder.add_method(
        sel!(toggleWindow:),
        toggle_window as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(hideWindow:),
        hide_window as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(changeProvider:),
        change_provider as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(setToggleHotkey:),
        set_toggle_hotkey as unsafe extern "C-unwind" fn(_, _, _),
    );

    // Timers
    builder.add_method(
        sel!(dispatchEvents:),
        dispatch_tick as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(dismissHotkeyPrompt:),
        dismiss_prompt as unsafe extern "C-unwind" fn(_, _, _),
    );

    // NSWindowDelegate
    builder.add_method(
        sel!(windowDidMove:),
        window_did_move_or_resize as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(windowDidResize:),
        window_did_move_or_resize as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(windowShouldClose:),
        window_should_close as unsafe extern "C-unwind" fn(_, _, _) -> _,
    );
}

/// Create the target. It lives for the whole process.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn create_target() -> Result<id> {
    let cls = target_class()?;
    let target: id = msg_send![cls, new];
    (*target).store_ivar::<id>("_updateTimer", nil);
    (*target).store_ivar::<id>("_dismissTimer", nil);
    Ok(target)
}

/// Add a timer to the current run loop in common modes, so it keeps firing
/// while a menu is tracking.
unsafe fn add_common_mode_timer(target: id, selector: Sel, interval: f64, repeats: bool) -> id {
    let timer: id = msg_send![
        get_class("NSTimer"),
        timerWithTimeInterval: interval,
        target: target,
        selector: selector,
        userInfo: nil,
        repeats: if repeats { YES } else { NO }
    ];
    let run_loop: id = msg_send![get_class("NSRunLoop"), currentRunLoop];
    // Value of NSRunLoopCommonModes.
    let mode = nsstring_id("kCFRunLoopCommonModes");
    let _: () = msg_send![run_loop, addTimer: timer, forMode: mode];
    timer
}

/// Start the repeating timer that drains the event bus.
///
/// # Safety
/// `target` must come from [`create_target`]; main thread only.
pub unsafe fn start_dispatch_timer(target: id) {
    let prev: id = *(*target).load_ivar::<id>("_updateTimer");
    if prev != nil {
        let _: () = msg_send![prev, invalidate];
    }
    let timer = add_common_mode_timer(
        target,
        sel!(dispatchEvents:),
        EVENT_POLL_INTERVAL_SECS,
        true,
    );
    (*target).store_ivar::<id>("_updateTimer", timer);
}

/// One-shot timer that ends the rebinding feedback after `delay` seconds.
///
/// # Safety
/// `target` must come from [`create_target`]; main thread only.
pub unsafe fn schedule_prompt_dismissal(target: id, delay: f64) {
    let prev: id = *(*target).load_ivar::<id>("_dismissTimer");
    if prev != nil {
        let _: () = msg_send![prev, invalidate];
    }
    let timer = add_common_mode_timer(target, sel!(dismissHotkeyPrompt:), delay, false);
    (*target).store_ivar::<id>("_dismissTimer", timer);
}

unsafe extern "C-unwind" fn toggle_window(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::ToggleWindow);
}

unsafe extern "C-unwind" fn hide_window(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::HideWindow);
}

unsafe extern "C-unwind" fn change_provider(_this: &mut AnyObject, _cmd: Sel, sender: id) {
    if sender == nil {
        return;
    }
    let title: id = msg_send![sender, title];
    if let Some(name) = nsstring_to_string(title) {
        publish(AppEvent::SelectProvider(name));
    }
}

unsafe extern "C-unwind" fn set_toggle_hotkey(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::BeginHotkeyRebind);
}

unsafe extern "C-unwind" fn dispatch_tick(_this: &mut AnyObject, _cmd: Sel, _timer: id) {
    dispatch_events();
}

unsafe extern "C-unwind" fn dismiss_prompt(this: &mut AnyObject, _cmd: Sel, _timer: id) {
    this.store_ivar::<id>("_dismissTimer", nil);
    dismiss_hotkey_prompt();
}

// Must not touch the app controller: AppKit sends these synchronously from
// inside setFrame:display:, which runs while the controller is borrowed.
unsafe extern "C-unwind" fn window_did_move_or_resize(
    _this: &mut AnyObject,
    _cmd: Sel,
    notification: id,
) {
    let ns_window: id = msg_send![notification, object];
    if ns_window == nil {
        return;
    }
    window::persist_frame(&MacSurface::from_window(ns_window), &UserDefaultsStore);
}

unsafe extern "C-unwind" fn window_should_close(
    _this: &mut AnyObject,
    _cmd: Sel,
    _sender: id,
) -> Bool {
    debug!("[Window] Close requested, hiding instead");
    publish(AppEvent::HideWindow);
    NO
}
