//! Notification observers that keep the event tap healthy.
//!
//! - Termination: stop the tap and save the window frame.
//! - Wake and session activation: the system may have disabled the tap
//!   while the machine slept or the user was switched out, so ask the
//!   dispatcher to re-enable it.

use block2::RcBlock;
use tracing::info;

use crate::events::{publish, AppEvent};
use crate::platform::macos::app::shutdown;
use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil, nsstring_id, AnyObject};

/// Run the shutdown path when the application is about to terminate.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_termination_observer() {
    let center: id = msg_send![get_class("NSNotificationCenter"), defaultCenter];
    let block = RcBlock::new(|_note: *mut AnyObject| {
        info!("[Startup] Application terminating");
        shutdown();
    });
    let name = nsstring_id("NSApplicationWillTerminateNotification");
    let _: id = msg_send![
        center,
        addObserverForName: name,
        object: nil,
        queue: nil,
        usingBlock: &*block
    ];
}

/// Publish `ReenableEventTap` on wake and on session activation.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_wake_observers() {
    let workspace: id = msg_send![get_class("NSWorkspace"), sharedWorkspace];
    let center: id = msg_send![workspace, notificationCenter];

    for name in [
        "NSWorkspaceDidWakeNotification",
        "NSWorkspaceSessionDidBecomeActiveNotification",
    ] {
        let block = RcBlock::new(move |_note: *mut AnyObject| {
            info!("[Hotkey] {name}, re-enabling event tap");
            publish(AppEvent::ReenableEventTap);
        });
        let _: id = msg_send![
            center,
            addObserverForName: nsstring_id(name),
            object: nil,
            queue: nil,
            usingBlock: &*block
        ];
    }
}
