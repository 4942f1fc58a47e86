//! Local key-down monitor for in-window edit shortcuts.
//!
//! The app runs as an accessory without a main menu, so nothing maps
//! Command+C/V/X/A to the responder chain. This monitor does it by hand
//! while the overlay window is key.

use std::ffi::CString;

use block2::RcBlock;
use tracing::debug;

use crate::model::shortcuts::{edit_action_for, EditAction};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_to_string, AnyObject, NSApp, NSEventMask,
    NSEventModifierFlags, Sel,
};

/// Install the monitor and return its token. The token must be kept for the
/// app's lifetime; AppKit removes nothing on its own.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_edit_shortcut_monitor() -> id {
    let block = RcBlock::new(|event: *mut AnyObject| -> *mut AnyObject {
        unsafe {
            if event == nil {
                return event;
            }
            let flags: NSEventModifierFlags = msg_send![event, modifierFlags];
            let chars: id = msg_send![event, charactersIgnoringModifiers];
            let Some(chars) = nsstring_to_string(chars) else {
                return event;
            };

            match edit_action_for(&chars, flags.contains(NSEventModifierFlags::Command)) {
                Some(EditAction::Quit) => {
                    debug!("[Window] Command+Q, terminating");
                    let _: () = msg_send![NSApp(), terminate: nil];
                    nil
                }
                Some(action) => {
                    if send_to_first_responder(action) {
                        nil
                    } else {
                        event
                    }
                }
                None => event,
            }
        }
    });

    msg_send![
        get_class("NSEvent"),
        addLocalMonitorForEventsMatchingMask: NSEventMask::KeyDown,
        handler: &*block
    ]
}

/// Send the action's selector down the key window's responder chain.
/// Returns true if some responder handled it.
unsafe fn send_to_first_responder(action: EditAction) -> bool {
    let Some(name) = action.selector_name().and_then(|n| CString::new(n).ok()) else {
        return false;
    };
    let selector = Sel::register(&name);
    msg_send![NSApp(), sendAction: selector, to: nil, from: nil]
}
