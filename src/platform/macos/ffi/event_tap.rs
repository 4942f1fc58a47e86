//! CoreGraphics event tap declarations.
//!
//! Numeric constants come from the `core-graphics` enums so the values are
//! not restated here.

#![allow(non_upper_case_globals)]

use std::ffi::c_void;

use core_graphics::event::{
    CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement, CGEventType, EventField,
};
use objc2::encode::{Encoding, RefEncode};

use super::corefoundation::CFMachPortRef;

/// Opaque `__CGEvent`. Encoded so it can be passed to `+[NSEvent eventWithCGEvent:]`.
#[repr(C)]
pub struct CGEvent {
    _private: [u8; 0],
}

unsafe impl RefEncode for CGEvent {
    const ENCODING_REF: Encoding = Encoding::Pointer(&Encoding::Struct("__CGEvent", &[]));
}

pub type CGEventRef = *mut CGEvent;
pub type CGEventTapProxy = *mut c_void;
pub type CGEventMask = u64;

pub type CGEventTapCallBack =
    extern "C" fn(CGEventTapProxy, u32, CGEventRef, *mut c_void) -> CGEventRef;

pub const kCGSessionEventTap: u32 = CGEventTapLocation::Session as u32;
pub const kCGHeadInsertEventTap: u32 = CGEventTapPlacement::HeadInsertEventTap as u32;
/// Active filter: returning NULL from the callback drops the event.
pub const kCGEventTapOptionDefault: u32 = CGEventTapOptions::Default as u32;

pub const kCGEventKeyDown: u32 = CGEventType::KeyDown as u32;
pub const kCGEventTapDisabledByTimeout: u32 = CGEventType::TapDisabledByTimeout as u32;
pub const kCGEventTapDisabledByUserInput: u32 = CGEventType::TapDisabledByUserInput as u32;

pub const kCGKeyboardEventKeycode: u32 = EventField::KEYBOARD_EVENT_KEYCODE;

pub const KEY_DOWN_MASK: CGEventMask = 1 << kCGEventKeyDown;

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    pub fn CGEventTapCreate(
        tap: u32,
        place: u32,
        options: u32,
        events_of_interest: CGEventMask,
        callback: CGEventTapCallBack,
        user_info: *mut c_void,
    ) -> CFMachPortRef;
    pub fn CGEventTapEnable(tap: CFMachPortRef, enable: bool);
    pub fn CGEventGetIntegerValueField(event: CGEventRef, field: u32) -> i64;
    pub fn CGEventGetFlags(event: CGEventRef) -> u64;
}
