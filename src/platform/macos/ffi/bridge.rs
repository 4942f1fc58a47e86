//! Thin helpers over objc2 for dynamic message sending.
//!
//! The UI layer talks to AppKit through `msg_send!` on untyped `id`
//! pointers. This module keeps the aliases and the few conversions that
//! pattern needs in one place.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

use std::ffi::{CStr, CString};

pub use objc2::rc::{autoreleasepool, Retained};
pub use objc2::runtime::{AnyClass, AnyObject, Bool, ClassBuilder, Sel};
pub use objc2::{msg_send, sel};
pub use objc2_app_kit::{
    NSApplicationActivationPolicy, NSAutoresizingMaskOptions, NSBackingStoreType, NSBoxType,
    NSEventMask, NSEventModifierFlags, NSTextAlignment, NSTitlePosition,
    NSWindowCollectionBehavior, NSWindowStyleMask,
};
pub use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};

use objc2::encode::Encode;

use crate::error::{OverlayError, Result};
use crate::model::WindowFrame;

/// Untyped Objective-C object pointer.
pub type id = *mut AnyObject;

pub const nil: id = std::ptr::null_mut();

pub const YES: Bool = Bool::YES;
pub const NO: Bool = Bool::NO;

/// The shared NSApplication instance.
#[inline]
#[allow(non_snake_case)]
pub fn NSApp() -> id {
    unsafe { msg_send![get_class("NSApplication"), sharedApplication] }
}

/// Autoreleased NSString for a single message argument.
///
/// Receivers that keep the string copy or retain it, so the caller does not
/// own anything. Needs an autorelease pool, which AppKit provides on every
/// run-loop pass.
#[inline]
pub fn nsstring_id(s: &str) -> id {
    Retained::autorelease_ptr(NSString::from_str(s)) as id
}

/// Copy an NSString into a Rust `String`. `nil` yields `None`.
///
/// # Safety
/// `ns` must be nil or a valid NSString.
pub unsafe fn nsstring_to_string(ns: id) -> Option<String> {
    if ns.is_null() {
        return None;
    }
    let ns = &*(ns as *const NSString);
    Some(ns.to_string())
}

/// Look up a class by name.
pub fn try_class(name: &str) -> Option<&'static AnyClass> {
    let c_name = CString::new(name).ok()?;
    AnyClass::get(&c_name)
}

/// Look up a class that AppKit or Foundation always provides.
///
/// Panics if the class is missing, which only happens when the framework
/// itself is not linked.
#[inline]
pub fn get_class(name: &str) -> &'static AnyClass {
    try_class(name).unwrap_or_else(|| panic!("Class '{name}' not found"))
}

/// Register an Objective-C subclass once; later calls return the existing
/// class.
pub fn declare_class(
    name: &CStr,
    superclass: &str,
    build: impl FnOnce(&mut ClassBuilder),
) -> Result<&'static AnyClass> {
    if let Some(cls) = AnyClass::get(name) {
        return Ok(cls);
    }
    let superclass = try_class(superclass)
        .ok_or_else(|| OverlayError::Window(format!("superclass {superclass} not found")))?;
    let mut builder = ClassBuilder::new(name, superclass)
        .ok_or_else(|| OverlayError::Window(format!("cannot declare class {name:?}")))?;
    build(&mut builder);
    Ok(builder.register())
}

pub fn frame_to_rect(frame: &WindowFrame) -> NSRect {
    NSRect::new(
        NSPoint::new(frame.x, frame.y),
        NSSize::new(frame.width, frame.height),
    )
}

pub fn rect_to_frame(rect: NSRect) -> WindowFrame {
    WindowFrame::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)
}

/// Instance variable access on classes registered with `ClassBuilder`.
pub trait ObjectExt {
    /// # Safety
    /// The ivar must exist on the receiver's class and have type `T`.
    unsafe fn load_ivar<T: Encode>(&self, name: &str) -> &T;

    /// # Safety
    /// The ivar must exist on the receiver's class and have type `T`.
    unsafe fn store_ivar<T: Encode>(&mut self, name: &str, value: T);
}

impl ObjectExt for AnyObject {
    unsafe fn load_ivar<T: Encode>(&self, name: &str) -> &T {
        let ivar = CString::new(name)
            .ok()
            .and_then(|c_name| self.class().instance_variable(&c_name))
            .unwrap_or_else(|| panic!("ivar '{name}' not found"));
        ivar.load::<T>(self)
    }

    unsafe fn store_ivar<T: Encode>(&mut self, name: &str, value: T) {
        let ivar = CString::new(name)
            .ok()
            .and_then(|c_name| self.class().instance_variable(&c_name))
            .unwrap_or_else(|| panic!("ivar '{name}' not found"));
        *ivar.load_mut::<T>(self) = value;
    }
}
