//! Accessibility trust check (ApplicationServices).
//!
//! A session event tap that can consume events only works once the user
//! has trusted the process under Privacy & Security → Accessibility.

use std::ffi::c_void;

use tracing::{error, info, warn};

use super::corefoundation::{
    kCFBooleanFalse, kCFBooleanTrue, kCFTypeDictionaryKeyCallBacks,
    kCFTypeDictionaryValueCallBacks, CFDictionaryCreate, CFDictionaryRef, CFRelease, CFStringRef,
    CFTypeRef,
};
use crate::error::{OverlayError, Result};

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    static kAXTrustedCheckOptionPrompt: CFStringRef;

    fn AXIsProcessTrusted() -> bool;
    fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
}

/// Whether the process is trusted. With `prompt`, macOS shows its consent
/// dialog (once per launch at most) and lists the app in System Settings.
pub fn is_process_trusted(prompt: bool) -> bool {
    unsafe {
        let key = kAXTrustedCheckOptionPrompt as CFTypeRef;
        let value = if prompt { kCFBooleanTrue } else { kCFBooleanFalse };

        let options = CFDictionaryCreate(
            std::ptr::null(),
            &key,
            &value,
            1,
            &kCFTypeDictionaryKeyCallBacks as *const c_void,
            &kCFTypeDictionaryValueCallBacks as *const c_void,
        );
        if options.is_null() {
            error!("[Hotkey] Failed to create AX options dictionary");
            return AXIsProcessTrusted();
        }

        let trusted = AXIsProcessTrustedWithOptions(options);
        CFRelease(options as CFTypeRef);
        trusted
    }
}

/// Startup permission check: quiet check first, then prompt once.
///
/// Returns `PermissionDenied` if still untrusted; callers log it and keep
/// starting up.
pub fn check_accessibility() -> Result<()> {
    if is_process_trusted(false) {
        info!("[Hotkey] Accessibility permission granted");
        return Ok(());
    }
    warn!("[Hotkey] Accessibility permission missing, asking the user");
    if is_process_trusted(true) {
        Ok(())
    } else {
        Err(OverlayError::PermissionDenied)
    }
}
