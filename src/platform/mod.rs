//! Platform-specific implementations.
//!
//! Only macOS is supported: the app depends on CoreGraphics event taps,
//! WKWebView and the menu bar status item.

#[cfg(target_os = "macos")]
pub mod macos;
