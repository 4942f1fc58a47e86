//! macOS implementation using AppKit, WebKit and CoreGraphics via objc2.
//!
//! - `ffi`: objc2 helpers, CoreFoundation/CoreGraphics/Accessibility bindings
//! - `input`: the global event tap, the edit-shortcut monitor, observers
//! - `storage`: NSUserDefaults preference store
//! - `ui`: overlay window, web view, rebinding prompt, status bar menu
//! - `handlers`: main-thread event dispatch
//! - `app`: the controller that owns the running state

pub mod app;
pub mod ffi;
pub mod handlers;
pub mod input;
pub mod storage;
pub mod ui;

pub use app::{install_controller, with_controller, AppController};
pub use ffi::bridge;
