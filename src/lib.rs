#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

//! Menu-bar overlay for hosted chat assistants.
//!
//! Everything outside `platform` is free of macOS FFI so it can be tested
//! as normal unit and integration tests on any host.

pub mod crash;
pub mod error;
pub mod events;
pub mod hotkey;
pub mod logging;
pub mod model;
pub mod paths;
pub mod storage;
pub mod window;

#[cfg(target_os = "macos")]
pub mod platform;

// Re-export core types for convenience
pub use error::{OverlayError, Result};
pub use events::{AppEvent, EventBus, EventPublisher};
pub use hotkey::{InterceptorMode, RebindingController, SharedHotkeyState};
pub use model::{HotkeySpec, Modifiers, WindowFrame};
pub use paths::AppPaths;
