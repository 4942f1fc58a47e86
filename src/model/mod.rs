//! Application domain model.
//!
//! This module contains pure business logic (no FFI dependencies):
//! hotkey representation and formatting, the provider table, window
//! geometry and configuration constants.
//!
//! Platform-specific persistence is in `platform::macos::storage`.

pub mod constants;
pub mod format;
pub mod frame;
pub mod hotkey;
pub mod keymap;
pub mod provider;
pub mod shortcuts;

pub use constants::*;
pub use format::format_combo;
pub use frame::WindowFrame;
pub use hotkey::{HotkeySpec, Modifiers};
pub use provider::{Provider, PROVIDERS};
pub use shortcuts::{edit_action_for, EditAction};
