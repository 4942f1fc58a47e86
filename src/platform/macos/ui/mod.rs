//! AppKit presentation: overlay window, web view, rebinding prompt, status
//! bar menu and the Objective-C target that receives their actions.

pub mod hotkey_prompt;
pub mod overlay_window;
pub mod status_bar;
pub mod target;
pub mod web_view;

pub use hotkey_prompt::HotkeyPrompt;
pub use overlay_window::{build_overlay_window, main_screen_frame, MacSurface};
pub use status_bar::{install_status_bar, StatusMenu};
pub use target::{create_target, schedule_prompt_dismissal, start_dispatch_timer};
