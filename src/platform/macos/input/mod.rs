//! Keyboard input and system notifications.

pub mod event_tap;
pub mod keyboard_monitors;
pub mod observers;

pub use event_tap::EventTapHandle;
pub use keyboard_monitors::install_edit_shortcut_monitor;
pub use observers::{install_termination_observer, install_wake_observers};
