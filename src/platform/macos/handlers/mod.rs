//! Main-thread event handling.

pub mod dispatcher;

pub use dispatcher::{dismiss_hotkey_prompt, dispatch_events};
