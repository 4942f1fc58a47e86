//! Events carried to the main thread.
//!
//! The event tap runs on its own thread and must not call AppKit. Menu
//! actions and window callbacks can arrive while the app controller is
//! borrowed. Both therefore publish an [`AppEvent`], and the dispatcher
//! timer on the main thread drains the queue and runs the matching action.
//!
//! ```text
//! event tap ─┐
//! menu/close ├─ publish() ─▶ mpsc queue ─▶ dispatch_pending() ─▶ dispatcher
//! observers ─┘
//! ```

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher, Inbox};
pub use global::{dispatch_pending, drain_events, init_event_bus, publish, publisher};
pub use types::AppEvent;
