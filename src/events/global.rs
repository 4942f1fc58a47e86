//! Process-wide event queue.
//!
//! `main` calls [`init_event_bus`] once. Producers on any thread use
//! [`publish`] or hold a [`publisher`]; the main-thread dispatcher calls
//! [`dispatch_pending`]. Only the dispatcher locks the inbox.

use std::sync::mpsc::{self, Sender};
use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::warn;

use super::bus::{EventPublisher, Inbox};
use super::types::AppEvent;

static SENDER: OnceLock<Sender<AppEvent>> = OnceLock::new();

static INBOX: OnceLock<Mutex<Inbox>> = OnceLock::new();

/// Initialize the global event bus.
///
/// Returns false (and changes nothing) if it was already initialized.
pub fn init_event_bus() -> bool {
    let (sender, receiver) = mpsc::channel();
    if SENDER.set(sender).is_err() {
        return false;
    }
    INBOX.set(Mutex::new(Inbox::new(receiver))).is_ok()
}

/// Get a publisher handle for the global event bus, if initialized.
pub fn publisher() -> Option<EventPublisher> {
    SENDER
        .get()
        .map(|sender| EventPublisher::from_sender(sender.clone()))
}

/// Publish an event to the global event bus.
///
/// Events published before `init_event_bus()` are dropped with a warning.
pub fn publish(event: AppEvent) {
    match SENDER.get() {
        Some(sender) => {
            let _ = sender.send(event);
        }
        None => warn!("[Startup] Event bus not initialized, dropping {event:?}"),
    }
}

/// Drain all pending events from the global event bus.
pub fn drain_events() -> Vec<AppEvent> {
    INBOX.get().map(|inbox| inbox.lock().drain()).unwrap_or_default()
}

/// Deliver pending events through [`Inbox::deliver`]. `None` means the
/// consumer was unavailable and the events are still queued.
pub fn dispatch_pending<C: ?Sized>(
    access: impl FnOnce(&mut dyn FnMut(&mut C)),
    handle: impl FnMut(&mut C, AppEvent),
) -> Option<usize> {
    match INBOX.get() {
        Some(inbox) => inbox.lock().deliver(access, handle),
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One process-wide bus: everything is checked in a single test so test
    // threads cannot interleave init and drain.
    #[test]
    fn test_global_bus_lifecycle() {
        init_event_bus();
        assert!(!init_event_bus());

        drain_events();
        publish(AppEvent::ToggleWindow);
        publisher()
            .expect("initialized")
            .publish(AppEvent::HideWindow);

        assert_eq!(
            drain_events(),
            vec![AppEvent::ToggleWindow, AppEvent::HideWindow]
        );
        assert!(drain_events().is_empty());

        publish(AppEvent::HideWindow);
        assert_eq!(dispatch_pending(|_: &mut dyn FnMut(&mut u32)| {}, |_, _| {}), None);
        let mut handled = 0u32;
        let delivered = dispatch_pending(|run| run(&mut handled), |n: &mut u32, _| *n += 1);
        assert_eq!(delivered, Some(1));
        assert_eq!(handled, 1);
    }
}
