//! Channel between the producers (tap thread, menu actions, observers) and
//! the main-thread dispatcher.

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::trace;

use super::types::AppEvent;

/// Owning end of the queue. Lives on the consumer side.
///
/// ```
/// use llm_overlay::events::{AppEvent, EventBus};
///
/// let mut bus = EventBus::new();
/// bus.publisher().publish(AppEvent::BeginHotkeyRebind);
/// assert_eq!(bus.drain(), vec![AppEvent::BeginHotkeyRebind]);
/// ```
pub struct EventBus {
    sender: Sender<AppEvent>,
    inbox: Inbox,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            inbox: Inbox::new(receiver),
        }
    }

    /// A handle for one producer. Clone it freely; it can cross threads.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher::from_sender(self.sender.clone())
    }

    /// Next queued event, without blocking. The bus holds a sender itself,
    /// so the channel never reports disconnection here.
    pub fn try_recv(&mut self) -> Option<AppEvent> {
        self.inbox.try_recv()
    }

    /// Everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        self.inbox.drain()
    }

    /// See [`Inbox::deliver`].
    pub fn deliver<C: ?Sized>(
        &mut self,
        access: impl FnOnce(&mut dyn FnMut(&mut C)),
        handle: impl FnMut(&mut C, AppEvent),
    ) -> Option<usize> {
        self.inbox.deliver(access, handle)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end plus a batch that could not be delivered yet.
pub struct Inbox {
    receiver: Receiver<AppEvent>,
    held: Vec<AppEvent>,
}

impl Inbox {
    pub fn new(receiver: Receiver<AppEvent>) -> Self {
        Self {
            receiver,
            held: Vec::new(),
        }
    }

    pub fn try_recv(&mut self) -> Option<AppEvent> {
        if self.held.is_empty() {
            self.receiver.try_recv().ok()
        } else {
            Some(self.held.remove(0))
        }
    }

    /// Held events first, then whatever arrived since.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        let mut events = std::mem::take(&mut self.held);
        events.extend(self.receiver.try_iter());
        events
    }

    /// Run `handle` on every pending event, in order, with the consumer that
    /// `access` lends out. The queue is only drained inside that loan: if
    /// `access` cannot reach the consumer (e.g. it is already borrowed) the
    /// batch stays queued for the next call and `None` is returned.
    ///
    /// `access` is not called at all when nothing is pending.
    pub fn deliver<C: ?Sized>(
        &mut self,
        access: impl FnOnce(&mut dyn FnMut(&mut C)),
        mut handle: impl FnMut(&mut C, AppEvent),
    ) -> Option<usize> {
        let events = self.drain();
        if events.is_empty() {
            return Some(0);
        }
        let count = events.len();
        let mut batch = Some(events);
        access(&mut |consumer: &mut C| {
            for event in batch.take().into_iter().flatten() {
                handle(consumer, event);
            }
        });
        match batch {
            Some(events) => {
                self.held = events;
                None
            }
            None => Some(count),
        }
    }
}

/// Producer handle. Publishing never blocks, which keeps the tap callback
/// fast.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<AppEvent>,
}

impl EventPublisher {
    pub fn from_sender(sender: Sender<AppEvent>) -> Self {
        Self { sender }
    }

    pub fn publish(&self, event: AppEvent) {
        // Fails only once the receiver is gone, i.e. during shutdown.
        if let Err(mpsc::SendError(event)) = self.sender.send(event) {
            trace!("Event bus closed, dropping {}", event.description());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Modifiers;

    #[test]
    fn test_empty_bus_drains_nothing() {
        let mut bus = EventBus::default();
        assert!(bus.drain().is_empty());
        assert!(bus.try_recv().is_none());
    }

    #[test]
    fn test_menu_and_tap_events_keep_order() {
        let mut bus = EventBus::new();
        let menu = bus.publisher();
        let tap = menu.clone();

        menu.publish(AppEvent::BeginHotkeyRebind);
        tap.publish(AppEvent::HotkeyCaptured {
            modifiers: Modifiers::CONTROL | Modifiers::OPTION,
            key_code: 40,
            characters: Some("k".into()),
        });
        menu.publish(AppEvent::SelectProvider("Claude".into()));

        assert_eq!(bus.try_recv(), Some(AppEvent::BeginHotkeyRebind));
        let rest = bus.drain();
        assert_eq!(rest.len(), 2);
        assert!(rest[0].is_from_tap());
        assert_eq!(rest[1], AppEvent::SelectProvider("Claude".into()));
    }

    #[test]
    fn test_busy_consumer_keeps_events_queued() {
        let mut bus = EventBus::new();
        let publisher = bus.publisher();
        publisher.publish(AppEvent::BeginHotkeyRebind);
        publisher.publish(AppEvent::SelectProvider("Grok".into()));

        // Consumer unavailable: the loan is never made.
        let record = |log: &mut Vec<AppEvent>, event: AppEvent| log.push(event);
        let delivered = bus.deliver(|_: &mut dyn FnMut(&mut Vec<AppEvent>)| {}, record);
        assert_eq!(delivered, None);

        publisher.publish(AppEvent::HideWindow);
        let mut seen = Vec::new();
        let delivered = bus.deliver(|run| run(&mut seen), record);
        assert_eq!(delivered, Some(3));
        assert_eq!(
            seen,
            vec![
                AppEvent::BeginHotkeyRebind,
                AppEvent::SelectProvider("Grok".into()),
                AppEvent::HideWindow,
            ]
        );
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_nothing_pending_skips_access() {
        let mut bus = EventBus::new();
        let mut asked = false;
        let delivered = bus.deliver(|_: &mut dyn FnMut(&mut ())| asked = true, |_, _| {});
        assert_eq!(delivered, Some(0));
        assert!(!asked);
    }

    #[test]
    fn test_held_event_comes_back_first() {
        let mut bus = EventBus::new();
        bus.publisher().publish(AppEvent::ToggleWindow);
        assert_eq!(bus.deliver(|_: &mut dyn FnMut(&mut ())| {}, |_, _| {}), None);

        bus.publisher().publish(AppEvent::ReenableEventTap);
        assert_eq!(bus.try_recv(), Some(AppEvent::ToggleWindow));
        assert_eq!(bus.try_recv(), Some(AppEvent::ReenableEventTap));
    }

    #[test]
    fn test_publishing_after_bus_dropped_is_silent() {
        let publisher = EventBus::new().publisher();
        publisher.publish(AppEvent::ReenableEventTap);
    }
}
