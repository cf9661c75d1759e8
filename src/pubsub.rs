//! Async publish/subscribe with an interrupt channel.
//!
//! Every notification the core emits flows through [`PubSub`]. Publishing
//! awaits all subscribers before resolving and hands back the first
//! subscriber's response; the edit protocol consumes that response as its
//! cooperative-cancellation decision before any mutation runs.

use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::geometry::LatLng;
use crate::mode::Mode;

/// Identifies one notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Mode bit set changed (fired on every transition, even a no-op one).
    Mode,
    /// Boundary update carrying every polygon's current ring.
    Markers,
    /// An edge drag is about to begin; subscribers may interrupt it.
    EditStart,
    /// Undo/redo stack contents changed.
    StackStateUpdated,
    /// A plain polygon creation was recorded.
    SimplePolygonCreated,
    /// An edit commit that left the set overlap-free was recorded.
    PolygonEditedNonOverlapping,
    /// A commit collapsed overlapping polygons into a merge.
    PolygonOverlapsOtherPolygon,
    /// A merge command was undone.
    UndoMergedPolygon,
    /// A merge command was replayed.
    RedoMergedPolygon,
}

/// Payload delivered to subscribers.
#[derive(Debug, Clone)]
pub enum Event {
    Mode {
        mode: Mode,
    },
    Markers {
        latlngs: Vec<Vec<LatLng>>,
    },
    EditStart,
    /// Stack notification; `name` is the cause-specific channel it went out
    /// on, the emptiness flags drive toolbar button state.
    StackState {
        name: EventName,
        undo_empty: bool,
        redo_empty: bool,
    },
}

impl Event {
    pub fn name(&self) -> EventName {
        match self {
            Event::Mode { .. } => EventName::Mode,
            Event::Markers { .. } => EventName::Markers,
            Event::EditStart => EventName::EditStart,
            Event::StackState { name, .. } => *name,
        }
    }
}

/// Response returned from a subscriber. Only [`EventName::EditStart`]
/// consults it; elsewhere it is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    pub interrupt: bool,
}

/// Receives published events. Runs on the surface's single thread, so
/// implementations are not required to be `Send`.
#[async_trait(?Send)]
pub trait Subscriber {
    async fn on_event(&self, event: &Event) -> Option<Response>;
}

/// Adapts a plain closure into a [`Subscriber`].
pub struct FnSubscriber<F>(pub F);

#[async_trait(?Send)]
impl<F> Subscriber for FnSubscriber<F>
where
    F: Fn(&Event) -> Option<Response>,
{
    async fn on_event(&self, event: &Event) -> Option<Response> {
        (self.0)(event)
    }
}

/// Handle for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Per-event ordered subscriber lists.
#[derive(Default)]
pub struct PubSub {
    subscribers: HashMap<EventName, Vec<(SubscriptionId, Rc<dyn Subscriber>)>>,
    next_id: u64,
}

impl PubSub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `subscriber` for `name`, after any existing subscribers.
    pub fn subscribe(&mut self, name: EventName, subscriber: Rc<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.entry(name).or_default().push((id, subscriber));
        id
    }

    /// Removes a subscription; returns whether it was present.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for list in self.subscribers.values_mut() {
            if let Some(position) = list.iter().position(|(sid, _)| *sid == id) {
                list.remove(position);
                return true;
            }
        }
        false
    }

    /// Delivers `event` to every subscriber of its channel, awaiting them
    /// all, and returns the first subscriber's response.
    pub async fn publish(&self, event: &Event) -> Option<Response> {
        let Some(list) = self.subscribers.get(&event.name()) else {
            return None;
        };
        let responses = join_all(list.iter().map(|(_, s)| s.on_event(event))).await;
        responses.into_iter().next().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Rc<dyn Subscriber> {
        Rc::new(FnSubscriber(move |_: &Event| -> Option<Response> {
            log.borrow_mut().push(tag);
            None
        }))
    }

    #[tokio::test]
    async fn publish_reaches_subscribers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = PubSub::new();
        bus.subscribe(EventName::Mode, recorder(log.clone(), "first"));
        bus.subscribe(EventName::Mode, recorder(log.clone(), "second"));

        bus.publish(&Event::Mode { mode: Mode::VIEW }).await;
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn publish_returns_the_first_subscriber_response() {
        let mut bus = PubSub::new();
        bus.subscribe(
            EventName::EditStart,
            Rc::new(FnSubscriber(|_: &Event| Some(Response { interrupt: true }))),
        );
        bus.subscribe(
            EventName::EditStart,
            Rc::new(FnSubscriber(|_: &Event| Some(Response { interrupt: false }))),
        );

        let response = bus.publish(&Event::EditStart).await;
        assert_eq!(response, Some(Response { interrupt: true }));
    }

    #[tokio::test]
    async fn publish_without_subscribers_resolves_to_none() {
        let bus = PubSub::new();
        assert_eq!(bus.publish(&Event::EditStart).await, None);
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = PubSub::new();
        let id = bus.subscribe(EventName::Markers, recorder(log.clone(), "gone"));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));

        bus.publish(&Event::Markers { latlngs: vec![] }).await;
        assert!(log.borrow().is_empty());
    }

    #[tokio::test]
    async fn channels_are_independent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = PubSub::new();
        bus.subscribe(EventName::Mode, recorder(log.clone(), "mode"));

        bus.publish(&Event::EditStart).await;
        assert!(log.borrow().is_empty());
    }
}
