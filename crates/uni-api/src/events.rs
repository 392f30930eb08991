//! Cross-page invalidation.
//!
//! A successful bulk upload replaces backend data wholesale, so every cached
//! list is stale afterwards. The upload controller publishes on the bus and
//! each [`EntityPage`](crate::page::EntityPage) checks its subscription before
//! deciding whether to refetch.

use tokio::sync::broadcast;

const BUS_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEvent {
    /// Backend data was replaced by an upload.
    DatasetReplaced,
}

#[derive(Debug, Clone)]
pub struct InvalidationBus {
    sender: broadcast::Sender<DataEvent>,
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidationBus {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    /// Publish to every live subscriber. Returns how many received it.
    pub fn publish(&self, event: DataEvent) -> usize {
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::debug!(?event, delivered, "data event published");
        delivered
    }

    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }
}

/// One page's view of the bus.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<DataEvent>,
}

impl Subscription {
    /// Drain pending events; true if any invalidates cached data.
    ///
    /// A lagged receiver missed events, so it is treated as stale too.
    pub fn is_stale(&mut self) -> bool {
        let mut stale = false;
        loop {
            match self.receiver.try_recv() {
                Ok(DataEvent::DatasetReplaced) | Err(broadcast::error::TryRecvError::Lagged(_)) => {
                    stale = true;
                }
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => return stale,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_replacement_once() {
        let bus = InvalidationBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        assert!(!first.is_stale());

        assert_eq!(bus.publish(DataEvent::DatasetReplaced), 2);
        assert!(first.is_stale());
        assert!(!first.is_stale(), "events are drained");
        assert!(second.is_stale());
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let bus = InvalidationBus::default();
        assert_eq!(bus.publish(DataEvent::DatasetReplaced), 0);
    }

    #[test]
    fn lagged_subscriber_is_stale() {
        let bus = InvalidationBus::new();
        let mut sub = bus.subscribe();
        for _ in 0..(BUS_CAPACITY + 4) {
            bus.publish(DataEvent::DatasetReplaced);
        }
        assert!(sub.is_stale());
        assert!(!sub.is_stale());
    }
}
