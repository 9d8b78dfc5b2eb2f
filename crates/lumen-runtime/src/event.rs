use crossbeam_channel::{Receiver, Sender, unbounded};
use lumen_chunk::ChunkPosition;

use crate::picker::BlockSelection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    CameraMoved,
    ChunkRebuilt(ChunkPosition),
    BlockSelectionChanged(BlockSelection),
}

/// Handle returned by [`NotificationBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Notification) + Send>;

/// Synchronous publish/subscribe. Every registered listener runs, in
/// registration order, before [`publish`](Self::publish) returns.
pub struct NotificationBus {
    listeners: Vec<(ListenerId, Listener)>,
    channels: Vec<Sender<Notification>>,
    next_id: u64,
    published: u64,
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self { listeners: Vec::new(), channels: Vec::new(), next_id: 1, published: 0 }
    }
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Notification) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Forwards every notification into a channel. Dropping the receiver
    /// ends the subscription at the next publish.
    pub fn subscribe_channel(&mut self) -> Receiver<Notification> {
        let (tx, rx) = unbounded();
        self.channels.push(tx);
        rx
    }

    pub fn publish(&mut self, notification: Notification) {
        self.published += 1;
        match notification {
            Notification::CameraMoved => log::trace!(target: "events", "CameraMoved"),
            Notification::ChunkRebuilt(cp) => log::trace!(target: "events", "ChunkRebuilt {}", cp),
            Notification::BlockSelectionChanged(sel) => match sel.block {
                Some(b) => log::debug!(target: "events", "BlockSelectionChanged {} at {}", b.prototype, b.position),
                None => log::debug!(target: "events", "BlockSelectionChanged none"),
            },
        }
        for (_, listener) in &mut self.listeners {
            listener(&notification);
        }
        let before = self.channels.len();
        self.channels.retain(|tx| tx.send(notification).is_ok());
        if self.channels.len() != before {
            log::debug!(target: "events", "pruned {} closed channel(s)", before - self.channels.len());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len() + self.channels.len()
    }

    /// Notifications published since construction.
    pub fn published(&self) -> u64 {
        self.published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn listeners_run_in_order_until_unsubscribed() {
        let mut bus = NotificationBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let a = {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |n| seen.lock().unwrap().push(("a", *n)))
        };
        {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |n| seen.lock().unwrap().push(("b", *n)));
        }
        bus.publish(Notification::CameraMoved);
        assert!(bus.unsubscribe(a));
        assert!(!bus.unsubscribe(a));
        bus.publish(Notification::ChunkRebuilt(ChunkPosition::new(1, 2)));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("a", Notification::CameraMoved),
                ("b", Notification::CameraMoved),
                ("b", Notification::ChunkRebuilt(ChunkPosition::new(1, 2))),
            ]
        );
        assert_eq!(bus.published(), 2);
    }

    #[test]
    fn dropped_channels_are_pruned() {
        let mut bus = NotificationBus::new();
        let kept = bus.subscribe_channel();
        let dropped = bus.subscribe_channel();
        assert_eq!(bus.listener_count(), 2);
        drop(dropped);
        bus.publish(Notification::BlockSelectionChanged(BlockSelection::NONE));
        assert_eq!(bus.listener_count(), 1);
        assert_eq!(kept.try_recv(), Ok(Notification::BlockSelectionChanged(BlockSelection::NONE)));
    }
}
