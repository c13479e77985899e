//! Explicit state-change notifications.
//!
//! Stores and the playback coordinator publish a `Change` whenever their
//! observable state moves. The view layer subscribes once and redraws when
//! something arrives, instead of re-rendering blindly.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// What part of the session changed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Change {
    Library,
    Playlists,
    Selection,
    Track,
    Transport,
    Position,
    Volume,
    Modes,
}

/// Shared fan-out of `Change` values to every live subscriber.
///
/// Cloning a `Notifier` shares the subscriber list.
#[derive(Clone, Default)]
pub struct Notifier {
    subscribers: Arc<Mutex<Vec<Sender<Change>>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> Receiver<Change> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// Deliver `change` to every subscriber, dropping those that hung up.
    pub fn publish(&self, change: Change) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(change).is_ok());
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_reaches_every_subscriber() {
        let notifier = Notifier::new();
        let a = notifier.subscribe();
        let b = notifier.clone().subscribe();

        notifier.publish(Change::Volume);

        assert_eq!(a.try_recv().unwrap(), Change::Volume);
        assert_eq!(b.try_recv().unwrap(), Change::Volume);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let notifier = Notifier::new();
        let keep = notifier.subscribe();
        drop(notifier.subscribe());
        assert_eq!(notifier.subscriber_count(), 2);

        notifier.publish(Change::Library);

        assert_eq!(notifier.subscriber_count(), 1);
        assert_eq!(keep.try_recv().unwrap(), Change::Library);
    }
}
