//! Event channel implementation using crossbeam-channel.
//!
//! Lets the duplicate remover report progress to whatever front end is
//! listening, from any thread.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Cloneable handle the remover and the loader report progress through.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Send an event without blocking.
    ///
    /// Events sent after the receiver is dropped are discarded.
    pub fn send(&self, event: Event) {
        // Nobody listening is not an error
        let _ = self.inner.send(event);
    }
}

/// Receives progress events on the front-end side.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Blocking iterator over events; ends once every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Factory for sender/receiver pairs.
pub struct EventChannel;

impl EventChannel {
    /// Create an unbounded channel; sending never blocks.
    pub fn new() -> (EventSender, EventReceiver) {
        let (inner, rx) = unbounded();
        (EventSender { inner }, EventReceiver { inner: rx })
    }
}

/// An event sender whose receiver is already gone.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CompareEvent, GrayscaleEvent};
    use std::thread;

    #[test]
    fn events_cross_threads_in_send_order() {
        let (sender, receiver) = EventChannel::new();

        let worker = thread::spawn(move || {
            sender.send(Event::Grayscale(GrayscaleEvent::Started { total_images: 4 }));
            sender.send(Event::Compare(CompareEvent::DuplicateFound {
                kept: 0,
                removed: 3,
            }));
        });
        worker.join().unwrap();

        let events: Vec<_> = receiver.iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1],
            Event::Compare(CompareEvent::DuplicateFound { kept: 0, removed: 3 })
        ));
    }

    #[test]
    fn null_sender_discards_events() {
        let sender = null_sender();
        sender.send(Event::Grayscale(GrayscaleEvent::Started { total_images: 1 }));
    }
}
