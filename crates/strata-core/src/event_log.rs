//! Bounded log of the most recent search events
//!
//! Stored text is never altered; display truncation happens on copies.

use crate::error::Result;
use crate::types::{EventId, SearchEvent};
use crate::window::SlidingWindow;
use serde::Serialize;

/// FIFO of exactly `len` events, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventLog {
    events: SlidingWindow<SearchEvent>,
}

impl EventLog {
    /// Log filled with placeholders numbered `0..len`.
    pub fn seeded(len: usize) -> Result<Self> {
        Ok(Self {
            events: SlidingWindow::from_fn(len, |i| SearchEvent::placeholder(i as EventId))?,
        })
    }

    /// Append at the tail and evict the head.
    pub(crate) fn record(&mut self, event: SearchEvent) -> Option<SearchEvent> {
        self.events.push(event)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn latest(&self) -> &SearchEvent {
        self.events.latest()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SearchEvent> + ExactSizeIterator {
        self.events.iter()
    }

    pub fn to_vec(&self) -> Vec<SearchEvent> {
        self.events.to_vec()
    }
}
