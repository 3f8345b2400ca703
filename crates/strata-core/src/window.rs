//! Fixed-length sliding windows
//!
//! Every window is created full and stays full: each push evicts the oldest
//! element. Only the ingestion pipeline advances them.

use crate::error::{Result, StrataError};
use crate::types::CountSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Oldest-first ring of exactly `len` elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlidingWindow<T> {
    buf: VecDeque<T>,
}

impl<T: Clone> SlidingWindow<T> {
    /// Window of `len` copies of `value`.
    pub fn filled(len: usize, value: T) -> Result<Self> {
        Self::from_fn(len, |_| value.clone())
    }

    /// Window whose element at position `i` is `f(i)`.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Result<Self> {
        if len == 0 {
            return Err(StrataError::Config(
                "sliding window length must be at least 1".into(),
            ));
        }
        Ok(Self {
            buf: (0..len).map(f).collect(),
        })
    }
}

impl<T> SlidingWindow<T> {
    /// Append at the tail and return the evicted head.
    pub(crate) fn push(&mut self, item: T) -> Option<T> {
        self.buf.push_back(item);
        self.buf.pop_front()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    pub fn oldest(&self) -> &T {
        &self.buf[0]
    }

    pub fn latest(&self) -> &T {
        &self.buf[self.buf.len() - 1]
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.buf.iter()
    }
}

impl<T: Clone> SlidingWindow<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.buf.iter().cloned().collect()
    }
}

/// Window of cumulative count snapshots, one per tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CounterWindow {
    window: SlidingWindow<CountSnapshot>,
}

impl CounterWindow {
    /// `len` copies of the seed snapshot.
    pub fn seeded(len: usize) -> Result<Self> {
        Ok(Self {
            window: SlidingWindow::filled(len, CountSnapshot::seed())?,
        })
    }

    pub(crate) fn advance(&mut self, snapshot: CountSnapshot) -> Option<CountSnapshot> {
        self.window.push(snapshot)
    }

    pub fn latest(&self) -> &CountSnapshot {
        self.window.latest()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn get(&self, tick: usize) -> Option<&CountSnapshot> {
        self.window.get(tick)
    }

    pub fn snapshots(&self) -> impl DoubleEndedIterator<Item = &CountSnapshot> + ExactSizeIterator {
        self.window.iter()
    }
}

/// Arrival instants, index-aligned with [`CounterWindow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimestampWindow {
    window: SlidingWindow<DateTime<Utc>>,
}

impl TimestampWindow {
    /// `len` copies of `instant`.
    pub fn seeded(len: usize, instant: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            window: SlidingWindow::filled(len, instant)?,
        })
    }

    pub(crate) fn advance(&mut self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.window.push(instant)
    }

    pub fn latest(&self) -> DateTime<Utc> {
        *self.window.latest()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn get(&self, tick: usize) -> Option<DateTime<Utc>> {
        self.window.get(tick).copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DateTime<Utc>> + ExactSizeIterator {
        self.window.iter()
    }

    pub fn to_vec(&self) -> Vec<DateTime<Utc>> {
        self.window.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::TimeZone;

    #[test]
    fn test_push_evicts_oldest() {
        let mut window = SlidingWindow::from_fn(3, |i| i).unwrap();
        assert_eq!(window.push(10), Some(0));
        assert_eq!(window.to_vec(), vec![1, 2, 10]);
        assert_eq!(*window.oldest(), 1);
        assert_eq!(*window.latest(), 10);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(SlidingWindow::filled(0, 1u8).is_err());
        assert!(CounterWindow::seeded(0).is_err());
    }

    #[test]
    fn test_counter_window_seed() {
        let window = CounterWindow::seeded(15).unwrap();
        assert_eq!(window.len(), 15);
        assert!(window.snapshots().all(|s| *s == CountSnapshot::seed()));
    }

    #[test]
    fn test_counter_window_advance_keeps_length() {
        let mut window = CounterWindow::seeded(4).unwrap();
        for _ in 0..10 {
            let next = window.latest().incremented(Category::Firefox).unwrap();
            window.advance(next);
            assert_eq!(window.len(), 4);
        }
        assert_eq!(window.latest().get(Category::Firefox), 11);
        assert_eq!(window.get(0).unwrap().get(Category::Firefox), 8);
    }

    #[test]
    fn test_timestamp_window_advance() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let later = start + chrono::Duration::seconds(2);
        let mut window = TimestampWindow::seeded(2, start).unwrap();

        assert_eq!(window.advance(later), Some(start));
        assert_eq!(window.to_vec(), vec![start, later]);
        assert_eq!(window.latest(), later);
    }
}
