//! Synthetic feed for running without a live connection.

use super::{SourceEnd, SourceStats};
use crate::channel::{FeedSender, Inbound};
use crate::config::FeedConfig;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use strata_core::{RawEvent, RawRecord, CATEGORY_TABLE};
use tokio::task::JoinHandle;

/// Emits one-record events with a uniformly random known label.
///
/// Events go through the same parsing and resolution as live ones.
pub struct SyntheticSource {
    interval: Duration,
    text: String,
    limit: Option<u64>,
    rng: StdRng,
}

impl SyntheticSource {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            interval: config.synthetic_interval(),
            text: config.synthetic_text.clone(),
            limit: None,
            rng: StdRng::from_entropy(),
        })
    }

    /// Stop after `limit` events.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reproducible label sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Build the next event without sending it.
    pub fn next_event(&mut self) -> RawEvent {
        let (label, _) = CATEGORY_TABLE[self.rng.gen_range(0..CATEGORY_TABLE.len())];
        RawEvent::single(RawRecord::new(label, self.text.clone()))
    }

    /// Produce events until the limit is reached or the receiver goes away.
    pub async fn run(mut self, sender: FeedSender) -> SourceStats {
        let mut ticker = tokio::time::interval(self.interval);
        let mut forwarded = 0u64;

        loop {
            if self.limit.is_some_and(|limit| forwarded >= limit) {
                tracing::debug!(forwarded, "Synthetic source exhausted");
                return SourceStats {
                    forwarded,
                    ended: SourceEnd::Exhausted,
                };
            }
            ticker.tick().await;

            let event = self.next_event();
            if sender.send(Inbound::Event(event)).await.is_err() {
                return SourceStats {
                    forwarded,
                    ended: SourceEnd::ReceiverClosed,
                };
            }
            forwarded += 1;
        }
    }

    pub fn spawn(self, sender: FeedSender) -> JoinHandle<SourceStats> {
        tokio::spawn(self.run(sender))
    }
}
