//! Bounded single-consumer feed channel
//!
//! Any number of producers hold a [`FeedSender`]; exactly one
//! [`FeedReceiver`] exists and is drained by the ingestion service.

use crate::error::{BusError, Result};
use strata_core::RawEvent;
use tokio::sync::mpsc;

/// Message delivered to the ingestion service.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Raw wire text, parsed by the pipeline
    Frame(String),

    /// Raw binary frame, parsed by the pipeline without lossy decoding
    Bytes(Vec<u8>),

    /// Already structured payload
    Event(RawEvent),

    /// The transport failed; no event was delivered
    TransportError(String),
}

/// Producer side. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FeedSender {
    tx: mpsc::Sender<Inbound>,
}

impl FeedSender {
    /// Wait for capacity and enqueue.
    pub async fn send(&self, message: Inbound) -> Result<()> {
        self.tx
            .send(message)
            .await
            .map_err(|_| BusError::ChannelClosed)
    }

    /// Enqueue without waiting; fails when the channel is full or closed.
    pub fn try_send(&self, message: Inbound) -> Result<()> {
        self.tx.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => BusError::ChannelFull,
            mpsc::error::TrySendError::Closed(_) => BusError::ChannelClosed,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side.
#[derive(Debug)]
pub struct FeedReceiver {
    rx: mpsc::Receiver<Inbound>,
}

impl FeedReceiver {
    /// Next message, or `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<Inbound> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Inbound> {
        self.rx.try_recv().ok()
    }

    /// Stop accepting new messages; buffered ones can still be drained.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

/// Create a feed channel holding up to `capacity` messages.
pub fn channel(capacity: usize) -> Result<(FeedSender, FeedReceiver)> {
    if capacity == 0 {
        return Err(BusError::InvalidConfig(
            "channel capacity must be at least 1".into(),
        ));
    }
    let (tx, rx) = mpsc::channel(capacity);
    Ok((FeedSender { tx }, FeedReceiver { rx }))
}
