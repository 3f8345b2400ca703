//! Event producers feeding the channel
//!
//! - [`SyntheticSource`]: random known labels at a fixed interval
//! - [`WebSocketSource`]: the live feed
//!
//! Sources never retry. A transport failure is forwarded as
//! [`Inbound::TransportError`](crate::Inbound::TransportError) and the source
//! ends.

pub mod synthetic;
pub mod websocket;

pub use synthetic::SyntheticSource;
pub use websocket::WebSocketSource;

/// Why a source stopped producing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEnd {
    /// Emitted its configured number of events
    Exhausted,
    /// The ingestion side dropped the receiver
    ReceiverClosed,
    /// The remote end closed the connection
    RemoteClosed,
    /// Connecting or reading failed
    TransportFailed,
}

/// Summary of a finished source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    pub forwarded: u64,
    pub ended: SourceEnd,
}
