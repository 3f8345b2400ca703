//! # Strata Bus
//!
//! Event delivery for the Strata pipeline.
//!
//! The bus provides:
//! - A bounded channel with many producers and exactly one consumer
//! - An ingestion service that drains it into an `IngestionPipeline`
//! - A live WebSocket source and a synthetic source
//!
//! ## Example
//!
//! ```rust,no_run
//! use strata_bus::{channel, IngestionService, NoopObserver, SyntheticSource, FeedConfig};
//! use strata_core::{IngestionPipeline, StrataConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let feed = FeedConfig::default();
//! let (tx, rx) = channel(feed.channel_capacity)?;
//! SyntheticSource::new(&feed)?.with_limit(10).spawn(tx);
//!
//! let pipeline = IngestionPipeline::new(StrataConfig::default())?;
//! let mut service = IngestionService::new(pipeline, rx, NoopObserver);
//! let stats = service.run().await?;
//! println!("accepted {} events", stats.accepted);
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod service;
pub mod source;

pub use channel::{channel, FeedReceiver, FeedSender, Inbound};
pub use config::FeedConfig;
pub use error::{BusError, Result};
pub use service::{
    ErrorAction, ErrorStrategy, IngestionService, NoopObserver, ServiceStats, ShutdownHandle,
    StateObserver,
};
pub use source::{SourceEnd, SourceStats, SyntheticSource, WebSocketSource};
