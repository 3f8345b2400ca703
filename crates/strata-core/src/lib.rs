//! Strata Core: streaming state for categorized event feeds
//!
//! Maintains two bounded, continuously advancing views over a live feed of
//! tagged events:
//! - **Counter window**: cumulative per-category counts for the last N ticks,
//!   with an index-aligned window of arrival timestamps
//! - **Share projection**: the window normalized into stacked `[0, 1]` bands
//! - **Event log**: the most recent M events for list display
//!
//! The [`IngestionPipeline`] is the only writer. Each accepted event advances
//! every structure by exactly one element; a rejected event changes nothing.
//!
//! # Example
//!
//! ```
//! use strata_core::{IngestionPipeline, StrataConfig, Category};
//!
//! # fn main() -> strata_core::Result<()> {
//! let mut pipeline = IngestionPipeline::new(StrataConfig::default())?;
//! pipeline.ingest_json(r#"[{"browser":"Chrome","terms":"borrow checker"}]"#)?;
//!
//! let bands = pipeline.current_projection();
//! let chrome = bands[bands.len() - 1].band(Category::Chrome);
//! assert!((chrome.high - 4.0 / 9.0).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod event_log;
pub mod observe;
pub mod pipeline;
pub mod projector;
pub mod taxonomy;
pub mod types;
pub mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StrataConfig;
pub use error::{Result, StrataError};
pub use event_log::EventLog;
pub use pipeline::{IngestOutcome, IngestionPipeline, IngestionState, StateView};
pub use projector::{project, project_snapshot, Band, BandSet};
pub use taxonomy::{resolve, CATEGORY_TABLE};
pub use types::{
    Category, CountSnapshot, EventId, RawEvent, RawRecord, SearchEvent, CATEGORY_COUNT,
};
pub use window::{CounterWindow, SlidingWindow, TimestampWindow};
