//! Ingestion pipeline
//!
//! Sole owner and writer of the counter window, the timestamp window and the
//! event log. One call to [`IngestionPipeline::ingest`] is one tick:
//!
//! 1. Extract the first record of the payload
//! 2. Resolve its label through the taxonomy
//! 3. Build the next snapshot
//! 4. Advance both windows and the log together
//!
//! Steps 1-3 can fail; step 4 cannot. A rejected event therefore never leaves
//! a partially advanced state behind.

use crate::clock::{Clock, SystemClock};
use crate::config::StrataConfig;
use crate::error::{Result, StrataError};
use crate::event_log::EventLog;
use crate::observe;
use crate::projector::{self, BandSet};
use crate::taxonomy;
use crate::types::{Category, CountSnapshot, EventId, RawEvent, SearchEvent};
use crate::window::{CounterWindow, TimestampWindow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Everything the pipeline mutates, kept in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionState {
    counters: CounterWindow,
    timestamps: TimestampWindow,
    log: EventLog,
    next_id: EventId,
}

impl IngestionState {
    /// Seed state: uniform counts of 1, every timestamp at `instant`,
    /// placeholder events numbered from 0.
    pub fn seeded(config: &StrataConfig, instant: DateTime<Utc>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            counters: CounterWindow::seeded(config.window_size)?,
            timestamps: TimestampWindow::seeded(config.window_size, instant)?,
            log: EventLog::seeded(config.log_size)?,
            next_id: config.log_size as EventId,
        })
    }

    pub fn counters(&self) -> &CounterWindow {
        &self.counters
    }

    pub fn timestamps(&self) -> &TimestampWindow {
        &self.timestamps
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Id the next accepted event will receive.
    pub fn next_id(&self) -> EventId {
        self.next_id
    }

    fn advance(
        &mut self,
        snapshot: CountSnapshot,
        instant: DateTime<Utc>,
        category: Category,
        text: String,
    ) -> EventId {
        let id = self.next_id;
        self.counters.advance(snapshot);
        self.timestamps.advance(instant);
        self.log.record(SearchEvent::new(id, category, text));
        self.next_id += 1;
        id
    }
}

/// Result of an accepted tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestOutcome {
    pub event_id: EventId,
    pub category: Category,
    pub tick_at: DateTime<Utc>,
}

/// Owned, consistent copy of the read surface.
///
/// A presentation layer can hold on to this while later ticks proceed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateView {
    /// Ticks accepted so far
    pub tick: u64,
    pub projection: Vec<BandSet>,
    pub timestamps: Vec<DateTime<Utc>>,
    pub log: Vec<SearchEvent>,
    pub latest: CountSnapshot,
}

impl StateView {
    /// Band set of the newest tick.
    pub fn latest_bands(&self) -> Option<&BandSet> {
        self.projection.last()
    }
}

/// Streaming state manager.
pub struct IngestionPipeline {
    config: StrataConfig,
    clock: Arc<dyn Clock>,
    state: IngestionState,
    accepted: u64,
    rejected: u64,
}

impl IngestionPipeline {
    /// Pipeline on wall-clock time.
    pub fn new(config: StrataConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: StrataConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let state = IngestionState::seeded(&config, clock.now())?;
        tracing::debug!(
            window_size = config.window_size,
            log_size = config.log_size,
            "Ingestion pipeline seeded"
        );
        Ok(Self {
            config,
            clock,
            state,
            accepted: 0,
            rejected: 0,
        })
    }

    /// Ingest one raw event.
    ///
    /// Only the first record of a multi-record payload is used; the others
    /// are dropped without inspection.
    pub fn ingest(&mut self, raw: &RawEvent) -> Result<IngestOutcome> {
        let start = Instant::now();
        match self.try_ingest(raw) {
            Ok(outcome) => {
                self.accepted += 1;
                observe::record_accepted(start.elapsed());
                observe::set_latest_total(self.state.counters.latest().total());
                if raw.len() > 1 {
                    tracing::debug!(
                        event_id = outcome.event_id,
                        dropped = raw.len() - 1,
                        "Ignored trailing records"
                    );
                }
                Ok(outcome)
            }
            Err(e) => {
                self.note_rejection(&e);
                Err(e)
            }
        }
    }

    /// Parse wire text and ingest it.
    pub fn ingest_json(&mut self, text: &str) -> Result<IngestOutcome> {
        let parsed = RawEvent::from_json(text);
        self.ingest_parsed(parsed)
    }

    /// Parse a binary frame and ingest it. Bytes that are not valid UTF-8
    /// JSON are rejected as malformed.
    pub fn ingest_slice(&mut self, bytes: &[u8]) -> Result<IngestOutcome> {
        let parsed = RawEvent::from_slice(bytes);
        self.ingest_parsed(parsed)
    }

    fn ingest_parsed(&mut self, parsed: Result<RawEvent>) -> Result<IngestOutcome> {
        match parsed {
            Ok(raw) => self.ingest(&raw),
            Err(e) => {
                self.note_rejection(&e);
                Err(e)
            }
        }
    }

    fn try_ingest(&mut self, raw: &RawEvent) -> Result<IngestOutcome> {
        let record = raw.first_record()?;
        let category = taxonomy::resolve(&record.category)?;
        let snapshot = self.state.counters.latest().incremented(category)?;

        let tick_at = self.clock.now();
        let event_id = self.state.advance(snapshot, tick_at, category, record.text);

        tracing::debug!(event_id, %category, "Tick accepted");
        Ok(IngestOutcome {
            event_id,
            category,
            tick_at,
        })
    }

    fn note_rejection(&mut self, error: &StrataError) {
        self.rejected += 1;
        observe::record_rejected(error.kind());
        tracing::warn!(kind = error.kind(), "Event rejected: {}", error);
    }

    /// Stacked bands for every tick in the window, oldest first.
    pub fn current_projection(&self) -> Vec<BandSet> {
        projector::project(&self.state.counters)
    }

    pub fn current_timestamps(&self) -> Vec<DateTime<Utc>> {
        self.state.timestamps.to_vec()
    }

    pub fn current_log(&self) -> Vec<SearchEvent> {
        self.state.log.to_vec()
    }

    pub fn view(&self) -> StateView {
        StateView {
            tick: self.accepted,
            projection: self.current_projection(),
            timestamps: self.current_timestamps(),
            log: self.current_log(),
            latest: *self.state.counters.latest(),
        }
    }

    pub fn state(&self) -> &IngestionState {
        &self.state
    }

    pub fn config(&self) -> &StrataConfig {
        &self.config
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
