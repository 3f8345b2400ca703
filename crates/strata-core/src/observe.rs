//! Optional metrics instrumentation for Strata.
//!
//! When the `observe` feature is enabled, ingestion emits counters and a
//! latency histogram via the [`metrics`] crate. A downstream application must
//! install a metrics recorder to collect the data.
//!
//! When the feature is **not** enabled every function in this module is a
//! zero-cost no-op.

/// Record an accepted tick.
///
/// - `strata.ingest.accepted_total` – counter
/// - `strata.ingest.duration_seconds` – histogram of ingest latency
#[inline]
pub fn record_accepted(duration: std::time::Duration) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("strata.ingest.accepted_total").increment(1);
        metrics::histogram!("strata.ingest.duration_seconds").record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = duration;
    }
}

/// Record a rejected event.
///
/// - `strata.ingest.rejected_total` – counter with `kind` label
#[inline]
pub fn record_rejected(kind: &'static str) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("strata.ingest.rejected_total", "kind" => kind).increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = kind;
    }
}

/// Set the cumulative total of the newest snapshot.
///
/// - `strata.window.latest_total` – gauge
#[inline]
pub fn set_latest_total(total: u64) {
    #[cfg(feature = "observe")]
    {
        metrics::gauge!("strata.window.latest_total").set(total as f64);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = total;
    }
}

/// Record a feed transport failure.
///
/// - `strata.feed.transport_errors_total` – counter
#[inline]
pub fn record_transport_error() {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("strata.feed.transport_errors_total").increment(1);
    }
}
