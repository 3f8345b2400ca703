//! Behavioural tests for the ingestion pipeline and its read surface

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use strata_core::*;

const EPSILON: f64 = 1e-9;

fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 15, 0).unwrap()
}

fn create_pipeline() -> (IngestionPipeline, ManualClock) {
    let clock = ManualClock::new(start_instant());
    let pipeline =
        IngestionPipeline::with_clock(StrataConfig::default(), Arc::new(clock.clone())).unwrap();
    (pipeline, clock)
}

fn event(label: &str, text: &str) -> RawEvent {
    RawEvent::single(RawRecord::new(label, text))
}

fn assert_invariants(pipeline: &IngestionPipeline) {
    let config = pipeline.config();
    let state = pipeline.state();
    assert_eq!(state.counters().len(), config.window_size);
    assert_eq!(state.timestamps().len(), config.window_size);
    assert_eq!(state.log().len(), config.log_size);

    let snapshots: Vec<_> = state.counters().snapshots().collect();
    for pair in snapshots.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        let seed_pair = *before == CountSnapshot::seed() && before == after;
        assert!(
            seed_pair || before.single_increment_to(after).is_some(),
            "consecutive snapshots must differ by one increment: {:?} -> {:?}",
            before,
            after
        );
    }

    for set in pipeline.current_projection() {
        let mut previous_high = 0.0;
        for (_, band) in set.iter() {
            assert!(band.low >= 0.0);
            assert!(band.high <= 1.0 + EPSILON);
            assert!(band.low <= band.high);
            assert!(band.low + EPSILON >= previous_high);
            previous_high = band.high;
        }
        assert!((set.band(Category::Safari).high - 1.0).abs() < EPSILON);
    }
}

#[test]
fn test_seed_state() {
    let (pipeline, _) = create_pipeline();
    let state = pipeline.state();

    assert!(state
        .counters()
        .snapshots()
        .all(|s| *s == CountSnapshot::seed() && s.total() == 8));
    assert!(state.timestamps().iter().all(|t| *t == start_instant()));

    let log = pipeline.current_log();
    assert_eq!(log.len(), 6);
    for (i, entry) in log.iter().enumerate() {
        assert_eq!(entry.id, i as u64);
        assert_eq!(entry.category, None);
        assert_eq!(entry.text, "");
    }
    assert_invariants(&pipeline);
}

#[test]
fn test_reinitialization_matches_seed() {
    let (mut first, _) = create_pipeline();
    for label in ["Chrome", "Safari", "Opera"] {
        first.ingest(&event(label, "before restart")).unwrap();
    }

    let (restarted, _) = create_pipeline();
    let (fresh, _) = create_pipeline();
    assert_eq!(restarted.state(), fresh.state());
    assert_ne!(first.state(), restarted.state());
    assert_eq!(restarted.current_log()[0].id, 0);
}

#[test]
fn test_chrome_band_after_one_event() {
    let (mut pipeline, _) = create_pipeline();
    pipeline
        .ingest(&event("Chrome", "how to write a tokenizer"))
        .unwrap();

    let latest = pipeline.state().counters().latest();
    assert_eq!(latest.get(Category::Chrome), 2);
    assert_eq!(latest.total(), 9);
    for category in Category::ALL {
        if category != Category::Chrome {
            assert_eq!(latest.get(category), 1);
        }
    }

    let projection = pipeline.current_projection();
    let chrome = projection[projection.len() - 1].band(Category::Chrome);
    assert!((chrome.low - 2.0 / 9.0).abs() < EPSILON);
    assert!((chrome.high - 4.0 / 9.0).abs() < EPSILON);

    // Earlier ticks still show the seed split.
    let oldest = projection[0].band(Category::Chrome);
    assert!((oldest.low - 0.25).abs() < EPSILON);
    assert!((oldest.high - 0.375).abs() < EPSILON);
    assert_invariants(&pipeline);
}

#[test]
fn test_unknown_label_leaves_state_untouched() {
    let (mut pipeline, clock) = create_pipeline();
    pipeline.ingest(&event("Edge", "warm up")).unwrap();
    let before = pipeline.state().clone();
    let view_before = pipeline.view();

    clock.advance(chrono::Duration::seconds(5));
    let err = pipeline.ingest(&event("Netscape Navigator", "q")).unwrap_err();
    assert!(matches!(err, StrataError::UnknownCategoryLabel(ref l) if l == "Netscape Navigator"));

    assert_eq!(pipeline.state(), &before);
    assert_eq!(pipeline.view().log, view_before.log);
    assert_eq!(pipeline.view().timestamps, view_before.timestamps);
    assert_eq!(pipeline.state().next_id(), before.next_id());
}

#[test]
fn test_malformed_payload_leaves_state_untouched() {
    let (mut pipeline, _) = create_pipeline();
    let before = pipeline.state().clone();

    for payload in ["[]", "{}", r#"[{"browser":"Chrome"}]"#, r#"[{"terms":"x"}]"#, "nope"] {
        let err = pipeline.ingest_json(payload).unwrap_err();
        assert!(
            matches!(err, StrataError::MalformedEventPayload(_)),
            "{} should be malformed, got {:?}",
            payload,
            err
        );
    }
    assert_eq!(pipeline.state(), &before);
    assert_eq!(pipeline.rejected(), 5);
}

#[test]
fn test_only_first_record_is_consumed() {
    let (mut pipeline, _) = create_pipeline();
    let outcome = pipeline
        .ingest_json(
            r#"[{"browser":"Firefox","terms":"first"},{"browser":"Chrome","terms":"second"}]"#,
        )
        .unwrap();

    assert_eq!(outcome.category, Category::Firefox);
    let latest = pipeline.state().counters().latest();
    assert_eq!(latest.get(Category::Firefox), 2);
    assert_eq!(latest.get(Category::Chrome), 1);
    assert_eq!(pipeline.current_log().last().unwrap().text, "first");
}

#[test]
fn test_log_keeps_most_recent_events_in_order() {
    let (mut pipeline, _) = create_pipeline();
    let labels = [
        "Android Webview",
        "BlackBerry",
        "Chrome",
        "Edge",
        "Firefox",
        "Internet Explorer",
        "Opera",
    ];

    for (n, label) in labels.iter().enumerate() {
        pipeline.ingest(&event(label, &format!("search {}", n))).unwrap();
        let log = pipeline.current_log();
        assert_eq!(log.len(), 6);

        let newest = &log[5];
        assert_eq!(newest.text, format!("search {}", n));
        assert_eq!(newest.category, Some(resolve(label).unwrap()));
    }

    let log = pipeline.current_log();
    let texts: Vec<_> = log.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["search 1", "search 2", "search 3", "search 4", "search 5", "search 6"]
    );
    assert!(log.iter().all(|e| !e.is_placeholder()));
    assert_invariants(&pipeline);
}

#[test]
fn test_ids_strictly_increase_without_gaps() {
    let (mut pipeline, _) = create_pipeline();
    let mut last_id = pipeline.current_log().last().unwrap().id;

    for n in 0..40 {
        let label = if n % 3 == 0 { "Unknown" } else { "Safari" };
        match pipeline.ingest(&event(label, "q")) {
            Ok(outcome) => {
                assert_eq!(outcome.event_id, last_id + 1);
                last_id = outcome.event_id;
            }
            Err(e) => assert!(e.is_rejection()),
        }
        let ids: Vec<_> = pipeline.current_log().iter().map(|e| e.id).collect();
        assert!(ids.windows(2).all(|w| w[1] == w[0] + 1));
    }
    assert_eq!(pipeline.accepted(), 26);
}

#[test]
fn test_timestamps_track_counters() {
    let (mut pipeline, clock) = create_pipeline();
    let mut expected = Vec::new();

    for n in 0..20 {
        clock.advance(chrono::Duration::milliseconds(150));
        let label = CATEGORY_TABLE[n % CATEGORY_TABLE.len()].0;
        let outcome = pipeline.ingest(&event(label, "tick")).unwrap();
        assert_eq!(outcome.tick_at, clock.now());
        expected.push(clock.now());
        assert_invariants(&pipeline);
    }

    let window = pipeline.config().window_size;
    assert_eq!(
        pipeline.current_timestamps(),
        expected[expected.len() - window..].to_vec()
    );
    assert_eq!(pipeline.state().counters().latest().total(), 8 + 20);
}

#[test]
fn test_projection_is_idempotent() {
    let (mut pipeline, _) = create_pipeline();
    for label in ["Chrome", "Chrome", "Opera", "Safari"] {
        pipeline.ingest(&event(label, "")).unwrap();
    }
    let before = pipeline.state().clone();

    let first = project(pipeline.state().counters());
    let second = project(pipeline.state().counters());
    assert_eq!(first, second);
    assert_eq!(first, pipeline.current_projection());
    assert_eq!(pipeline.state(), &before);
}

#[test]
fn test_custom_window_sizes() {
    let config = StrataConfig::new().with_window_size(3).with_log_size(2);
    let mut pipeline = IngestionPipeline::new(config).unwrap();
    for _ in 0..5 {
        pipeline.ingest(&event("Edge", "sized")).unwrap();
    }

    assert_eq!(pipeline.current_projection().len(), 3);
    assert_eq!(pipeline.current_timestamps().len(), 3);
    assert_eq!(pipeline.current_log().len(), 2);
    assert_eq!(pipeline.current_log()[1].id, 2 + 4);
    assert_invariants(&pipeline);
}
