//! Text presentation of the exposed state.
//!
//! Works on an owned [`StateView`]; nothing here touches the pipeline.

use chrono::{DateTime, Utc};
use std::fmt::Write;
use strata_core::{taxonomy, SearchEvent, StateView};

const BAR_WIDTH: usize = 40;

/// Display copy of `text`, cut to `max_chars` characters plus an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format("%H:%M:%S%.3f").to_string()
}

fn render_event(out: &mut String, event: &SearchEvent, max_chars: usize) {
    let category = event.category.map(|c| c.id()).unwrap_or("none");
    let _ = writeln!(
        out,
        "  #{:<6} {:<10} {}",
        event.id,
        category,
        truncate(&event.text, max_chars)
    );
}

/// Newest band set followed by the event log, oldest event first.
pub fn render_view(view: &StateView, max_chars: usize) -> String {
    let mut out = String::new();

    let oldest = view.timestamps.first().map(format_timestamp);
    let newest = view.timestamps.last().map(format_timestamp);
    let _ = writeln!(
        out,
        "tick {} [{} .. {}] total {}",
        view.tick,
        oldest.as_deref().unwrap_or("-"),
        newest.as_deref().unwrap_or("-"),
        view.latest.total()
    );

    if let Some(bands) = view.latest_bands() {
        for (category, band) in bands.iter() {
            let filled = (band.width() * BAR_WIDTH as f64).round() as usize;
            let _ = writeln!(
                out,
                "  {:<18} {:>5.3} - {:>5.3} {:>6} {}",
                taxonomy::label(category),
                band.low,
                band.high,
                view.latest.get(category),
                "#".repeat(filled.min(BAR_WIDTH))
            );
        }
    }

    let _ = writeln!(out, "recent searches:");
    for event in &view.log {
        render_event(&mut out, event, max_chars);
    }
    out
}
