//! Watch command implementation

use crate::render;
use crate::settings::Settings;
use anyhow::{Context, Result};
use strata_bus::{
    channel, IngestionService, ShutdownHandle, SourceStats, StateObserver, SyntheticSource,
    WebSocketSource,
};
use strata_core::{IngestionPipeline, StateView, StrataError};

/// Prints every tick and stops the service after `limit` ticks.
struct TerminalObserver {
    max_chars: usize,
    limit: Option<u64>,
    shutdown: ShutdownHandle,
}

impl StateObserver for TerminalObserver {
    fn on_tick(&mut self, view: &StateView) {
        println!("{}", render::render_view(view, self.max_chars));
        if self.limit.is_some_and(|limit| view.tick >= limit) {
            self.shutdown.shutdown();
        }
    }

    fn on_rejected(&mut self, error: &StrataError) {
        println!("rejected ({}): {}\n", error.kind(), error);
    }

    fn on_transport_error(&mut self, error: &StrataError) {
        println!("feed unavailable: {}\n", error);
    }
}

pub fn execute(
    settings: Settings,
    synthetic: bool,
    url: Option<String>,
    limit: Option<u64>,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(run(settings, synthetic, url, limit))
}

async fn run(
    settings: Settings,
    synthetic: bool,
    url: Option<String>,
    limit: Option<u64>,
) -> Result<()> {
    let (tx, rx) = channel(settings.feed.channel_capacity)?;

    let source = if synthetic {
        println!("Watching synthetic feed... (Press Ctrl+C to stop)\n");
        let mut source = SyntheticSource::new(&settings.feed)?;
        if let Some(limit) = limit {
            source = source.with_limit(limit);
        }
        source.spawn(tx)
    } else {
        let url = url.unwrap_or_else(|| settings.feed.url.clone());
        println!("Watching {}... (Press Ctrl+C to stop)\n", url);
        WebSocketSource::new(&url)?.spawn(tx)
    };

    let shutdown = ShutdownHandle::new();
    let observer = TerminalObserver {
        max_chars: settings.strata.display_truncation_length,
        limit,
        shutdown: shutdown.clone(),
    };
    let pipeline =
        IngestionPipeline::new(settings.strata.clone()).context("Failed to seed pipeline")?;
    let mut service =
        IngestionService::new(pipeline, rx, observer).with_shutdown_handle(shutdown.clone());

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.shutdown();
        }
    });

    let stats = service.run().await.context("Ingestion service failed")?;
    source.abort();
    let ended: Option<SourceStats> = source.await.ok();

    println!(
        "✓ Accepted {} events, rejected {}, transport errors {}",
        stats.accepted, stats.rejected, stats.transport_errors
    );
    if let Some(ended) = ended {
        tracing::debug!(forwarded = ended.forwarded, ended = ?ended.ended, "Source finished");
    }
    Ok(())
}
