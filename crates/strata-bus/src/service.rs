//! Ingestion service
//!
//! Drains the feed channel into an [`IngestionPipeline`], one message at a
//! time. A message is fully processed, and observers notified, before the
//! next one is taken.

use crate::channel::{FeedReceiver, Inbound};
use crate::error::{BusError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use strata_core::{observe, IngestionPipeline, StateView, StrataError};
use tokio::sync::Notify;

/// How the service treats a rejected event
#[allow(clippy::type_complexity)]
#[derive(Default)]
pub enum ErrorStrategy {
    /// Log the rejection, notify observers and keep serving
    #[default]
    LogAndSkip,
    /// Stop the service on the first rejection
    FailFast,
    /// Call a custom function to decide what to do
    Custom(Arc<dyn Fn(&StrataError) -> ErrorAction + Send + Sync>),
}

/// Action to take after a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Stop processing
    Stop,
    /// Skip this event and continue
    Skip,
}

/// Consumer of the state exposed after each tick.
///
/// Called synchronously from the service loop. Anything long-running, such
/// as an animated transition, should work from the owned [`StateView`]
/// rather than block here.
pub trait StateObserver: Send {
    fn on_tick(&mut self, view: &StateView);

    fn on_rejected(&mut self, _error: &StrataError) {}

    /// Called with [`StrataError::Transport`] when a producer loses its feed.
    fn on_transport_error(&mut self, _error: &StrataError) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StateObserver for NoopObserver {
    fn on_tick(&mut self, _view: &StateView) {}
}

/// Counters for one service run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceStats {
    pub accepted: u64,
    pub rejected: u64,
    pub transport_errors: u64,
}

/// Handle for shutting down a running service
#[derive(Clone, Default)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Signal shutdown. Takes effect before the next message is processed.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Sole consumer of the feed channel
pub struct IngestionService<O: StateObserver> {
    pipeline: IngestionPipeline,
    receiver: FeedReceiver,
    observer: O,
    error_strategy: ErrorStrategy,
    shutdown: ShutdownHandle,
    stats: ServiceStats,
}

impl<O: StateObserver> IngestionService<O> {
    pub fn new(pipeline: IngestionPipeline, receiver: FeedReceiver, observer: O) -> Self {
        Self {
            pipeline,
            receiver,
            observer,
            error_strategy: ErrorStrategy::default(),
            shutdown: ShutdownHandle::new(),
            stats: ServiceStats::default(),
        }
    }

    /// Set the error handling strategy
    pub fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
        self.error_strategy = strategy;
        self
    }

    /// Share an existing shutdown handle, e.g. one held by an observer
    pub fn with_shutdown_handle(mut self, handle: ShutdownHandle) -> Self {
        self.shutdown = handle;
        self
    }

    /// Run until shutdown is signaled or every sender is dropped.
    pub async fn run(&mut self) -> Result<ServiceStats> {
        tracing::info!("Ingestion service started");

        while !self.shutdown.is_shutdown() {
            let message = tokio::select! {
                biased;
                _ = self.shutdown.notify.notified() => continue,
                message = self.receiver.recv() => message,
            };
            match message {
                Some(message) => self.process(message)?,
                None => {
                    tracing::info!("Feed closed by all producers");
                    break;
                }
            }
        }

        tracing::info!(
            accepted = self.stats.accepted,
            rejected = self.stats.rejected,
            transport_errors = self.stats.transport_errors,
            "Ingestion service stopped"
        );
        Ok(self.stats)
    }

    /// Process a single message.
    ///
    /// Returns an error only when the error strategy says to stop.
    pub fn process(&mut self, message: Inbound) -> Result<()> {
        let result = match message {
            Inbound::Frame(text) => self.pipeline.ingest_json(&text),
            Inbound::Bytes(bytes) => self.pipeline.ingest_slice(&bytes),
            Inbound::Event(raw) => self.pipeline.ingest(&raw),
            Inbound::TransportError(reason) => {
                let error = StrataError::Transport(reason);
                self.stats.transport_errors += 1;
                observe::record_transport_error();
                tracing::error!(kind = error.kind(), "Feed unavailable: {}", error);
                self.observer.on_transport_error(&error);
                return Ok(());
            }
        };

        match result {
            Ok(_) => {
                self.stats.accepted += 1;
                let view = self.pipeline.view();
                self.observer.on_tick(&view);
                Ok(())
            }
            Err(e) => {
                self.stats.rejected += 1;
                match self.decide(&e) {
                    ErrorAction::Stop => Err(BusError::Strata(e)),
                    ErrorAction::Skip => {
                        self.observer.on_rejected(&e);
                        Ok(())
                    }
                }
            }
        }
    }

    fn decide(&self, error: &StrataError) -> ErrorAction {
        match &self.error_strategy {
            ErrorStrategy::LogAndSkip => {
                tracing::debug!(kind = error.kind(), "Skipping rejected event");
                ErrorAction::Skip
            }
            ErrorStrategy::FailFast => ErrorAction::Stop,
            ErrorStrategy::Custom(handler) => handler(error),
        }
    }

    /// Get a handle for shutting down the service
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn pipeline(&self) -> &IngestionPipeline {
        &self.pipeline
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::channel;
    use strata_core::{RawEvent, RawRecord, StrataConfig};

    fn service() -> (IngestionService<NoopObserver>, crate::channel::FeedSender) {
        let (tx, rx) = channel(8).unwrap();
        let pipeline = IngestionPipeline::new(StrataConfig::default()).unwrap();
        (IngestionService::new(pipeline, rx, NoopObserver), tx)
    }

    #[test]
    fn test_process_frame_and_event() {
        let (mut service, _tx) = service();
        service
            .process(Inbound::Frame(r#"[{"browser":"Opera","terms":"a"}]"#.into()))
            .unwrap();
        service
            .process(Inbound::Event(RawEvent::single(RawRecord::new("Edge", "b"))))
            .unwrap();
        assert_eq!(service.stats().accepted, 2);
        assert_eq!(service.pipeline().accepted(), 2);
    }

    #[test]
    fn test_process_binary_frames() {
        let (mut service, _tx) = service();
        service
            .process(Inbound::Bytes(br#"[{"browser":"Safari","terms":"ok"}]"#.to_vec()))
            .unwrap();
        service
            .process(Inbound::Bytes(
                b"[{\"browser\":\"Safari\",\"terms\":\"\xff\xfe\"}]".to_vec(),
            ))
            .unwrap();
        assert_eq!(service.stats().accepted, 1);
        assert_eq!(service.stats().rejected, 1);
        assert_eq!(service.pipeline().current_log().last().unwrap().text, "ok");
    }

    #[test]
    fn test_transport_error_changes_nothing() {
        let (mut service, _tx) = service();
        let before = service.pipeline().state().clone();
        service
            .process(Inbound::TransportError("connection reset".into()))
            .unwrap();
        assert_eq!(service.pipeline().state(), &before);
        assert_eq!(service.stats().transport_errors, 1);
    }

    #[test]
    fn test_custom_strategy() {
        let (service, _tx) = service();
        let mut service = service.with_error_strategy(ErrorStrategy::Custom(Arc::new(|e| {
            if matches!(e, StrataError::MalformedEventPayload(_)) {
                ErrorAction::Stop
            } else {
                ErrorAction::Skip
            }
        })));

        let unknown = Inbound::Event(RawEvent::single(RawRecord::new("Mosaic", "x")));
        assert!(service.process(unknown).is_ok());
        assert!(service.process(Inbound::Frame("[]".into())).is_err());
        assert_eq!(service.stats().rejected, 2);
    }

    #[tokio::test]
    async fn test_shutdown_before_run() {
        let (mut service, tx) = service();
        tx.send(Inbound::Frame(r#"[{"browser":"Chrome","terms":"x"}]"#.into()))
            .await
            .unwrap();
        service.shutdown_handle().shutdown();

        let stats = service.run().await.unwrap();
        assert_eq!(stats.accepted, 0);
    }
}
