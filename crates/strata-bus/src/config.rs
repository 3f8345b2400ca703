use crate::error::{BusError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the feed channel and its sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// WebSocket endpoint of the live feed
    #[serde(default = "default_url")]
    pub url: String,

    /// Messages buffered between producers and the ingestion service
    /// Default: 64
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Delay between synthetic events (milliseconds)
    /// Default: 1000ms
    #[serde(default = "default_synthetic_interval_ms")]
    pub synthetic_interval_ms: u64,

    /// Text carried by synthetic events
    #[serde(default = "default_synthetic_text")]
    pub synthetic_text: String,
}

fn default_url() -> String {
    "ws://45.55.209.67:4571/rtsearches".to_string()
}

fn default_channel_capacity() -> usize {
    64
}

fn default_synthetic_interval_ms() -> u64 {
    1000
}

fn default_synthetic_text() -> String {
    "[Mock search term]".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            channel_capacity: default_channel_capacity(),
            synthetic_interval_ms: default_synthetic_interval_ms(),
            synthetic_text: default_synthetic_text(),
        }
    }
}

impl FeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_synthetic_interval_ms(mut self, ms: u64) -> Self {
        self.synthetic_interval_ms = ms;
        self
    }

    pub fn with_synthetic_text(mut self, text: impl Into<String>) -> Self {
        self.synthetic_text = text.into();
        self
    }

    pub fn synthetic_interval(&self) -> Duration {
        Duration::from_millis(self.synthetic_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(BusError::InvalidConfig(
                "channel_capacity must be at least 1".into(),
            ));
        }
        if self.synthetic_interval_ms == 0 {
            return Err(BusError::InvalidConfig(
                "synthetic_interval_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
