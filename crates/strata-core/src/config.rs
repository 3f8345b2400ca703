use crate::error::{Result, StrataError};
use serde::{Deserialize, Serialize};

/// Configuration for the streaming state manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrataConfig {
    /// Number of ticks kept in the counter and timestamp windows
    /// Default: 15
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Number of recent events kept in the event log
    /// Default: 6
    #[serde(default = "default_log_size")]
    pub log_size: usize,

    /// Characters of event text a display shows before truncating.
    /// The core never truncates stored text.
    /// Default: 38
    #[serde(default = "default_display_truncation_length")]
    pub display_truncation_length: usize,
}

fn default_window_size() -> usize {
    15
}

fn default_log_size() -> usize {
    6
}

fn default_display_truncation_length() -> usize {
    38
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            log_size: default_log_size(),
            display_truncation_length: default_display_truncation_length(),
        }
    }
}

impl StrataConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    pub fn with_log_size(mut self, size: usize) -> Self {
        self.log_size = size;
        self
    }

    pub fn with_display_truncation_length(mut self, len: usize) -> Self {
        self.display_truncation_length = len;
        self
    }

    /// Both windows and the log need at least one slot.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(StrataError::Config("window_size must be at least 1".into()));
        }
        if self.log_size == 0 {
            return Err(StrataError::Config("log_size must be at least 1".into()));
        }
        Ok(())
    }
}
