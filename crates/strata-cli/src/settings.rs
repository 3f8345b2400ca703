//! Settings file: core and feed configuration in one JSON document.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strata_bus::FeedConfig;
use strata_core::StrataConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub strata: StrataConfig,

    #[serde(default)]
    pub feed: FeedConfig,
}

impl Settings {
    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse settings {}", path.display()))?
            }
            None => Settings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.strata.validate().context("Invalid strata settings")?;
        self.feed.validate().context("Invalid feed settings")?;
        Ok(())
    }
}
