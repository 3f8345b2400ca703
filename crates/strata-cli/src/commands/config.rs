//! Config command implementation

use crate::settings::Settings;
use anyhow::{Context, Result};
use strata_core::taxonomy;

pub fn execute(settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("Failed to encode settings")?;
    println!("{}", json);

    println!("\nCategories (stacking order):");
    for label in taxonomy::labels() {
        println!("  {}", label);
    }
    Ok(())
}
