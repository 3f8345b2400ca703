//! Share projector: cumulative counts to stacked proportional bands
//!
//! For each tick, categories are stacked in fixed order and every band is the
//! category's slice of the tick total, normalized into `[0, 1]`. Pure: the
//! window is only read.

use crate::types::{Category, CountSnapshot, CATEGORY_COUNT};
use crate::window::CounterWindow;
use serde::{Deserialize, Serialize};

/// A category's normalized interval at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    /// Share of the total covered by this band.
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Bands of every category at one tick, in stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSet {
    bands: [Band; CATEGORY_COUNT],
}

impl BandSet {
    pub fn band(&self, category: Category) -> Band {
        self.bands[category.index()]
    }

    pub fn bands(&self) -> &[Band; CATEGORY_COUNT] {
        &self.bands
    }

    /// `(category, band)` pairs in stacking order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Band)> + '_ {
        Category::ALL.into_iter().zip(self.bands.iter().copied())
    }
}

/// Project one snapshot.
pub fn project_snapshot(snapshot: &CountSnapshot) -> BandSet {
    // Seeding keeps every count at >= 1, so total is never zero.
    let total = snapshot.total() as f64;
    let mut bands = [Band::default(); CATEGORY_COUNT];
    let mut cumulative = 0u64;
    for category in Category::ALL {
        let low = cumulative as f64 / total;
        cumulative = cumulative.saturating_add(snapshot.get(category));
        let high = cumulative as f64 / total;
        bands[category.index()] = Band { low, high };
    }
    BandSet { bands }
}

/// Project every tick of the window, oldest first.
pub fn project(window: &CounterWindow) -> Vec<BandSet> {
    window.snapshots().map(project_snapshot).collect()
}
