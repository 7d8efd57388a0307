//! Quick-select presets.
//!
//! A preset picks at most [`PRESET_LIMIT`] checkpoints, the first matches in
//! ingestion order, so the result is deterministic for a given catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, CatalogStore};
use crate::classifier::Category;

/// Maximum number of entries a preset selects.
pub const PRESET_LIMIT: usize = 3;

/// Name substrings that mark well-known checkpoints.
const POPULAR_MARKERS: &[&str] = &["counterfeit", "merged", "d5k"];

/// A named quick-select preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Popular,
    Anime,
    Realistic,
    Inpainting,
    Sdxl,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Popular,
        Preset::Anime,
        Preset::Realistic,
        Preset::Inpainting,
        Preset::Sdxl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Popular => "popular",
            Preset::Anime => "anime",
            Preset::Realistic => "realistic",
            Preset::Inpainting => "inpainting",
            Preset::Sdxl => "sdxl",
        }
    }

    /// Whether an entry qualifies for this preset.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            Preset::Popular => {
                let name = entry.display_name.to_lowercase();
                POPULAR_MARKERS.iter().any(|m| name.contains(m))
            }
            Preset::Anime => entry.category() == Category::Anime,
            Preset::Realistic => entry.category() == Category::Realistic,
            Preset::Inpainting => entry.is_inpainting(),
            Preset::Sdxl => entry.is_sdxl(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("unknown preset: {}", s))
    }
}

/// Resolve a preset name against a catalog.
///
/// Unknown names resolve to an empty list.
pub fn resolve<'a>(preset_name: &str, catalog: &'a CatalogStore) -> Vec<&'a CatalogEntry> {
    match preset_name.parse::<Preset>() {
        Ok(preset) => resolve_preset(preset, catalog),
        Err(_) => {
            tracing::debug!("Unknown quick-select preset {:?}", preset_name);
            Vec::new()
        }
    }
}

/// Resolve a known preset against the full catalog (the filter is ignored).
pub fn resolve_preset(preset: Preset, catalog: &CatalogStore) -> Vec<&CatalogEntry> {
    catalog
        .entries()
        .iter()
        .filter(|e| preset.matches(e))
        .take(PRESET_LIMIT)
        .collect()
}
