//! SDXL and inpainting working modes.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;

/// Working modes that restrict which checkpoints are compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeFlags {
    #[serde(default)]
    pub sdxl: bool,
    #[serde(default)]
    pub inpainting: bool,
}

impl ModeFlags {
    /// Whether an entry can be used under the current modes.
    pub fn is_compatible(&self, entry: &CatalogEntry) -> bool {
        (!self.sdxl || entry.is_sdxl()) && (!self.inpainting || entry.is_inpainting())
    }

    /// Turn on the modes implied by a selected checkpoint.
    ///
    /// Modes are only ever switched on here; deselecting never turns them off.
    /// Returns true when a flag changed.
    pub fn detect_from(&mut self, entry: &CatalogEntry) -> bool {
        let before = *self;
        self.sdxl |= entry.is_sdxl();
        self.inpainting |= entry.is_inpainting();
        *self != before
    }
}

/// A partial mode change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdxl: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inpainting: Option<bool>,
}
