//! Types for the model catalog and its filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{classify, Category, Classification, RawEntry};

/// The kind of asset an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Checkpoints.
    #[default]
    Model,
    Vae,
    Lora,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Model, AssetKind::Vae, AssetKind::Lora];

    /// Prefix of entry ids of this kind.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            AssetKind::Model => "model",
            AssetKind::Vae => "vae",
            AssetKind::Lora => "lora",
        }
    }

    /// Human label used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Model => "Model",
            AssetKind::Vae => "VAE",
            AssetKind::Lora => "LoRA",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id_prefix())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "model" | "models" | "checkpoint" => Ok(AssetKind::Model),
            "vae" | "vaes" => Ok(AssetKind::Vae),
            "lora" | "loras" => Ok(AssetKind::Lora),
            other => Err(format!("unknown asset kind: {}", other)),
        }
    }
}

/// A classified catalog entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Stable id within one catalog load (`model_0`, `vae_3`, ...).
    pub id: String,
    pub kind: AssetKind,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(flatten)]
    pub classification: Classification,
}

impl CatalogEntry {
    /// Classify a raw entry ingested at `index`.
    pub fn from_raw(kind: AssetKind, index: usize, raw: RawEntry) -> Self {
        let classification = classify(&raw);
        Self {
            id: format!("{}_{}", kind.id_prefix(), index),
            kind,
            display_name: raw.name,
            source_url: raw.url,
            file_name: raw.file_name,
            classification,
        }
    }

    pub fn category(&self) -> Category {
        self.classification.category
    }

    pub fn is_inpainting(&self) -> bool {
        self.classification.is_inpainting
    }

    pub fn is_sdxl(&self) -> bool {
        self.classification.is_sdxl
    }

    pub fn is_nsfw(&self) -> bool {
        self.classification.is_nsfw
    }
}

/// Category filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Anime,
    Realistic,
    Artistic,
}

impl CategoryFilter {
    fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Anime => category == Category::Anime,
            CategoryFilter::Realistic => category == Category::Realistic,
            CategoryFilter::Artistic => category == Category::Artistic,
        }
    }
}

/// Model type filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    #[default]
    All,
    Inpainting,
}

/// Base model version filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VersionFilter {
    #[default]
    All,
    Sdxl,
}

/// The active filter. The default admits everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterState {
    /// Lowercased substring; empty means no text filter.
    pub search_text: String,
    pub category: CategoryFilter,
    #[serde(rename = "type")]
    pub model_type: TypeFilter,
    pub version: VersionFilter,
}

impl FilterState {
    /// Whether an entry passes every predicate.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        (self.search_text.is_empty()
            || entry.display_name.to_lowercase().contains(&self.search_text))
            && self.category.admits(entry.category())
            && (self.model_type != TypeFilter::Inpainting || entry.is_inpainting())
            && (self.version != VersionFilter::Sdxl || entry.is_sdxl())
    }

    /// Merge a partial update into this filter.
    pub fn apply(&mut self, update: &FilterUpdate) {
        if let Some(search) = &update.search {
            self.search_text = search.to_lowercase();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(model_type) = update.model_type {
            self.model_type = model_type;
        }
        if let Some(version) = update.version {
            self.version = version;
        }
    }
}

/// A partial filter change. Absent fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterUpdate {
    #[serde(default, alias = "search_text", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryFilter>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub model_type: Option<TypeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionFilter>,
}

impl FilterUpdate {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_type(mut self, model_type: TypeFilter) -> Self {
        self.model_type = Some(model_type);
        self
    }

    pub fn with_version(mut self, version: VersionFilter) -> Self {
        self.version = Some(version);
        self
    }
}

/// Errors for catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}
