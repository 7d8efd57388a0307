//! Name-based heuristic classification of model entries.
//!
//! Rules are plain case-insensitive substring checks and are evaluated in a
//! fixed order; when several substrings match, the earlier rule wins.

mod types;

pub use types::*;

use serde::Serialize;

const INPAINTING_MARKERS: &[&str] = &["inpainting"];
const SDXL_MARKERS: &[&str] = &["xl", "sdxl"];
const NSFW_MARKERS: &[&str] = &["nsfw", "porn"];
const ANIME_MARKERS: &[&str] = &["anime", "counterfeit"];
const ARTISTIC_MARKERS: &[&str] = &["artistic", "art"];

/// Everything derived from a raw entry's name and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: Category,
    /// Canonical order: inpainting, sdxl|sd1.5, nsfw, category.
    pub tags: Vec<Tag>,
    pub is_inpainting: bool,
    pub is_sdxl: bool,
    pub is_nsfw: bool,
    pub estimated_size: SizeClass,
    /// Key used to look up a placeholder preview image.
    pub preview_key: Category,
}

impl Classification {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Classify a raw entry. Total: unknown shapes fall back to
/// realistic / sd1.5 with no flags.
pub fn classify(raw: &RawEntry) -> Classification {
    let name = raw.name.to_lowercase();
    if name.trim().is_empty() {
        tracing::debug!("Classifying entry with empty name as realistic/sd1.5");
    }

    let is_inpainting = contains_any(&name, INPAINTING_MARKERS) || raw.inpainting;
    let is_sdxl = contains_any(&name, SDXL_MARKERS);
    let is_nsfw = contains_any(&name, NSFW_MARKERS);

    let category = if contains_any(&name, ANIME_MARKERS) {
        Category::Anime
    } else if contains_any(&name, ARTISTIC_MARKERS) {
        Category::Artistic
    } else {
        Category::Realistic
    };

    // Size follows the name only, so an explicit metadata flag does not bump it.
    let estimated_size = if contains_any(&name, SDXL_MARKERS) {
        SizeClass::Large
    } else if contains_any(&name, INPAINTING_MARKERS) {
        SizeClass::Medium
    } else {
        SizeClass::Small
    };

    let mut tags = Vec::with_capacity(4);
    if is_inpainting {
        tags.push(Tag::Inpainting);
    }
    tags.push(if is_sdxl { Tag::Sdxl } else { Tag::Sd15 });
    if is_nsfw {
        tags.push(Tag::Nsfw);
    }
    tags.push(Tag::Category(category));

    Classification {
        category,
        tags,
        is_inpainting,
        is_sdxl,
        is_nsfw,
        estimated_size,
        preview_key: category,
    }
}
