//! Types produced by name-based classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Style category of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Anime,
    #[default]
    Realistic,
    Artistic,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Anime => "anime",
            Category::Realistic => "realistic",
            Category::Artistic => "artistic",
        }
    }

    /// Placeholder label shown by renderers when no preview image exists.
    pub fn preview_placeholder(&self) -> &'static str {
        match self {
            Category::Anime => "🎌",
            Category::Realistic => "📷",
            Category::Artistic => "🎨",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anime" => Ok(Category::Anime),
            "realistic" => Ok(Category::Realistic),
            "artistic" => Ok(Category::Artistic),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// A derived tag attached to a classified entry.
///
/// Serialized as its display string (`"sd1.5"`, `"anime"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Inpainting,
    Sdxl,
    Sd15,
    Nsfw,
    Category(Category),
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Inpainting => "inpainting",
            Tag::Sdxl => "sdxl",
            Tag::Sd15 => "sd1.5",
            Tag::Nsfw => "nsfw",
            Tag::Category(c) => c.as_str(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Coarse download size class guessed from the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// SDXL checkpoints.
    Large,
    /// SD1.5 inpainting checkpoints.
    Medium,
    /// Everything else.
    Small,
}

impl SizeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Large => "6.5GB",
            SizeClass::Medium => "4.2GB",
            SizeClass::Small => "2.1GB",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SizeClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A catalog entry as it arrives from the catalog document, before
/// classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    /// Display name (the key in the catalog mapping).
    pub name: String,
    /// Download URL, if the metadata carried one.
    pub url: Option<String>,
    /// Target file name, if the metadata carried one.
    pub file_name: Option<String>,
    /// Explicit inpainting flag from the metadata.
    pub inpainting: bool,
}

impl RawEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_inpainting(mut self, inpainting: bool) -> Self {
        self.inpainting = inpainting;
        self
    }

    /// Build a raw entry from a name and an arbitrary JSON metadata value.
    ///
    /// Never fails. Fields with unexpected shapes are ignored.
    pub fn from_json(name: impl Into<String>, metadata: &Value) -> Self {
        let name = name.into();
        let Value::Object(map) = metadata else {
            if !metadata.is_null() {
                tracing::debug!("Metadata for {:?} is not an object, ignoring it", name);
            }
            return Self::new(name);
        };

        let string_field = |key: &str| match map.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };

        Self {
            url: string_field("url"),
            file_name: string_field("name").or_else(|| string_field("filename")),
            inpainting: map.get("inpainting").map(is_truthy).unwrap_or(false),
            name,
        }
    }
}

/// JSON truthiness: false, null, 0, "" are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_serializes_as_label() {
        let tags = vec![Tag::Inpainting, Tag::Sd15, Tag::Category(Category::Anime)];
        assert_eq!(
            serde_json::to_string(&tags).unwrap(),
            r#"["inpainting","sd1.5","anime"]"#
        );
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Anime".parse::<Category>().unwrap(), Category::Anime);
        assert!("cartoon".parse::<Category>().is_err());
    }

    #[test]
    fn test_raw_entry_from_metadata() {
        let raw = RawEntry::from_json(
            "epiCRealism InPainting",
            &json!({"url": "https://example.com/m", "name": "epic.safetensors", "inpainting": true}),
        );
        assert_eq!(raw.url.as_deref(), Some("https://example.com/m"));
        assert_eq!(raw.file_name.as_deref(), Some("epic.safetensors"));
        assert!(raw.inpainting);
    }

    #[test]
    fn test_raw_entry_truthy_flag_variants() {
        assert!(RawEntry::from_json("a", &json!({"inpainting": 1})).inpainting);
        assert!(RawEntry::from_json("a", &json!({"inpainting": "yes"})).inpainting);
        assert!(!RawEntry::from_json("a", &json!({"inpainting": 0})).inpainting);
        assert!(!RawEntry::from_json("a", &json!({"inpainting": ""})).inpainting);
        assert!(!RawEntry::from_json("a", &json!({"inpainting": null})).inpainting);
    }

    #[test]
    fn test_raw_entry_odd_metadata_degrades() {
        let raw = RawEntry::from_json("Model", &json!([1, 2, 3]));
        assert_eq!(raw, RawEntry::new("Model"));

        let raw = RawEntry::from_json("Model", &json!({"url": 42}));
        assert!(raw.url.is_none());
    }
}
