/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the key-value store, the gallery registry and the UI layer.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Handle to an image resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaRef {
    /// Local file on disk
    Path(PathBuf),
    /// Remote image; never fetched, rendered as a placeholder
    Url(String),
    /// Inline base64 `data:` URI, as older upload forms stored images
    Embedded(String),
}

impl MediaRef {
    /// Classify a stored image string by its prefix
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            MediaRef::Url(trimmed.to_string())
        } else if trimmed.starts_with("data:") {
            MediaRef::Embedded(trimmed.to_string())
        } else {
            MediaRef::Path(PathBuf::from(trimmed))
        }
    }

    /// Short label for logs (embedded payloads can be megabytes long)
    pub fn label(&self) -> String {
        match self {
            MediaRef::Path(path) => path.display().to_string(),
            MediaRef::Url(url) => url.clone(),
            MediaRef::Embedded(data) => {
                let head: String = data.chars().take(24).collect();
                format!("{}…", head)
            }
        }
    }
}

/// Title and description shown under a lightbox item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caption {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Caption {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Caption synthesized for a position the caption table doesn't cover
    pub fn placeholder(index: usize) -> Self {
        Self::new(format!("Project {}", index + 1), "Description coming soon")
    }
}

/// One displayable unit of a gallery
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub media: MediaRef,
    pub caption: Caption,
}

/// The closed set of galleries the viewer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryId {
    Projects,
    Covers,
    Pages,
}

impl GalleryId {
    pub const ALL: [GalleryId; 3] = [GalleryId::Projects, GalleryId::Covers, GalleryId::Pages];

    /// Position of this gallery in `ALL`
    pub fn slot(self) -> usize {
        match self {
            GalleryId::Projects => 0,
            GalleryId::Covers => 1,
            GalleryId::Pages => 2,
        }
    }
}

impl fmt::Display for GalleryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GalleryId::Projects => "projects",
            GalleryId::Covers => "covers",
            GalleryId::Pages => "pages",
        };
        f.write_str(name)
    }
}

/// Named, ordered sequence of items. Insertion order is display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Gallery {
    pub id: GalleryId,
    pub items: Vec<GalleryItem>,
}

impl Gallery {
    pub fn empty(id: GalleryId) -> Self {
        Self { id, items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }
}

/// A project entry as persisted in the key-value store
///
/// The field names match the stored JSON documents exactly, so records
/// written by earlier versions of the site load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// File path, URL or `data:` URI
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time in Unix milliseconds
    pub id: i64,
}

impl ProjectRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
