/// Gallery registry
///
/// Maps each `GalleryId` to an immutable `Arc<Gallery>` snapshot. Replacing
/// a gallery swaps the whole `Arc`, so a reader (for example an open
/// lightbox) holds either the complete old list or the complete new one.
use std::collections::HashSet;
use std::sync::Arc;

use super::data::{Caption, Gallery, GalleryId, GalleryItem, MediaRef, ProjectRecord};

/// Caption for `index`, falling back to the placeholder when the table is short
pub fn resolve_caption(table: &[Caption], index: usize) -> Caption {
    table
        .get(index)
        .cloned()
        .unwrap_or_else(|| Caption::placeholder(index))
}

/// Pair each media handle with its caption by position
pub fn build_gallery(id: GalleryId, media: Vec<MediaRef>, captions: &[Caption]) -> Gallery {
    let items = media
        .into_iter()
        .enumerate()
        .map(|(position, media)| GalleryItem {
            media,
            caption: resolve_caption(captions, position),
        })
        .collect();

    Gallery { id, items }
}

#[derive(Debug, Clone)]
pub struct GalleryIndex {
    galleries: [Arc<Gallery>; 3],
}

impl Default for GalleryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryIndex {
    /// Registry with all known galleries present and empty
    pub fn new() -> Self {
        Self {
            galleries: GalleryId::ALL.map(|id| Arc::new(Gallery::empty(id))),
        }
    }

    /// Replace the gallery with the same id
    pub fn insert(&mut self, gallery: Gallery) -> Arc<Gallery> {
        tracing::info!("🖼️  Gallery '{}' holds {} items", gallery.id, gallery.len());
        let gallery = Arc::new(gallery);
        self.galleries[gallery.id.slot()] = Arc::clone(&gallery);
        gallery
    }

    /// Shared snapshot of a gallery
    pub fn get(&self, id: GalleryId) -> Arc<Gallery> {
        Arc::clone(&self.galleries[id.slot()])
    }

    /// Borrow a gallery for rendering
    pub fn gallery(&self, id: GalleryId) -> &Gallery {
        &self.galleries[id.slot()]
    }

    /// Every media handle across all galleries, without duplicates
    pub fn all_media(&self) -> Vec<MediaRef> {
        let mut seen = HashSet::new();
        self.galleries
            .iter()
            .flat_map(|gallery| gallery.items.iter())
            .filter(|item| seen.insert(item.media.clone()))
            .map(|item| item.media.clone())
            .collect()
    }

    /// Re-derive the projects gallery from the current record snapshot
    ///
    /// An empty snapshot yields an empty gallery; the grid renders its
    /// "no projects" state from that.
    pub fn rebuild_projects_gallery(&mut self, records: &[ProjectRecord]) -> Arc<Gallery> {
        let items = records
            .iter()
            .map(|record| GalleryItem {
                media: MediaRef::parse(&record.image),
                caption: Caption::new(record.title.clone(), record.description.clone()),
            })
            .collect();

        self.insert(Gallery {
            id: GalleryId::Projects,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn media(count: usize) -> Vec<MediaRef> {
        (0..count)
            .map(|i| MediaRef::Path(PathBuf::from(format!("{}.jpg", i))))
            .collect()
    }

    #[test]
    fn test_caption_fallback_for_short_table() {
        let captions = vec![
            Caption::new("Banner", "Banner"),
            Caption::new("Billboard", "Billboard"),
            Caption::new("Illustration", "Illustration"),
        ];

        let gallery = build_gallery(GalleryId::Projects, media(5), &captions);

        assert_eq!(gallery.len(), 5);
        assert_eq!(gallery.items[2].caption.title, "Illustration");
        assert_eq!(
            gallery.items[3].caption,
            Caption::new("Project 4", "Description coming soon")
        );
        assert_eq!(
            gallery.items[4].caption,
            Caption::new("Project 5", "Description coming soon")
        );
    }

    #[test]
    fn test_resolve_caption_out_of_range() {
        assert_eq!(resolve_caption(&[], 0).title, "Project 1");
    }

    #[test]
    fn test_rebuild_replaces_snapshot() {
        let mut index = GalleryIndex::new();
        let before = index.get(GalleryId::Projects);
        assert!(before.is_empty());

        let records = vec![ProjectRecord {
            title: "Web Design".to_string(),
            description: "UI design along with a website design.".to_string(),
            image: "/tmp/web.png".to_string(),
            tags: vec!["web".to_string()],
            id: 1,
        }];
        index.rebuild_projects_gallery(&records);

        let after = index.get(GalleryId::Projects);
        assert_eq!(after.len(), 1);
        assert_eq!(after.items[0].caption.title, "Web Design");
        assert_eq!(after.items[0].media, MediaRef::Path(PathBuf::from("/tmp/web.png")));
        // The earlier snapshot is untouched
        assert!(before.is_empty());
    }

    #[test]
    fn test_rebuild_with_no_records() {
        let mut index = GalleryIndex::new();
        let gallery = index.rebuild_projects_gallery(&[]);
        assert!(gallery.is_empty());
    }
}
