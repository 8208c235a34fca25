use std::path::Path;
use walkdir::WalkDir;

use crate::state::data::MediaRef;

/// Image extensions the viewer can decode
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// List the images directly inside `dir`, ordered by file name
///
/// File name order is display order. A missing folder is an empty gallery.
pub fn scan_gallery_dir(dir: &Path) -> Vec<MediaRef> {
    if !dir.is_dir() {
        tracing::info!("📂 No media folder at {}", dir.display());
        return Vec::new();
    }

    let media: Vec<MediaRef> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_image_file(path))
        .map(MediaRef::Path)
        .collect();

    tracing::info!("🔍 Found {} images in {}", media.len(), dir.display());
    media
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["issue-03.jpg", "issue-01.PNG", "notes.txt", "issue-02.webp"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let media = scan_gallery_dir(dir.path());
        let names: Vec<String> = media
            .iter()
            .map(|m| match m {
                MediaRef::Path(p) => p.file_name().unwrap().to_string_lossy().to_string(),
                other => panic!("unexpected media {:?}", other),
            })
            .collect();

        assert_eq!(names, vec!["issue-01.PNG", "issue-02.webp", "issue-03.jpg"]);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_gallery_dir(&dir.path().join("covers")).is_empty());
    }
}
