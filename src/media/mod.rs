/// Media handling module
///
/// This module handles:
/// - Scanning the media folders that feed the covers and pages galleries
/// - Decoding images in the background, with a placeholder on failure

pub mod loader;
pub mod scan;

pub use loader::{load_media, DecodedImage};
pub use scan::scan_gallery_dir;
