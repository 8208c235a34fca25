/// Background image decoding
///
/// Decoding is CPU-bound, so it runs on tokio's blocking pool. Loading never
/// fails from the caller's point of view: anything that cannot be shown
/// (a broken file, a bad `data:` URI, a remote URL) becomes a placeholder.
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use std::path::PathBuf;
use tokio::task;

use crate::error::{FolioError, Result};
use crate::state::data::MediaRef;

/// Longest edge of images handed to the UI
pub const MAX_EDGE: u32 = 1600;

/// Longest edge of grid and carousel thumbnails
pub const THUMBNAIL_EDGE: u32 = 480;

const PLACEHOLDER_WIDTH: u32 = 600;
const PLACEHOLDER_HEIGHT: u32 = 400;

/// RGBA pixels ready to become an image handle
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub is_placeholder: bool,
}

impl DecodedImage {
    /// Flat grey stand-in for media that could not be loaded
    pub fn placeholder() -> Self {
        let img = RgbaImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, Rgba([58, 58, 64, 255]));
        Self {
            width: PLACEHOLDER_WIDTH,
            height: PLACEHOLDER_HEIGHT,
            pixels: img.into_raw(),
            is_placeholder: true,
        }
    }
}

/// Where the encoded bytes come from
enum Source {
    File(PathBuf),
    DataUri(String),
}

/// Load `media` for display, downscaled so its long edge is at most `max_edge`
pub async fn load_media(media: MediaRef, max_edge: u32) -> (MediaRef, DecodedImage) {
    let source = match &media {
        MediaRef::Path(path) => Source::File(path.clone()),
        MediaRef::Embedded(uri) => Source::DataUri(uri.clone()),
        MediaRef::Url(_) => {
            tracing::debug!("Using placeholder for remote media {}", media.label());
            return (media, DecodedImage::placeholder());
        }
    };

    let decoded = task::spawn_blocking(move || decode_blocking(source, max_edge))
        .await
        .map_err(|e| format!("Task join error: {}", e))
        .and_then(|result| result.map_err(|e| e.to_string()));

    match decoded {
        Ok(image) => (media, image),
        Err(e) => {
            tracing::warn!("⚠️  Could not load {}: {}", media.label(), e);
            (media, DecodedImage::placeholder())
        }
    }
}

/// Payload bytes of a `data:<mime>;base64,<payload>` URI
fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let (_, payload) = uri
        .split_once(";base64,")
        .ok_or_else(|| FolioError::UnsupportedMedia("data URI is not base64-encoded".to_string()))?;
    Ok(STANDARD.decode(payload.trim())?)
}

/// Blocking implementation of image decoding
fn decode_blocking(source: Source, max_edge: u32) -> Result<DecodedImage> {
    let img: DynamicImage = match source {
        Source::File(path) => image::open(path)?,
        Source::DataUri(uri) => image::load_from_memory(&decode_data_uri(&uri)?)?,
    };

    let img = if img.width() > max_edge || img.height() > max_edge {
        img.resize(max_edge, max_edge, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
        is_placeholder: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_yields_placeholder() {
        let media = MediaRef::Path("/nonexistent/cover.jpg".into());
        let (returned, image) = load_media(media.clone(), MAX_EDGE).await;

        assert_eq!(returned, media);
        assert!(image.is_placeholder);
        assert_eq!(image.pixels.len(), (image.width * image.height * 4) as usize);
    }

    #[tokio::test]
    async fn test_remote_url_is_never_fetched() {
        let (_, image) = load_media(MediaRef::Url("https://placehold.co/600x400".into()), MAX_EDGE).await;
        assert!(image.is_placeholder);
    }

    fn png_data_uri(width: u32, height: u32) -> String {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255])))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", STANDARD.encode(&bytes))
    }

    #[tokio::test]
    async fn test_embedded_png_is_decoded() {
        let media = MediaRef::parse(&png_data_uri(4, 2));
        assert!(matches!(media, MediaRef::Embedded(_)));

        let (_, image) = load_media(media, MAX_EDGE).await;

        assert!(!image.is_placeholder);
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(&image.pixels[..4], &[0, 128, 255, 255]);
    }

    #[tokio::test]
    async fn test_bad_data_uri_yields_placeholder() {
        for uri in ["data:image/png;base64,!!!not-base64", "data:text/plain,hello"] {
            let (_, image) = load_media(MediaRef::parse(uri), MAX_EDGE).await;
            assert!(image.is_placeholder, "{} should not decode", uri);
        }
    }

    #[test]
    fn test_data_uri_payload() {
        assert_eq!(decode_data_uri("data:image/gif;base64,R0lG").unwrap(), b"GIF");
        assert!(matches!(
            decode_data_uri("data:image/png,raw"),
            Err(FolioError::UnsupportedMedia(_))
        ));
    }

    #[tokio::test]
    async fn test_large_image_is_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(1000, 500, Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let (_, image) = load_media(MediaRef::Path(path), 200).await;

        assert!(!image.is_placeholder);
        assert_eq!((image.width, image.height), (200, 100));
    }
}
