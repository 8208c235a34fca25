/// Error types for the storage, media and configuration layers
///
/// Navigation never fails: invalid lightbox or carousel requests are
/// silently ignored. Only infrastructure (database, filesystem, JSON, media)
/// produces errors, and those are propagated with `?` up to the app.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not determine the user data directory")]
    NoDataDir,

    #[error("invalid project: {0}")]
    InvalidProject(String),

    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
