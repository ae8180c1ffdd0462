use thiserror::Error;

/// Errors raised while turning a submission into a media asset.
///
/// A missing resolution or quality is not an error: lookups return `None`.
#[derive(Error, Debug)]
pub enum MediaError {
    /// The submission record lacks a field the extractor needs.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A variant name other than gif or mp4 was requested.
    #[error("Unknown variant {0}: expected gif or mp4")]
    UnknownVariant(String),

    /// The fetched manifest is not usable XML or has an unexpected shape.
    #[error("Manifest format error: {0}")]
    ManifestFormat(String),

    /// Fetching the manifest failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The submission JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MediaError>;
