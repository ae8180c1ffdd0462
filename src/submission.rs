//! Read-only view of a Reddit submission.
//!
//! Only the fields the extractors consume are deserialized. Each media kind
//! reads the record through its own narrow trait so a missing field surfaces
//! as a [`MediaError::Schema`] at construction instead of deep inside the
//! extraction.

use crate::error::{MediaError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    pub url: String,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub is_gallery: bool,
    #[serde(default)]
    pub preview: Option<Preview>,
    #[serde(default)]
    pub media: Option<SubmissionMedia>,
    /// Gallery items keyed by media id, in the order Reddit declared them.
    #[serde(default)]
    pub media_metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewImage {
    pub source: ImageRef,
    #[serde(default)]
    pub resolutions: Vec<ImageRef>,
    #[serde(default)]
    pub variants: Variants,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Variants {
    pub gif: Option<VariantLadder>,
    pub mp4: Option<VariantLadder>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantLadder {
    pub source: ImageRef,
    #[serde(default)]
    pub resolutions: Vec<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionMedia {
    pub reddit_video: Option<RedditVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditVideo {
    pub dash_url: String,
}

/// One entry of `media_metadata`.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryItem {
    #[serde(rename = "m")]
    pub mime_type: String,
    #[serde(rename = "p")]
    pub previews: Vec<GalleryPreview>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryPreview {
    #[serde(rename = "x")]
    pub width: u32,
    #[serde(rename = "y")]
    pub height: u32,
    #[serde(rename = "u")]
    pub url: String,
}

impl Submission {
    /// Decodes a submission from either the bare post object, a `t3` thing
    /// wrapper, or the listing array served by a post's `.json` endpoint.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let post = unwrap_post(value)?;
        let submission: Submission = serde_json::from_value(post)?;
        debug!("Decoded submission for {}", submission.url);
        Ok(submission)
    }
}

fn unwrap_post(value: Value) -> Result<Value> {
    match value {
        Value::Array(mut listings) => {
            if listings.is_empty() {
                return Err(MediaError::Schema("empty listing array".to_string()));
            }
            unwrap_post(listings.swap_remove(0))
        }
        Value::Object(mut object) => {
            if object.contains_key("url") {
                return Ok(Value::Object(object));
            }
            let kind = object.get("kind").and_then(Value::as_str).map(str::to_owned);
            let data = object
                .remove("data")
                .ok_or_else(|| MediaError::Schema("object has neither url nor data".to_string()))?;
            match kind.as_deref() {
                Some("Listing") => {
                    let child = data
                        .get("children")
                        .and_then(Value::as_array)
                        .and_then(|children| children.first())
                        .cloned()
                        .ok_or_else(|| MediaError::Schema("listing has no children".to_string()))?;
                    unwrap_post(child)
                }
                _ => unwrap_post(data),
            }
        }
        other => Err(MediaError::Schema(format!(
            "expected a submission object, found {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Canonical post URL, shared by every media kind.
pub trait SubmissionRef {
    fn post_url(&self) -> &str;
}

pub trait StillSource: SubmissionRef {
    fn preview_image(&self) -> Result<&PreviewImage>;
}

pub trait AnimatedSource: SubmissionRef {
    /// Looping-image (`gif`) and video (`mp4`) ladders, in that order.
    fn animated_variants(&self) -> Result<(&VariantLadder, &VariantLadder)>;
}

pub trait GallerySource {
    fn gallery_items(&self) -> Result<Vec<(String, GalleryItem)>>;
}

pub trait VideoSource: SubmissionRef {
    fn manifest_url(&self) -> Result<&str>;
}

impl SubmissionRef for Submission {
    fn post_url(&self) -> &str {
        &self.url
    }
}

impl StillSource for Submission {
    fn preview_image(&self) -> Result<&PreviewImage> {
        self.preview
            .as_ref()
            .and_then(|preview| preview.images.first())
            .ok_or_else(|| MediaError::Schema("missing preview.images[0]".to_string()))
    }
}

impl AnimatedSource for Submission {
    fn animated_variants(&self) -> Result<(&VariantLadder, &VariantLadder)> {
        let variants = &self.preview_image()?.variants;
        let gif = variants
            .gif
            .as_ref()
            .ok_or_else(|| MediaError::Schema("missing preview variant gif".to_string()))?;
        let mp4 = variants
            .mp4
            .as_ref()
            .ok_or_else(|| MediaError::Schema("missing preview variant mp4".to_string()))?;
        Ok((gif, mp4))
    }
}

impl GallerySource for Submission {
    fn gallery_items(&self) -> Result<Vec<(String, GalleryItem)>> {
        let metadata = self
            .media_metadata
            .as_ref()
            .ok_or_else(|| MediaError::Schema("missing media_metadata".to_string()))?;

        metadata
            .iter()
            .map(|(id, value)| {
                let item: GalleryItem = serde_json::from_value(value.clone()).map_err(|e| {
                    MediaError::Schema(format!("gallery item {}: {}", id, e))
                })?;
                Ok((id.clone(), item))
            })
            .collect()
    }
}

impl VideoSource for Submission {
    fn manifest_url(&self) -> Result<&str> {
        self.media
            .as_ref()
            .and_then(|media| media.reddit_video.as_ref())
            .map(|video| video.dash_url.as_str())
            .ok_or_else(|| MediaError::Schema("missing media.reddit_video.dash_url".to_string()))
    }
}
