use super::{
    ladder::Ladder,
    utils::{extension_from_url, resolution_key},
};
use crate::{
    error::{MediaError, Result},
    submission::AnimatedSource,
};
use std::{fmt, str::FromStr};
use tracing::debug;

/// Encoding of an animated clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Looping image, served as `gif`.
    Loop,
    /// Video, served as `mp4`.
    Video,
}

impl FromStr for Variant {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gif" | "loop" => Ok(Variant::Loop),
            "mp4" | "video" => Ok(Variant::Video),
            other => Err(MediaError::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Loop => write!(f, "gif"),
            Variant::Video => write!(f, "mp4"),
        }
    }
}

/// URLs available at one resolution. Either side may be missing when the
/// two ladders do not cover the same resolutions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantUrls {
    pub loop_url: Option<String>,
    pub video_url: Option<String>,
}

impl VariantUrls {
    pub fn get(&self, variant: Variant) -> Option<&str> {
        match variant {
            Variant::Loop => self.loop_url.as_deref(),
            Variant::Video => self.video_url.as_deref(),
        }
    }

    fn set(&mut self, variant: Variant, url: String) {
        match variant {
            Variant::Loop => self.loop_url = Some(url),
            Variant::Video => self.video_url = Some(url),
        }
    }
}

/// An animated clip available both as a looping image and as a video.
#[derive(Debug, Clone)]
pub struct AnimatedImage {
    urls: Ladder<VariantUrls>,
    source_url: String,
    pub extension: Option<String>,
}

impl AnimatedImage {
    pub fn from_submission<S: AnimatedSource + ?Sized>(submission: &S) -> Result<Self> {
        let (gif, mp4) = submission.animated_variants()?;

        let mut urls: Ladder<VariantUrls> = Ladder::new();
        let mut add = |width: u32, height: u32, variant: Variant, url: &str| {
            let key = resolution_key(width, height);
            match urls.get_mut(&key) {
                Some(entry) => entry.set(variant, url.to_string()),
                None => {
                    let mut entry = VariantUrls::default();
                    entry.set(variant, url.to_string());
                    urls.insert(key, entry);
                }
            }
        };

        for resolution in &gif.resolutions {
            add(resolution.width, resolution.height, Variant::Loop, &resolution.url);
        }
        for resolution in &mp4.resolutions {
            add(resolution.width, resolution.height, Variant::Video, &resolution.url);
        }

        // Each source goes under its own dimensions; they share an entry
        // only when the dimensions agree.
        add(gif.source.width, gif.source.height, Variant::Loop, &gif.source.url);
        add(mp4.source.width, mp4.source.height, Variant::Video, &mp4.source.url);

        let source_url = submission.post_url().to_string();
        let extension = extension_from_url(&source_url);

        debug!(
            "Extracted animated image with {} resolutions from {}",
            urls.len(),
            source_url
        );

        Ok(Self {
            urls,
            source_url,
            extension,
        })
    }

    pub fn resolutions(&self) -> Vec<&str> {
        self.urls.keys()
    }

    /// URL of `variant` at `resolution`, if that pair exists.
    pub fn url_for(&self, resolution: &str, variant: Variant) -> Option<&str> {
        self.urls.get(resolution)?.get(variant)
    }

    pub fn variants_for(&self, resolution: &str) -> Option<&VariantUrls> {
        self.urls.get(resolution)
    }

    /// Highest resolution that carries `variant`.
    pub fn best_url(&self, variant: Variant) -> Option<&str> {
        self.urls
            .iter()
            .filter_map(|(_, urls)| urls.get(variant))
            .last()
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}
