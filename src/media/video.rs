use super::{
    fetcher::ManifestFetcher,
    ladder::Ladder,
    manifest::{AdaptationSet, Manifest},
    utils::{extension_from_url, first_number},
};
use crate::{
    error::{MediaError, Result},
    submission::VideoSource,
};
use tracing::{debug, info};

/// Collects what is needed to resolve a hosted video without touching the
/// network. [`VideoExtractor::resolve`] performs the manifest fetch.
#[derive(Debug, Clone)]
pub struct VideoExtractor {
    source_url: String,
    manifest_url: String,
}

impl VideoExtractor {
    pub fn new<S: VideoSource + ?Sized>(submission: &S) -> Result<Self> {
        Ok(Self {
            source_url: submission.post_url().to_string(),
            manifest_url: submission.manifest_url()?.to_string(),
        })
    }

    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    /// Fetches and parses the manifest. Dropping the returned future cancels
    /// the request.
    pub async fn resolve(&self, fetcher: &dyn ManifestFetcher) -> Result<Video> {
        info!(
            "Resolving video manifest with {}: {}",
            fetcher.name(),
            self.manifest_url
        );
        let body = fetcher.fetch_text(&self.manifest_url).await?;
        self.resolve_manifest(&body)
    }

    /// Builds the video from an already fetched manifest body.
    pub fn resolve_manifest(&self, body: &str) -> Result<Video> {
        let manifest = Manifest::parse(body)?;

        let video = self.ladder(manifest.video_set(), "p")?;
        if video.is_empty() {
            return Err(MediaError::ManifestFormat(
                "video adaptation set has no BaseURL entries".to_string(),
            ));
        }

        let audio = match manifest.audio_set() {
            Some(set) => self.ladder(set, "kbps")?,
            None => Ladder::new(),
        };

        let extension = video
            .last()
            .and_then(|(_, url)| extension_from_url(url));

        debug!(
            "Resolved {} video and {} audio qualities for {}",
            video.len(),
            audio.len(),
            self.source_url
        );

        Ok(Video {
            video,
            audio,
            source_url: self.source_url.clone(),
            extension,
        })
    }

    fn ladder(&self, set: &AdaptationSet, suffix: &str) -> Result<Ladder<String>> {
        let mut ladder = Ladder::new();
        for base_url in &set.base_urls {
            let number = first_number(base_url).ok_or_else(|| {
                MediaError::ManifestFormat(format!("no quality number in BaseURL {}", base_url))
            })?;
            ladder.insert(
                format!("{}{}", number, suffix),
                format!("{}/{}", self.source_url, base_url),
            );
        }
        Ok(ladder)
    }
}

/// A hosted video with separate video and audio quality ladders.
#[derive(Debug, Clone)]
pub struct Video {
    video: Ladder<String>,
    audio: Ladder<String>,
    source_url: String,
    pub extension: Option<String>,
}

impl Video {
    /// Video quality labels such as `720p`, in manifest order.
    pub fn video_qualities(&self) -> Vec<&str> {
        self.video.keys()
    }

    /// Audio quality labels such as `128kbps`; empty for silent clips.
    pub fn audio_qualities(&self) -> Vec<&str> {
        self.audio.keys()
    }

    /// URL for `quality`, or for the highest quality when none is given.
    pub fn video_url(&self, quality: Option<&str>) -> Option<&str> {
        self.video.get_or_last(quality).map(String::as_str)
    }

    /// URL for `quality`, or for the highest quality when none is given.
    pub fn audio_url(&self, quality: Option<&str>) -> Option<&str> {
        self.audio.get_or_last(quality).map(String::as_str)
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}
