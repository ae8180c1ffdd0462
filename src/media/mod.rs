mod animated;
mod fetcher;
mod gallery;
mod image;
mod ladder;
mod manifest;
mod utils;
mod video;

pub use animated::{AnimatedImage, Variant, VariantUrls};
pub use fetcher::{HttpFetcher, ManifestFetcher};
pub use gallery::{Gallery, GalleryImage};
pub use image::StillImage;
pub use ladder::Ladder;
pub use manifest::{AdaptationSet, Manifest};
pub use utils::{extension_from_mime, extension_from_url, resolution_key};
pub use video::{Video, VideoExtractor};

use crate::{
    config::HttpConfig,
    error::{MediaError, Result},
    submission::Submission,
};
use std::fmt;
use tracing::info;

/// Shape of the media attached to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Animated,
    Gallery,
    Video,
}

impl MediaKind {
    pub fn detect(submission: &Submission) -> Option<Self> {
        if submission.is_gallery || submission.media_metadata.is_some() {
            return Some(MediaKind::Gallery);
        }

        let hosted_video = submission
            .media
            .as_ref()
            .is_some_and(|media| media.reddit_video.is_some());
        if submission.is_video || hosted_video {
            return Some(MediaKind::Video);
        }

        let image = submission
            .preview
            .as_ref()
            .and_then(|preview| preview.images.first())?;
        if image.variants.mp4.is_some() {
            Some(MediaKind::Animated)
        } else {
            Some(MediaKind::Image)
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::Image => "image",
            MediaKind::Animated => "animated",
            MediaKind::Gallery => "gallery",
            MediaKind::Video => "video",
        };
        write!(f, "{}", name)
    }
}

/// A normalized media asset of any supported kind.
#[derive(Debug, Clone)]
pub enum Media {
    Image(StillImage),
    Animated(AnimatedImage),
    Gallery(Gallery),
    Video(Video),
}

impl Media {
    pub fn kind(&self) -> MediaKind {
        match self {
            Media::Image(_) => MediaKind::Image,
            Media::Animated(_) => MediaKind::Animated,
            Media::Gallery(_) => MediaKind::Gallery,
            Media::Video(_) => MediaKind::Video,
        }
    }

    /// Highest-quality URL of every file making up the asset. Animated clips
    /// prefer the video encoding; videos list the audio track after the video.
    pub fn default_urls(&self) -> Vec<&str> {
        match self {
            Media::Image(image) => image.best_url().into_iter().collect(),
            Media::Animated(clip) => clip
                .best_url(Variant::Video)
                .or_else(|| clip.best_url(Variant::Loop))
                .into_iter()
                .collect(),
            Media::Gallery(gallery) => gallery.urls(),
            Media::Video(video) => video
                .video_url(None)
                .into_iter()
                .chain(video.audio_url(None))
                .collect(),
        }
    }
}

pub struct MediaExtractor {
    fetcher: Box<dyn ManifestFetcher>,
}

impl MediaExtractor {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout(), &config.user_agent)?;
        Ok(Self::with_fetcher(Box::new(fetcher)))
    }

    pub fn with_fetcher(fetcher: Box<dyn ManifestFetcher>) -> Self {
        info!("Media extractor initialized with {} fetcher", fetcher.name());
        Self { fetcher }
    }

    pub async fn extract(&self, submission: &Submission) -> Result<Media> {
        let kind = MediaKind::detect(submission).ok_or_else(|| {
            MediaError::Schema(format!("no supported media in {}", submission.url))
        })?;

        info!("Extracting {} media from {}", kind, submission.url);

        let media = match kind {
            MediaKind::Image => Media::Image(StillImage::from_submission(submission)?),
            MediaKind::Animated => Media::Animated(AnimatedImage::from_submission(submission)?),
            MediaKind::Gallery => Media::Gallery(Gallery::from_submission(submission)?),
            MediaKind::Video => Media::Video(
                VideoExtractor::new(submission)?
                    .resolve(self.fetcher.as_ref())
                    .await?,
            ),
        };

        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingFetcher {
        body: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ManifestFetcher for CountingFetcher {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch_text(&self, _url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    fn extractor() -> (MediaExtractor, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = CountingFetcher {
            body: "<MPD><Period>\
                   <AdaptationSet><BaseURL>DASH_360.mp4</BaseURL><BaseURL>DASH_720.mp4</BaseURL></AdaptationSet>\
                   <AdaptationSet><BaseURL>DASH_AUDIO_128.mp4</BaseURL></AdaptationSet>\
                   </Period></MPD>"
                .to_string(),
            calls: calls.clone(),
        };
        (MediaExtractor::with_fetcher(Box::new(fetcher)), calls)
    }

    fn submission(body: &str) -> Submission {
        Submission::from_json_str(body).unwrap()
    }

    const IMAGE: &str = r#"{"url": "https://i.redd.it/a.jpg", "preview": {"images": [{
        "source": {"url": "https://p/a-src.jpg", "width": 800, "height": 600},
        "resolutions": [{"url": "https://p/a-108.jpg", "width": 108, "height": 81}],
        "variants": {}}]}}"#;

    const CLIP: &str = r#"{"url": "https://i.redd.it/a.gif", "preview": {"images": [{
        "source": {"url": "https://p/a.gif", "width": 400, "height": 300},
        "variants": {
            "gif": {"source": {"url": "https://p/a-src.gif", "width": 400, "height": 300}, "resolutions": []},
            "mp4": {"source": {"url": "https://p/a-src.mp4", "width": 400, "height": 300}, "resolutions": []}
        }}]}}"#;

    const VIDEO: &str = r#"{"url": "https://v.redd.it/v1", "is_video": true,
        "media": {"reddit_video": {"dash_url": "https://v.redd.it/v1/DASHPlaylist.mpd"}}}"#;

    const GALLERY: &str = r#"{"url": "https://www.reddit.com/gallery/g", "is_gallery": true,
        "media_metadata": {"i1": {"m": "image/jpg", "p": [{"x": 10, "y": 10, "u": "https://p/i1.jpg"}]}}}"#;

    #[test]
    fn test_detect_kinds() {
        assert_eq!(MediaKind::detect(&submission(IMAGE)), Some(MediaKind::Image));
        assert_eq!(MediaKind::detect(&submission(CLIP)), Some(MediaKind::Animated));
        assert_eq!(MediaKind::detect(&submission(VIDEO)), Some(MediaKind::Video));
        assert_eq!(MediaKind::detect(&submission(GALLERY)), Some(MediaKind::Gallery));
        assert_eq!(
            MediaKind::detect(&submission(r#"{"url": "https://example.com"}"#)),
            None
        );
    }

    #[tokio::test]
    async fn test_extract_image_does_not_fetch() {
        let (extractor, calls) = extractor();
        let media = extractor.extract(&submission(IMAGE)).await.unwrap();
        assert_eq!(media.kind(), MediaKind::Image);
        assert_eq!(media.default_urls(), vec!["https://p/a-src.jpg"]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extract_animated_prefers_video() {
        let (extractor, _) = extractor();
        let media = extractor.extract(&submission(CLIP)).await.unwrap();
        assert_eq!(media.default_urls(), vec!["https://p/a-src.mp4"]);
    }

    #[tokio::test]
    async fn test_extract_gallery() {
        let (extractor, _) = extractor();
        let media = extractor.extract(&submission(GALLERY)).await.unwrap();
        assert_eq!(media.kind(), MediaKind::Gallery);
        assert_eq!(media.default_urls(), vec!["https://p/i1.jpg"]);
    }

    #[tokio::test]
    async fn test_extract_video_fetches_manifest_once() {
        let (extractor, calls) = extractor();
        let media = extractor.extract(&submission(VIDEO)).await.unwrap();
        assert_eq!(
            media.default_urls(),
            vec![
                "https://v.redd.it/v1/DASH_720.mp4",
                "https://v.redd.it/v1/DASH_AUDIO_128.mp4"
            ]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_extract_unsupported() {
        let (extractor, _) = extractor();
        let err = extractor
            .extract(&submission(r#"{"url": "https://example.com"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Schema(_)));
    }
}
