use super::{
    ladder::Ladder,
    utils::{extension_from_url, resolution_key},
};
use crate::{error::Result, submission::StillSource};
use tracing::debug;

/// A single still image with its preview resolutions.
#[derive(Debug, Clone)]
pub struct StillImage {
    urls: Ladder<String>,
    source_url: String,
    pub extension: Option<String>,
}

impl StillImage {
    pub fn from_submission<S: StillSource + ?Sized>(submission: &S) -> Result<Self> {
        let preview = submission.preview_image()?;

        let mut urls = Ladder::new();
        for resolution in &preview.resolutions {
            urls.insert(
                resolution_key(resolution.width, resolution.height),
                resolution.url.clone(),
            );
        }
        urls.insert(
            resolution_key(preview.source.width, preview.source.height),
            preview.source.url.clone(),
        );

        let source_url = submission.post_url().to_string();
        let extension = extension_from_url(&source_url);

        debug!(
            "Extracted image with {} resolutions from {}",
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

    pub fn url_for(&self, resolution: &str) -> Option<&str> {
        self.urls.get(resolution).map(String::as_str)
    }

    /// URL of the last ladder entry. This is the preview source unless the
    /// source shares its dimensions with an earlier resolution.
    pub fn best_url(&self) -> Option<&str> {
        self.urls.last().map(|(_, url)| url.as_str())
    }

    /// URL of the image as originally posted.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}
