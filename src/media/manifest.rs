//! DASH manifest parsing.
//!
//! Only the pieces the video extractor needs are kept: the adaptation sets in
//! document order and the `BaseURL` entries inside each one.

use crate::error::{MediaError, Result};
use tracing::debug;

const ADAPTATION_SET: &str = "AdaptationSet";
const BASE_URL: &str = "BaseURL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptationSet {
    /// Relative media locations, in document order.
    pub base_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    adaptation_sets: Vec<AdaptationSet>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self> {
        let document = roxmltree::Document::parse(text)
            .map_err(|e| MediaError::ManifestFormat(format!("invalid XML: {}", e)))?;

        let mut adaptation_sets = Vec::new();
        for set in document
            .descendants()
            .filter(|node| node.has_tag_name(ADAPTATION_SET))
        {
            let base_urls = set
                .descendants()
                .filter(|node| node.has_tag_name(BASE_URL))
                .map(|node| {
                    node.text()
                        .map(str::trim)
                        .filter(|text| !text.is_empty())
                        .map(str::to_string)
                        .ok_or_else(|| MediaError::ManifestFormat("empty BaseURL".to_string()))
                })
                .collect::<Result<Vec<_>>>()?;
            adaptation_sets.push(AdaptationSet { base_urls });
        }

        if adaptation_sets.is_empty() {
            return Err(MediaError::ManifestFormat(
                "manifest has no adaptation sets".to_string(),
            ));
        }

        debug!("Parsed manifest with {} adaptation sets", adaptation_sets.len());

        Ok(Self { adaptation_sets })
    }

    pub fn adaptation_sets(&self) -> &[AdaptationSet] {
        &self.adaptation_sets
    }

    /// The first adaptation set, which carries the video track.
    pub fn video_set(&self) -> &AdaptationSet {
        &self.adaptation_sets[0]
    }

    /// The second adaptation set, when the clip has sound.
    pub fn audio_set(&self) -> Option<&AdaptationSet> {
        self.adaptation_sets.get(1)
    }
}
