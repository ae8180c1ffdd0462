use super::{
    ladder::Ladder,
    utils::{extension_from_mime, resolution_key},
};
use crate::{
    error::{MediaError, Result},
    submission::{GalleryItem, GallerySource},
};
use tracing::debug;

/// One image inside a gallery.
#[derive(Debug, Clone)]
pub struct GalleryImage {
    pub id: String,
    urls: Ladder<String>,
    pub extension: Option<String>,
}

impl GalleryImage {
    fn from_item(id: String, item: &GalleryItem) -> Result<Self> {
        if item.previews.is_empty() {
            return Err(MediaError::Schema(format!(
                "gallery item {} has no previews",
                id
            )));
        }

        let mut urls = Ladder::new();
        for preview in &item.previews {
            urls.insert(resolution_key(preview.width, preview.height), preview.url.clone());
        }

        Ok(Self {
            extension: extension_from_mime(&item.mime_type),
            id,
            urls,
        })
    }

    pub fn resolutions(&self) -> Vec<&str> {
        self.urls.keys()
    }

    /// URL at `resolution`, or at the highest resolution when none is given.
    pub fn url_for(&self, resolution: Option<&str>) -> Option<&str> {
        self.urls.get_or_last(resolution).map(String::as_str)
    }
}

/// Ordered collection of images from a gallery post.
#[derive(Debug, Clone)]
pub struct Gallery {
    images: Vec<GalleryImage>,
}

impl Gallery {
    pub fn from_submission<S: GallerySource + ?Sized>(submission: &S) -> Result<Self> {
        let images = submission
            .gallery_items()?
            .into_iter()
            .map(|(id, item)| GalleryImage::from_item(id, &item))
            .collect::<Result<Vec<_>>>()?;

        debug!("Extracted gallery with {} images", images.len());

        Ok(Self { images })
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    /// Highest-resolution URL of every image, in gallery order.
    pub fn urls(&self) -> Vec<&str> {
        self.images
            .iter()
            .filter_map(|image| image.url_for(None))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::Submission;

    fn gallery(body: &str) -> Result<Gallery> {
        Gallery::from_submission(&Submission::from_json_str(body).unwrap())
    }

    const POST: &str = r#"{
        "url": "https://www.reddit.com/gallery/abc",
        "is_gallery": true,
        "media_metadata": {
            "q2": {"m": "image/jpg", "p": [
                {"x": 108, "y": 144, "u": "https://p/q2-108.jpg"},
                {"x": 640, "y": 853, "u": "https://p/q2-640.jpg"}
            ]},
            "a1": {"m": "image/png", "p": [
                {"x": 108, "y": 108, "u": "https://p/a1-108.png"},
                {"x": 320, "y": 320, "u": "https://p/a1-320.png"},
                {"x": 960, "y": 960, "u": "https://p/a1-960.png"}
            ]}
        }
    }"#;

    #[test]
    fn test_urls_are_last_preview_in_declared_order() {
        let gallery = gallery(POST).unwrap();
        assert_eq!(gallery.len(), 2);
        assert_eq!(
            gallery.urls(),
            vec!["https://p/q2-640.jpg", "https://p/a1-960.png"]
        );
    }

    #[test]
    fn test_image_lookups() {
        let gallery = gallery(POST).unwrap();
        let image = &gallery.images()[1];
        assert_eq!(image.id, "a1");
        assert_eq!(image.extension.as_deref(), Some("png"));
        assert_eq!(image.resolutions(), vec!["108x108", "320x320", "960x960"]);
        assert_eq!(image.url_for(Some("320x320")), Some("https://p/a1-320.png"));
        assert_eq!(image.url_for(Some("640x853")), None);
    }

    #[test]
    fn test_empty_gallery() {
        let gallery = gallery(r#"{"url": "u", "media_metadata": {}}"#).unwrap();
        assert!(gallery.is_empty());
        assert!(gallery.urls().is_empty());
    }

    #[test]
    fn test_item_without_previews_fails() {
        let err = gallery(r#"{"url": "u", "media_metadata": {"x": {"m": "image/gif", "p": []}}}"#)
            .unwrap_err();
        assert!(matches!(err, MediaError::Schema(_)));
    }
}
