//! Normalizes Reddit media payloads (still images, animated images,
//! galleries and hosted videos) into resolution-keyed URL lookups.

pub mod config;
pub mod error;
pub mod media;
pub mod submission;

pub use error::{MediaError, Result};
pub use media::{Media, MediaExtractor, MediaKind};
pub use submission::Submission;
