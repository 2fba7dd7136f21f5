//! Public URLs for stored media.
//!
//! Thumbnails and videos are referenced by the paths they were written to on
//! the storage host. These helpers rewrite such paths into URLs under the
//! public static-asset origin. They never check that the URL resolves.

use crate::config::MediaConfig;

/// Rewrites internal storage paths into public URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrlResolver {
    base_url: String,
    image_internal_prefix: String,
    image_public_prefix: String,
    video_temp_marker: String,
    video_public_prefix: String,
}

impl Default for MediaUrlResolver {
    fn default() -> Self {
        Self::new(&MediaConfig::default())
    }
}

impl MediaUrlResolver {
    /// Build a resolver from the media config section.
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_internal_prefix: config.image_internal_prefix.clone(),
            image_public_prefix: config.image_public_prefix.clone(),
            video_temp_marker: config.video_temp_marker.clone(),
            video_public_prefix: config.video_public_prefix.clone(),
        }
    }

    /// Public origin every URL is built on.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for an image stored under the internal image prefix.
    ///
    /// The first occurrence of the internal prefix is replaced by the public
    /// one. Paths without the prefix are appended unchanged.
    pub fn resolve_image_url(&self, path: &str) -> String {
        let relative = if self.image_internal_prefix.is_empty() {
            path.to_string()
        } else {
            path.replacen(&self.image_internal_prefix, &self.image_public_prefix, 1)
        };
        format!("{}/{}", self.base_url, relative)
    }

    /// URL for a video in the temp upload directory.
    ///
    /// Everything up to and including the first temp marker is replaced by
    /// the public prefix. `None` yields the bare origin.
    pub fn resolve_video_url(&self, path: Option<&str>) -> String {
        let Some(path) = path else {
            return self.base_url.clone();
        };

        let relative = match path.find(&self.video_temp_marker) {
            Some(start) if !self.video_temp_marker.is_empty() => {
                let rest = &path[start + self.video_temp_marker.len()..];
                format!("{}{}", self.video_public_prefix, rest)
            }
            _ => path.to_string(),
        };
        format!("{}/{}", self.base_url, relative)
    }
}
