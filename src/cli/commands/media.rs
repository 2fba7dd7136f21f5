//! Media command implementations.
//!
//! `vidx media image` and `vidx media video` turn stored media paths into
//! public URLs.

use crate::cli::output::{output_url, OutputError, OutputMode};
use crate::config::VidxConfig;
use crate::media::MediaUrlResolver;

/// Result type for media command operations.
pub type MediaCommandResult = Result<(), MediaCommandError>;

/// Error type for media command operations.
#[derive(Debug, thiserror::Error)]
pub enum MediaCommandError {
    /// The URL could not be delivered.
    #[error("{0}")]
    Output(#[from] OutputError),
}

/// Resolve and output a thumbnail URL.
pub fn media_image(config: &VidxConfig, path: &str, mode: &OutputMode) -> MediaCommandResult {
    let url = MediaUrlResolver::new(&config.media).resolve_image_url(path);
    tracing::debug!(%path, %url, "resolved image url");
    output_url(&url, mode)?;
    Ok(())
}

/// Resolve and output a video URL. Without a path this is the site origin.
pub fn media_video(
    config: &VidxConfig,
    path: Option<&str>,
    mode: &OutputMode,
) -> MediaCommandResult {
    let url = MediaUrlResolver::new(&config.media).resolve_video_url(path);
    tracing::debug!(path = path.unwrap_or(""), %url, "resolved video url");
    output_url(&url, mode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_paths_succeed() {
        let config = VidxConfig::default();
        assert!(media_image(&config, "a/b.png", &OutputMode::Stdout).is_ok());
        assert!(media_video(&config, None, &OutputMode::Stdout).is_ok());
    }
}
