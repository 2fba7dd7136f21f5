//! Configuration models for .vidx/config.json.
//!
//! Every section has defaults, so a missing file or a partial file is
//! always usable.

pub mod field;
mod validation;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackTiming;
pub use field::{ConfigField, FieldError};

/// Default config directory path.
pub const VIDX_DIR: &str = ".vidx";
/// Default config file path.
pub const CONFIG_FILE: &str = ".vidx/config.json";

/// Feedback modal timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Simulated submission round-trip, in milliseconds.
    #[serde(default = "default_submit_latency_ms")]
    pub submit_latency_ms: u64,
    /// How long the thank-you view stays up, in milliseconds.
    #[serde(default = "default_auto_close_ms")]
    pub auto_close_ms: u64,
}

fn default_submit_latency_ms() -> u64 {
    1500
}

fn default_auto_close_ms() -> u64 {
    2000
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            submit_latency_ms: default_submit_latency_ms(),
            auto_close_ms: default_auto_close_ms(),
        }
    }
}

impl FeedbackConfig {
    /// Timing for the modal.
    pub fn timing(&self) -> FeedbackTiming {
        FeedbackTiming {
            submit_latency: Duration::from_millis(self.submit_latency_ms),
            auto_close: Duration::from_millis(self.auto_close_ms),
        }
    }
}

/// Media URL rewriting rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Public origin, e.g. `https://videoindex.app`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Storage prefix of image paths.
    #[serde(default = "default_image_internal_prefix")]
    pub image_internal_prefix: String,
    /// Public prefix replacing it.
    #[serde(default = "default_static_prefix")]
    pub image_public_prefix: String,
    /// Marker ending the storage part of video paths.
    #[serde(default = "default_video_temp_marker")]
    pub video_temp_marker: String,
    /// Public prefix replacing everything up to the marker.
    #[serde(default = "default_video_public_prefix")]
    pub video_public_prefix: String,
}

fn default_base_url() -> String {
    "https://videoindex.app".to_string()
}

fn default_image_internal_prefix() -> String {
    "/home/azureuser/recallstore/recall-api/../recallhq".to_string()
}

fn default_static_prefix() -> String {
    "learnpod_static".to_string()
}

fn default_video_temp_marker() -> String {
    "/recallhq/temp/".to_string()
}

fn default_video_public_prefix() -> String {
    "learnpod_static/".to_string()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_internal_prefix: default_image_internal_prefix(),
            image_public_prefix: default_static_prefix(),
            video_temp_marker: default_video_temp_marker(),
            video_public_prefix: default_video_public_prefix(),
        }
    }
}

/// Search box settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Placeholder shown while the query is empty.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_placeholder() -> String {
    crate::search::DEFAULT_PLACEHOLDER.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
        }
    }
}

/// Where resolved URLs are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Copy to clipboard.
    Clipboard,
    /// Print to stdout (default).
    #[default]
    Stdout,
}

/// Configuration for output modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output mode.
    #[serde(default)]
    pub default: OutputMode,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Single-line format.
    Compact,
    /// JSON, one object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(FieldError::InvalidValue {
                key: "logging.format".into(),
                expected: "pretty, compact, or json".into(),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        })
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `vidx=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Line format.
    #[serde(default)]
    pub format: LogFormat,
    /// Log file. Interactive mode only logs when this is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Colour log output on terminals.
    #[serde(default = "default_true")]
    pub ansi: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
            ansi: default_true(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VidxConfig {
    /// Feedback modal settings.
    #[serde(default)]
    pub feedback: FeedbackConfig,
    /// Media URL settings.
    #[serde(default)]
    pub media: MediaConfig,
    /// Search box settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the config file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file JSON.
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl VidxConfig {
    /// Load configuration from a file, or return defaults if file doesn't exist.
    ///
    /// `path` defaults to `.vidx/config.json`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: VidxConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories.
    ///
    /// `path` defaults to `.vidx/config.json`.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_file);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the path for the vidx directory.
    pub fn vidx_dir() -> PathBuf {
        PathBuf::from(VIDX_DIR)
    }

    /// Get the path for the config file.
    pub fn config_file() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Get a config value by dot-notation path (e.g., "feedback.auto_close_ms").
    pub fn get_by_path(&self, path: &str) -> Result<String, FieldError> {
        let (section, key) = field::split_path(path)?;
        let value = match section {
            "feedback" => self.feedback.get_field(key),
            "media" => self.media.get_field(key),
            "search" => self.search.get_field(key),
            "output" => self.output.get_field(key),
            "logging" => self.logging.get_field(key),
            _ => None,
        };
        value.ok_or_else(|| FieldError::UnknownKey(path.into()))
    }

    /// Set a config value by dot-notation path.
    pub fn set_by_path(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        let result = match section {
            "feedback" => self.feedback.set_field(key, value),
            "media" => self.media.set_field(key, value),
            "search" => self.search.set_field(key, value),
            "output" => self.output.set_field(key, value),
            "logging" => self.logging.set_field(key, value),
            _ => return Err(FieldError::UnknownKey(path.into())),
        };
        // Sections report bare keys; surface the full path instead.
        result.map_err(|err| match err {
            FieldError::UnknownKey(_) => FieldError::UnknownKey(path.into()),
            other => other,
        })
    }

    /// Reset a whole section, or a single `section.field`, to defaults.
    pub fn reset_path(&mut self, path: &str) -> Result<(), FieldError> {
        let defaults = Self::default();
        if let Some((_, _)) = path.split_once('.') {
            let value = defaults.get_by_path(path)?;
            return self.set_by_path(path, &value);
        }
        match path {
            "feedback" => self.feedback = defaults.feedback,
            "media" => self.media = defaults.media,
            "search" => self.search = defaults.search,
            "output" => self.output = defaults.output,
            "logging" => self.logging = defaults.logging,
            _ => return Err(FieldError::UnknownKey(path.into())),
        }
        Ok(())
    }

    /// List all section names.
    pub fn section_names() -> &'static [&'static str] {
        &["feedback", "media", "search", "output", "logging"]
    }

    /// Get all field names for a section.
    pub fn fields_for_section(section: &str) -> Option<&'static [&'static str]> {
        match section {
            "feedback" => Some(FeedbackConfig::field_names()),
            "media" => Some(MediaConfig::field_names()),
            "search" => Some(SearchConfig::field_names()),
            "output" => Some(OutputConfig::field_names()),
            "logging" => Some(LoggingConfig::field_names()),
            _ => None,
        }
    }
}
