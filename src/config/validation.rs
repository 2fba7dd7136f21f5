//! ConfigField trait implementations for config sections.

use super::field::{format_optional, parse_bool, parse_millis, parse_optional, ConfigField, FieldError};
use super::{FeedbackConfig, LogFormat, LoggingConfig, MediaConfig, OutputConfig, OutputMode, SearchConfig};

impl ConfigField for FeedbackConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "submit_latency_ms" => Some(self.submit_latency_ms.to_string()),
            "auto_close_ms" => Some(self.auto_close_ms.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "submit_latency_ms" => {
                self.submit_latency_ms = parse_millis("feedback.submit_latency_ms", value)?;
                Ok(())
            }
            "auto_close_ms" => {
                self.auto_close_ms = parse_millis("feedback.auto_close_ms", value)?;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["submit_latency_ms", "auto_close_ms"]
    }

    fn section_name() -> &'static str {
        "feedback"
    }
}

impl ConfigField for MediaConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "base_url" => Some(self.base_url.clone()),
            "image_internal_prefix" => Some(self.image_internal_prefix.clone()),
            "image_public_prefix" => Some(self.image_public_prefix.clone()),
            "video_temp_marker" => Some(self.video_temp_marker.clone()),
            "video_public_prefix" => Some(self.video_public_prefix.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        let slot = match key {
            "base_url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(FieldError::InvalidValue {
                        key: "media.base_url".into(),
                        expected: "an http:// or https:// origin".into(),
                    });
                }
                &mut self.base_url
            }
            "image_internal_prefix" => &mut self.image_internal_prefix,
            "image_public_prefix" => &mut self.image_public_prefix,
            "video_temp_marker" => &mut self.video_temp_marker,
            "video_public_prefix" => &mut self.video_public_prefix,
            _ => return Err(FieldError::UnknownKey(key.into())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "base_url",
            "image_internal_prefix",
            "image_public_prefix",
            "video_temp_marker",
            "video_public_prefix",
        ]
    }

    fn section_name() -> &'static str {
        "media"
    }
}

impl ConfigField for SearchConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "placeholder" => Some(self.placeholder.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "placeholder" => {
                self.placeholder = value.to_string();
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["placeholder"]
    }

    fn section_name() -> &'static str {
        "search"
    }
}

impl ConfigField for OutputConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "default" => Some(
                match self.default {
                    OutputMode::Clipboard => "clipboard",
                    OutputMode::Stdout => "stdout",
                }
                .to_string(),
            ),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "default" => {
                self.default = match value.to_lowercase().as_str() {
                    "clipboard" => OutputMode::Clipboard,
                    "stdout" => OutputMode::Stdout,
                    _ => {
                        return Err(FieldError::InvalidValue {
                            key: "output.default".into(),
                            expected: "clipboard or stdout".into(),
                        })
                    }
                };
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["default"]
    }

    fn section_name() -> &'static str {
        "output"
    }
}

impl ConfigField for LoggingConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.level.clone()),
            "format" => Some(self.format.to_string()),
            "file" => Some(format_optional(&self.file)),
            "ansi" => Some(self.ansi.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "level" => {
                if value.trim().is_empty() {
                    return Err(FieldError::InvalidValue {
                        key: "logging.level".into(),
                        expected: "a filter such as info or vidx=debug".into(),
                    });
                }
                self.level = value.trim().to_string();
                Ok(())
            }
            "format" => {
                self.format = value.parse::<LogFormat>()?;
                Ok(())
            }
            "file" => {
                self.file = parse_optional(value);
                Ok(())
            }
            "ansi" => {
                self.ansi = parse_bool(value).map_err(|_| FieldError::InvalidValue {
                    key: "logging.ansi".into(),
                    expected: "true or false".into(),
                })?;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["level", "format", "file", "ansi"]
    }

    fn section_name() -> &'static str {
        "logging"
    }
}
