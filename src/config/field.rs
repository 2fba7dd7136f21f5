//! ConfigField trait for dynamic get/set access to config sections.
//!
//! Each section exposes its fields by name so `vidx config get/set` can
//! address them with a `section.field` path.

/// Error type for config field operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The specified config key is not recognised.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The value provided is invalid for the specified key.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// The config key that was being set.
        key: String,
        /// Description of the expected value format.
        expected: String,
    },

    /// The config path format is invalid.
    #[error("Invalid path format: {0}")]
    InvalidPath(String),
}

/// Trait for config sections that support dynamic get/set access.
pub trait ConfigField {
    /// Get a field value by name, returning serialised string.
    ///
    /// Returns `None` if the key is not recognised.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Set a field value by name from string input.
    ///
    /// Returns an error if the key is not recognised or the value is invalid.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// List all field names in this section.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Get the section name for this config type.
    fn section_name() -> &'static str
    where
        Self: Sized;
}

/// Split a dot-notation path into section and field.
///
/// # Examples
///
/// ```ignore
/// split_path("feedback.auto_close_ms") // Ok(("feedback", "auto_close_ms"))
/// split_path("invalid") // Err(InvalidPath)
/// ```
pub fn split_path(path: &str) -> Result<(&str, &str), FieldError> {
    path.split_once('.')
        .ok_or_else(|| FieldError::InvalidPath(format!("{path} (expected section.field)")))
}

/// Format an optional string value for display.
pub fn format_optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "(not set)".to_string())
}

/// Parse an optional string; empty or `(not set)` clears it.
pub fn parse_optional(value: &str) -> Option<String> {
    if value.is_empty() || value == "(not set)" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a boolean from various string representations.
pub fn parse_bool(value: &str) -> Result<bool, FieldError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(FieldError::InvalidValue {
            key: "bool".into(),
            expected: "true/false, yes/no, 1/0, on/off".into(),
        }),
    }
}

/// Parse a duration in whole milliseconds.
pub fn parse_millis(key: &str, value: &str) -> Result<u64, FieldError> {
    value.trim().parse().map_err(|_| FieldError::InvalidValue {
        key: key.into(),
        expected: "duration in milliseconds".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_valid() {
        let (section, field) = split_path("feedback.submit_latency_ms").unwrap();
        assert_eq!(section, "feedback");
        assert_eq!(field, "submit_latency_ms");
    }

    #[test]
    fn test_split_path_invalid() {
        let result = split_path("invalid");
        assert!(matches!(result.unwrap_err(), FieldError::InvalidPath(_)));
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(&Some("value".to_string())), "value");
        assert_eq!(format_optional(&None), "(not set)");
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional(""), None);
        assert_eq!(parse_optional("(not set)"), None);
        assert_eq!(parse_optional("vidx.log").as_deref(), Some("vidx.log"));
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_parse_millis() {
        assert_eq!(parse_millis("k", " 1500 ").unwrap(), 1500);
        let err = parse_millis("feedback.auto_close_ms", "soon").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for feedback.auto_close_ms: expected duration in milliseconds"
        );
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::UnknownKey("foo.bar".into());
        assert_eq!(err.to_string(), "Unknown config key: foo.bar");

        let err = FieldError::InvalidPath("invalid".into());
        assert_eq!(err.to_string(), "Invalid path format: invalid");
    }
}
