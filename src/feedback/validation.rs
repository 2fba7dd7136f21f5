//! Validation of a feedback draft.
//!
//! [`validate`] is pure: it looks only at the draft and returns every
//! failing field at once. An empty [`FieldErrors`] is the only admission
//! condition for submission.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::draft::{FeedbackDraft, MAX_FEEDBACK_LEN};

/// Minimal `local@domain.tld` shape check, deliberately permissive.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("EMAIL_SHAPE regex is valid"));

/// A form field that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Sender's name.
    Name,
    /// Sender's email.
    Email,
    /// Star rating.
    Rating,
    /// Feedback category.
    Category,
    /// Free-text feedback.
    Feedback,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Rating,
        Field::Category,
        Field::Feedback,
    ];

    /// Key used for this field on the wire and in error maps.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Rating => "rating",
            Field::Category => "category",
            Field::Feedback => "feedback",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Rating => "Rating",
            Field::Category => "Category",
            Field::Feedback => "Feedback",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldIssue {
    /// The field is empty or unset.
    Required,
    /// The value does not have the expected shape.
    Invalid,
    /// The value exceeds its length limit.
    TooLong,
}

/// A single field error with its rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field.
    pub field: Field,
    /// What went wrong.
    pub issue: FieldIssue,
}

impl FieldError {
    /// Human-readable message shown next to the field.
    pub fn message(&self) -> String {
        match self.issue {
            FieldIssue::Required => format!("{} is required", self.field.display_name()),
            FieldIssue::Invalid => format!("{} is invalid", self.field.display_name()),
            FieldIssue::TooLong => format!(
                "{} must be {MAX_FEEDBACK_LEN} characters or less",
                self.field.display_name()
            ),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Errors keyed by field. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldIssue>,
}

impl FieldErrors {
    /// No errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when the draft that produced this map is fully valid.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Issue recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<FieldIssue> {
        self.errors.get(&field).copied()
    }

    /// Message for `field`, if it has an error.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field)
            .map(|issue| FieldError { field, issue }.message())
    }

    /// Iterate errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.errors
            .iter()
            .map(|(field, issue)| FieldError { field: *field, issue: *issue })
    }

    fn insert(&mut self, field: Field, issue: FieldIssue) {
        self.errors.insert(field, issue);
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in self.iter() {
            map.serialize_entry(error.field.key(), &error.message())?;
        }
        map.end()
    }
}

/// Whether `email` has the minimal `local@domain.tld` shape.
pub fn is_plausible_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Validate every field of `draft`, reporting all failures together.
pub fn validate(draft: &FeedbackDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.name.trim().is_empty() {
        errors.insert(Field::Name, FieldIssue::Required);
    }

    if draft.email.trim().is_empty() {
        errors.insert(Field::Email, FieldIssue::Required);
    } else if !is_plausible_email(&draft.email) {
        errors.insert(Field::Email, FieldIssue::Invalid);
    }

    if !draft.rating.is_set() {
        errors.insert(Field::Rating, FieldIssue::Required);
    }

    if draft.category.is_none() {
        errors.insert(Field::Category, FieldIssue::Required);
    }

    if draft.feedback_text.trim().is_empty() {
        errors.insert(Field::Feedback, FieldIssue::Required);
    } else if draft.feedback_len() > MAX_FEEDBACK_LEN {
        errors.insert(Field::Feedback, FieldIssue::TooLong);
    }

    errors
}
