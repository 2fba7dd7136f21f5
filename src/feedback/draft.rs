//! The feedback draft: the in-progress record held by the modal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::category::Category;

/// Highest selectable rating.
pub const MAX_RATING: u8 = 5;

/// Maximum feedback text length, in characters.
pub const MAX_FEEDBACK_LEN: usize = 500;

/// Error returned when constructing a rating above [`MAX_RATING`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Rating must be between 0 and {MAX_RATING}, got {0}")]
pub struct RatingError(pub u8);

/// A star rating in `0..=5`, where 0 means "unset".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// The unset rating.
    pub const UNSET: Rating = Rating(0);

    /// Create a rating, rejecting values above [`MAX_RATING`].
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if value > MAX_RATING {
            return Err(RatingError(value));
        }
        Ok(Self(value))
    }

    /// Raw value in `0..=5`.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether a rating has been chosen.
    pub fn is_set(self) -> bool {
        self.0 != 0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// The in-progress feedback record.
///
/// Serialises with the same keys the page has always sent to the backend:
/// `name`, `email`, `rating`, `category` (empty string when unset) and
/// `feedback`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackDraft {
    /// Sender's name.
    #[serde(default)]
    pub name: String,
    /// Sender's email address.
    #[serde(default)]
    pub email: String,
    /// Overall rating, 0 when unset.
    #[serde(default)]
    pub rating: Rating,
    /// Selected category.
    #[serde(default, with = "category_or_empty")]
    pub category: Option<Category>,
    /// Free-text feedback.
    #[serde(default, rename = "feedback")]
    pub feedback_text: String,
}

impl FeedbackDraft {
    /// Length of the feedback text in characters.
    pub fn feedback_len(&self) -> usize {
        self.feedback_text.chars().count()
    }
}

mod category_or_empty {
    use super::*;

    pub fn serialize<S: Serializer>(
        category: &Option<Category>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(category.map(Category::value).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Category>, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some).map_err(serde::de::Error::custom)
    }
}
