//! Mutable form state: the draft, its last validation result and the
//! star-row hover.
//!
//! The form does not know about the modal lifecycle. [`FeedbackModal`]
//! decides when edits are allowed and only then calls into the form.
//!
//! [`FeedbackModal`]: super::FeedbackModal

use super::category::Category;
use super::draft::{FeedbackDraft, Rating, MAX_FEEDBACK_LEN};
use super::rating::RatingControl;
use super::validation::{validate, FieldErrors};

/// Draft plus derived and transient form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    draft: FeedbackDraft,
    errors: FieldErrors,
    rating: RatingControl,
    submit_error: Option<String>,
}

impl FeedbackForm {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear draft, errors, hover and the submission error.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current draft.
    pub fn draft(&self) -> &FeedbackDraft {
        &self.draft
    }

    /// Errors from the most recent validation pass.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Star-row interaction state.
    pub fn rating_control(&self) -> &RatingControl {
        &self.rating
    }

    /// Non-field error from the last failed submission, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Re-run validation over the draft, replacing the error map.
    ///
    /// Returns `true` when the draft is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.draft);
        self.errors.is_empty()
    }

    /// Character counter shown under the feedback box, e.g. `12/500`.
    pub fn feedback_counter(&self) -> String {
        format!("{}/{MAX_FEEDBACK_LEN}", self.draft.feedback_len())
    }

    pub(super) fn set_name(&mut self, name: String) {
        self.draft.name = name;
    }

    pub(super) fn set_email(&mut self, email: String) {
        self.draft.email = email;
    }

    pub(super) fn set_category(&mut self, category: Category) {
        self.draft.category = Some(category);
    }

    pub(super) fn set_feedback_text(&mut self, text: String) {
        self.draft.feedback_text = text;
    }

    pub(super) fn set_rating(&mut self, rating: Rating) {
        self.draft.rating = rating;
    }

    pub(super) fn hover_rating(&mut self, position: u8) {
        if position == 0 {
            self.rating.leave();
        } else {
            self.rating.enter(position);
        }
    }

    pub(super) fn set_submit_error(&mut self, message: Option<String>) {
        self.submit_error = message;
    }
}
