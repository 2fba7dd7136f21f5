//! Feedback collection workflow.
//!
//! This module holds the stateful core of the page: the feedback draft and
//! its validation, the star rating control, and the modal lifecycle that
//! drives submission and auto-close through cancellable timers.

mod category;
mod draft;
mod form;
mod modal;
mod rating;
mod scheduler;
mod validation;

pub use category::{Category, CategoryParseError};
pub use draft::{FeedbackDraft, Rating, RatingError, MAX_FEEDBACK_LEN, MAX_RATING};
pub use form::FeedbackForm;
pub use modal::{
    FeedbackHost, FeedbackModal, FeedbackTiming, Lifecycle, ModalError, SubmitError,
    SubmitOutcome, DEFAULT_AUTO_CLOSE, DEFAULT_SUBMIT_LATENCY,
};
pub use rating::{rating_label, RatingControl};
pub use scheduler::{
    Epoch, ManualScheduler, Scheduler, TimerFired, TimerHandle, TimerId, TimerKind, TimerTag,
    TokioScheduler,
};
pub use validation::{is_plausible_email, validate, Field, FieldError, FieldErrors, FieldIssue};
