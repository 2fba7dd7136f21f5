//! The feedback modal: lifecycle state machine over the feedback form.
//!
//! ```text
//! Closed --open--> Editing --submit (valid)--> Submitting --latency--> Submitted
//!    ^                |  ^                          |                      |
//!    |                |  +---- transport error -----+                      |
//!    +----close-------+-------------close-----------+---close / dwell------+
//! ```
//!
//! The modal is driven entirely by calls from its host: user actions
//! (`open`, edits, `submit`, `close`) and timer deliveries
//! ([`FeedbackModal::handle_timer`]). Every `open` and `close` starts a new
//! epoch; timers carry the epoch they were started in and are discarded if
//! it no longer matches.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::category::{Category, CategoryParseError};
use super::draft::FeedbackDraft;
use super::form::FeedbackForm;
use super::scheduler::{Epoch, Scheduler, TimerFired, TimerHandle, TimerKind, TimerTag};

/// Default simulated submission latency.
pub const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_millis(1500);

/// Default dwell on the success view before closing.
pub const DEFAULT_AUTO_CLOSE: Duration = Duration::from_millis(2000);

/// Observable lifecycle of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Not shown. Draft is empty.
    Closed,
    /// Form shown and editable.
    Editing,
    /// Waiting for the submission to complete. Form is read-only.
    Submitting,
    /// Success view shown until the dwell elapses.
    Submitted,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifecycle::Closed => "closed",
            Lifecycle::Editing => "editing",
            Lifecycle::Submitting => "submitting",
            Lifecycle::Submitted => "submitted",
        };
        f.write_str(name)
    }
}

/// Internal state. Timers live inside the variant that needs them.
#[derive(Debug)]
enum Stage {
    Closed,
    Editing,
    Submitting {
        snapshot: FeedbackDraft,
        timer: TimerHandle,
    },
    Submitted {
        timer: TimerHandle,
    },
}

impl Stage {
    fn lifecycle(&self) -> Lifecycle {
        match self {
            Stage::Closed => Lifecycle::Closed,
            Stage::Editing => Lifecycle::Editing,
            Stage::Submitting { .. } => Lifecycle::Submitting,
            Stage::Submitted { .. } => Lifecycle::Submitted,
        }
    }
}

/// A submission whose modal was closed before it completed.
///
/// It still reaches the host when its latency elapses but no longer
/// affects the modal.
#[derive(Debug)]
struct Detached {
    snapshot: FeedbackDraft,
    timer: TimerHandle,
}

/// Error reported by the host when a submission could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The transport failed; the draft is kept for another attempt.
    #[error("Could not send feedback: {0}")]
    Transport(String),
}

/// Error type for rejected modal actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    /// Field edits are only accepted while editing.
    #[error("Feedback form is not editable while {0}")]
    NotEditing(Lifecycle),

    /// The category value is not in the closed set.
    #[error(transparent)]
    UnknownCategory(#[from] CategoryParseError),

    /// Star position outside `1..=5`.
    #[error("Rating position {0} is out of range (expected 1-5)")]
    InvalidRating(u8),
}

/// Result of calling [`FeedbackModal::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed; the submission is in flight.
    Started,
    /// Validation failed; errors are on the form.
    Invalid,
    /// Submitting is not possible in this state.
    Ignored(Lifecycle),
}

/// The page that hosts the modal.
pub trait FeedbackHost {
    /// Receive a snapshot of the draft once the submission latency elapses.
    ///
    /// Returning an error sends the modal back to editing with the draft
    /// intact.
    fn on_submit(&mut self, submission: FeedbackDraft) -> Result<(), SubmitError>;

    /// The modal finished closing.
    fn on_close(&mut self);

    /// The modal moved between lifecycle states.
    fn on_transition(&mut self, from: Lifecycle, to: Lifecycle) {
        let _ = (from, to);
    }
}

/// Delays used by the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTiming {
    /// Simulated round-trip before the host receives the submission.
    pub submit_latency: Duration,
    /// How long the success view stays up.
    pub auto_close: Duration,
}

impl Default for FeedbackTiming {
    fn default() -> Self {
        Self {
            submit_latency: DEFAULT_SUBMIT_LATENCY,
            auto_close: DEFAULT_AUTO_CLOSE,
        }
    }
}

/// Feedback collection modal.
#[derive(Debug)]
pub struct FeedbackModal<S, H> {
    stage: Stage,
    form: FeedbackForm,
    epoch: Epoch,
    timing: FeedbackTiming,
    detached: Vec<Detached>,
    scheduler: S,
    host: H,
}

impl<S: Scheduler, H: FeedbackHost> FeedbackModal<S, H> {
    /// Create a closed modal.
    pub fn new(scheduler: S, host: H, timing: FeedbackTiming) -> Self {
        Self {
            stage: Stage::Closed,
            form: FeedbackForm::new(),
            epoch: 0,
            timing,
            detached: Vec::new(),
            scheduler,
            host,
        }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.stage.lifecycle()
    }

    /// Whether the modal is shown.
    pub fn is_open(&self) -> bool {
        self.lifecycle() != Lifecycle::Closed
    }

    /// Current epoch.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Form state for rendering.
    pub fn form(&self) -> &FeedbackForm {
        &self.form
    }

    /// Configured delays.
    pub fn timing(&self) -> FeedbackTiming {
        self.timing
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Number of closed-over submissions still waiting to complete.
    pub fn detached_submissions(&self) -> usize {
        self.detached.len()
    }

    /// Show the modal with an empty form. No-op unless closed.
    pub fn open(&mut self) -> bool {
        if self.lifecycle() != Lifecycle::Closed {
            debug!(state = %self.lifecycle(), "open ignored");
            return false;
        }
        self.epoch += 1;
        self.form.reset();
        self.stage = Stage::Editing;
        self.transition(Lifecycle::Closed, Lifecycle::Editing);
        true
    }

    /// Close from any state, resetting the form. No-op when already closed.
    ///
    /// A pending dwell timer is cancelled. An in-flight submission is not:
    /// it still reaches the host but can no longer touch the modal.
    pub fn close(&mut self) -> bool {
        let from = self.lifecycle();
        if from == Lifecycle::Closed {
            return false;
        }

        match std::mem::replace(&mut self.stage, Stage::Closed) {
            Stage::Submitting { snapshot, timer } => {
                debug!(epoch = self.epoch, "closing with submission in flight");
                self.detached.push(Detached { snapshot, timer });
            }
            Stage::Submitted { timer } => timer.cancel(),
            Stage::Closed | Stage::Editing => {}
        }

        self.form.reset();
        self.epoch += 1;
        self.transition(from, Lifecycle::Closed);
        info!(epoch = self.epoch, "feedback modal closed");
        self.host.on_close();
        true
    }

    /// Validate and, if valid, start the submission.
    pub fn submit(&mut self) -> SubmitOutcome {
        let state = self.lifecycle();
        if state != Lifecycle::Editing {
            debug!(%state, "submit ignored");
            return SubmitOutcome::Ignored(state);
        }

        if !self.form.validate() {
            debug!(errors = self.form.errors().len(), "feedback draft invalid");
            return SubmitOutcome::Invalid;
        }

        self.form.set_submit_error(None);
        let snapshot = self.form.draft().clone();
        let timer = self.schedule(self.timing.submit_latency, TimerKind::SubmitLatency);
        self.stage = Stage::Submitting { snapshot, timer };
        self.transition(Lifecycle::Editing, Lifecycle::Submitting);
        SubmitOutcome::Started
    }

    /// Apply an elapsed timer. Returns `true` if it changed anything.
    ///
    /// Timers from an earlier epoch, cancelled timers and timers that do
    /// not match the current state are dropped.
    pub fn handle_timer(&mut self, fired: TimerFired) -> bool {
        if let Some(index) = self.detached.iter().position(|d| d.timer.id() == fired.id) {
            let detached = self.detached.swap_remove(index);
            self.deliver_detached(detached.snapshot);
            return true;
        }

        if fired.tag.epoch != self.epoch {
            debug!(
                timer_epoch = fired.tag.epoch,
                epoch = self.epoch,
                "stale timer dropped"
            );
            return false;
        }

        match (&self.stage, fired.tag.kind) {
            (Stage::Submitting { timer, .. }, TimerKind::SubmitLatency)
                if timer.id() == fired.id =>
            {
                self.complete_submission();
                true
            }
            (Stage::Submitted { timer }, TimerKind::AutoClose) if timer.id() == fired.id => {
                self.close()
            }
            _ => {
                debug!(kind = ?fired.tag.kind, state = %self.lifecycle(), "unexpected timer dropped");
                false
            }
        }
    }

    /// Set the name field.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ModalError> {
        self.ensure_editing()?;
        self.form.set_name(name.into());
        Ok(())
    }

    /// Set the email field.
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), ModalError> {
        self.ensure_editing()?;
        self.form.set_email(email.into());
        Ok(())
    }

    /// Select a category.
    pub fn set_category(&mut self, category: Category) -> Result<(), ModalError> {
        self.ensure_editing()?;
        self.form.set_category(category);
        Ok(())
    }

    /// Select a category by its value string, rejecting unknown values.
    pub fn set_category_value(&mut self, value: &str) -> Result<(), ModalError> {
        self.ensure_editing()?;
        let category = value.parse::<Category>()?;
        self.form.set_category(category);
        Ok(())
    }

    /// Set the free-text feedback. Over-long text is kept and flagged at
    /// submit time.
    pub fn set_feedback_text(&mut self, text: impl Into<String>) -> Result<(), ModalError> {
        self.ensure_editing()?;
        self.form.set_feedback_text(text.into());
        Ok(())
    }

    /// Click star `position` (1-5).
    pub fn click_rating(&mut self, position: u8) -> Result<(), ModalError> {
        self.ensure_editing()?;
        let rating = self
            .form
            .rating_control()
            .click(position)
            .ok_or(ModalError::InvalidRating(position))?;
        self.form.set_rating(rating);
        Ok(())
    }

    /// Hover star `position`; 0 clears the hover. Ignored unless editing.
    pub fn hover_rating(&mut self, position: u8) {
        if self.lifecycle() == Lifecycle::Editing {
            self.form.hover_rating(position);
        }
    }

    fn ensure_editing(&self) -> Result<(), ModalError> {
        match self.lifecycle() {
            Lifecycle::Editing => Ok(()),
            other => Err(ModalError::NotEditing(other)),
        }
    }

    fn schedule(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle {
        let tag = TimerTag {
            epoch: self.epoch,
            kind,
        };
        self.scheduler.schedule(delay, tag)
    }

    fn complete_submission(&mut self) {
        let snapshot = match std::mem::replace(&mut self.stage, Stage::Editing) {
            Stage::Submitting { snapshot, .. } => snapshot,
            other => {
                self.stage = other;
                return;
            }
        };

        match self.host.on_submit(snapshot) {
            Ok(()) => {
                info!(epoch = self.epoch, "feedback submitted");
                let timer = self.schedule(self.timing.auto_close, TimerKind::AutoClose);
                self.stage = Stage::Submitted { timer };
                self.transition(Lifecycle::Submitting, Lifecycle::Submitted);
            }
            Err(err) => {
                warn!(epoch = self.epoch, error = %err, "feedback submission failed");
                self.form.set_submit_error(Some(err.to_string()));
                self.transition(Lifecycle::Submitting, Lifecycle::Editing);
            }
        }
    }

    fn deliver_detached(&mut self, snapshot: FeedbackDraft) {
        match self.host.on_submit(snapshot) {
            Ok(()) => info!("feedback submitted after modal was closed"),
            Err(err) => warn!(error = %err, "detached feedback submission failed"),
        }
    }

    fn transition(&mut self, from: Lifecycle, to: Lifecycle) {
        debug!(epoch = self.epoch, %from, %to, "feedback modal transition");
        self.host.on_transition(from, to);
    }
}
