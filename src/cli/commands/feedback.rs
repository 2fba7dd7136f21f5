//! Feedback command implementation.
//!
//! Drives the feedback modal headlessly: the draft comes from flags, the
//! timers run on tokio, and the delivered snapshot is printed as JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::runtime::Handle;
use tracing::info;

use crate::feedback::{
    FeedbackDraft, FeedbackHost, FeedbackModal, FeedbackTiming, ModalError, SubmitError,
    SubmitOutcome, TokioScheduler,
};

/// Result type for feedback command operations.
pub type FeedbackCommandResult = Result<(), FeedbackCommandError>;

/// Error type for feedback command operations.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackCommandError {
    /// A flag value was rejected by the form.
    #[error("{0}")]
    Modal(#[from] ModalError),

    /// Validation failed; the field messages were already printed.
    #[error("Feedback not sent: {0} field(s) need attention")]
    Invalid(usize),

    /// The host reported a delivery failure.
    #[error("{0}")]
    Submit(String),

    /// Interrupted before the workflow finished.
    #[error("Cancelled")]
    Cancelled,

    /// The async runtime could not start.
    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// The snapshot could not be encoded.
    #[error("Failed to encode feedback: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Draft values gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct FeedbackInput {
    /// Submitter name.
    pub name: String,
    /// Submitter email.
    pub email: String,
    /// Star rating, `None` leaves it unset.
    pub rating: Option<u8>,
    /// Category value such as `bug`.
    pub category: Option<String>,
    /// Free text.
    pub text: String,
    /// Make delivery fail with this reason.
    pub fail_with: Option<String>,
}

/// A delivered submission, as printed.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveredFeedback {
    /// Delivery time.
    pub submitted_at: DateTime<Utc>,
    /// The submitted snapshot.
    #[serde(flatten)]
    pub feedback: FeedbackDraft,
}

#[derive(Debug, Default)]
struct CliHost {
    fail_with: Option<String>,
    delivered: Option<DeliveredFeedback>,
}

impl FeedbackHost for CliHost {
    fn on_submit(&mut self, submission: FeedbackDraft) -> Result<(), SubmitError> {
        if let Some(reason) = &self.fail_with {
            return Err(SubmitError::Transport(reason.clone()));
        }
        self.delivered = Some(DeliveredFeedback {
            submitted_at: Utc::now(),
            feedback: submission,
        });
        Ok(())
    }

    fn on_close(&mut self) {
        info!("feedback modal closed");
    }
}

fn fill_form<H: FeedbackHost>(
    modal: &mut FeedbackModal<TokioScheduler, H>,
    input: &FeedbackInput,
) -> Result<(), ModalError> {
    modal.set_name(input.name.as_str())?;
    modal.set_email(input.email.as_str())?;
    if let Some(rating) = input.rating {
        modal.click_rating(rating)?;
    }
    if let Some(category) = &input.category {
        modal.set_category_value(category)?;
    }
    modal.set_feedback_text(input.text.as_str())?;
    Ok(())
}

/// Run the workflow to completion and print the delivered snapshot.
pub fn send_feedback(input: FeedbackInput, timing: FeedbackTiming) -> FeedbackCommandResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_workflow(input, timing))
}

async fn run_workflow(input: FeedbackInput, timing: FeedbackTiming) -> FeedbackCommandResult {
    let (scheduler, mut timers) = TokioScheduler::new(Handle::current());
    let host = CliHost {
        fail_with: input.fail_with.clone(),
        delivered: None,
    };
    let mut modal = FeedbackModal::new(scheduler, host, timing);

    modal.open();
    fill_form(&mut modal, &input)?;

    match modal.submit() {
        SubmitOutcome::Started => {}
        SubmitOutcome::Invalid => {
            let errors = modal.form().errors();
            for error in errors.iter() {
                eprintln!("  \x1b[31m✗\x1b[0m {}", error.message());
            }
            return Err(FeedbackCommandError::Invalid(errors.len()));
        }
        SubmitOutcome::Ignored(state) => {
            return Err(ModalError::NotEditing(state).into());
        }
    }
    eprintln!("\x1b[2mSending...\x1b[0m");

    while modal.is_open() {
        tokio::select! {
            fired = timers.recv() => match fired {
                Some(fired) => {
                    modal.handle_timer(fired);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                modal.close();
                return Err(FeedbackCommandError::Cancelled);
            }
        }

        if let Some(error) = modal.form().submit_error() {
            return Err(FeedbackCommandError::Submit(error.to_string()));
        }
        if let Some(delivered) = modal.host_mut().delivered.take() {
            println!("{}", serde_json::to_string_pretty(&delivered)?);
            eprintln!("\x1b[32m✓\x1b[0m Thank you for your feedback!");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn valid_input() -> FeedbackInput {
        FeedbackInput {
            name: "Ana".into(),
            email: "a@b.co".into(),
            rating: Some(4),
            category: Some("bug".into()),
            text: "Found a crash".into(),
            fail_with: None,
        }
    }

    fn quick() -> FeedbackTiming {
        FeedbackTiming {
            submit_latency: Duration::from_millis(10),
            auto_close: Duration::from_millis(10),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_input_completes() {
        assert!(run_workflow(valid_input(), quick()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_input_reports_field_count() {
        let input = FeedbackInput {
            email: "nope".into(),
            rating: None,
            ..valid_input()
        };
        let err = run_workflow(input, quick()).await.unwrap_err();
        assert!(matches!(err, FeedbackCommandError::Invalid(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_category_rejected() {
        let input = FeedbackInput {
            category: Some("praise".into()),
            ..valid_input()
        };
        let err = run_workflow(input, quick()).await.unwrap_err();
        assert!(matches!(
            err,
            FeedbackCommandError::Modal(ModalError::UnknownCategory(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_surfaces() {
        let input = FeedbackInput {
            fail_with: Some("offline".into()),
            ..valid_input()
        };
        let err = run_workflow(input, quick()).await.unwrap_err();
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        let input = FeedbackInput {
            rating: Some(9),
            ..valid_input()
        };
        let err = send_feedback(input, quick()).unwrap_err();
        assert!(matches!(
            err,
            FeedbackCommandError::Modal(ModalError::InvalidRating(9))
        ));
    }
}
