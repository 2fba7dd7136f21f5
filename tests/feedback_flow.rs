//! End-to-end feedback modal workflows on a virtual clock.

use std::time::Duration;

use vidx::feedback::{
    Category, FeedbackDraft, FeedbackHost, FeedbackModal, FeedbackTiming, Field, FieldIssue,
    Lifecycle, ManualScheduler, SubmitError, SubmitOutcome, TimerFired,
};

#[derive(Debug, Default)]
struct Page {
    submitted: Vec<FeedbackDraft>,
    closes: usize,
    states: Vec<Lifecycle>,
    offline: Option<String>,
}

impl FeedbackHost for Page {
    fn on_submit(&mut self, submission: FeedbackDraft) -> Result<(), SubmitError> {
        if let Some(reason) = &self.offline {
            return Err(SubmitError::Transport(reason.clone()));
        }
        self.submitted.push(submission);
        Ok(())
    }

    fn on_close(&mut self) {
        self.closes += 1;
    }

    fn on_transition(&mut self, _from: Lifecycle, to: Lifecycle) {
        self.states.push(to);
    }
}

type Modal = FeedbackModal<ManualScheduler, Page>;

fn setup() -> (Modal, ManualScheduler) {
    let clock = ManualScheduler::new();
    let modal = FeedbackModal::new(clock.clone(), Page::default(), FeedbackTiming::default());
    (modal, clock)
}

fn fill_valid(modal: &mut Modal) {
    modal.set_name("Ana").unwrap();
    modal.set_email("a@b.co").unwrap();
    modal.click_rating(4).unwrap();
    modal.set_category_value("bug").unwrap();
    modal.set_feedback_text("Found a crash").unwrap();
}

fn run_for(modal: &mut Modal, clock: &ManualScheduler, ms: u64) {
    for fired in clock.advance(Duration::from_millis(ms)) {
        modal.handle_timer(fired);
    }
}

#[test]
fn valid_submission_runs_full_lifecycle() {
    let (mut modal, clock) = setup();
    modal.open();
    fill_valid(&mut modal);

    assert_eq!(modal.submit(), SubmitOutcome::Started);
    assert_eq!(modal.lifecycle(), Lifecycle::Submitting);
    assert!(modal.host().submitted.is_empty());

    run_for(&mut modal, &clock, 1499);
    assert_eq!(modal.lifecycle(), Lifecycle::Submitting);

    run_for(&mut modal, &clock, 1);
    assert_eq!(modal.lifecycle(), Lifecycle::Submitted);
    assert_eq!(modal.host().submitted.len(), 1);

    run_for(&mut modal, &clock, 2000);
    assert_eq!(modal.lifecycle(), Lifecycle::Closed);

    let host = modal.host();
    assert_eq!(
        host.states,
        vec![
            Lifecycle::Editing,
            Lifecycle::Submitting,
            Lifecycle::Submitted,
            Lifecycle::Closed
        ]
    );
    assert_eq!(host.closes, 1);

    let sent = &host.submitted[0];
    assert_eq!(sent.name, "Ana");
    assert_eq!(sent.email, "a@b.co");
    assert_eq!(sent.rating.get(), 4);
    assert_eq!(sent.category, Some(Category::Bug));
    assert_eq!(sent.feedback_text, "Found a crash");
}

#[test]
fn empty_submission_reports_every_field() {
    let (mut modal, clock) = setup();
    modal.open();

    assert_eq!(modal.submit(), SubmitOutcome::Invalid);
    assert_eq!(modal.lifecycle(), Lifecycle::Editing);

    let errors = modal.form().errors();
    assert_eq!(errors.len(), 5);
    for field in Field::ALL {
        assert_eq!(errors.get(field), Some(FieldIssue::Required));
    }

    run_for(&mut modal, &clock, 10_000);
    assert!(modal.host().submitted.is_empty());
    assert_eq!(clock.pending(), 0);
}

#[test]
fn overlong_feedback_is_the_only_error() {
    let (mut modal, _) = setup();
    modal.open();
    fill_valid(&mut modal);
    modal.set_feedback_text("x".repeat(501)).unwrap();

    assert_eq!(modal.submit(), SubmitOutcome::Invalid);
    let errors = modal.form().errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(Field::Feedback), Some(FieldIssue::TooLong));
    assert_eq!(
        errors.message(Field::Feedback).as_deref(),
        Some("Feedback must be 500 characters or less")
    );
    assert!(modal.host().submitted.is_empty());
}

#[test]
fn exactly_500_characters_is_accepted() {
    let (mut modal, _) = setup();
    modal.open();
    fill_valid(&mut modal);
    modal.set_feedback_text("é".repeat(500)).unwrap();
    assert_eq!(modal.submit(), SubmitOutcome::Started);
}

#[test]
fn manual_close_during_success_view_closes_once() {
    let (mut modal, clock) = setup();
    modal.open();
    fill_valid(&mut modal);
    modal.submit();
    run_for(&mut modal, &clock, 1500);
    assert_eq!(modal.lifecycle(), Lifecycle::Submitted);

    run_for(&mut modal, &clock, 500);
    assert!(modal.close());
    assert_eq!(modal.lifecycle(), Lifecycle::Closed);
    assert_eq!(modal.host().closes, 1);

    run_for(&mut modal, &clock, 1500);
    assert_eq!(modal.lifecycle(), Lifecycle::Closed);
    assert_eq!(modal.host().closes, 1);
    assert_eq!(modal.host().submitted.len(), 1);
}

#[test]
fn late_auto_close_after_reopen_is_ignored() {
    let (mut modal, clock) = setup();
    modal.open();
    fill_valid(&mut modal);
    modal.submit();
    run_for(&mut modal, &clock, 1500);

    // Collected but not yet delivered, as if the host's event queue lagged.
    let late: Vec<TimerFired> = clock.advance(Duration::from_millis(2000));
    assert_eq!(late.len(), 1);

    modal.close();
    modal.open();
    modal.set_name("Bo").unwrap();

    for fired in late {
        assert!(!modal.handle_timer(fired));
    }
    assert_eq!(modal.lifecycle(), Lifecycle::Editing);
    assert_eq!(modal.form().draft().name, "Bo");
    assert_eq!(modal.host().closes, 1);
}

#[test]
fn close_is_idempotent() {
    let (mut modal, _) = setup();
    assert!(!modal.close());
    assert_eq!(modal.host().closes, 0);

    modal.open();
    assert!(modal.close());
    assert!(!modal.close());
    assert_eq!(modal.host().closes, 1);
}

#[test]
fn repeated_submit_sends_once() {
    let (mut modal, clock) = setup();
    modal.open();
    fill_valid(&mut modal);

    assert_eq!(modal.submit(), SubmitOutcome::Started);
    assert_eq!(
        modal.submit(),
        SubmitOutcome::Ignored(Lifecycle::Submitting)
    );
    run_for(&mut modal, &clock, 1500);
    assert_eq!(modal.submit(), SubmitOutcome::Ignored(Lifecycle::Submitted));
    run_for(&mut modal, &clock, 2000);

    assert_eq!(modal.host().submitted.len(), 1);
}

#[test]
fn closing_while_sending_still_delivers_once() {
    let (mut modal, clock) = setup();
    modal.open();
    fill_valid(&mut modal);
    modal.submit();

    run_for(&mut modal, &clock, 700);
    assert!(modal.close());
    assert_eq!(modal.detached_submissions(), 1);

    run_for(&mut modal, &clock, 800);
    assert_eq!(modal.host().submitted.len(), 1);
    assert_eq!(modal.lifecycle(), Lifecycle::Closed);
    assert_eq!(modal.detached_submissions(), 0);

    run_for(&mut modal, &clock, 5000);
    assert_eq!(modal.host().closes, 1);
}

#[test]
fn reopen_starts_with_a_blank_form() {
    let (mut modal, _) = setup();
    modal.open();
    fill_valid(&mut modal);
    modal.submit();
    modal.close();

    modal.open();
    let form = modal.form();
    assert_eq!(form.draft(), &FeedbackDraft::default());
    assert!(form.errors().is_empty());
    assert_eq!(form.feedback_counter(), "0/500");
}

#[test]
fn transport_failure_keeps_the_draft() {
    let (mut modal, clock) = setup();
    modal.host_mut().offline = Some("network unreachable".into());
    modal.open();
    fill_valid(&mut modal);
    modal.submit();
    run_for(&mut modal, &clock, 1500);

    assert_eq!(modal.lifecycle(), Lifecycle::Editing);
    assert_eq!(modal.form().draft().name, "Ana");
    let message = modal.form().submit_error().unwrap_or_default();
    assert!(message.contains("network unreachable"));

    modal.host_mut().offline = None;
    assert_eq!(modal.submit(), SubmitOutcome::Started);
    assert!(modal.form().submit_error().is_none());
    run_for(&mut modal, &clock, 1500);
    assert_eq!(modal.lifecycle(), Lifecycle::Submitted);
    assert_eq!(modal.host().submitted.len(), 1);
}

#[test]
fn edits_rejected_outside_editing() {
    let (mut modal, _) = setup();
    assert!(modal.set_name("Ana").is_err());

    modal.open();
    fill_valid(&mut modal);
    modal.submit();
    assert!(modal.set_feedback_text("changed").is_err());
    assert!(modal.click_rating(1).is_err());
}
