//! Terminal host for the search page.
//!
//! Renders the search box, the action bar and the feedback modal overlay,
//! and drives the modal's timers from a tokio runtime.

mod app;
mod ui;

pub use app::{
    FormFocus, PageApp, PageEvent, PageFocus, PageHost, PageSearchBox, PageState,
    ReceivedFeedback,
};
