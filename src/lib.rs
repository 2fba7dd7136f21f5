//! vidx - VideoIndex search page widgets and feedback workflow.
//!
//! The core is the feedback modal: a draft form with validation, a star
//! rating control, and a lifecycle driven by cancellable timers. Around it
//! sit the search box, the action bar and the media URL resolver, plus a
//! terminal host and a CLI.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod actions;
pub mod cli;
pub mod config;
pub mod feedback;
pub mod logging;
pub mod media;
pub mod search;
pub mod tui;

pub use feedback::{FeedbackDraft, FeedbackHost, FeedbackModal, Lifecycle};
