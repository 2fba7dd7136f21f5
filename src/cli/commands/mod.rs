//! Command implementations for the vidx CLI.
//!
//! This module contains the actual implementations of CLI commands,
//! separated from the argument parsing definitions in cli/mod.rs.

pub mod categories;
pub mod completions;
pub mod config;
pub mod feedback;
pub mod media;
pub mod page;
