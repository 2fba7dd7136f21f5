//! Page command implementation.
//!
//! Runs the interactive search page until the user quits.

use tracing::info;

use crate::config::VidxConfig;
use crate::tui::PageApp;

/// Result type for page command operations.
pub type PageCommandResult = Result<(), PageCommandError>;

/// Error type for page command operations.
#[derive(Debug, thiserror::Error)]
pub enum PageCommandError {
    /// Terminal or runtime setup failed.
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the interactive page.
///
/// Timers run on a one-worker tokio runtime while the terminal loop owns
/// the main thread.
pub fn page(config: &VidxConfig) -> PageCommandResult {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()?;

    info!("page started");
    let mut app = PageApp::new(config, runtime.handle().clone())?;
    let result = app.run();
    app.cleanup()?;
    info!("page closed");
    result?;
    Ok(())
}
