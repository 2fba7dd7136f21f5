//! Output handlers for resolved URLs.
//!
//! A URL is either printed or copied to the system clipboard.

use crate::config::VidxConfig;

pub use crate::config::OutputMode;

/// Error type for output operations.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Failed to copy content to the system clipboard.
    #[error("Failed to copy to clipboard: {0}")]
    ClipboardError(String),
}

/// Send a resolved URL to the chosen destination.
pub fn output_url(url: &str, mode: &OutputMode) -> Result<(), OutputError> {
    match mode {
        OutputMode::Clipboard => copy_to_clipboard(url),
        OutputMode::Stdout => {
            print_to_stdout(url);
            Ok(())
        }
    }
}

/// Copy text to the system clipboard.
///
/// If clipboard access fails, falls back to stdout and returns an error.
pub fn copy_to_clipboard(text: &str) -> Result<(), OutputError> {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match result {
        Ok(()) => {
            eprintln!("\x1b[32mCopied to clipboard:\x1b[0m {text}");
            Ok(())
        }
        Err(e) => {
            eprintln!("\x1b[31mFailed to access clipboard:\x1b[0m {e}");
            eprintln!("\x1b[2mFalling back to stdout...\x1b[0m");
            print_to_stdout(text);
            Err(OutputError::ClipboardError(e.to_string()))
        }
    }
}

/// Print text to stdout.
pub fn print_to_stdout(text: &str) {
    println!("{text}");
}

/// Get the effective output mode.
///
/// Explicit flags win over the config default; `copy` wins over `stdout`.
pub fn get_effective_mode(copy: bool, stdout: bool, config: &VidxConfig) -> OutputMode {
    if copy {
        OutputMode::Clipboard
    } else if stdout {
        OutputMode::Stdout
    } else {
        config.output.default.clone()
    }
}
