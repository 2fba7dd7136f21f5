//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::VidxConfig;

/// VideoIndex search page widgets and feedback workflow.
///
/// Run the interactive page, send feedback from the command line, or
/// resolve media URLs.
#[derive(Parser, Debug)]
#[command(name = "vidx")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of .vidx/config.json.
    #[arg(long, global = true, value_name = "PATH", env = "VIDX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for vidx.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive search page.
    ///
    /// Type to search, Tab to reach the action bar, `f` to send feedback.
    Page(PageCommand),

    /// Send feedback without the interactive page.
    ///
    /// Examples:
    ///   vidx feedback --name Ana --email ana@example.com --rating 4 \
    ///     --category bug --text "Player freezes on seek"
    Feedback(FeedbackCommand),

    /// List feedback categories.
    Categories(CategoriesCommand),

    /// Resolve stored media paths to public URLs.
    #[command(subcommand)]
    Media(MediaCommands),

    /// Manage vidx configuration.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions.
    ///
    /// Examples:
    ///   vidx completions bash >> ~/.bashrc
    ///   vidx completions zsh >> ~/.zshrc
    ///   vidx completions fish > ~/.config/fish/completions/vidx.fish
    Completions(CompletionsCommand),
}

/// Arguments for the page command.
#[derive(Args, Debug)]
pub struct PageCommand {}

/// Arguments for the feedback command.
#[derive(Args, Debug)]
pub struct FeedbackCommand {
    /// Your name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Your email address.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Overall rating from 1 to 5.
    #[arg(short, long)]
    pub rating: Option<u8>,

    /// Feedback category (see `vidx categories`).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Feedback text (up to 500 characters).
    #[arg(short, long, default_value = "")]
    pub text: String,

    /// Override the simulated send delay, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Override how long the confirmation stays up, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub dwell_ms: Option<u64>,

    /// Make delivery fail with this reason.
    #[arg(long, value_name = "REASON", hide = true)]
    pub fail_with: Option<String>,
}

/// Arguments for the categories command.
#[derive(Args, Debug)]
pub struct CategoriesCommand {
    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Media subcommands.
#[derive(Subcommand, Debug)]
pub enum MediaCommands {
    /// Resolve a thumbnail path.
    Image(MediaImageCommand),
    /// Resolve a video path, or print the site origin without one.
    Video(MediaVideoCommand),
}

/// Where a resolved URL goes.
#[derive(Args, Debug, Clone, Copy)]
pub struct UrlOutputArgs {
    /// Copy the URL to the clipboard.
    #[arg(long)]
    pub copy: bool,

    /// Print the URL to stdout.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for `media image`.
#[derive(Args, Debug)]
pub struct MediaImageCommand {
    /// Stored thumbnail path.
    pub path: String,

    /// Output destination.
    #[command(flatten)]
    pub output: UrlOutputArgs,
}

/// Arguments for `media video`.
#[derive(Args, Debug)]
pub struct MediaVideoCommand {
    /// Stored video path.
    pub path: Option<String>,

    /// Output destination.
    #[command(flatten)]
    pub output: UrlOutputArgs,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all config values.
    Show(ConfigShowCommand),
    /// Get a single config value.
    Get(ConfigGetCommand),
    /// Set a config value.
    Set(ConfigSetCommand),
    /// Reset config to defaults.
    Reset(ConfigResetCommand),
    /// Print the config file path.
    Path(ConfigPathCommand),
}

/// Arguments for `config show`.
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Only show this section.
    #[arg(short, long)]
    pub section: Option<String>,
}

/// Arguments for `config get`.
#[derive(Args, Debug)]
pub struct ConfigGetCommand {
    /// Key in section.field form, e.g. feedback.auto_close_ms.
    pub key: String,
}

/// Arguments for `config set`.
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Key in section.field form.
    pub key: String,
    /// New value.
    pub value: String,
}

/// Arguments for `config reset`.
#[derive(Args, Debug)]
pub struct ConfigResetCommand {
    /// Section or section.field to reset; everything when omitted.
    pub key: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for `config path`.
#[derive(Args, Debug)]
pub struct ConfigPathCommand {}

/// Arguments for the completions command.
#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for.
    #[arg(value_parser = ["bash", "zsh", "fish"])]
    pub shell: String,
}

// ============================================================================
// Command implementations
// ============================================================================

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("\x1b[31mError:\x1b[0m {e}");
    std::process::exit(1);
}

impl PageCommand {
    /// Execute the page command.
    pub fn execute(&self, config: &VidxConfig) {
        if let Err(e) = commands::page::page(config) {
            fail(e);
        }
    }
}

impl FeedbackCommand {
    /// Effective timing: flags override the config.
    pub fn timing(&self, config: &VidxConfig) -> crate::feedback::FeedbackTiming {
        let mut timing = config.feedback.timing();
        if let Some(ms) = self.latency_ms {
            timing.submit_latency = Duration::from_millis(ms);
        }
        if let Some(ms) = self.dwell_ms {
            timing.auto_close = Duration::from_millis(ms);
        }
        timing
    }

    /// Execute the feedback command.
    pub fn execute(&self, config: &VidxConfig) {
        use commands::feedback::{send_feedback, FeedbackInput};

        let input = FeedbackInput {
            name: self.name.clone(),
            email: self.email.clone(),
            rating: self.rating,
            category: self.category.clone(),
            text: self.text.clone(),
            fail_with: self.fail_with.clone(),
        };
        if let Err(e) = send_feedback(input, self.timing(config)) {
            fail(e);
        }
    }
}

impl CategoriesCommand {
    /// Execute the categories command.
    pub fn execute(&self) {
        if let Err(e) = commands::categories::categories(self.json) {
            fail(e);
        }
    }
}

impl MediaImageCommand {
    /// Execute the media image command.
    pub fn execute(&self, config: &VidxConfig) {
        let mode = output::get_effective_mode(self.output.copy, self.output.stdout, config);
        if let Err(e) = commands::media::media_image(config, &self.path, &mode) {
            fail(e);
        }
    }
}

impl MediaVideoCommand {
    /// Execute the media video command.
    pub fn execute(&self, config: &VidxConfig) {
        let mode = output::get_effective_mode(self.output.copy, self.output.stdout, config);
        if let Err(e) = commands::media::media_video(config, self.path.as_deref(), &mode) {
            fail(e);
        }
    }
}

impl ConfigShowCommand {
    /// Execute the config show command.
    pub fn execute(&self, path: Option<&Path>) {
        if let Err(e) = commands::config::config_show(path, self.section.as_deref()) {
            fail(e);
        }
    }
}

impl ConfigGetCommand {
    /// Execute the config get command.
    pub fn execute(&self, path: Option<&Path>) {
        if let Err(e) = commands::config::config_get(path, &self.key) {
            fail(e);
        }
    }
}

impl ConfigSetCommand {
    /// Execute the config set command.
    pub fn execute(&self, path: Option<&Path>) {
        if let Err(e) = commands::config::config_set(path, &self.key, &self.value) {
            fail(e);
        }
    }
}

impl ConfigResetCommand {
    /// Execute the config reset command.
    pub fn execute(&self, path: Option<&Path>) {
        use std::io::{self, Write};

        // Confirm unless --yes (for resetting all)
        if self.key.is_none() && !self.yes {
            print!("Reset all config to defaults? [Y/n]: ");
            let _ = io::stdout().flush();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_ok() {
                let input = input.trim().to_lowercase();
                if input == "n" || input == "no" {
                    println!("Cancelled.");
                    return;
                }
            }
        }

        if let Err(e) = commands::config::config_reset(path, self.key.as_deref()) {
            fail(e);
        }
    }
}

impl ConfigPathCommand {
    /// Execute the config path command.
    pub fn execute(&self, path: Option<&Path>) {
        if let Err(e) = commands::config::config_path(path) {
            fail(e);
        }
    }
}

impl CompletionsCommand {
    /// Execute the completions command - generates shell completions.
    pub fn execute(&self) {
        if let Err(e) = commands::completions::completions(&self.shell) {
            fail(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["vidx", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_command_returns_none() {
        let cli = Cli::try_parse_from(["vidx"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["vidx", "categories", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_feedback_command_flags() {
        let cli = Cli::try_parse_from([
            "vidx", "feedback", "--name", "Ana", "--email", "a@b.co", "-r", "4", "-c", "bug",
            "-t", "Crash", "--latency-ms", "0",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Feedback(cmd)) => {
                assert_eq!(cmd.name, "Ana");
                assert_eq!(cmd.rating, Some(4));
                assert_eq!(cmd.category.as_deref(), Some("bug"));
                assert_eq!(cmd.latency_ms, Some(0));
                assert_eq!(cmd.dwell_ms, None);
            }
            _ => panic!("Expected Feedback command"),
        }
    }

    #[test]
    fn test_feedback_timing_overrides() {
        let cli = Cli::try_parse_from(["vidx", "feedback", "--dwell-ms", "5"]).unwrap();
        let Some(Commands::Feedback(cmd)) = cli.command else {
            panic!("Expected Feedback command");
        };
        let timing = cmd.timing(&VidxConfig::default());
        assert_eq!(timing.auto_close, Duration::from_millis(5));
        assert_eq!(timing.submit_latency, Duration::from_millis(1500));
    }

    #[test]
    fn test_media_video_path_optional() {
        let cli = Cli::try_parse_from(["vidx", "media", "video"]).unwrap();
        match cli.command {
            Some(Commands::Media(MediaCommands::Video(cmd))) => {
                assert!(cmd.path.is_none());
                assert!(!cmd.output.copy);
            }
            _ => panic!("Expected media video command"),
        }
    }

    #[test]
    fn test_media_image_requires_path() {
        assert!(Cli::try_parse_from(["vidx", "media", "image"]).is_err());
    }

    #[test]
    fn test_config_set_command() {
        let cli =
            Cli::try_parse_from(["vidx", "config", "set", "feedback.auto_close_ms", "10"]).unwrap();
        match cli.command {
            Some(Commands::Config(ConfigCommands::Set(cmd))) => {
                assert_eq!(cmd.key, "feedback.auto_close_ms");
                assert_eq!(cmd.value, "10");
            }
            _ => panic!("Expected config set command"),
        }
    }

    #[test]
    fn test_global_config_path() {
        let cli =
            Cli::try_parse_from(["vidx", "config", "path", "--config", "/tmp/v.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/v.json")));
    }

    #[test]
    fn test_invalid_shell_rejected() {
        let result = Cli::try_parse_from(["vidx", "completions", "powershell"]);
        assert!(result.is_err());
    }
}
