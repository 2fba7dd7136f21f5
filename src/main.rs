//! vidx - VideoIndex search page widgets and feedback workflow.
//!
//! This is the main entry point for the vidx CLI tool.

use clap::Parser;
use vidx::cli::{Cli, Commands, ConfigCommands, MediaCommands};
use vidx::config::VidxConfig;
use vidx::logging::{init_logging, LogSettings};

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let Some(command) = cli.command else {
        println!("vidx - VideoIndex search page widgets and feedback workflow.");
        println!();
        println!("Run 'vidx --help' for available commands.");
        println!();
        println!("Quick start:");
        println!("  vidx page                     # Interactive search page");
        println!("  vidx categories               # Feedback categories");
        println!("  vidx media video <PATH>       # Public URL for a video");
        return;
    };

    // Config commands must work even when the file does not parse.
    if let Commands::Config(subcmd) = &command {
        match subcmd {
            ConfigCommands::Show(c) => c.execute(config_path),
            ConfigCommands::Get(c) => c.execute(config_path),
            ConfigCommands::Set(c) => c.execute(config_path),
            ConfigCommands::Reset(c) => c.execute(config_path),
            ConfigCommands::Path(c) => c.execute(config_path),
        }
        return;
    }

    let config = match VidxConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            std::process::exit(1);
        }
    };

    let interactive = matches!(command, Commands::Page(_));
    let settings = LogSettings::from_config(&config.logging, cli.verbose, interactive);
    if let Err(e) = init_logging(&settings) {
        eprintln!("\x1b[31mError:\x1b[0m {e}");
        std::process::exit(1);
    }

    match command {
        Commands::Page(c) => c.execute(&config),
        Commands::Feedback(c) => c.execute(&config),
        Commands::Categories(c) => c.execute(),
        Commands::Media(subcmd) => match subcmd {
            MediaCommands::Image(c) => c.execute(&config),
            MediaCommands::Video(c) => c.execute(&config),
        },
        Commands::Completions(c) => c.execute(),
        Commands::Config(_) => {}
    }
}
