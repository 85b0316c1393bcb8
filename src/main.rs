//! lectern - Course Platform TUI
//!
//! A terminal client for an assembly-language course platform.
//! Run without arguments to launch the TUI, or use subcommands for CLI mode.
//!
//! Available as the `lec` command.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lectern::cli::commands::{Cli, Commands};
use lectern::cli::{config, quiz, roster};
use lectern::core::Config;
use lectern::error::{LecternError, Result};
use lectern::tui::App;

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        handle_error(e);
        std::process::exit(1);
    }
}

/// Handle errors, with gentler wording for expected lookup misses
fn handle_error(e: LecternError) {
    match &e {
        // Lookup misses are normal CLI outcomes, not faults
        LecternError::StudentNotFound(_) | LecternError::ModuleNotFound(_) => {
            eprintln!("{}", e);
        }
        _ => {
            eprintln!("Error: {}", e);
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // No subcommand - launch TUI mode
        None => run_tui().await,

        Some(Commands::Quiz(args)) => quiz::handle_quiz(args).await,
        Some(Commands::Roster(args)) => roster::handle_roster(args).await,
        Some(Commands::Student(args)) => roster::handle_student(args).await,
        Some(Commands::Config(args)) => config::handle_config(args.command),
    }
}

/// Run the TUI application
async fn run_tui() -> Result<()> {
    let config = Config::load()?;
    let mut app = App::new(&config)?;
    app.run().await
}
