//! CLI command definitions using clap
//!
//! Defines the command structure for the `lec` CLI tool.

use clap::{Parser, Subcommand, ValueEnum};

/// lectern - Course Platform TUI
///
/// A terminal client for the assembly-language course platform.
/// Run without arguments to launch the TUI mode.
#[derive(Parser, Debug)]
#[command(name = "lec", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and print a quiz for a course module
    Quiz(QuizArgs),

    /// Print the student progress roster
    Roster(RosterArgs),

    /// Show one student's detail report
    Student(StudentArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Quiz Command
// ─────────────────────────────────────────────────────────────────────────────

/// Quiz generation arguments
#[derive(Parser, Debug)]
pub struct QuizArgs {
    /// Course module id (1-5)
    #[arg(short, long)]
    pub module: String,

    /// Number of questions to request (defaults to the configured count)
    #[arg(short = 'n', long)]
    pub count: Option<u32>,

    /// Mark the correct choice in the output
    #[arg(long)]
    pub answers: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Roster Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Roster listing arguments
#[derive(Parser, Debug)]
pub struct RosterArgs {
    /// Also print the most-missed questions
    #[arg(long)]
    pub missed: bool,
}

/// Student detail arguments
#[derive(Parser, Debug)]
pub struct StudentArgs {
    /// Student id (e.g. s1)
    pub id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },
    /// Print the whole configuration
    Show,
}

/// Keys accepted by `config get` / `config set`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigKey {
    /// Course backend base URL
    ApiUrl,
    /// Analytics endpoint base (set to "none" to use built-in fixtures)
    AnalyticsUrl,
    /// Institutional email domain
    EmailDomain,
    /// Professor sign-up key
    ProfessorKey,
    /// Default quiz question count
    QuestionCount,
}
