pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "okr-eval")]
#[command(about = "Star rating conversion and role checks for OKR evaluations")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the session storage directory
    #[arg(long, global = true)]
    pub storage_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert a star tier (1-5) to its score
    Score {
        #[arg(allow_negative_numbers = true)]
        tier: i64,
    },
    /// Convert a score to the highest qualifying star tier
    Stars {
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },
    /// Show the label of a star tier
    Label {
        #[arg(allow_negative_numbers = true)]
        tier: i64,
    },
    /// Store a user info JSON object as the current session
    Login { user_info: String },
    /// Clear the current session
    Logout,
    /// Print the current session
    Whoami,
    /// Check whether the current user holds a role
    HasRole { role: String },
    /// Check whether the current user is the privileged owner
    IsOwner,
    /// Decide whether the current user may open a route
    Access { path: String },
}
