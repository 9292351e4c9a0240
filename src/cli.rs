//! Command-line interface for the kyouen stage registry.

use clap::{Parser, Subcommand};

/// Kyouen - stage validation and registry
#[derive(Parser, Debug)]
#[command(name = "kyouen")]
#[command(about = "Validate and register kyouen puzzle stages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "kyouen.toml")]
    pub config: std::path::PathBuf,

    /// Database file (overrides config and KYOUEN_DB_PATH)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search a stage for its first kyouen
    Check {
        /// Board side length
        #[arg(short, long, default_value = "6")]
        size: usize,

        /// Stage string (0 empty, 1 stone, 2 marked stone)
        #[arg(long)]
        stage: String,
    },

    /// Print the eight rotations and reflections of a stage
    Orbit {
        /// Board side length
        #[arg(short, long, default_value = "6")]
        size: usize,

        /// Stage string
        #[arg(long)]
        stage: String,
    },

    /// Validate and register a new stage
    Register {
        /// Board side length
        #[arg(short, long, default_value = "6")]
        size: usize,

        /// Stage string
        #[arg(long)]
        stage: String,

        /// Name recorded as the stage creator
        #[arg(long)]
        creator: String,
    },

    /// Submit a solved stage with its four kyouen stones marked as 2
    Clear {
        /// Registered stage number
        #[arg(long)]
        stage_no: i32,

        /// Stage string with the solution marked
        #[arg(long)]
        stage: String,

        /// Name of the user clearing the stage
        #[arg(long)]
        user: String,
    },

    /// List registered stages
    List {
        /// First stage number to include
        #[arg(long)]
        start: Option<i32>,

        /// Maximum number of stages
        #[arg(long)]
        limit: Option<i64>,

        /// Newest stages first, ignoring --start
        #[arg(long)]
        recent: bool,
    },

    /// Record stages a user cleared offline and print all their clears
    SyncClears {
        /// Name of the user the clears belong to
        #[arg(long)]
        user: String,

        /// Cleared stage numbers, comma separated; unknown numbers are skipped
        #[arg(long = "stage-no", value_delimiter = ',', required = true)]
        stage_nos: Vec<i32>,
    },

    /// Show the newest clears across all users
    Activity {
        /// Maximum number of clears
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Show registry statistics
    Stats {
        /// Also list this user's clears
        #[arg(long)]
        user: Option<String>,
    },
}
