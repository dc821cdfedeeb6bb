//! Command-line interface for kiosk_server.

use clap::{Parser, Subcommand};

/// Default location of the SQLite database file.
pub const DEFAULT_DB_PATH: &str = "data/tictactoe.db";

/// Kiosk Tic-Tac-Toe - leaderboard and facts server
#[derive(Parser, Debug)]
#[command(name = "kiosk_server")]
#[command(about = "Leaderboard and college facts API for the tic-tac-toe kiosk", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the database file (created if it doesn't exist)
    #[arg(long, env = "DATABASE_PATH", default_value = DEFAULT_DB_PATH, global = true)]
    pub db_path: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Port to bind to
        #[arg(short, long, env = "PORT", default_value_t = 3001)]
        port: u16,

        /// Host to bind to
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
    },

    /// Print the current leaderboard standings
    Leaderboard {
        /// Maximum number of players to show
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },

    /// Append a college fact
    AddFact {
        /// Fact text
        text: String,
    },
}
