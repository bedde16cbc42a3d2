//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use folio_core::types::DEFAULT_API_URL;

use crate::commands::auth::AuthCommand;
use crate::commands::books::BooksCommand;

/// Command-line client for the folio book catalog.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version = env!("FOLIO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every command.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Base URL of the book API
    #[arg(long, env = "FOLIO_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Where the session is stored (defaults to the user data directory)
    #[arg(long, env = "FOLIO_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "FOLIO_TIMEOUT", default_value_t = 30, global = true)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in, sign out and inspect the session
    Auth(AuthCommand),

    /// Browse and edit the book catalog
    Books(BooksCommand),
}
