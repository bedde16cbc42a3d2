//! Book catalog subcommands.

mod add;
mod delete;
mod get;
mod list;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct BooksCommand {
    #[command(subcommand)]
    pub command: BooksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BooksSubcommand {
    /// List every book in the catalog
    List(list::ListArgs),

    /// Show a single book
    Get(get::GetArgs),

    /// Add a book
    Add(add::AddArgs),

    /// Change some fields of a book
    Update(update::UpdateArgs),

    /// Delete a book
    Delete(delete::DeleteArgs),
}

pub async fn handle(cmd: BooksCommand, config: &Config) -> Result<()> {
    match cmd.command {
        BooksSubcommand::List(args) => list::run(args, config).await,
        BooksSubcommand::Get(args) => get::run(args, config).await,
        BooksSubcommand::Add(args) => add::run(args, config).await,
        BooksSubcommand::Update(args) => update::run(args, config).await,
        BooksSubcommand::Delete(args) => delete::run(args, config).await,
    }
}
