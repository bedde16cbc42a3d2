//! List books command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::app::App;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the books as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, config: &Config) -> Result<()> {
    let app = App::start(config)?;
    let token = app.token().await?;

    let books = app
        .books
        .list(&token)
        .await
        .context("Failed to list books")?;

    if args.json {
        return output::json_pretty(&books);
    }

    if books.is_empty() {
        eprintln!("{}", "No books found.".dimmed());
        return Ok(());
    }

    for book in &books {
        output::book_line(book);
    }

    Ok(())
}
