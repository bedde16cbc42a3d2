//! Get book command implementation.

use anyhow::{Context, Result};
use clap::Args;

use folio_core::BookId;

use crate::app::App;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Book ID
    pub id: String,

    /// Print the book as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: GetArgs, config: &Config) -> Result<()> {
    let id: BookId = args.id.parse().context("Invalid book ID")?;

    let app = App::start(config)?;
    let token = app.token().await?;

    let book = app
        .books
        .get(&token, &id)
        .await
        .context("Failed to get book")?;

    if args.json {
        output::json_pretty(&book)
    } else {
        output::book_details(&book);
        Ok(())
    }
}
