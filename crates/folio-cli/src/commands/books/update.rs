//! Update book command implementation.

use anyhow::{Context, Result};
use clap::Args;

use folio_core::{BookId, BookPatch};

use crate::app::App;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Book ID
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New author
    #[arg(long)]
    pub author: Option<String>,

    /// New genre
    #[arg(long)]
    pub genre: Option<String>,

    /// New year of first publication
    #[arg(long)]
    pub year: Option<i32>,
}

pub async fn run(args: UpdateArgs, config: &Config) -> Result<()> {
    let id: BookId = args.id.parse().context("Invalid book ID")?;
    let patch = BookPatch {
        title: args.title,
        author: args.author,
        genre: args.genre,
        publication_year: args.year,
    };
    patch.validate()?;

    let app = App::start(config)?;
    let token = app.token().await?;

    let book = app
        .books
        .update(&token, &id, &patch)
        .await
        .context("Failed to update book")?;

    output::success("Book updated");
    println!();
    output::book_details(&book);

    Ok(())
}
