//! Add book command implementation.

use anyhow::{Context, Result};
use clap::Args;

use folio_core::BookDraft;

use crate::app::App;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Title
    #[arg(long)]
    pub title: String,

    /// Author
    #[arg(long)]
    pub author: String,

    /// Genre
    #[arg(long)]
    pub genre: String,

    /// Year of first publication
    #[arg(long)]
    pub year: i32,
}

pub async fn run(args: AddArgs, config: &Config) -> Result<()> {
    let draft = BookDraft {
        title: args.title,
        author: args.author,
        genre: args.genre,
        publication_year: args.year,
    };
    draft.validate()?;

    let app = App::start(config)?;
    let token = app.token().await?;

    let book = app
        .books
        .create(&token, &draft)
        .await
        .context("Failed to add book")?;

    output::success("Book added");
    println!();
    output::book_details(&book);

    Ok(())
}
