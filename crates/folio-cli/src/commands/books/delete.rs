//! Delete book command implementation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use folio_core::BookId;

use crate::app::App;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Book ID
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn run(args: DeleteArgs, config: &Config) -> Result<()> {
    let id: BookId = args.id.parse().context("Invalid book ID")?;

    let app = App::start(config)?;
    let token = app.token().await?;

    if !args.yes {
        eprint!("Are you sure you want to delete book {}? [y/N] ", id);
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let book = app
        .books
        .delete(&token, &id)
        .await
        .context("Failed to delete book")?;

    output::success(&format!("Deleted \"{}\"", book.title));

    Ok(())
}
