//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use folio_core::Credentials;

use crate::app::App;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, config: &Config) -> Result<()> {
    let credentials = Credentials::new(&args.username, &args.password);
    credentials.validate()?;

    let app = App::start(config)?;

    eprintln!("{}", "Logging in...".dimmed());

    app.manager
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", credentials.username());
    output::field("API", config.api.as_str());
    if let Some(expires_at) = app.manager.state().expires_at() {
        output::field("Expires", &expires_at.to_rfc3339());
    }

    Ok(())
}
