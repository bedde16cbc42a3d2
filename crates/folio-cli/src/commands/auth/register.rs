//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use folio_core::Registration;

use crate::app::App;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Password for the new account
    #[arg(long)]
    pub password: String,

    /// Given name
    #[arg(long)]
    pub first_name: String,

    /// Family name
    #[arg(long)]
    pub last_name: String,
}

pub async fn run(args: RegisterArgs, config: &Config) -> Result<()> {
    let profile = Registration {
        username: args.username,
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    profile.validate()?;

    let app = App::start(config)?;

    eprintln!("{}", "Creating account...".dimmed());

    app.manager
        .register(&profile)
        .await
        .context("Failed to register")?;

    output::success("Account created and logged in");
    println!();
    output::field("User", &profile.username);
    output::field("Email", &profile.email);

    Ok(())
}
