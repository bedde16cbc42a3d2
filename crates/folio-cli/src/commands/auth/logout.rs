//! Logout command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::app::App;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, config: &Config) -> Result<()> {
    let app = App::start(config)?;

    if !app.manager.is_authenticated() {
        eprintln!("{}", "No active session.".dimmed());
        return Ok(());
    }

    // Always ends the local session; a failed revocation is only logged.
    app.manager.logout().await;

    output::success("Logged out");

    Ok(())
}
