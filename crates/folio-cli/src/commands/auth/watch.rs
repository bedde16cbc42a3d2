//! Watch command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use folio_core::Route;

use crate::app::{App, NO_SESSION};
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct WatchArgs {}

pub async fn run(_args: WatchArgs, config: &Config) -> Result<()> {
    let app = App::start(config)?;

    if !app.manager.is_authenticated() {
        bail!(NO_SESSION);
    }

    let mut states = app.manager.subscribe();
    let mut routes = app.manager.routes();

    let expires_at = states.borrow_and_update().expires_at();
    if let Some(expires_at) = expires_at {
        output::field("Expires", &expires_at.to_rfc3339());
    }
    eprintln!("{}", "Watching session (Ctrl-C to stop)...".dimmed());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!();
                eprintln!("{}", "Stopped.".dimmed());
                return Ok(());
            }
            changed = states.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let expires_at = states.borrow_and_update().expires_at();
                if let Some(expires_at) = expires_at {
                    output::success(&format!("Session renewed, expires {}", expires_at.to_rfc3339()));
                }
            }
            route = routes.recv() => match route {
                Ok(Route::SignIn) => {
                    output::field("Route", "sign-in");
                    bail!("Session ended. Run 'folio auth login' to sign in again.");
                }
                Ok(Route::Catalog) => output::field("Route", "catalog"),
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Missed route signals"),
                Err(RecvError::Closed) => return Ok(()),
            },
        }
    }
}
