//! Whoami command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::app::{App, NO_SESSION};
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Also ask the server whether the access token is still accepted
    #[arg(long)]
    pub validate: bool,
}

pub async fn run(args: WhoamiArgs, config: &Config) -> Result<()> {
    let app = App::start(config)?;

    let state = app.manager.state();
    let Some(session) = state.session else {
        bail!(NO_SESSION);
    };

    output::field("API", config.api.as_str());
    output::field("Session file", &config.session_file.display().to_string());
    output::field("Expires", &session.expires_at.to_rfc3339());
    if let Some(delay) = app.manager.renewal_delay() {
        output::field("Renews in", &format!("{}s", delay.as_secs()));
    }

    if args.validate {
        let token = app.token().await?;
        let validation = app
            .auth
            .validate(&token)
            .await
            .context("Failed to validate token")?;

        output::field("Valid", if validation.valid { "yes" } else { "no" });
        if let Some(username) = validation.payload.get("username").and_then(|v| v.as_str()) {
            output::field("User", username);
        }
    }

    Ok(())
}
