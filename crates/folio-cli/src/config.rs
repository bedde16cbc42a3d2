//! Resolved runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;

use folio_core::ApiUrl;

use crate::cli::GlobalArgs;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiUrl,
    pub session_file: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let api = ApiUrl::new(&args.api_url).context("Invalid API URL")?;

        if args.timeout == 0 {
            bail!("Timeout must be at least one second");
        }

        let session_file = match &args.session_file {
            Some(path) => path.clone(),
            None => default_session_file()?,
        };

        Ok(Self {
            api,
            session_file,
            timeout: Duration::from_secs(args.timeout),
        })
    }
}

/// `session.json` in the platform data directory.
fn default_session_file() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "folio").context("Could not determine data directory")?;

    Ok(dirs.data_dir().join("session.json"))
}
