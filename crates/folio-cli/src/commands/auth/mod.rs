//! Session subcommands.

mod login;
mod logout;
mod register;
mod watch;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Sign in with a username and password
    Login(login::LoginArgs),

    /// Create an account and sign in
    Register(register::RegisterArgs),

    /// Sign out and revoke the session
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// Keep the session renewed and report changes until interrupted
    Watch(watch::WatchArgs),
}

pub async fn handle(cmd: AuthCommand, config: &Config) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, config).await,
        AuthSubcommand::Register(args) => register::run(args, config).await,
        AuthSubcommand::Logout(args) => logout::run(args, config).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, config).await,
        AuthSubcommand::Watch(args) => watch::run(args, config).await,
    }
}
