//! Refresh token command implementation.

use anyhow::{Context as _, Result, bail};
use clap::Args;
use colored::Colorize;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(ctx: &Context, _args: RefreshTokenArgs) -> Result<()> {
    if !ctx.client.session().is_authenticated()? {
        bail!("No active session. Run 'sowat-admin auth login' first.");
    }

    eprintln!("{}", "Refreshing session...".dimmed());

    ctx.auth()
        .refresh()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");

    Ok(())
}
