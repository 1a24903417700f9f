//! Logout command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(ctx: &Context, _args: LogoutArgs) -> Result<()> {
    ctx.auth().logout().context("Failed to clear session")?;
    output::success("Logged out");
    Ok(())
}
