//! Reset password command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    /// Token from the reset email
    #[arg(long)]
    pub token: String,

    /// New password
    #[arg(long, env = "SOWAT_ADMIN_NEW_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(ctx: &Context, args: ResetPasswordArgs) -> Result<()> {
    ctx.auth()
        .reset_password(&args.token, &args.password)
        .await
        .context("Failed to reset password")?;

    output::success("Password updated. You can now log in.");

    Ok(())
}
