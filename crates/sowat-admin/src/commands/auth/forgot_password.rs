//! Forgot password command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ForgotPasswordArgs {
    /// Administrator email
    #[arg(long)]
    pub email: String,
}

pub async fn run(ctx: &Context, args: ForgotPasswordArgs) -> Result<()> {
    let response = ctx
        .auth()
        .forgot_password(&args.email)
        .await
        .context("Failed to request password reset")?;

    if response.message.is_empty() {
        output::success("If the account exists, a reset email is on its way");
    } else {
        output::success(&response.message);
    }

    Ok(())
}
