//! Whoami command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the full profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: WhoamiArgs) -> Result<()> {
    let user = ctx
        .auth()
        .restore_session()
        .await
        .context("Failed to check session")?
        .context("No active session. Run 'sowat-admin auth login' first.")?;

    if args.json {
        return ctx.print(&user);
    }

    output::field("ID", &user.id);
    output::field("Email", &user.email);
    output::field("API", ctx.client.config().base_url.as_str());

    Ok(())
}
