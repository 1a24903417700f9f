//! Login command implementation.

use anyhow::{Context as _, Result, bail};
use clap::Args;
use colored::Colorize;

use sowat_core::error::AuthError;
use sowat_core::{Credentials, Error};

use crate::context::Context;
use crate::output;

/// Where non-admin accounts belong.
const PUBLIC_SITE: &str = "https://sowat.io";

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Administrator email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "SOWAT_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(ctx: &Context, args: LoginArgs) -> Result<()> {
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let user = match ctx.auth().login(&credentials).await {
        Ok(user) => user,
        Err(Error::Auth(AuthError::NotAdmin)) => {
            output::hint(&format!(
                "This account has no admin access. Use the Sowat app at {} instead.",
                PUBLIC_SITE
            ));
            bail!("{} is not an administrator", args.email);
        }
        Err(Error::Auth(AuthError::InvalidCredentials { message })) => {
            output::error(message.as_deref().unwrap_or("Invalid email or password"));
            bail!("Login failed");
        }
        Err(err) => return Err(err).context("Failed to login"),
    };

    output::success("Logged in successfully");
    output::field("ID", &user.id);
    output::field("Email", &user.email);
    if !user.name.is_empty() {
        output::field("Name", &user.name);
    }

    Ok(())
}
