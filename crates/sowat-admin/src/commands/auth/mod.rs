//! Authentication subcommands.

mod forgot_password;
mod login;
mod logout;
mod refresh_token;
mod reset_password;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::context::Context;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in with an administrator account
    Login(login::LoginArgs),

    /// Forget the stored session
    Logout(logout::LogoutArgs),

    /// Display the logged-in administrator
    Whoami(whoami::WhoamiArgs),

    /// Renew the session tokens
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Request a password-reset email
    ForgotPassword(forgot_password::ForgotPasswordArgs),

    /// Set a new password with a reset token
    ResetPassword(reset_password::ResetPasswordArgs),
}

pub async fn handle(ctx: &Context, cmd: AuthCommand) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(ctx, args).await,
        AuthSubcommand::Logout(args) => logout::run(ctx, args),
        AuthSubcommand::Whoami(args) => whoami::run(ctx, args).await,
        AuthSubcommand::RefreshToken(args) => refresh_token::run(ctx, args).await,
        AuthSubcommand::ForgotPassword(args) => forgot_password::run(ctx, args).await,
        AuthSubcommand::ResetPassword(args) => reset_password::run(ctx, args).await,
    }
}
