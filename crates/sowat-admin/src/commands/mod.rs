//! Command implementations, one module per command group.

pub mod auth;
pub mod dashboard;
pub mod plans;
pub mod users;
pub mod whitelist;

use anyhow::Result;
use serde::de::DeserializeOwned;

use crate::cli::{Cli, Commands};
use crate::context::Context;

pub async fn handle(cli: Cli) -> Result<()> {
    let ctx = Context::new(&cli)?;

    match cli.command {
        Commands::Auth(cmd) => auth::handle(&ctx, cmd).await,
        Commands::Users(cmd) => users::handle(&ctx, cmd).await,
        Commands::Plans(cmd) => plans::handle(&ctx, cmd).await,
        Commands::Whitelist(cmd) => whitelist::handle(&ctx, cmd).await,
        Commands::Dashboard(cmd) => dashboard::handle(&ctx, cmd).await,
    }
}

/// Parse a flag value the way the backend spells it, e.g. `suspended` or
/// `DESC`.
pub(crate) fn wire_value<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| format!("unsupported value '{}'", raw))
}
