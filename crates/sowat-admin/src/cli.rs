//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::dashboard::DashboardCommand;
use crate::commands::plans::PlansCommand;
use crate::commands::users::UsersCommand;
use crate::commands::whitelist::WhitelistCommand;

/// Sowat admin console.
#[derive(Parser, Debug)]
#[command(name = "sowat-admin")]
#[command(author, version = env!("SOWAT_ADMIN_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL
    #[arg(long, env = "SOWAT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory holding the stored session
    #[arg(long, env = "SOWAT_ADMIN_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and manage the stored session
    Auth(AuthCommand),

    /// Platform users
    Users(UsersCommand),

    /// Subscription plans and Stripe sync
    Plans(PlansCommand),

    /// Pre-launch whitelist
    Whitelist(WhitelistCommand),

    /// Business metrics
    Dashboard(DashboardCommand),
}
