//! Whitelist subcommands.

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};

use sowat_core::ResourceId;
use sowat_core::model::{SortOrder, WhitelistListParams, WhitelistSortField};

use super::wire_value;
use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct WhitelistCommand {
    #[command(subcommand)]
    pub command: WhitelistSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WhitelistSubcommand {
    /// List whitelist entries
    List(ListArgs),

    /// Signup and migration counters
    Stats,

    /// Turn one entry into a user account
    Migrate(MigrateArgs),

    /// Turn several entries into user accounts
    MigrateBatch(MigrateBatchArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub confirmed: Option<bool>,

    #[arg(long)]
    pub migrated: Option<bool>,

    #[arg(long)]
    pub search: Option<String>,

    /// email, createdAt, updatedAt or migratedAt
    #[arg(long, value_parser = wire_value::<WhitelistSortField>)]
    pub sort_by: Option<WhitelistSortField>,

    /// ASC or DESC
    #[arg(long, value_parser = wire_value::<SortOrder>)]
    pub sort_order: Option<SortOrder>,
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Whitelist entry ID
    pub id: ResourceId,

    #[arg(long)]
    pub reason: String,
}

#[derive(Args, Debug)]
pub struct MigrateBatchArgs {
    /// Whitelist entry IDs
    #[arg(required = true)]
    pub ids: Vec<ResourceId>,

    #[arg(long)]
    pub reason: String,
}

pub async fn handle(ctx: &Context, cmd: WhitelistCommand) -> Result<()> {
    let whitelist = ctx.client.whitelist();

    match cmd.command {
        WhitelistSubcommand::List(args) => {
            let params = WhitelistListParams {
                page: args.page,
                limit: args.limit,
                confirmed: args.confirmed,
                migrated: args.migrated,
                search: args.search,
                sort_by: args.sort_by,
                sort_order: args.sort_order,
            };
            let page = whitelist
                .list(&params)
                .await
                .context("Failed to list whitelist")?;
            ctx.print(&page)
        }
        WhitelistSubcommand::Stats => {
            let stats = whitelist
                .stats()
                .await
                .context("Failed to fetch whitelist stats")?;
            ctx.print(&stats)
        }
        WhitelistSubcommand::Migrate(args) => {
            let outcome = whitelist
                .migrate(&args.id, &args.reason)
                .await
                .context("Failed to migrate entry")?;
            ctx.print(&outcome)?;
            if !outcome.success {
                bail!("Migration of {} failed: {}", args.id, outcome.message);
            }
            output::success(&format!("Migrated {}", args.id));
            Ok(())
        }
        WhitelistSubcommand::MigrateBatch(args) => {
            let outcome = whitelist
                .migrate_batch(&args.ids, &args.reason)
                .await
                .context("Failed to migrate entries")?;
            output::field(
                "Processed",
                &format!(
                    "{} ({} migrated, {} failed)",
                    outcome.total_processed, outcome.successful, outcome.failed
                ),
            );
            ctx.print(&outcome)
        }
    }
}
