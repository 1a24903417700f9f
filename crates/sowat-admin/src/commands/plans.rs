//! Subscription plan subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;

use sowat_core::ResourceId;
use sowat_core::model::{CreatePlan, PlanListParams, SortOrder, StripeSyncStatus, UpdatePlan};

use super::wire_value;
use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct PlansCommand {
    #[command(subcommand)]
    pub command: PlansSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PlansSubcommand {
    /// List plans
    List(ListArgs),

    /// Fetch one plan
    Get(PlanArg),

    /// Create a plan from a JSON file
    Create(CreateArgs),

    /// Update a plan from a JSON file holding the changed fields
    Update(UpdateArgs),

    /// Delete a plan
    Delete(PlanArg),

    /// Push every plan to Stripe
    Sync(SyncArgs),

    /// Last Stripe synchronization result
    SyncStatus,

    /// Products as Stripe reports them
    StripeProducts,
}

#[derive(Args, Debug)]
pub struct PlanArg {
    /// Plan ID
    pub id: ResourceId,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub active: Option<bool>,

    /// pending, synced, failed or outdated
    #[arg(long, value_parser = wire_value::<StripeSyncStatus>)]
    pub sync_status: Option<StripeSyncStatus>,

    #[arg(long)]
    pub sort_by: Option<String>,

    /// ASC or DESC
    #[arg(long, value_parser = wire_value::<SortOrder>)]
    pub sort_order: Option<SortOrder>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// JSON file with the plan definition
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Plan ID
    pub id: ResourceId,

    /// JSON file with the fields to change
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Report what would change without touching Stripe
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn handle(ctx: &Context, cmd: PlansCommand) -> Result<()> {
    let plans = ctx.client.plans();

    match cmd.command {
        PlansSubcommand::List(args) => {
            let params = PlanListParams {
                page: args.page,
                limit: args.limit,
                search: args.search,
                is_active: args.active,
                stripe_sync_status: args.sync_status,
                sort_by: args.sort_by,
                sort_order: args.sort_order,
            };
            let page = plans.list(&params).await.context("Failed to list plans")?;
            ctx.print(&page)
        }
        PlansSubcommand::Get(args) => {
            let plan = plans.get(&args.id).await.context("Failed to fetch plan")?;
            ctx.print(&plan)
        }
        PlansSubcommand::Create(args) => {
            let body: CreatePlan = read_json(&args.file)?;
            let plan = plans.create(&body).await.context("Failed to create plan")?;
            output::success(&format!("Created plan {}", plan.id));
            ctx.print(&plan)
        }
        PlansSubcommand::Update(args) => {
            let body: UpdatePlan = read_json(&args.file)?;
            let plan = plans
                .update(&args.id, &body)
                .await
                .context("Failed to update plan")?;
            output::success(&format!("Updated plan {}", plan.id));
            ctx.print(&plan)
        }
        PlansSubcommand::Delete(args) => {
            let response = plans
                .delete(&args.id)
                .await
                .context("Failed to delete plan")?;
            output::success(&format!("Deleted plan {}", args.id));
            ctx.print(&response)
        }
        PlansSubcommand::Sync(args) => {
            let report = plans
                .sync_all(args.dry_run)
                .await
                .context("Failed to sync plans")?;
            if let Some(results) = &report.results {
                let summary = &results.summary;
                output::field(
                    "Summary",
                    &format!(
                        "{} total, {} synced, {} skipped, {} failed",
                        summary.total, summary.synced, summary.skipped, summary.failed
                    ),
                );
            }
            ctx.print(&report)
        }
        PlansSubcommand::SyncStatus => {
            let report = plans
                .sync_status()
                .await
                .context("Failed to fetch sync status")?;
            ctx.print(&report)
        }
        PlansSubcommand::StripeProducts => {
            let products = plans
                .stripe_products()
                .await
                .context("Failed to fetch Stripe products")?;
            ctx.print(&products)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid plan JSON in {}", path.display()))
}
