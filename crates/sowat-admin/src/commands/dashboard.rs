//! Dashboard subcommands.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use sowat_core::model::DashboardPeriod;

use crate::context::Context;

#[derive(Args, Debug)]
pub struct DashboardCommand {
    #[command(subcommand)]
    pub command: DashboardSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DashboardSubcommand {
    /// Headline metrics
    Overview(OverviewArgs),

    /// User growth and conversion
    Users(PeriodArgs),

    /// Revenue metrics
    Financial(PeriodArgs),

    /// Content generation volume
    Usage(PeriodArgs),

    /// Queue and worker health
    System,

    /// Active alerts
    Alerts,
}

#[derive(Args, Debug)]
pub struct PeriodArgs {
    /// today, 7d, 30d, 3m or 1y
    #[arg(long, default_value_t = DashboardPeriod::default())]
    pub period: DashboardPeriod,
}

#[derive(Args, Debug)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Include the previous period's figures
    #[arg(long)]
    pub compare: bool,
}

pub async fn handle(ctx: &Context, cmd: DashboardCommand) -> Result<()> {
    let dashboard = ctx.client.dashboard();

    match cmd.command {
        DashboardSubcommand::Overview(args) => {
            let overview = dashboard
                .overview(args.period.period, args.compare)
                .await
                .context("Failed to fetch overview")?;
            ctx.print(&overview)
        }
        DashboardSubcommand::Users(args) => {
            let metrics = dashboard
                .users_metrics(args.period)
                .await
                .context("Failed to fetch user metrics")?;
            ctx.print(&metrics)
        }
        DashboardSubcommand::Financial(args) => {
            let metrics = dashboard
                .financial_metrics(args.period)
                .await
                .context("Failed to fetch financial metrics")?;
            ctx.print(&metrics)
        }
        DashboardSubcommand::Usage(args) => {
            let metrics = dashboard
                .usage_metrics(args.period)
                .await
                .context("Failed to fetch usage metrics")?;
            ctx.print(&metrics)
        }
        DashboardSubcommand::System => {
            let metrics = dashboard
                .system_metrics()
                .await
                .context("Failed to fetch system metrics")?;
            ctx.print(&metrics)
        }
        DashboardSubcommand::Alerts => {
            let alerts = dashboard
                .alerts()
                .await
                .context("Failed to fetch alerts")?;
            ctx.print(&alerts)
        }
    }
}
