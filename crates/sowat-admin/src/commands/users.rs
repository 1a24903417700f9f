//! User administration subcommands.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use sowat_core::ResourceId;
use sowat_core::model::{
    AuditLogParams, ConsumptionHistoryParams, HistoryPeriod, ResetUserPassword, ResourceKind,
    ResourcesParams, SortOrder, SuspendAction, SuspendUser, UpdateQuotas, UpdateRights,
    UserListParams, UserRole, UserSortField, UserStatus,
};

use super::wire_value;
use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersSubcommand {
    /// List users
    List(ListArgs),

    /// Fetch one user
    Get(UserArg),

    /// Monthly consumption history
    Consumption(ConsumptionArgs),

    /// Admin actions taken on a user
    AuditLogs(AuditLogsArgs),

    /// Resources a user created
    Resources(ResourcesArgs),

    /// Grant or revoke admin rights
    UpdateRights(UpdateRightsArgs),

    /// Grant extra quota
    UpdateQuotas(UpdateQuotasArgs),

    /// Suspend or reactivate an account
    Suspend(SuspendArgs),

    /// Send the user a password-reset email
    ResetPassword(ResetPasswordArgs),
}

#[derive(Args, Debug)]
pub struct UserArg {
    /// User ID
    pub id: ResourceId,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    /// Filter by email substring
    #[arg(long)]
    pub email: Option<String>,

    /// Filter by name substring
    #[arg(long)]
    pub name: Option<String>,

    /// active, suspended, trial or expired
    #[arg(long, value_parser = wire_value::<UserStatus>)]
    pub status: Option<UserStatus>,

    /// Plan name
    #[arg(long)]
    pub plan: Option<String>,

    /// Created on or after (YYYY-MM-DD)
    #[arg(long)]
    pub date_from: Option<String>,

    /// Created on or before (YYYY-MM-DD)
    #[arg(long)]
    pub date_to: Option<String>,

    /// admin or user
    #[arg(long, value_parser = wire_value::<UserRole>)]
    pub role: Option<UserRole>,

    /// Only users above this consumption percentage
    #[arg(long)]
    pub consumption_threshold: Option<u32>,

    /// createdAt, name, email, articles_used, social_posts_used or stories_used
    #[arg(long, value_parser = wire_value::<UserSortField>)]
    pub sort_by: Option<UserSortField>,

    /// ASC or DESC
    #[arg(long, value_parser = wire_value::<SortOrder>)]
    pub sort_order: Option<SortOrder>,
}

#[derive(Args, Debug)]
pub struct ConsumptionArgs {
    /// User ID
    pub id: ResourceId,

    /// day, month or year
    #[arg(long, value_parser = wire_value::<HistoryPeriod>)]
    pub period: Option<HistoryPeriod>,

    #[arg(long)]
    pub start_date: Option<String>,

    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug)]
pub struct AuditLogsArgs {
    /// User ID
    pub id: ResourceId,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    /// Action code, e.g. UPDATE_QUOTAS
    #[arg(long)]
    pub action: Option<String>,

    #[arg(long)]
    pub date_from: Option<String>,

    #[arg(long)]
    pub date_to: Option<String>,

    /// Only actions by this admin
    #[arg(long)]
    pub admin_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct ResourcesArgs {
    /// User ID
    pub id: ResourceId,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    /// article, social_post or image
    #[arg(long = "type", value_parser = wire_value::<ResourceKind>)]
    pub kind: Option<ResourceKind>,

    /// type, date or status
    #[arg(long)]
    pub group_by: Option<String>,

    #[arg(long)]
    pub date_from: Option<String>,

    #[arg(long)]
    pub date_to: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateRightsArgs {
    /// User ID
    pub id: ResourceId,

    /// Whether the user is an administrator
    #[arg(long, action = clap::ArgAction::Set)]
    pub admin: bool,

    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateQuotasArgs {
    /// User ID
    pub id: ResourceId,

    #[arg(long, default_value_t = 0)]
    pub extra_articles: u64,

    #[arg(long, default_value_t = 0)]
    pub extra_social_posts: u64,

    #[arg(long, default_value_t = 0)]
    pub extra_stories: u64,

    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Args, Debug)]
pub struct SuspendArgs {
    /// User ID
    pub id: ResourceId,

    /// suspend or reactivate
    #[arg(long, value_parser = wire_value::<SuspendAction>, default_value = "suspend")]
    pub action: SuspendAction,

    #[arg(long)]
    pub reason: String,

    /// Suspension end (YYYY-MM-DD); open-ended when omitted
    #[arg(long)]
    pub end_date: Option<String>,

    /// Email the user about the change
    #[arg(long)]
    pub notify_user: bool,
}

#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    /// User ID
    pub id: ResourceId,

    /// Extra text for the reset email
    #[arg(long)]
    pub message: Option<String>,
}

pub async fn handle(ctx: &Context, cmd: UsersCommand) -> Result<()> {
    let users = ctx.client.users();

    match cmd.command {
        UsersSubcommand::List(args) => {
            let params = UserListParams {
                page: args.page,
                limit: args.limit,
                email: args.email,
                name: args.name,
                status: args.status,
                plan: args.plan,
                date_from: args.date_from,
                date_to: args.date_to,
                role: args.role,
                consumption_threshold: args.consumption_threshold,
                sort_by: args.sort_by,
                sort_order: args.sort_order,
            };
            let page = users.list(&params).await.context("Failed to list users")?;
            ctx.print(&page)
        }
        UsersSubcommand::Get(args) => {
            let user = users.get(&args.id).await.context("Failed to fetch user")?;
            ctx.print(&user)
        }
        UsersSubcommand::Consumption(args) => {
            let params = ConsumptionHistoryParams {
                period: args.period,
                start_date: args.start_date,
                end_date: args.end_date,
                limit: args.limit,
            };
            let history = users
                .consumption_history(&args.id, &params)
                .await
                .context("Failed to fetch consumption history")?;
            ctx.print(&history)
        }
        UsersSubcommand::AuditLogs(args) => {
            let params = AuditLogParams {
                page: args.page,
                limit: args.limit,
                action: args.action,
                date_from: args.date_from,
                date_to: args.date_to,
                admin_id: args.admin_id,
            };
            let logs = users
                .audit_logs(&args.id, &params)
                .await
                .context("Failed to fetch audit logs")?;
            ctx.print(&logs)
        }
        UsersSubcommand::Resources(args) => {
            let params = ResourcesParams {
                page: args.page,
                limit: args.limit,
                kind: args.kind,
                group_by: args.group_by,
                date_from: args.date_from,
                date_to: args.date_to,
            };
            let resources = users
                .resources(&args.id, &params)
                .await
                .context("Failed to fetch resources")?;
            ctx.print(&resources)
        }
        UsersSubcommand::UpdateRights(args) => {
            let body = UpdateRights {
                is_admin: args.admin,
                reason: args.reason,
            };
            let response = users
                .update_rights(&args.id, &body)
                .await
                .context("Failed to update rights")?;
            output::success(&format!("Rights updated for {}", args.id));
            ctx.print(&response)
        }
        UsersSubcommand::UpdateQuotas(args) => {
            let body = UpdateQuotas {
                extra_articles: args.extra_articles,
                extra_social_posts: args.extra_social_posts,
                extra_stories: args.extra_stories,
                reason: args.reason,
            };
            let response = users
                .update_quotas(&args.id, &body)
                .await
                .context("Failed to update quotas")?;
            output::success(&format!("Quotas updated for {}", args.id));
            ctx.print(&response)
        }
        UsersSubcommand::Suspend(args) => {
            let body = SuspendUser {
                action: args.action,
                reason: args.reason,
                end_date: args.end_date,
                notify_user: args.notify_user.then_some(true),
            };
            let response = users
                .suspend(&args.id, &body)
                .await
                .context("Failed to change account status")?;
            ctx.print(&response)
        }
        UsersSubcommand::ResetPassword(args) => {
            let body = ResetUserPassword {
                custom_message: args.message,
            };
            let response = users
                .reset_password(&args.id, &body)
                .await
                .context("Failed to send password reset")?;
            output::success(&format!("Password reset sent to {}", args.id));
            ctx.print(&response)
        }
    }
}
