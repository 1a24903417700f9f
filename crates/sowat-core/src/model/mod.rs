//! Backend domain model.
//!
//! These are wire types: field names follow the backend's JSON, which mixes
//! camelCase and snake_case. Optional and defaulted fields are lenient so a
//! backend adding or omitting a field does not break decoding.

mod common;
mod dashboard;
mod plan;
mod user;
mod whitelist;

pub use common::{ActionResponse, Page, PageMeta, SortOrder};
pub use dashboard::{
    Alert, AlertKind, DashboardOverview, DashboardPeriod, FinancialMetrics, FinancialSnapshot,
    JobCounts, MetricsBundle, SystemMetrics, SystemSnapshot, UsageMetrics, UsageSnapshot,
    UserMetrics, UsersMetrics,
};
pub use plan::{
    CreatePlan, Plan, PlanFeature, PlanFeatureCategory, PlanFeatures, PlanListParams,
    StripeSyncStatus, SyncFailure, SyncReport, SyncResults, SyncSummary, UpdatePlan,
};
pub use user::{
    AuditLog, AuditLogParams, BillingCycle, ConsumptionHistory, ConsumptionHistoryParams,
    ConsumptionPercentage, ConsumptionPoint, EffectiveLimits, HistoryPeriod, PlanSummary,
    ResetUserPassword, ResourceKind, ResourcesCount, ResourcesParams, SuspendAction, SuspendUser,
    Subscription, UpdateQuotas, UpdateRights, User, UserListParams, UserRole, UserSortField,
    UserStatus,
};
pub use whitelist::{
    MigrateBatchOutcome, MigrateBatchResult, MigrateUserOutcome, WhitelistEntry,
    WhitelistListParams, WhitelistSortField, WhitelistStats,
};
