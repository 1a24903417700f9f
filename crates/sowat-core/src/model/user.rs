//! Platform users and the admin actions on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::SortOrder;

/// Account status as computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
    Trial,
    Expired,
}

/// Role filter for user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// Sortable user columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserSortField {
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "articles_used")]
    ArticlesUsed,
    #[serde(rename = "social_posts_used")]
    SocialPostsUsed,
    #[serde(rename = "stories_used")]
    StoriesUsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

/// A platform user as returned by the admin endpoints and the login call.
///
/// The login and profile endpoints return a reduced user; everything beyond
/// identity and the admin flag is therefore optional or defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastLoginAt", default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(rename = "emailVerified", default)]
    pub email_verified: Option<bool>,

    #[serde(default)]
    pub articles_used: u64,
    #[serde(default)]
    pub social_posts_used: u64,
    #[serde(default)]
    pub stories_used: u64,
    #[serde(default)]
    pub additional_articles: u64,
    #[serde(default)]
    pub additional_social_posts: u64,
    #[serde(default)]
    pub additional_stories: u64,

    #[serde(default)]
    pub subscription: Option<Subscription>,
    #[serde(default)]
    pub plan: Option<PlanSummary>,

    #[serde(default)]
    pub consumption_percentage: Option<ConsumptionPercentage>,
    #[serde(default)]
    pub effective_limits: Option<EffectiveLimits>,
    #[serde(default)]
    pub status: Option<UserStatus>,
    #[serde(default)]
    pub total_resources_created: Option<ResourcesCount>,
}

/// The plan attached to a user, as embedded in user payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub articles_limit: u64,
    #[serde(default)]
    pub social_posts_limit: u64,
    #[serde(default)]
    pub stories_limit: u64,
    #[serde(default)]
    pub monthly_price: serde_json::Value,
    #[serde(default)]
    pub yearly_price: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub billing_cycle: Option<BillingCycle>,
    #[serde(default)]
    pub trial_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub trial_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_period_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub canceled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub articles_cumulated: u64,
    #[serde(default)]
    pub social_posts_cumulated: u64,
    #[serde(default)]
    pub stories_cumulated: u64,
    #[serde(default)]
    pub extra_articles_purchased: u64,
    #[serde(default)]
    pub extra_social_posts_purchased: u64,
    #[serde(default)]
    pub extra_stories_purchased: u64,
}

/// Quota consumption in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionPercentage {
    pub articles: f64,
    pub social_posts: f64,
    pub stories: f64,
    pub overall: f64,
}

/// Plan limits plus purchased extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectiveLimits {
    pub articles: u64,
    pub social_posts: u64,
    pub stories: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesCount {
    pub articles: u64,
    pub social_posts: u64,
    pub stories: u64,
    pub images: u64,
}

/// Filters for `GET /admin/users`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumption_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<UserSortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryPeriod {
    Day,
    Month,
    Year,
}

/// Filters for the consumption history endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionHistoryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<HistoryPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionPoint {
    pub month: String,
    #[serde(default)]
    pub articles: u64,
    #[serde(default)]
    pub social_posts: u64,
    #[serde(default)]
    pub stories: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub trend: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionHistory {
    pub data: Vec<ConsumptionPoint>,
    #[serde(default)]
    pub comparison: Vec<serde_json::Value>,
    #[serde(default)]
    pub details: Vec<ConsumptionPoint>,
}

/// Filters for a user's audit log.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String,
    pub user_id: String,
    pub action: String,
    #[serde(default)]
    pub action_label: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub admin_id: Option<String>,
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Article,
    SocialPost,
    Image,
}

/// Filters for the resources a user created.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResourceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

/// Body of `PATCH /admin/users/{id}/rights`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRights {
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of `PATCH /admin/users/{id}/quotas`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuotas {
    pub extra_articles: u64,
    pub extra_social_posts: u64,
    pub extra_stories: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuspendAction {
    Suspend,
    Reactivate,
}

/// Body of `PATCH /admin/users/{id}/suspend`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendUser {
    pub action: SuspendAction,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_user: Option<bool>,
}

/// Body of `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetUserPassword {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_login_user() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","email":"admin@sowat.io","name":"Admin","isAdmin":true,
                "createdAt":"2024-05-01T10:00:00Z","updatedAt":"2024-05-02T10:00:00.000Z"}"#,
        )
        .unwrap();

        assert!(user.is_admin);
        assert_eq!(user.articles_used, 0);
        assert!(user.subscription.is_none());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn decodes_listing_user() {
        let user: User = serde_json::from_str(
            r#"{"id":"u2","email":"jane@acme.io","name":"Jane","company":null,"isAdmin":false,
                "articles_used":12,"social_posts_used":3,"stories_used":0,
                "additional_articles":5,"additional_social_posts":0,"additional_stories":0,
                "subscription":null,
                "plan":{"id":"p1","name":"pro","display_name":"Pro","articles_limit":50,
                        "social_posts_limit":100,"stories_limit":20,
                        "monthly_price":"29.00","yearly_price":"290.00"},
                "consumption_percentage":{"articles":24.0,"social_posts":3.0,"stories":0.0,"overall":9.0},
                "effective_limits":{"articles":55,"social_posts":100,"stories":20},
                "status":"active",
                "total_resources_created":{"articles":12,"social_posts":3,"stories":0,"images":7}}"#,
        )
        .unwrap();

        assert_eq!(user.status, Some(UserStatus::Active));
        assert_eq!(user.plan.unwrap().display_name, "Pro");
        assert_eq!(user.effective_limits.unwrap().articles, 55);
    }

    #[test]
    fn list_params_skip_unset_filters() {
        let params = UserListParams {
            page: Some(2),
            status: Some(UserStatus::Suspended),
            sort_by: Some(UserSortField::ArticlesUsed),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "page": 2,
                "status": "suspended",
                "sortBy": "articles_used",
                "sortOrder": "ASC"
            })
        );
    }

    #[test]
    fn suspend_body_shape() {
        let body = SuspendUser {
            action: SuspendAction::Reactivate,
            reason: "appeal accepted".to_string(),
            end_date: None,
            notify_user: Some(true),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"action":"reactivate","reason":"appeal accepted","notifyUser":true})
        );
    }
}
