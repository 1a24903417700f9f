//! Subscription plans and their Stripe synchronization state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::SortOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StripeSyncStatus {
    Pending,
    Synced,
    Failed,
    Outdated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanFeatureCategory {
    Content,
    Distribution,
    Support,
}

/// One marketing feature line of a plan.
///
/// `text` maps a language code to the rendered label; it is carried as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFeature {
    pub key: String,
    #[serde(default)]
    pub text: BTreeMap<String, String>,
    #[serde(default)]
    pub included: bool,
    pub category: PlanFeatureCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanFeatures {
    #[serde(default)]
    pub features: Vec<PlanFeature>,
}

/// A subscription plan.
///
/// Prices are decimal strings on the wire and are kept that way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
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
    pub monthly_price: String,
    #[serde(default)]
    pub yearly_price: String,
    #[serde(default)]
    pub yearly_discount_percent: f64,
    #[serde(default)]
    pub trial_days: u32,
    #[serde(default)]
    pub cumulation_max_percent: f64,
    #[serde(default)]
    pub extra_article_price: String,
    #[serde(default)]
    pub extra_social_post_price: String,
    #[serde(default)]
    pub extra_story_price: String,
    #[serde(default)]
    pub features: PlanFeatures,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub stripe_product_id: Option<String>,
    #[serde(default)]
    pub stripe_price_id_monthly: Option<String>,
    #[serde(default)]
    pub stripe_price_id_yearly: Option<String>,
    #[serde(default)]
    pub stripe_sync_status: Option<StripeSyncStatus>,
    #[serde(default)]
    pub is_stripe_valid: bool,
    #[serde(default)]
    pub last_sync_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sync_error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for `GET /admin/plans`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_sync_status: Option<StripeSyncStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Body of `POST /admin/plans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlan {
    pub name: String,
    pub display_name: String,
    pub articles_limit: u64,
    pub social_posts_limit: u64,
    pub stories_limit: u64,
    pub monthly_price: f64,
    pub yearly_price: f64,
    pub yearly_discount_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulation_max_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_article_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_social_post_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_story_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<PlanFeatures>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body of `PUT /admin/plans/{id}`; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_posts_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stories_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_discount_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulation_max_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_article_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_social_post_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_story_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<PlanFeatures>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSummary {
    pub total: u32,
    pub synced: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Outcome of a Stripe synchronization run or status check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub results: Option<SyncResults>,
    #[serde(default)]
    pub error: Option<SyncFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResults {
    #[serde(default)]
    pub plans: Vec<serde_json::Value>,
    #[serde(default)]
    pub credits: Vec<serde_json::Value>,
    #[serde(default)]
    pub summary: SyncSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncFailure {
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
}
