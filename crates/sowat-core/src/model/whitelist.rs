//! Pre-launch whitelist signups and their migration to real accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::SortOrder;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistEntry {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub migrated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub migrated_user_id: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl WhitelistEntry {
    pub fn is_migrated(&self) -> bool {
        self.migrated_at.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhitelistStats {
    pub total: u64,
    pub confirmed: u64,
    pub migrated: u64,
    pub eligible: u64,
    pub pending: u64,
    pub confirmation_rate: f64,
    pub migration_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WhitelistSortField {
    Email,
    CreatedAt,
    UpdatedAt,
    MigratedAt,
}

/// Filters for `GET /admin/whitelist`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<WhitelistSortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Result of migrating a single whitelist entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateUserOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub whitelist_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateBatchResult {
    pub success: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    pub whitelist_entry: WhitelistEntry,
}

/// Result of a batch migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateBatchOutcome {
    pub total_processed: u32,
    pub successful: u32,
    pub failed: u32,
    #[serde(default)]
    pub results: Vec<MigrateBatchResult>,
}
