//! Shapes shared by every listing and mutation endpoint.

use serde::{Deserialize, Serialize};

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
}

/// Pagination metadata.
///
/// The plans endpoint reports the page count as `pages`, the others as
/// `totalPages`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(alias = "pages")]
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Sort direction as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Result of a mutating admin action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
