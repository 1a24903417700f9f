//! `/admin/whitelist`.

use serde::Serialize;
use tracing::instrument;

use sowat_core::model::{
    MigrateBatchOutcome, MigrateUserOutcome, Page, WhitelistEntry, WhitelistListParams,
    WhitelistStats,
};
use sowat_core::{ResourceId, Result};

use crate::client::ApiClient;

const BASE: &str = "/admin/whitelist";

/// Pre-launch whitelist and migration of its entries to accounts.
#[derive(Debug, Clone, Copy)]
pub struct Whitelist<'a> {
    client: &'a ApiClient,
}

#[derive(Serialize)]
struct MigrateRequest<'r> {
    reason: &'r str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MigrateBatchRequest<'r> {
    whitelist_ids: &'r [ResourceId],
    reason: &'r str,
}

impl<'a> Whitelist<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: &WhitelistListParams) -> Result<Page<WhitelistEntry>> {
        self.client.get_with(BASE, params).await
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<WhitelistStats> {
        self.client.get(&format!("{}/stats", BASE)).await
    }

    /// Turn one whitelist entry into a user account.
    #[instrument(skip(self, id, reason), fields(%id))]
    pub async fn migrate(&self, id: &ResourceId, reason: &str) -> Result<MigrateUserOutcome> {
        self.client
            .post(&format!("{}/{}/migrate", BASE, id), &MigrateRequest { reason })
            .await
    }

    #[instrument(skip(self, ids, reason), fields(count = ids.len()))]
    pub async fn migrate_batch(&self, ids: &[ResourceId], reason: &str) -> Result<MigrateBatchOutcome> {
        self.client
            .post(
                &format!("{}/migrate-batch", BASE),
                &MigrateBatchRequest {
                    whitelist_ids: ids,
                    reason,
                },
            )
            .await
    }
}
