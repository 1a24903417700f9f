//! `/admin/users`.

use tracing::instrument;

use sowat_core::model::{
    ActionResponse, AuditLog, AuditLogParams, ConsumptionHistory, ConsumptionHistoryParams, Page,
    ResetUserPassword, ResourcesParams, SuspendUser, UpdateQuotas, UpdateRights, User,
    UserListParams,
};
use sowat_core::{ResourceId, Result};

use crate::client::ApiClient;

const BASE: &str = "/admin/users";

/// User administration.
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a ApiClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: &UserListParams) -> Result<Page<User>> {
        self.client.get_with(BASE, params).await
    }

    #[instrument(skip(self, id), fields(%id))]
    pub async fn get(&self, id: &ResourceId) -> Result<User> {
        self.client.get(&user_path(id, "")).await
    }

    /// Monthly consumption of articles, social posts and stories.
    #[instrument(skip(self, id), fields(%id))]
    pub async fn consumption_history(
        &self,
        id: &ResourceId,
        params: &ConsumptionHistoryParams,
    ) -> Result<ConsumptionHistory> {
        self.client
            .get_with(&user_path(id, "/consumption-history"), params)
            .await
    }

    #[instrument(skip(self, id), fields(%id))]
    pub async fn audit_logs(&self, id: &ResourceId, params: &AuditLogParams) -> Result<Page<AuditLog>> {
        self.client.get_with(&user_path(id, "/audit-logs"), params).await
    }

    /// Resources the user created. The shape depends on `group_by`, so it is
    /// returned undecoded.
    #[instrument(skip(self, id), fields(%id))]
    pub async fn resources(
        &self,
        id: &ResourceId,
        params: &ResourcesParams,
    ) -> Result<serde_json::Value> {
        self.client.get_with(&user_path(id, "/resources"), params).await
    }

    #[instrument(skip(self, id, body), fields(%id, is_admin = body.is_admin))]
    pub async fn update_rights(&self, id: &ResourceId, body: &UpdateRights) -> Result<ActionResponse> {
        self.client.patch(&user_path(id, "/rights"), body).await
    }

    #[instrument(skip(self, id, body), fields(%id))]
    pub async fn update_quotas(&self, id: &ResourceId, body: &UpdateQuotas) -> Result<ActionResponse> {
        self.client.patch(&user_path(id, "/quotas"), body).await
    }

    /// Suspend or reactivate an account.
    #[instrument(skip(self, id, body), fields(%id, action = ?body.action))]
    pub async fn suspend(&self, id: &ResourceId, body: &SuspendUser) -> Result<ActionResponse> {
        self.client.patch(&user_path(id, "/suspend"), body).await
    }

    /// Send the user a password reset email.
    #[instrument(skip(self, id, body), fields(%id))]
    pub async fn reset_password(
        &self,
        id: &ResourceId,
        body: &ResetUserPassword,
    ) -> Result<ActionResponse> {
        self.client.post(&user_path(id, "/reset-password"), body).await
    }
}

fn user_path(id: &ResourceId, suffix: &str) -> String {
    format!("{}/{}{}", BASE, id, suffix)
}
