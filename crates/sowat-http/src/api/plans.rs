//! `/admin/plans`.

use tracing::{instrument, warn};

use sowat_core::model::{ActionResponse, CreatePlan, Page, Plan, PlanListParams, SyncReport, UpdatePlan};
use sowat_core::{ResourceId, Result};

use crate::client::ApiClient;
use crate::request::ApiRequest;

const BASE: &str = "/admin/plans";

/// Subscription plan administration and Stripe synchronization.
#[derive(Debug, Clone, Copy)]
pub struct Plans<'a> {
    client: &'a ApiClient,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncQuery {
    dry_run: bool,
}

impl<'a> Plans<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: &PlanListParams) -> Result<Page<Plan>> {
        self.client.get_with(BASE, params).await
    }

    #[instrument(skip(self, id), fields(%id))]
    pub async fn get(&self, id: &ResourceId) -> Result<Plan> {
        self.client.get(&plan_path(id)).await
    }

    #[instrument(skip(self, plan), fields(name = %plan.name))]
    pub async fn create(&self, plan: &CreatePlan) -> Result<Plan> {
        self.client.post(BASE, plan).await
    }

    #[instrument(skip(self, id, changes), fields(%id))]
    pub async fn update(&self, id: &ResourceId, changes: &UpdatePlan) -> Result<Plan> {
        self.client.put(&plan_path(id), changes).await
    }

    #[instrument(skip(self, id), fields(%id))]
    pub async fn delete(&self, id: &ResourceId) -> Result<ActionResponse> {
        warn!("deleting plan");
        self.client.delete(&plan_path(id)).await
    }

    /// Push every plan to Stripe. With `dry_run`, only report what would
    /// change.
    #[instrument(skip(self))]
    pub async fn sync_all(&self, dry_run: bool) -> Result<SyncReport> {
        let request = ApiRequest::get(format!("{}/actions/sync", BASE))
            .with_query(&SyncQuery { dry_run })?;
        self.client.send(&request).await
    }

    #[instrument(skip(self))]
    pub async fn sync_status(&self) -> Result<SyncReport> {
        self.client.get(&format!("{}/sync/status", BASE)).await
    }

    /// Products as Stripe reports them, undecoded.
    #[instrument(skip(self))]
    pub async fn stripe_products(&self) -> Result<serde_json::Value> {
        self.client.get(&format!("{}/stripe/products", BASE)).await
    }
}

fn plan_path(id: &ResourceId) -> String {
    format!("{}/{}", BASE, id)
}
