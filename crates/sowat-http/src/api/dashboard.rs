//! `/admin/dashboard`.

use serde::Serialize;
use tracing::instrument;

use sowat_core::Result;
use sowat_core::model::{
    Alert, DashboardOverview, DashboardPeriod, FinancialMetrics, SystemMetrics, UsageMetrics,
    UsersMetrics,
};

use crate::client::ApiClient;

const BASE: &str = "/admin/dashboard";

/// Business metrics.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard<'a> {
    client: &'a ApiClient,
}

#[derive(Serialize)]
struct PeriodQuery {
    period: DashboardPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    compare: Option<bool>,
}

impl<'a> Dashboard<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Headline metrics. With `compare`, each block carries the previous
    /// period's figures.
    #[instrument(skip(self))]
    pub async fn overview(&self, period: DashboardPeriod, compare: bool) -> Result<DashboardOverview> {
        let query = PeriodQuery {
            period,
            compare: Some(compare),
        };
        self.client.get_with(&format!("{}/overview", BASE), &query).await
    }

    #[instrument(skip(self))]
    pub async fn users_metrics(&self, period: DashboardPeriod) -> Result<UsersMetrics> {
        self.metrics("users-metrics", period).await
    }

    #[instrument(skip(self))]
    pub async fn financial_metrics(&self, period: DashboardPeriod) -> Result<FinancialMetrics> {
        self.metrics("financial-metrics", period).await
    }

    #[instrument(skip(self))]
    pub async fn usage_metrics(&self, period: DashboardPeriod) -> Result<UsageMetrics> {
        self.metrics("usage-metrics", period).await
    }

    #[instrument(skip(self))]
    pub async fn system_metrics(&self) -> Result<SystemMetrics> {
        self.client.get(&format!("{}/system-metrics", BASE)).await
    }

    #[instrument(skip(self))]
    pub async fn alerts(&self) -> Result<Vec<Alert>> {
        self.client.get(&format!("{}/alerts", BASE)).await
    }

    async fn metrics<R: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        period: DashboardPeriod,
    ) -> Result<R> {
        let query = PeriodQuery {
            period,
            compare: None,
        };
        self.client
            .get_with(&format!("{}/{}", BASE, endpoint), &query)
            .await
    }
}
