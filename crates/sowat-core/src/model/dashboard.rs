//! Aggregate business metrics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// Reporting window accepted by the dashboard endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardPeriod {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl DashboardPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardPeriod::Today => "today",
            DashboardPeriod::SevenDays => "7d",
            DashboardPeriod::ThirtyDays => "30d",
            DashboardPeriod::ThreeMonths => "3m",
            DashboardPeriod::OneYear => "1y",
        }
    }
}

impl fmt::Display for DashboardPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(DashboardPeriod::Today),
            "7d" => Ok(DashboardPeriod::SevenDays),
            "30d" => Ok(DashboardPeriod::ThirtyDays),
            "3m" => Ok(DashboardPeriod::ThreeMonths),
            "1y" => Ok(DashboardPeriod::OneYear),
            other => Err(InvalidInputError::Other {
                message: format!(
                    "unknown period '{}', expected one of today, 7d, 30d, 3m, 1y",
                    other
                ),
            }
            .into()),
        }
    }
}

/// `GET /admin/dashboard/overview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub period: String,
    #[serde(default)]
    pub compare: bool,
    #[serde(default)]
    pub last_updated: Option<String>,
    pub metrics: MetricsBundle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub users: UserMetrics,
    pub financial: FinancialSnapshot,
    pub usage: UsageSnapshot,
    pub system: SystemSnapshot,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserMetrics {
    pub active_today: u64,
    pub active7d: u64,
    pub active30d: u64,
    pub new_users: u64,
    pub comparison: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSnapshot {
    pub mrr: f64,
    pub mrr_growth: f64,
    pub arpu: f64,
    pub churn_rate: f64,
    pub comparison: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageSnapshot {
    pub articles: u64,
    pub social_posts: u64,
    pub quota_usage: f64,
    pub comparison: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobCounts {
    pub waiting: u64,
    pub failed: u64,
    pub active: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemSnapshot {
    pub jobs: serde_json::Value,
    pub avg_generation_time: f64,
}

impl SystemSnapshot {
    /// Top-level queue counters, if the backend reported them.
    pub fn job_counts(&self) -> Option<JobCounts> {
        serde_json::from_value(self.jobs.clone()).ok()
    }
}

/// `GET /admin/dashboard/users-metrics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsersMetrics {
    pub active_users: u64,
    pub new_users: u64,
    pub total_users: u64,
    pub pro_users: u64,
    pub conversion_rate: f64,
    pub charts: serde_json::Value,
}

/// `GET /admin/dashboard/financial-metrics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialMetrics {
    pub mrr: f64,
    pub mrr_growth: f64,
    pub arpu: f64,
    pub churn_rate: f64,
    pub charts: serde_json::Value,
}

/// `GET /admin/dashboard/usage-metrics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageMetrics {
    pub articles_generated: u64,
    pub social_posts_created: u64,
    pub quota_usage: f64,
    pub charts: serde_json::Value,
}

/// `GET /admin/dashboard/system-metrics`; the payload is not pinned down.
pub type SystemMetrics = serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
}
