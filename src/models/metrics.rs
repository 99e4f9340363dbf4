use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Reporting window accepted by the summary-metrics endpoint. Unknown labels
/// are passed through to the backend unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetricsPeriod {
    Day,
    SevenDays,
    ThirtyDays,
    NinetyDays,
    Custom(String),
}

impl MetricsPeriod {
    pub fn as_str(&self) -> &str {
        match self {
            MetricsPeriod::Day => "24h",
            MetricsPeriod::SevenDays => "7d",
            MetricsPeriod::ThirtyDays => "30d",
            MetricsPeriod::NinetyDays => "90d",
            MetricsPeriod::Custom(label) => label.as_str(),
        }
    }
}

impl Default for MetricsPeriod {
    fn default() -> Self {
        MetricsPeriod::SevenDays
    }
}

/// Aggregate counters for one (user, period) reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub id: String,
    pub total_competitor_spend: f64,
    pub active_campaigns_count: i64,
    pub total_impressions: i64,
    pub average_ctr: f64,
    #[serde(default)]
    pub platform_distribution: BTreeMap<String, f64>,
    #[serde(default)]
    pub top_performers: Vec<JsonValue>,
    #[serde(default)]
    pub spend_by_industry: BTreeMap<String, f64>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// One observed (competitor, advertisement, date) record, denormalized with
/// the display fields the ad cards need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAdMetric {
    pub id: String,
    pub date: NaiveDate,
    pub competitor_name: String,
    pub platform: String,
    pub status: String,
    pub daily_spend: f64,
    pub daily_impressions: i64,
    pub daily_ctr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spend_lower_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spend_upper_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impressions_lower_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impressions_upper_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ab_tests: Option<i64>,
}

/// Query options for the daily-metrics endpoint. Latest mode and range mode
/// are mutually exclusive at the call site; when `show_latest_only` is set
/// the range fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchMetricsOptions {
    pub limit: usize,
    pub show_latest_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Default for FetchMetricsOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            show_latest_only: false,
            start_date: None,
            end_date: None,
        }
    }
}

impl FetchMetricsOptions {
    pub fn latest(limit: usize) -> Self {
        Self {
            limit,
            show_latest_only: true,
            ..Self::default()
        }
    }
}

/// Outcome of the connectivity probe behind the status banner. `connected`
/// reflects whether any backend answered, not whether every count query
/// succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub connected: bool,
    pub summary_count: u64,
    pub daily_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseStatus {
    pub fn disconnected(message: impl Into<String>) -> Self {
        Self {
            connected: false,
            summary_count: 0,
            daily_count: 0,
            error: Some(message.into()),
        }
    }
}
