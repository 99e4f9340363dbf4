use serde::{Deserialize, Serialize};

use crate::models::metrics::SummaryMetrics;

/// Total spend and performance per tracked competitor, ranked for the spend
/// distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorSpendEntry {
    pub competitor_name: String,
    pub total_spend: f64,
    pub ad_count: i64,
    pub avg_ctr: f64,
}

/// One bucket of the spend-range histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendRangeEntry {
    pub spend_range: String,
    pub ad_count: i64,
    pub avg_ctr: f64,
    pub total_spend: f64,
}

/// One bucket of the CTR-performance histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtrPerformanceEntry {
    pub ctr_performance: String,
    pub ad_count: i64,
    pub avg_spend: f64,
    pub percentage: f64,
}

/// Spend-vs-impressions efficiency point for the correlation scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendImpressionEntry {
    pub competitor_name: String,
    pub total_spend: f64,
    pub total_impressions: i64,
    pub impressions_per_dollar: f64,
    pub avg_ctr: f64,
}

/// Platform comparison row, including the chart color the backend assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformCtrEntry {
    pub platform: String,
    pub avg_ctr: f64,
    pub ad_count: i64,
    pub total_spend: f64,
    pub color: String,
}

/// The five derived views the analytics service computes in one pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsBreakdown {
    #[serde(default)]
    pub competitor_spend: Vec<CompetitorSpendEntry>,
    #[serde(default)]
    pub spend_ranges: Vec<SpendRangeEntry>,
    #[serde(default)]
    pub ctr_performance: Vec<CtrPerformanceEntry>,
    #[serde(default)]
    pub spend_impressions: Vec<SpendImpressionEntry>,
    #[serde(default, rename = "platformCTR")]
    pub platform_ctr: Vec<PlatformCtrEntry>,
}

/// Full payload of `GET /api/analytics/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    #[serde(default)]
    pub summary: Option<SummaryMetrics>,
    pub analytics: AnalyticsBreakdown,
    #[serde(default)]
    pub total_competitors: i64,
    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub competitor_names: Vec<String>,
}

/// Flattened breakdown handed to the overview page, stamped with the fetch
/// time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub competitor_spend: Vec<CompetitorSpendEntry>,
    pub spend_ranges: Vec<SpendRangeEntry>,
    pub ctr_performance: Vec<CtrPerformanceEntry>,
    pub spend_impressions: Vec<SpendImpressionEntry>,
    #[serde(rename = "platformCTR")]
    pub platform_ctr: Vec<PlatformCtrEntry>,
    pub generated_at: String,
}
