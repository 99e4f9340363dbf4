use chrono::Utc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::analytics::{
    AnalyticsSnapshot, CompetitorSpendEntry, CtrPerformanceEntry, PlatformCtrEntry,
    SpendImpressionEntry, SpendRangeEntry, UserAnalytics,
};
use crate::models::envelope::{FallbackReason, Sourced};
use crate::services::metrics_service::envelope_data;
use crate::services::mock_data::mock_user_analytics;
use crate::services::transport::ApiTransport;

/// Client for the analytics collaborator. One aggregate endpoint carries all
/// five chart views; the per-chart accessors are projections over it and
/// inherit its data origin, live or demo, uniformly.
#[derive(Clone)]
pub struct AnalyticsService {
    analytics_url: String,
    transport: ApiTransport,
}

impl AnalyticsService {
    pub fn new(config: &Config, transport: ApiTransport) -> Self {
        Self {
            analytics_url: config.endpoints.analytics.clone(),
            transport,
        }
    }

    pub async fn user_analytics_summary(&self) -> Sourced<UserAnalytics> {
        if !self.transport.session().is_authenticated() {
            debug!(target: "app::analytics", "no usable session, serving demo analytics");
            return Sourced::fallback(mock_user_analytics(), FallbackReason::Unauthenticated);
        }

        match self.try_fetch_summary().await {
            Ok(analytics) => {
                debug!(
                    target: "app::analytics",
                    competitors = analytics.total_competitors,
                    spend = analytics.total_spend,
                    "user analytics loaded"
                );
                Sourced::live(analytics)
            }
            Err(err) => {
                warn!(
                    target: "app::analytics",
                    error = %err,
                    "analytics fetch failed, serving demo data"
                );
                Sourced::fallback(
                    mock_user_analytics(),
                    FallbackReason::RequestFailed(err.to_string()),
                )
            }
        }
    }

    async fn try_fetch_summary(&self) -> AppResult<UserAnalytics> {
        let url = format!("{}/api/analytics/summary", self.analytics_url);
        let payload = self.transport.get_json(&url).await?;
        envelope_data(payload)
    }

    /// The five views flattened for the overview page, stamped with the
    /// fetch time.
    pub async fn analytics_summary(&self) -> Sourced<AnalyticsSnapshot> {
        self.user_analytics_summary().await.map(|analytics| {
            let views = analytics.analytics;
            AnalyticsSnapshot {
                competitor_spend: views.competitor_spend,
                spend_ranges: views.spend_ranges,
                ctr_performance: views.ctr_performance,
                spend_impressions: views.spend_impressions,
                platform_ctr: views.platform_ctr,
                generated_at: Utc::now().to_rfc3339(),
            }
        })
    }

    pub async fn competitor_spend_distribution(
        &self,
        limit: usize,
    ) -> Sourced<Vec<CompetitorSpendEntry>> {
        self.user_analytics_summary().await.map(|analytics| {
            analytics
                .analytics
                .competitor_spend
                .into_iter()
                .take(limit)
                .collect()
        })
    }

    pub async fn spend_range_distribution(&self) -> Sourced<Vec<SpendRangeEntry>> {
        self.user_analytics_summary()
            .await
            .map(|analytics| analytics.analytics.spend_ranges)
    }

    pub async fn ctr_performance_distribution(&self) -> Sourced<Vec<CtrPerformanceEntry>> {
        self.user_analytics_summary()
            .await
            .map(|analytics| analytics.analytics.ctr_performance)
    }

    pub async fn spend_impressions_correlation(
        &self,
        limit: usize,
    ) -> Sourced<Vec<SpendImpressionEntry>> {
        self.user_analytics_summary().await.map(|analytics| {
            analytics
                .analytics
                .spend_impressions
                .into_iter()
                .take(limit)
                .collect()
        })
    }

    pub async fn platform_ctr(&self) -> Sourced<Vec<PlatformCtrEntry>> {
        self.user_analytics_summary()
            .await
            .map(|analytics| analytics.analytics.platform_ctr)
    }
}
