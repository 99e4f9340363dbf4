use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiErrorCode, AppError, AppResult};
use crate::models::envelope::{ApiEnvelope, FallbackReason, Sourced};
use crate::models::metrics::{
    DailyAdMetric, DatabaseStatus, FetchMetricsOptions, MetricsPeriod, SummaryMetrics,
};
use crate::services::mock_data::{generate_mock_daily_metrics, mock_summary_metrics};
use crate::services::supabase::SupabaseRest;
use crate::services::transport::ApiTransport;

/// Client for the daily-metrics collaborator. Read operations prefer live
/// per-user data and degrade to the demo datasets on any failure; they never
/// surface an error to callers.
#[derive(Clone)]
pub struct MetricsService {
    daily_metrics_url: String,
    transport: ApiTransport,
    supabase: Option<SupabaseRest>,
}

impl MetricsService {
    pub fn new(config: &Config, transport: ApiTransport) -> AppResult<Self> {
        let supabase = match &config.supabase {
            Some(supabase_config) => Some(SupabaseRest::new(supabase_config.clone())?),
            None => None,
        };

        Ok(Self {
            daily_metrics_url: config.endpoints.daily_metrics.clone(),
            transport,
            supabase,
        })
    }

    pub async fn fetch_summary_metrics(&self, period: &MetricsPeriod) -> Sourced<SummaryMetrics> {
        if !self.transport.session().is_authenticated() {
            debug!(target: "app::metrics", "no usable session, serving demo summary");
            return Sourced::fallback(mock_summary_metrics(), FallbackReason::Unauthenticated);
        }

        match self.try_fetch_summary(period).await {
            Ok(summary) => Sourced::live(summary),
            Err(err) => {
                warn!(
                    target: "app::metrics",
                    period = period.as_str(),
                    error = %err,
                    "summary metrics fetch failed, serving demo data"
                );
                Sourced::fallback(
                    mock_summary_metrics(),
                    FallbackReason::RequestFailed(err.to_string()),
                )
            }
        }
    }

    async fn try_fetch_summary(&self, period: &MetricsPeriod) -> AppResult<SummaryMetrics> {
        let url = format!(
            "{}/api/summary-metrics?period={}",
            self.daily_metrics_url,
            period.as_str()
        );
        let payload = self.transport.get_json(&url).await?;
        envelope_data(payload)
    }

    pub async fn fetch_daily_metrics(
        &self,
        options: &FetchMetricsOptions,
    ) -> Sourced<Vec<DailyAdMetric>> {
        if !self.transport.session().is_authenticated() {
            debug!(target: "app::metrics", "no usable session, serving demo ad records");
            return Sourced::fallback(
                generate_mock_daily_metrics(options.limit, options.show_latest_only),
                FallbackReason::Unauthenticated,
            );
        }

        match self.try_fetch_daily(options).await {
            Ok(records) => {
                debug!(
                    target: "app::metrics",
                    count = records.len(),
                    "daily metrics loaded"
                );
                Sourced::live(records)
            }
            Err(err) => {
                warn!(
                    target: "app::metrics",
                    error = %err,
                    "daily metrics fetch failed, serving demo data"
                );
                Sourced::fallback(
                    generate_mock_daily_metrics(options.limit, options.show_latest_only),
                    FallbackReason::RequestFailed(err.to_string()),
                )
            }
        }
    }

    async fn try_fetch_daily(&self, options: &FetchMetricsOptions) -> AppResult<Vec<DailyAdMetric>> {
        // Latest mode and range mode are mutually exclusive; the range is
        // dropped rather than forwarded when both are supplied.
        let request = if options.show_latest_only {
            FetchMetricsOptions {
                start_date: None,
                end_date: None,
                ..options.clone()
            }
        } else {
            options.clone()
        };

        let url = format!("{}/api/daily-metrics", self.daily_metrics_url);
        let body = serde_json::to_value(&request)?;
        let payload = self.transport.post_json(&url, &body).await?;
        envelope_data(payload)
    }

    /// Connectivity report for the status banner. Requires an authenticated
    /// session outright; afterwards a healthy daily-metrics service counts as
    /// connected without touching the database, and only when the health
    /// probe fails are the two table counts queried directly.
    pub async fn test_database_connection(&self) -> DatabaseStatus {
        if !self.transport.session().is_authenticated() {
            return DatabaseStatus::disconnected("Not authenticated. Please login first.");
        }

        let health_url = format!("{}/health", self.daily_metrics_url);
        if self.transport.probe(&health_url).await {
            debug!(target: "app::db", "backend health probe succeeded");
            return DatabaseStatus {
                connected: true,
                summary_count: 0,
                daily_count: 0,
                error: Some("Backend services are running".to_string()),
            };
        }

        let Some(supabase) = &self.supabase else {
            return DatabaseStatus::disconnected(
                "Backend services not running. Please start the AdSurveillance backend.",
            );
        };

        let summary = supabase.row_count("summary_metrics").await;
        let daily = supabase.row_count("daily_metrics").await;

        if let Err(err) = &summary {
            warn!(target: "app::db", error = %err, "summary_metrics count query failed");
        }
        if let Err(err) = &daily {
            warn!(target: "app::db", error = %err, "daily_metrics count query failed");
        }

        // Connected reflects whether the database endpoint answered at all;
        // per-table failures only cost their count.
        let reached = summary.as_ref().map(|_| true).unwrap_or_else(|err| !unreachable(err))
            || daily.as_ref().map(|_| true).unwrap_or_else(|err| !unreachable(err));

        let first_error = summary
            .as_ref()
            .err()
            .or(daily.as_ref().err())
            .map(|err| err.to_string());

        if !reached {
            return DatabaseStatus {
                connected: false,
                summary_count: 0,
                daily_count: 0,
                error: first_error,
            };
        }

        DatabaseStatus {
            connected: true,
            summary_count: summary.unwrap_or(0),
            daily_count: daily.unwrap_or(0),
            error: first_error,
        }
    }
}

fn unreachable(err: &AppError) -> bool {
    matches!(
        err.api_code(),
        Some(ApiErrorCode::ServiceUnavailable | ApiErrorCode::HttpTimeout)
    )
}

/// Deserializes a success envelope and extracts its `data` field.
pub(crate) fn envelope_data<T: serde::de::DeserializeOwned>(payload: JsonValue) -> AppResult<T> {
    let envelope: ApiEnvelope<T> = serde_json::from_value(payload).map_err(|err| {
        AppError::api(
            ApiErrorCode::InvalidResponse,
            format!("响应数据解析失败: {err}"),
        )
    })?;
    envelope
        .data
        .ok_or_else(|| AppError::api(ApiErrorCode::InvalidResponse, "响应缺少 data 字段"))
}
