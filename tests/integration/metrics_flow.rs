mod support;

use adsurv_client::config::SupabaseConfig;
use adsurv_client::error::AppError;
use adsurv_client::models::competitor::NewCompetitor;
use adsurv_client::models::envelope::{DataOrigin, FallbackReason};
use adsurv_client::models::metrics::{FetchMetricsOptions, MetricsPeriod};
use adsurv_client::services::competitor_service::CompetitorService;
use adsurv_client::services::metrics_service::MetricsService;
use adsurv_client::services::session_service::MemoryTokenStore;
use chrono::Utc;
use httpmock::prelude::*;
use serde_json::json;

fn metrics_service(base_url: &str, transport: adsurv_client::ApiTransport) -> MetricsService {
    MetricsService::new(&support::config_at(base_url), transport)
        .expect("metrics service should build")
}

#[tokio::test]
async fn summary_serves_demo_figures_without_a_session() {
    let transport = support::anonymous_transport();
    let service = metrics_service("http://127.0.0.1:1", transport);

    let summary = service.fetch_summary_metrics(&MetricsPeriod::default()).await;

    assert_eq!(
        summary.origin,
        DataOrigin::Fallback(FallbackReason::Unauthenticated)
    );
    assert_eq!(summary.data.total_competitor_spend, 124_300.0);
    assert_eq!(summary.data.active_campaigns_count, 1_247);
    assert_eq!(summary.data.total_impressions, 12_400_000);
    assert_eq!(summary.data.average_ctr, 0.0342);
    assert_eq!(summary.data.platform_distribution["Meta"], 36.5);
    assert_eq!(summary.data.platform_distribution["LinkedIn"], 12.4);
}

#[tokio::test]
async fn expired_token_counts_as_unauthenticated_and_skips_the_network() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/summary-metrics");
            then.status(200);
        })
        .await;

    let transport =
        support::transport_with_store(MemoryTokenStore::with_token(support::expired_token()));
    let service = metrics_service(&server.base_url(), transport);

    let summary = service.fetch_summary_metrics(&MetricsPeriod::SevenDays).await;

    assert_eq!(
        summary.origin,
        DataOrigin::Fallback(FallbackReason::Unauthenticated)
    );
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn live_summary_sends_bearer_token_and_period() {
    let server = MockServer::start_async().await;
    let token = support::valid_token("user-7");
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/summary-metrics")
                .query_param("period", "30d")
                .header("authorization", format!("Bearer {token}"));
            then.status(200).json_body(json!({
                "success": true,
                "data": {
                    "id": "sum-1",
                    "total_competitor_spend": 52_000.5,
                    "active_campaigns_count": 87,
                    "total_impressions": 2_400_000,
                    "average_ctr": 0.021,
                    "platform_distribution": { "Meta": 60.0, "Google": 40.0 },
                    "created_at": "2026-08-01T00:00:00Z",
                    "updated_at": "2026-08-02T00:00:00Z"
                }
            }));
        })
        .await;

    let transport = support::transport_with_store(MemoryTokenStore::with_token(token.clone()));
    let service = metrics_service(&server.base_url(), transport);

    let summary = service
        .fetch_summary_metrics(&MetricsPeriod::ThirtyDays)
        .await;

    mock.assert_async().await;
    assert!(summary.is_live());
    assert_eq!(summary.data.total_competitor_spend, 52_000.5);
    assert_eq!(summary.data.active_campaigns_count, 87);
    assert_eq!(summary.data.platform_distribution["Google"], 40.0);
}

#[tokio::test]
async fn server_error_degrades_summary_to_demo_data() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/summary-metrics");
            then.status(500).json_body(json!({ "error": "boom" }));
        })
        .await;

    let service = metrics_service(&server.base_url(), support::authenticated_transport("user-7"));
    let summary = service.fetch_summary_metrics(&MetricsPeriod::SevenDays).await;

    assert!(matches!(
        summary.fallback_reason(),
        Some(FallbackReason::RequestFailed(_))
    ));
    assert_eq!(summary.data.total_competitor_spend, 124_300.0);
}

#[tokio::test]
async fn failed_success_flag_degrades_summary_to_demo_data() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/summary-metrics");
            then.status(200)
                .json_body(json!({ "success": false, "error": "no rows for user" }));
        })
        .await;

    let service = metrics_service(&server.base_url(), support::authenticated_transport("user-7"));
    let summary = service.fetch_summary_metrics(&MetricsPeriod::SevenDays).await;

    match summary.fallback_reason() {
        Some(FallbackReason::RequestFailed(detail)) => {
            assert!(detail.contains("no rows for user"), "detail was {detail}")
        }
        other => panic!("expected request-failed fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn latest_only_daily_request_drops_the_date_range() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/daily-metrics")
                .json_body(json!({ "limit": 5, "showLatestOnly": true }));
            then.status(200).json_body(json!({
                "success": true,
                "data": [
                    {
                        "id": "row-1",
                        "date": "2026-08-29",
                        "competitor_name": "Nike",
                        "platform": "Meta",
                        "status": "active",
                        "daily_spend": 4_200.0,
                        "daily_impressions": 91_000,
                        "daily_ctr": 0.031
                    },
                    {
                        "id": "row-2",
                        "date": "2026-08-29",
                        "competitor_name": "Adidas",
                        "platform": "Google Ads",
                        "status": "paused",
                        "daily_spend": 1_150.0,
                        "daily_impressions": 40_500,
                        "daily_ctr": 0.018
                    }
                ]
            }));
        })
        .await;

    let service = metrics_service(&server.base_url(), support::authenticated_transport("user-7"));
    let mut options = FetchMetricsOptions::latest(5);
    // A stray range must not survive into the latest-only request body.
    options.start_date = chrono::NaiveDate::from_ymd_opt(2026, 1, 1);

    let records = service.fetch_daily_metrics(&options).await;

    mock.assert_async().await;
    assert!(records.is_live());
    assert_eq!(records.data.len(), 2);
    assert_eq!(records.data[0].competitor_name, "Nike");
}

#[tokio::test]
async fn demo_daily_metrics_are_deterministic_and_latest_pins_today() {
    let service = metrics_service("http://127.0.0.1:1", support::anonymous_transport());
    let options = FetchMetricsOptions::latest(5);

    let first = service.fetch_daily_metrics(&options).await;
    let second = service.fetch_daily_metrics(&options).await;

    assert_eq!(
        first.origin,
        DataOrigin::Fallback(FallbackReason::Unauthenticated)
    );
    assert_eq!(first.data, second.data);
    assert_eq!(first.data.len(), 5);

    let today = Utc::now().date_naive();
    assert!(first.data.iter().all(|record| record.date == today));
}

#[tokio::test]
async fn unreachable_backend_degrades_latest_daily_metrics_to_today() {
    // nothing listens on this port, so the authenticated call fails fast
    let service = metrics_service("http://127.0.0.1:1", support::authenticated_transport("user-7"));

    let records = service.fetch_daily_metrics(&FetchMetricsOptions::latest(5)).await;

    assert!(matches!(
        records.fallback_reason(),
        Some(FallbackReason::RequestFailed(_))
    ));
    assert_eq!(records.data.len(), 5);
    let today = Utc::now().date_naive();
    assert!(records.data.iter().all(|record| record.date == today));
}

#[tokio::test]
async fn database_status_requires_a_session() {
    let service = metrics_service("http://127.0.0.1:1", support::anonymous_transport());
    let status = service.test_database_connection().await;

    assert!(!status.connected);
    assert_eq!(
        status.error.as_deref(),
        Some("Not authenticated. Please login first.")
    );
}

#[tokio::test]
async fn healthy_backend_short_circuits_the_database_probe() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({ "status": "ok" }));
        })
        .await;

    let service = metrics_service(&server.base_url(), support::authenticated_transport("user-7"));
    let status = service.test_database_connection().await;

    assert!(status.connected);
    assert_eq!(status.summary_count, 0);
    assert_eq!(status.daily_count, 0);
    assert_eq!(status.error.as_deref(), Some("Backend services are running"));
}

#[tokio::test]
async fn unhealthy_backend_without_database_reports_disconnected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(503);
        })
        .await;

    let service = metrics_service(&server.base_url(), support::authenticated_transport("user-7"));
    let status = service.test_database_connection().await;

    assert!(!status.connected);
    assert_eq!(
        status.error.as_deref(),
        Some("Backend services not running. Please start the AdSurveillance backend.")
    );
}

#[tokio::test]
async fn unhealthy_backend_falls_back_to_database_row_counts() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(503);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/summary_metrics")
                .query_param("select", "id")
                .header("Prefer", "count=exact")
                .header("Range", "0-0");
            then.status(206)
                .header("Content-Range", "0-0/57")
                .json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/daily_metrics")
                .query_param("select", "id");
            then.status(206)
                .header("Content-Range", "0-0/1042")
                .json_body(json!([]));
        })
        .await;

    let mut config = support::config_at(&server.base_url());
    config.supabase = Some(SupabaseConfig {
        url: server.base_url(),
        anon_key: "anon-key-anon-key-anon-key-anon-key-anon".to_string(),
    });
    let service = MetricsService::new(&config, support::authenticated_transport("user-7"))
        .expect("metrics service should build");

    let status = service.test_database_connection().await;

    assert!(status.connected);
    assert_eq!(status.summary_count, 57);
    assert_eq!(status.daily_count, 1042);
    assert_eq!(status.error, None);
}

#[tokio::test]
async fn add_competitor_requires_authentication() {
    let transport = support::anonymous_transport();
    let service = CompetitorService::new(&support::config_at("http://127.0.0.1:1"), transport);

    let err = service
        .add_competitor(&NewCompetitor::named("Nike"))
        .await
        .expect_err("anonymous mutation must fail");

    assert!(matches!(err, AppError::Unauthenticated));
}

#[tokio::test]
async fn add_competitor_injects_the_callers_user_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/competitors")
                .json_body_partial(r#"{ "user_id": "user-42", "name": "Nike" }"#);
            then.status(200).json_body(json!({
                "success": true,
                "data": {
                    "id": "comp-1",
                    "user_id": "user-42",
                    "name": "Nike",
                    "industry": "Sportswear"
                },
                "message": "Competitor added"
            }));
        })
        .await;

    let service = CompetitorService::new(
        &support::config_at(&server.base_url()),
        support::authenticated_transport("user-42"),
    );

    let created = service
        .add_competitor(&NewCompetitor::named("Nike"))
        .await
        .expect("tracked competitor");

    mock.assert_async().await;
    assert_eq!(created.message.as_deref(), Some("Competitor added"));
    let record = created.data.expect("created record");
    assert_eq!(record.name, "Nike");
    assert_eq!(record.user_id.as_deref(), Some("user-42"));
}

#[tokio::test]
async fn anonymous_competitor_list_is_empty_without_a_request() {
    let service = CompetitorService::new(
        &support::config_at("http://127.0.0.1:1"),
        support::anonymous_transport(),
    );

    let competitors = service.user_competitors().await.expect("no hard failure");

    assert!(competitors.data.is_empty());
    assert_eq!(
        competitors.origin,
        DataOrigin::Fallback(FallbackReason::Unauthenticated)
    );
}
