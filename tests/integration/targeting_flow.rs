mod support;

use adsurv_client::models::envelope::{DataOrigin, FallbackReason};
use adsurv_client::services::mock_data::mock_targeting_intel;
use adsurv_client::services::targeting_service::TargetingService;
use httpmock::prelude::*;
use serde_json::json;

fn targeting_service(base_url: &str, transport: adsurv_client::ApiTransport) -> TargetingService {
    TargetingService::new(&support::config_at(base_url), transport)
}

#[tokio::test]
async fn anonymous_list_serves_the_demo_record() {
    let service = targeting_service("http://127.0.0.1:1", support::anonymous_transport());
    let records = service.fetch_user_targeting_intel().await;

    assert_eq!(
        records.origin,
        DataOrigin::Fallback(FallbackReason::Unauthenticated)
    );
    assert_eq!(records.data.len(), 1);
    assert_eq!(records.data[0].competitor_name, "Nike");
    assert_eq!(records.data[0].data_source, "AI_MODELED");
    assert_eq!(records.data[0].confidence_score, 0.75);
}

#[tokio::test]
async fn partial_live_records_are_normalized() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/targeting-intel");
            then.status(200).json_body(json!({
                "success": true,
                "count": 1,
                "data": [
                    {
                        "id": "intel-9",
                        "competitor_name": "Adidas",
                        "age_distribution": { "18-24": "0.5", "25-34": 0.3 },
                        "confidence_score": "0.88"
                    }
                ]
            }));
        })
        .await;

    let service = targeting_service(&server.base_url(), support::authenticated_transport("user-5"));
    let records = service.fetch_user_targeting_intel().await;

    mock.assert_async().await;
    assert!(records.is_live());
    assert_eq!(records.data.len(), 1);

    let record = &records.data[0];
    let template = mock_targeting_intel();
    assert_eq!(record.id, "intel-9");
    assert_eq!(record.competitor_name, "Adidas");
    assert_eq!(record.confidence_score, 0.88);
    assert_eq!(record.age_distribution.age_18_24, 0.5);
    assert_eq!(record.age_distribution.age_35_44, 0.0);
    // untouched blocks come fully populated from the demo template
    assert_eq!(record.bidding_strategy, template.bidding_strategy);
    assert_eq!(record.gender_distribution, template.gender_distribution);
    assert_eq!(
        record.advanced_targeting.ai_recommendation,
        "Focus on mobile-first advertising strategy"
    );
}

#[tokio::test]
async fn non_array_data_degrades_to_the_demo_record() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/targeting-intel");
            then.status(200)
                .json_body(json!({ "success": true, "data": { "unexpected": "shape" } }));
        })
        .await;

    let service = targeting_service(&server.base_url(), support::authenticated_transport("user-5"));
    let records = service.fetch_user_targeting_intel().await;

    assert!(matches!(
        records.fallback_reason(),
        Some(FallbackReason::RequestFailed(_))
    ));
    assert_eq!(records.data.len(), 1);
    assert_eq!(records.data[0].competitor_name, "Nike");
}

#[tokio::test]
async fn missing_competitor_record_is_a_live_none() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/targeting-intel/comp-77");
            then.status(200)
                .json_body(json!({ "success": true, "data": null }));
        })
        .await;

    let service = targeting_service(&server.base_url(), support::authenticated_transport("user-5"));
    let record = service.fetch_targeting_intel("comp-77").await;

    mock.assert_async().await;
    assert!(record.is_live());
    assert!(record.data.is_none());
}

#[tokio::test]
async fn failed_latest_fetch_degrades_to_the_demo_record() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/targeting-intel/latest");
            then.status(500);
        })
        .await;

    let service = targeting_service(&server.base_url(), support::authenticated_transport("user-5"));
    let record = service.fetch_latest_targeting_intel().await;

    assert!(matches!(
        record.fallback_reason(),
        Some(FallbackReason::RequestFailed(_))
    ));
    let record = record.data.expect("demo record");
    assert_eq!(record.competitor_id, "11111111-1111-1111-1111-111111111111");
}

#[tokio::test]
async fn connection_report_requires_a_session() {
    let service = targeting_service("http://127.0.0.1:1", support::anonymous_transport());
    let status = service.test_connection().await;

    assert!(!status.connected);
    assert!(!status.authenticated);
    assert!(!status.user_has_data);
    assert_eq!(status.error.as_deref(), Some("Not authenticated"));
}

#[tokio::test]
async fn unreachable_service_is_reported_with_the_session_intact() {
    let service = targeting_service("http://127.0.0.1:1", support::authenticated_transport("user-5"));
    let status = service.test_connection().await;

    assert!(!status.connected);
    assert!(status.authenticated);
    assert_eq!(
        status.error.as_deref(),
        Some("Cannot connect to targeting intelligence service")
    );
}

#[tokio::test]
async fn healthy_service_reports_whether_the_user_has_data() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({ "status": "ok" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/targeting-intel/latest");
            then.status(200).json_body(json!({
                "success": true,
                "data": { "id": "intel-1", "competitor_name": "Adidas" }
            }));
        })
        .await;

    let service = targeting_service(&server.base_url(), support::authenticated_transport("user-5"));
    let status = service.test_connection().await;

    assert!(status.connected);
    assert!(status.authenticated);
    assert!(status.user_has_data);
    assert_eq!(status.error, None);
}
