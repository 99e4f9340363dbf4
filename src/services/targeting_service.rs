use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiErrorCode, AppError, AppResult};
use crate::models::envelope::{FallbackReason, Sourced};
use crate::models::targeting::{TargetingIntel, TargetingServiceStatus};
use crate::services::mock_data::mock_targeting_intel;
use crate::services::normalize::normalize_targeting;
use crate::services::transport::ApiTransport;

/// Client for the targeting-intelligence collaborator. Every record that
/// leaves this service has passed through [`normalize_targeting`], so callers
/// always see fully-populated structures regardless of upstream shape drift.
#[derive(Clone)]
pub struct TargetingService {
    targeting_url: String,
    transport: ApiTransport,
}

impl TargetingService {
    pub fn new(config: &Config, transport: ApiTransport) -> Self {
        Self {
            targeting_url: config.endpoints.targeting_intel.clone(),
            transport,
        }
    }

    /// All targeting records for the current user. Falls back to a
    /// single-element demo list when unauthenticated or when the service
    /// misbehaves.
    pub async fn fetch_user_targeting_intel(&self) -> Sourced<Vec<TargetingIntel>> {
        if !self.transport.session().is_authenticated() {
            debug!(target: "app::targeting", "no usable session, serving demo targeting record");
            return Sourced::fallback(vec![mock_targeting_intel()], FallbackReason::Unauthenticated);
        }

        match self.try_fetch_all().await {
            Ok(records) => {
                debug!(
                    target: "app::targeting",
                    count = records.len(),
                    "targeting records loaded"
                );
                Sourced::live(records)
            }
            Err(err) => {
                warn!(
                    target: "app::targeting",
                    error = %err,
                    "targeting fetch failed, serving demo record"
                );
                Sourced::fallback(
                    vec![mock_targeting_intel()],
                    FallbackReason::RequestFailed(err.to_string()),
                )
            }
        }
    }

    async fn try_fetch_all(&self) -> AppResult<Vec<TargetingIntel>> {
        let url = format!("{}/api/targeting-intel", self.targeting_url);
        let payload = self.transport.get_json(&url).await?;

        // A success envelope whose data is not an array is as unusable as a
        // failed request, so it takes the same fallback path.
        let Some(records) = payload.get("data").and_then(JsonValue::as_array) else {
            return Err(AppError::api(
                ApiErrorCode::InvalidResponse,
                "响应缺少 data 数组",
            ));
        };

        Ok(records.iter().map(normalize_targeting).collect())
    }

    /// Targeting record for one competitor. A success envelope without data
    /// is a real answer (`None`, live); only failures degrade to the demo
    /// record.
    pub async fn fetch_targeting_intel(
        &self,
        competitor_id: &str,
    ) -> Sourced<Option<TargetingIntel>> {
        if !self.transport.session().is_authenticated() {
            debug!(target: "app::targeting", "no usable session, serving demo targeting record");
            return Sourced::fallback(
                Some(mock_targeting_intel()),
                FallbackReason::Unauthenticated,
            );
        }

        let url = format!("{}/api/targeting-intel/{}", self.targeting_url, competitor_id);
        self.fetch_single(&url).await
    }

    /// Most recently modeled targeting record for the current user.
    pub async fn fetch_latest_targeting_intel(&self) -> Sourced<Option<TargetingIntel>> {
        if !self.transport.session().is_authenticated() {
            debug!(target: "app::targeting", "no usable session, serving demo targeting record");
            return Sourced::fallback(
                Some(mock_targeting_intel()),
                FallbackReason::Unauthenticated,
            );
        }

        let url = format!("{}/api/targeting-intel/latest", self.targeting_url);
        self.fetch_single(&url).await
    }

    async fn fetch_single(&self, url: &str) -> Sourced<Option<TargetingIntel>> {
        match self.transport.get_json(url).await {
            Ok(payload) => match payload.get("data").filter(|data| !data.is_null()) {
                Some(record) => Sourced::live(Some(normalize_targeting(record))),
                None => {
                    debug!(target: "app::targeting", "no targeting record available");
                    Sourced::live(None)
                }
            },
            Err(err) => {
                warn!(
                    target: "app::targeting",
                    error = %err,
                    "targeting fetch failed, serving demo record"
                );
                Sourced::fallback(
                    Some(mock_targeting_intel()),
                    FallbackReason::RequestFailed(err.to_string()),
                )
            }
        }
    }

    /// Connectivity report for the targeting banner: session first, then the
    /// health endpoint, then a latest-record fetch to learn whether the user
    /// has any modeled data.
    pub async fn test_connection(&self) -> TargetingServiceStatus {
        if !self.transport.session().is_authenticated() {
            return TargetingServiceStatus {
                connected: false,
                authenticated: false,
                user_has_data: false,
                error: Some("Not authenticated".to_string()),
            };
        }

        let health_url = format!("{}/health", self.targeting_url);
        if !self.transport.probe(&health_url).await {
            return TargetingServiceStatus {
                connected: false,
                authenticated: true,
                user_has_data: false,
                error: Some("Cannot connect to targeting intelligence service".to_string()),
            };
        }

        let latest_url = format!("{}/api/targeting-intel/latest", self.targeting_url);
        match self.transport.get_json(&latest_url).await {
            Ok(payload) => TargetingServiceStatus {
                connected: true,
                authenticated: true,
                user_has_data: payload
                    .get("data")
                    .map(|data| !data.is_null())
                    .unwrap_or(false),
                error: None,
            },
            Err(err) => {
                warn!(target: "app::targeting", error = %err, "targeting connectivity check failed");
                TargetingServiceStatus {
                    connected: false,
                    authenticated: true,
                    user_has_data: false,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
