use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::competitor::{CompetitorCreated, CompetitorRecord, NewCompetitor};
use crate::models::envelope::{ApiEnvelope, FallbackReason, Sourced};
use crate::services::metrics_service::envelope_data;
use crate::services::transport::ApiTransport;

/// Client for the competitors collaborator. Unlike the chart feeds, the
/// mutating path here surfaces failures to the caller: tracking a competitor
/// must never silently succeed against demo data.
#[derive(Clone)]
pub struct CompetitorService {
    competitors_url: String,
    transport: ApiTransport,
}

impl CompetitorService {
    pub fn new(config: &Config, transport: ApiTransport) -> Self {
        Self {
            competitors_url: config.endpoints.competitors.clone(),
            transport,
        }
    }

    /// The signed-in user's tracked competitors. An anonymous visitor simply
    /// has none, which is not an error.
    pub async fn user_competitors(&self) -> AppResult<Sourced<Vec<CompetitorRecord>>> {
        if !self.transport.session().is_authenticated() {
            debug!(target: "app::competitors", "no usable session, empty competitor list");
            return Ok(Sourced::fallback(
                Vec::new(),
                FallbackReason::Unauthenticated,
            ));
        }

        let url = format!("{}/api/competitors", self.competitors_url);
        let payload = self.transport.get_json(&url).await?;
        let records: Vec<CompetitorRecord> = envelope_data(payload)?;
        debug!(target: "app::competitors", count = records.len(), "competitors loaded");
        Ok(Sourced::live(records))
    }

    /// Tracks a new competitor for the signed-in user. Hard authentication
    /// precondition: no network call is attempted anonymously. The submitted
    /// payload is augmented with the caller's `user_id` before sending.
    pub async fn add_competitor(&self, competitor: &NewCompetitor) -> AppResult<CompetitorCreated> {
        if !self.transport.session().is_authenticated() {
            return Err(AppError::unauthenticated());
        }
        let identity = self
            .transport
            .session()
            .user_info()
            .ok_or_else(AppError::unauthenticated)?;

        let mut body = serde_json::to_value(competitor)?;
        if let Some(map) = body.as_object_mut() {
            map.insert(
                "user_id".to_string(),
                JsonValue::String(identity.user_id.clone()),
            );
        }

        let url = format!("{}/api/competitors", self.competitors_url);
        let payload = self.transport.post_json(&url, &body).await?;
        let envelope: ApiEnvelope<CompetitorRecord> = serde_json::from_value(payload)?;

        debug!(
            target: "app::competitors",
            user_id = %identity.user_id,
            name = %competitor.name,
            "competitor added"
        );

        Ok(CompetitorCreated {
            data: envelope.data,
            message: envelope.message,
        })
    }
}
