use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Submission payload for tracking a new competitor. The service augments it
/// with the caller's `user_id` before sending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCompetitor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_monthly_spend: Option<f64>,
}

impl NewCompetitor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: None,
            industry: None,
            estimated_monthly_spend: None,
        }
    }
}

/// Competitor row as the competitors service returns it. The service owns
/// the schema, so unknown columns are kept loose rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub estimated_monthly_spend: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

/// Acknowledgement for a successful competitor mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorCreated {
    pub data: Option<CompetitorRecord>,
    pub message: Option<String>,
}
