use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// User object returned by the auth service alongside a token. The auth
/// service owns the schema; only the fields the client reads are typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

/// Raw response shape shared by `/login`, `/signup`, `/verify` and
/// `/complete-onboarding`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Established session after a successful login or signup. The token has
/// already been persisted to the token store by the time callers see this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub business_type: String,
    pub industry: String,
    pub goals: String,
}
