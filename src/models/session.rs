use serde::{Deserialize, Serialize};

/// Fallback shown when an older token predates the `name` claim.
pub const DEFAULT_USER_NAME: &str = "User";

/// Identity decoded from the bearer token payload. Never persisted on its
/// own; recomputed from the token on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// Lenient view of the JWT payload segment. Older tokens omit `name`, and a
/// broken issuer may omit anything, so every claim is optional here and the
/// resolver decides what counts as a usable session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Expiry as Unix seconds.
    #[serde(default)]
    pub exp: Option<i64>,
}
