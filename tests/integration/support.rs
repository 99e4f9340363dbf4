#![allow(dead_code)]

use std::sync::Arc;

use adsurv_client::config::{Config, Endpoints};
use adsurv_client::services::session_service::{MemoryTokenStore, SessionResolver};
use adsurv_client::services::transport::ApiTransport;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde_json::json;

/// Builds a structurally valid JWT; the signature is not verified client-side
/// so any decodable third segment works.
pub fn forge_token(user_id: &str, email: &str, name: Option<&str>, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({ "alg": "HS256", "typ": "JWT" }).to_string());
    let mut claims = json!({ "user_id": user_id, "email": email, "exp": exp });
    if let Some(name) = name {
        claims["name"] = json!(name);
    }
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let signature = URL_SAFE_NO_PAD.encode(b"test-signature");
    format!("{header}.{payload}.{signature}")
}

pub fn valid_token(user_id: &str) -> String {
    forge_token(
        user_id,
        "tester@example.com",
        Some("Test User"),
        Utc::now().timestamp() + 3_600,
    )
}

pub fn expired_token() -> String {
    forge_token(
        "user-1",
        "tester@example.com",
        Some("Test User"),
        Utc::now().timestamp() - 3_600,
    )
}

/// Every collaborator pointed at the same base URL, typically a mock server.
pub fn config_at(base_url: &str) -> Config {
    Config {
        endpoints: Endpoints {
            auth: base_url.to_string(),
            analytics: base_url.to_string(),
            daily_metrics: base_url.to_string(),
            competitors: base_url.to_string(),
            targeting_intel: base_url.to_string(),
        },
        supabase: None,
    }
}

pub fn transport_with_store(store: MemoryTokenStore) -> ApiTransport {
    let session = SessionResolver::new(Arc::new(store));
    ApiTransport::new(session).expect("transport should build")
}

pub fn anonymous_transport() -> ApiTransport {
    transport_with_store(MemoryTokenStore::new())
}

pub fn authenticated_transport(user_id: &str) -> ApiTransport {
    transport_with_store(MemoryTokenStore::with_token(valid_token(user_id)))
}
