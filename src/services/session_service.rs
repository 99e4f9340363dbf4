use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::models::session::{TokenClaims, UserIdentity, DEFAULT_USER_NAME};

/// Client-side persistence for the bearer token, the localStorage analog.
/// Injected into the resolver so tests can supply arbitrary token states
/// without touching real storage.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token persisted as a single file under the application data directory.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let mut path = data_dir.into();
        path.push("session.token");
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() {
                    None
                } else {
                    Some(token)
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(target: "app::session", error = %err, "failed to read token file");
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(target: "app::session", error = %err, "failed to create token directory");
                return;
            }
        }
        if let Err(err) = std::fs::write(&self.path, token) {
            warn!(target: "app::session", error = %err, "failed to persist token");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(target: "app::session", error = %err, "failed to remove token file");
            }
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn save(&self, token: &str) {
        *self.token.write().expect("token lock poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }
}

/// Answers "is there a usable, non-expired session?" and "who is the current
/// user?" from the locally-held token alone. No network round-trip, and the
/// read operations never raise: any decode failure reads as "unauthenticated".
#[derive(Clone)]
pub struct SessionResolver {
    store: Arc<dyn TokenStore>,
    on_logout: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl SessionResolver {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            on_logout: None,
        }
    }

    /// Registers the application-state reset invoked after logout, the
    /// equivalent of the full page reload in the browser client.
    pub fn with_logout_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_logout = Some(Arc::new(hook));
        self
    }

    pub fn token(&self) -> Option<String> {
        self.store.load()
    }

    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.token() else {
            debug!(target: "app::session", "no token present");
            return false;
        };

        match decode_claims(&token) {
            Some(claims) => {
                let valid = claims_usable(&claims);
                debug!(
                    target: "app::session",
                    has_user_id = claims.user_id.is_some(),
                    has_email = claims.email.is_some(),
                    has_name = claims.name.is_some(),
                    valid,
                    "token validation"
                );
                valid
            }
            None => {
                debug!(target: "app::session", "token failed to decode");
                false
            }
        }
    }

    pub fn user_info(&self) -> Option<UserIdentity> {
        let token = self.token()?;
        let claims = decode_claims(&token)?;
        if !claims_usable(&claims) {
            return None;
        }

        let name = claims
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| {
                warn!(target: "app::session", "token missing name claim, using fallback");
                DEFAULT_USER_NAME.to_string()
            });

        Some(UserIdentity {
            user_id: claims.user_id?,
            email: claims.email?,
            name,
        })
    }

    pub fn logout(&self) {
        debug!(target: "app::session", "logging out");
        self.store.clear();
        if let Some(hook) = &self.on_logout {
            hook();
        }
    }
}

fn claims_usable(claims: &TokenClaims) -> bool {
    let has_identity = claims
        .user_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty())
        && claims
            .email
            .as_deref()
            .is_some_and(|email| !email.trim().is_empty());

    let not_expired = claims
        .exp
        .is_some_and(|exp| exp.saturating_mul(1000) > Utc::now().timestamp_millis());

    has_identity && not_expired
}

/// Decodes the payload segment of a JWT-shaped token. Returns `None` on any
/// structural defect: wrong segment count, undecodable base64, or a header or
/// payload that is not a JSON object.
fn decode_claims(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }

    let header = decode_segment(segments[0])?;
    if !serde_json::from_slice::<JsonValue>(&header).is_ok_and(|value| value.is_object()) {
        return None;
    }

    // The signature is opaque, but it must still be well-formed base64.
    decode_segment(segments[2])?;

    let payload = decode_segment(segments[1])?;
    serde_json::from_slice::<TokenClaims>(&payload).ok()
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .ok()
}
