use tracing::warn;

/// Base URLs of the backend collaborators. Each microservice runs on its own
/// port in development, so every URL is resolved independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth: String,
    pub analytics: String,
    pub daily_metrics: String,
    pub competitors: String,
    pub targeting_intel: String,
}

impl Endpoints {
    pub fn from_env() -> Self {
        Self {
            auth: env_url("ADSURV_AUTH_URL", "http://localhost:5003"),
            analytics: env_url("ADSURV_ANALYTICS_URL", "http://localhost:5007"),
            daily_metrics: env_url("ADSURV_DAILY_METRICS_URL", "http://localhost:5008"),
            competitors: env_url("ADSURV_COMPETITORS_URL", "http://localhost:5009"),
            targeting_intel: env_url("ADSURV_TARGETING_INTEL_URL", "http://localhost:5011"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Connection details for the managed Postgres REST endpoint used by the
/// database health fallback. Absent or malformed settings leave the fallback
/// disabled rather than failing construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("ADSURV_SUPABASE_URL").ok()?;
        let anon_key = std::env::var("ADSURV_SUPABASE_ANON_KEY").ok()?;

        let url = url.trim().trim_end_matches('/').to_string();
        let anon_key = anon_key.trim().to_string();

        if !url.starts_with("https://") {
            warn!(target: "app::config", %url, "supabase url must start with https://, ignoring");
            return None;
        }
        if anon_key.len() < 20 {
            warn!(target: "app::config", "supabase anon key looks truncated, ignoring");
            return None;
        }

        Some(Self { url, anon_key })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub supabase: Option<SupabaseConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            endpoints: Endpoints::from_env(),
            supabase: SupabaseConfig::from_env(),
        }
    }
}

fn env_url(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
