use serde::{Deserialize, Serialize};

/// Application-level envelope every backend service wraps its payloads in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Why a read operation substituted demo data instead of live data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "cause", content = "detail")]
pub enum FallbackReason {
    Unauthenticated,
    RequestFailed(String),
}

/// Whether a result came from the backend or from the demo dataset. Exposed
/// so dashboards can render the "demo mode" indicator without comparing
/// values against hardcoded mocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "reason")]
pub enum DataOrigin {
    Live,
    Fallback(FallbackReason),
}

/// A dashboard payload tagged with its origin. Read operations on the
/// aggregation clients return this instead of throwing: a failed or
/// unauthenticated call degrades to demo data with `origin` recording why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub origin: DataOrigin,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Live,
        }
    }

    pub fn fallback(data: T, reason: FallbackReason) -> Self {
        Self {
            data,
            origin: DataOrigin::Fallback(reason),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.origin, DataOrigin::Live)
    }

    pub fn is_fallback(&self) -> bool {
        !self.is_live()
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match &self.origin {
            DataOrigin::Fallback(reason) => Some(reason),
            DataOrigin::Live => None,
        }
    }

    /// Projects the payload while keeping the origin tag, so slices of an
    /// aggregate result stay distinguishable as live or demo data.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            origin: self.origin,
        }
    }
}
