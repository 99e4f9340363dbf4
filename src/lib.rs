//! Client-side data layer for the AdSurveillance competitor-intelligence
//! dashboard: session resolution from a stored JWT, typed clients for the
//! metrics, analytics, competitor and targeting-intelligence services, and
//! deterministic demo datasets that every read operation degrades to when
//! the session or a collaborator is unavailable.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::envelope::{DataOrigin, FallbackReason, Sourced};
pub use services::session_service::{
    FileTokenStore, MemoryTokenStore, SessionResolver, TokenStore,
};
pub use services::transport::ApiTransport;
