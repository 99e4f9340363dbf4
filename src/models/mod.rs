pub mod analytics;
pub mod auth;
pub mod competitor;
pub mod envelope;
pub mod metrics;
pub mod session;
pub mod targeting;
