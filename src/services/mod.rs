pub mod analytics_service;
pub mod auth_service;
pub mod competitor_service;
pub mod metrics_service;
pub mod mock_data;
pub mod normalize;
pub mod session_service;
pub mod supabase;
pub mod targeting_service;
pub mod transport;
