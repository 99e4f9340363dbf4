use std::fmt;

use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::warn;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    HttpTimeout,
    ServiceUnavailable,
    RequestRejected,
    InvalidResponse,
    InvalidRequest,
    Unknown,
}

impl ApiErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiErrorCode::HttpTimeout => "HTTP_TIMEOUT",
            ApiErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ApiErrorCode::RequestRejected => "REQUEST_REJECTED",
            ApiErrorCode::InvalidResponse => "INVALID_RESPONSE",
            ApiErrorCode::InvalidRequest => "INVALID_REQUEST",
            ApiErrorCode::Unknown => "UNKNOWN_API_ERROR",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("未登录或登录状态已过期")]
    Unauthenticated,

    #[error("{message}")]
    Api {
        code: ApiErrorCode,
        message: String,
        correlation_id: Option<String>,
        details: Option<JsonValue>,
    },

    #[error("验证失败: {message}")]
    Validation { message: String },

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn unauthenticated() -> Self {
        warn!(target: "app::session", "operation requires an authenticated session");
        AppError::Unauthenticated
    }

    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation { message }
    }

    pub fn api(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self::api_with_details(code, message, None, None)
    }

    pub fn api_with_details(
        code: ApiErrorCode,
        message: impl Into<String>,
        correlation_id: Option<&str>,
        details: Option<JsonValue>,
    ) -> Self {
        let message = message.into();
        let correlation = correlation_id.map(|value| value.to_string());
        match (&correlation, &details) {
            (Some(id), Some(payload)) => {
                warn!(
                    target: "app::api::error",
                    code = %code,
                    correlation_id = %id,
                    details = %payload,
                    %message
                );
            }
            (Some(id), None) => {
                warn!(
                    target: "app::api::error",
                    code = %code,
                    correlation_id = %id,
                    %message
                );
            }
            (None, Some(payload)) => {
                warn!(target: "app::api::error", code = %code, details = %payload, %message);
            }
            (None, None) => {
                warn!(target: "app::api::error", code = %code, %message);
            }
        }

        AppError::Api {
            code,
            message,
            correlation_id: correlation,
            details,
        }
    }

    pub fn api_code(&self) -> Option<ApiErrorCode> {
        match self {
            AppError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn api_correlation_id(&self) -> Option<&str> {
        match self {
            AppError::Api { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }

    pub fn api_details(&self) -> Option<&JsonValue> {
        match self {
            AppError::Api { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }
}
