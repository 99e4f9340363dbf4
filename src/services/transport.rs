use reqwest::{Method, StatusCode};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ApiErrorCode, AppError, AppResult};
use crate::services::session_service::SessionResolver;

/// Shared authorized HTTP plumbing for every backend collaborator. Issues a
/// single attempt per call: failures degrade at the service layer instead of
/// being retried here, and no layer-level timeout is imposed beyond the
/// transport's own defaults.
#[derive(Clone)]
pub struct ApiTransport {
    client: reqwest::Client,
    session: SessionResolver,
}

impl ApiTransport {
    pub fn new(session: SessionResolver) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(std::time::Duration::from_secs(90)))
            .build()
            .map_err(|err| AppError::other(format!("初始化 HTTP 客户端失败: {err}")))?;

        Ok(Self { client, session })
    }

    pub fn session(&self) -> &SessionResolver {
        &self.session
    }

    /// Authorized GET expecting a `{ success, ... }` envelope.
    pub async fn get_json(&self, url: &str) -> AppResult<JsonValue> {
        self.execute(Method::GET, url, None, true).await
    }

    /// Authorized POST expecting a `{ success, ... }` envelope.
    pub async fn post_json(&self, url: &str, body: &JsonValue) -> AppResult<JsonValue> {
        self.execute(Method::POST, url, Some(body), true).await
    }

    /// POST that hands back whatever JSON the service returned without
    /// interpreting the `success` flag. The auth endpoints report failures
    /// inside the body rather than via status codes.
    pub async fn post_raw(&self, url: &str, body: &JsonValue) -> AppResult<JsonValue> {
        self.execute(Method::POST, url, Some(body), false).await
    }

    /// Unauthenticated liveness probe for `/health` endpoints.
    pub async fn probe(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(target: "app::transport", %url, error = %err, "health probe failed");
                false
            }
        }
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&JsonValue>,
        check_success: bool,
    ) -> AppResult<JsonValue> {
        let correlation_id = Uuid::new_v4().to_string();
        let token = self.session.token();

        debug!(
            target: "app::transport",
            method = %method,
            %url,
            has_token = token.is_some(),
            correlation_id = %correlation_id,
            "issuing request"
        );

        let mut request = self
            .client
            .request(method, url)
            .header("Content-Type", "application/json");
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| error_from_reqwest(err, correlation_id.as_str()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_status(response, status, correlation_id.as_str()).await);
        }

        let payload: JsonValue = response.json().await.map_err(|err| {
            AppError::api_with_details(
                ApiErrorCode::InvalidResponse,
                "响应内容非 JSON",
                Some(correlation_id.as_str()),
                Some(json!({ "reason": err.to_string() })),
            )
        })?;

        if check_success && payload.get("success").and_then(JsonValue::as_bool) != Some(true) {
            let message = payload
                .get("error")
                .and_then(JsonValue::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| "服务返回失败状态".to_string());
            return Err(AppError::api_with_details(
                ApiErrorCode::RequestRejected,
                message,
                Some(correlation_id.as_str()),
                None,
            ));
        }

        debug!(
            target: "app::transport",
            %url,
            correlation_id = %correlation_id,
            "request succeeded"
        );
        Ok(payload)
    }
}

/// Builds the diagnostic for a non-2xx response: the JSON `error` field when
/// the body parses, the raw text otherwise.
async fn error_from_status(
    response: reqwest::Response,
    status: StatusCode,
    correlation_id: &str,
) -> AppError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<JsonValue>(&body)
        .ok()
        .and_then(|parsed| {
            parsed
                .get("error")
                .and_then(JsonValue::as_str)
                .map(str::to_string)
        })
        .or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .unwrap_or_else(|| format!("HTTP 错误 (状态码 {})", status.as_u16()));

    warn!(
        target: "app::transport",
        status = status.as_u16(),
        correlation_id = %correlation_id,
        "服务返回非成功状态"
    );

    AppError::api_with_details(
        ApiErrorCode::RequestRejected,
        message,
        Some(correlation_id),
        Some(json!({ "status": status.as_u16() })),
    )
}

fn error_from_reqwest(err: reqwest::Error, correlation_id: &str) -> AppError {
    if err.is_timeout() {
        AppError::api_with_details(
            ApiErrorCode::HttpTimeout,
            "请求超时",
            Some(correlation_id),
            None,
        )
    } else if err.is_connect() {
        AppError::api_with_details(
            ApiErrorCode::ServiceUnavailable,
            "网络连接失败",
            Some(correlation_id),
            None,
        )
    } else {
        AppError::api_with_details(
            ApiErrorCode::Unknown,
            format!("请求失败: {err}"),
            Some(correlation_id),
            None,
        )
    }
}
