use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;

use crate::config::SupabaseConfig;
use crate::error::{ApiErrorCode, AppError, AppResult};

/// Minimal PostgREST client used only by the connection-health fallback:
/// exact row counts come back in the `Content-Range` header of a zero-row
/// range request, so no row data ever crosses the wire.
#[derive(Clone)]
pub struct SupabaseRest {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseRest {
    pub fn new(config: SupabaseConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(1)
            .build()
            .map_err(|err| AppError::other(format!("初始化 Supabase HTTP 客户端失败: {err}")))?;

        Ok(Self { config, client })
    }

    pub async fn row_count(&self, table: &str) -> AppResult<u64> {
        let url = format!("{}/rest/v1/{}?select=id", self.config.url, table);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .send()
            .await
            .map_err(|err| {
                if err.is_connect() {
                    AppError::api(ApiErrorCode::ServiceUnavailable, "Supabase 网络连接失败")
                } else if err.is_timeout() {
                    AppError::api(ApiErrorCode::HttpTimeout, "Supabase 请求超时")
                } else {
                    AppError::api(ApiErrorCode::Unknown, format!("Supabase 请求失败: {err}"))
                }
            })?;

        let status = response.status();
        // Range requests legitimately answer 206; an empty table can answer 416.
        let acceptable = status.is_success()
            || status == StatusCode::PARTIAL_CONTENT
            || status == StatusCode::RANGE_NOT_SATISFIABLE;
        if !acceptable {
            return Err(AppError::api_with_details(
                ApiErrorCode::RequestRejected,
                format!("Supabase 表 {table} 查询失败 (状态码 {})", status.as_u16()),
                None,
                Some(json!({ "table": table, "status": status.as_u16() })),
            ));
        }

        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let count = content_range
            .as_deref()
            .and_then(parse_content_range_total)
            .ok_or_else(|| {
                AppError::api_with_details(
                    ApiErrorCode::InvalidResponse,
                    format!("Supabase 表 {table} 缺少行数信息"),
                    None,
                    Some(json!({ "contentRange": content_range })),
                )
            })?;

        debug!(target: "app::db", table, count, "row count resolved");
        Ok(count)
    }
}

/// `Content-Range: 0-0/57` or `*/0` for an empty result set.
fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}
