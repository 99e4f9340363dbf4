use serde_json::json;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ApiErrorCode, AppError, AppResult};
use crate::models::auth::{AuthResponse, AuthSession, AuthUser, OnboardingProfile};
use crate::services::transport::ApiTransport;

/// Client for the auth collaborator. Login and signup persist the returned
/// token into the session's token store, so every other service picks up the
/// new identity on its next request.
#[derive(Clone)]
pub struct AuthService {
    auth_url: String,
    transport: ApiTransport,
}

impl AuthService {
    pub fn new(config: &Config, transport: ApiTransport) -> Self {
        Self {
            auth_url: config.endpoints.auth.clone(),
            transport,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("邮箱和密码不能为空"));
        }

        let url = format!("{}/login", self.auth_url);
        let body = json!({ "email": email, "password": password });
        let response = self.post_auth(&url, &body).await?;
        self.establish_session(response, "login")
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<AuthSession> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("姓名、邮箱和密码不能为空"));
        }
        if password != confirm_password {
            return Err(AppError::validation("两次输入的密码不一致"));
        }

        let url = format!("{}/signup", self.auth_url);
        let body = json!({
            "name": name,
            "email": email,
            "password": password,
            "confirmPassword": confirm_password,
        });
        let response = self.post_auth(&url, &body).await?;
        self.establish_session(response, "signup")
    }

    /// Asks the auth service to validate the stored token server-side. The
    /// local expiry check in the session resolver is advisory; this is the
    /// authoritative answer.
    pub async fn verify(&self) -> AppResult<Option<AuthUser>> {
        let Some(token) = self.transport.session().token() else {
            return Err(AppError::unauthenticated());
        };

        let url = format!("{}/verify", self.auth_url);
        let body = json!({ "token": token });
        let response = self.post_auth(&url, &body).await?;

        if response.success {
            Ok(response.user)
        } else {
            Err(AppError::api(
                ApiErrorCode::RequestRejected,
                response
                    .error
                    .unwrap_or_else(|| "令牌校验未通过".to_string()),
            ))
        }
    }

    /// Submits the onboarding profile for the logged-in user.
    pub async fn complete_onboarding(
        &self,
        profile: &OnboardingProfile,
    ) -> AppResult<Option<AuthUser>> {
        if !self.transport.session().is_authenticated() {
            return Err(AppError::unauthenticated());
        }

        let url = format!("{}/complete-onboarding", self.auth_url);
        let body = serde_json::to_value(profile)?;
        let payload = self.transport.post_json(&url, &body).await?;
        let response: AuthResponse = serde_json::from_value(payload)?;
        Ok(response.user)
    }

    /// Auth endpoints report outcomes through their `success` flag rather
    /// than the shared envelope, so the raw transport path is used here.
    async fn post_auth(&self, url: &str, body: &serde_json::Value) -> AppResult<AuthResponse> {
        let payload = self.transport.post_raw(url, body).await?;
        Ok(serde_json::from_value(payload)?)
    }

    fn establish_session(&self, response: AuthResponse, flow: &str) -> AppResult<AuthSession> {
        match (response.success, response.token) {
            (true, Some(token)) => {
                self.transport.session().store().save(&token);
                info!(
                    target: "app::auth",
                    flow,
                    user = response
                        .user
                        .as_ref()
                        .and_then(|user| user.email.as_deref())
                        .unwrap_or("<unknown>"),
                    "session established"
                );
                Ok(AuthSession {
                    token,
                    user: response.user,
                })
            }
            _ => {
                let message = response
                    .error
                    .unwrap_or_else(|| "登录凭据无效".to_string());
                warn!(target: "app::auth", flow, error = %message, "auth request rejected");
                Err(AppError::api(ApiErrorCode::RequestRejected, message))
            }
        }
    }
}
