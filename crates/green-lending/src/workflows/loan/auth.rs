//! Email/password sign-in and sign-up against a Supabase (GoTrue) identity service.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::AuthConfig;

pub const ALREADY_REGISTERED_MESSAGE: &str =
    "This email is already registered. Please sign in instead.";
pub const SIGN_UP_SUCCESS_MESSAGE: &str =
    "Account created! Please check your email to confirm your account.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";
pub const NOT_CONFIGURED_MESSAGE: &str = "Authentication is not configured";

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Session handed back after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpOutcome {
    pub user_id: Option<String>,
    pub message: String,
    pub confirmation_required: bool,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthSession, AuthError>;
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("identity service rejected the request: {0}")]
    Rejected(String),
    #[error("email is already registered")]
    AlreadyRegistered,
    #[error("identity service is not configured")]
    NotConfigured,
    #[error("identity service transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("identity service returned an unexpected payload")]
    UnexpectedResponse,
}

impl AuthError {
    /// Text safe to show next to the form.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected(message) => message.clone(),
            AuthError::AlreadyRegistered => ALREADY_REGISTERED_MESSAGE.to_string(),
            AuthError::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
            AuthError::Transport(_) | AuthError::UnexpectedResponse => {
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        }
    }
}

#[derive(Clone)]
struct Endpoint {
    base_url: String,
    anon_key: String,
}

/// GoTrue REST client. Without both URL and anon key every call fails with `NotConfigured`.
pub struct SupabaseAuth {
    client: reqwest::Client,
    endpoint: Option<Endpoint>,
}

impl fmt::Debug for SupabaseAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseAuth")
            .field(
                "base_url",
                &self.endpoint.as_ref().map(|endpoint| &endpoint.base_url),
            )
            .finish_non_exhaustive()
    }
}

impl SupabaseAuth {
    pub fn new(client: reqwest::Client, config: &AuthConfig) -> Self {
        let endpoint = match (&config.url, &config.anon_key) {
            (Some(url), Some(anon_key)) => Some(Endpoint {
                base_url: url.trim_end_matches('/').to_string(),
                anon_key: anon_key.clone(),
            }),
            _ => None,
        };

        Self { client, endpoint }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::new(client, config))
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, AuthError> {
        let endpoint = self.endpoint.as_ref().ok_or(AuthError::NotConfigured)?;

        let response = self
            .client
            .post(format!("{}/auth/v1/{}", endpoint.base_url, path))
            .header("apikey", &endpoint.anon_key)
            .bearer_auth(&endpoint.anon_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        if status.is_success() {
            Ok(payload)
        } else {
            Err(error_message(&payload)
                .map(AuthError::Rejected)
                .unwrap_or(AuthError::UnexpectedResponse))
        }
    }
}

/// GoTrue has used several error shapes across versions.
fn error_message(payload: &Value) -> Option<String> {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthSession, AuthError> {
        let payload = self
            .post(
                "token?grant_type=password",
                &json!({ "email": request.email, "password": request.password }),
            )
            .await?;

        let token: TokenResponse =
            serde_json::from_value(payload).map_err(|_| AuthError::UnexpectedResponse)?;

        Ok(AuthSession {
            user_id: token.user.id,
            email: token.user.email,
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token
                .expires_at
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        })
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        let full_name = request.display_name.clone().unwrap_or_default();
        let payload = self
            .post(
                "signup",
                &json!({
                    "email": request.email,
                    "password": request.password,
                    "data": { "full_name": full_name },
                }),
            )
            .await?;

        sign_up_outcome(&payload)
    }
}

/// With email confirmation enabled GoTrue returns the bare user; otherwise `{ user, session }`.
fn sign_up_outcome(payload: &Value) -> Result<SignUpOutcome, AuthError> {
    let user = payload
        .get("user")
        .filter(|user| !user.is_null())
        .unwrap_or(payload);

    let user_id = user.get("id").and_then(Value::as_str).map(str::to_string);
    if user_id.is_none() {
        return Err(AuthError::UnexpectedResponse);
    }

    // An obfuscated user with no identities means the address already exists.
    let identities = user.get("identities").and_then(Value::as_array);
    if identities.is_some_and(|list| list.is_empty()) {
        return Err(AuthError::AlreadyRegistered);
    }

    let has_session = payload
        .get("session")
        .is_some_and(|session| !session.is_null())
        || payload.get("access_token").is_some();

    Ok(SignUpOutcome {
        user_id,
        message: SIGN_UP_SUCCESS_MESSAGE.to_string(),
        confirmation_required: !has_session,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_msg_field() {
        let payload = json!({ "msg": "Invalid login credentials", "error": "invalid_grant" });
        assert_eq!(
            error_message(&payload).as_deref(),
            Some("Invalid login credentials")
        );

        let payload = json!({ "error": "invalid_grant", "error_description": "Email not confirmed" });
        assert_eq!(
            error_message(&payload).as_deref(),
            Some("Email not confirmed")
        );

        assert!(error_message(&Value::Null).is_none());
    }

    #[test]
    fn sign_up_with_empty_identities_is_already_registered() {
        let payload = json!({ "id": "user-1", "email": "a@b.co", "identities": [] });
        let err = sign_up_outcome(&payload).expect_err("duplicate detected");
        assert!(matches!(err, AuthError::AlreadyRegistered));
        assert_eq!(err.user_message(), ALREADY_REGISTERED_MESSAGE);
    }

    #[test]
    fn sign_up_nested_user_with_session_needs_no_confirmation() {
        let payload = json!({
            "user": { "id": "user-2", "identities": [{ "provider": "email" }] },
            "session": { "access_token": "jwt" }
        });
        let outcome = sign_up_outcome(&payload).expect("sign-up succeeds");
        assert_eq!(outcome.user_id.as_deref(), Some("user-2"));
        assert!(!outcome.confirmation_required);
        assert_eq!(outcome.message, SIGN_UP_SUCCESS_MESSAGE);
    }

    #[test]
    fn sign_up_without_user_id_is_unexpected() {
        let err = sign_up_outcome(&json!({})).expect_err("missing user");
        assert_eq!(err.user_message(), UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn request_debug_hides_password() {
        let request = SignInRequest {
            email: "a@b.co".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{request:?}").contains("hunter2"));
    }

    #[tokio::test]
    async fn unconfigured_client_reports_not_configured() {
        let auth = SupabaseAuth::new(reqwest::Client::new(), &AuthConfig::default());
        assert!(!auth.is_configured());

        let err = auth
            .sign_in(&SignInRequest {
                email: "a@b.co".to_string(),
                password: "pw".to_string(),
            })
            .await
            .expect_err("not configured");
        assert_eq!(err.user_message(), NOT_CONFIGURED_MESSAGE);
    }
}
