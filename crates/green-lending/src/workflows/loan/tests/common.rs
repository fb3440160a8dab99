use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::loan::auth::{
    AuthError, AuthProvider, AuthSession, SignInRequest, SignUpOutcome, SignUpRequest,
    SIGN_UP_SUCCESS_MESSAGE,
};
use crate::workflows::loan::domain::{
    EvaluationRequest, FinancialProfile, SustainabilityProfile, WasteManagementTier,
};
use crate::workflows::loan::provider::{CompletionProvider, CompletionRequest, ProviderError};
use crate::workflows::loan::{lending_router, LendingService};

/// Figures prefilled on the evaluation form.
pub(super) fn financial() -> FinancialProfile {
    FinancialProfile {
        annual_revenue: 5_000_000.0,
        credit_score: 720,
        existing_debt: 1_200_000.0,
        years_in_business: 8,
    }
}

pub(super) fn sustainability() -> SustainabilityProfile {
    SustainabilityProfile {
        renewable_energy_usage: 45.0,
        estimated_carbon_reduction: 250.0,
        esg_compliance_score: 68.0,
        waste_management: WasteManagementTier::Advanced,
    }
}

pub(super) fn evaluation_request() -> EvaluationRequest {
    EvaluationRequest {
        financial: financial(),
        sustainability: sustainability(),
    }
}

pub(super) fn approved_reply() -> Value {
    json!({
        "riskScore": 20,
        "sustainabilityScore": 90,
        "decision": "Approved",
        "aiExplanation": "ok",
        "recommendations": ["a", "b", "c"]
    })
}

/// Replays a fixed reply and records every request it receives.
#[derive(Default)]
pub(super) struct ScriptedProvider {
    reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub(super) fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn silent() -> Self {
        Self::default()
    }

    pub(super) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request.clone());
        Ok(self.reply.clone())
    }
}

/// Fails every call the way a given outage would.
pub(super) enum FailingProvider {
    Unavailable,
    Timeout,
    MissingCredential,
}

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn generate(&self, _request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        Err(match self {
            FailingProvider::Unavailable => ProviderError::Status {
                status: 503,
                message: "The model is overloaded. Please try again later.".to_string(),
            },
            FailingProvider::Timeout => ProviderError::Timeout,
            FailingProvider::MissingCredential => ProviderError::MissingCredential,
        })
    }
}

/// Accepts one known account and treats `taken@example.com` as registered.
#[derive(Default)]
pub(super) struct MemoryAuth {
    pub(super) sign_ups: Mutex<Vec<String>>,
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthSession, AuthError> {
        if request.email == "founder@example.com" && request.password == "correct-horse" {
            Ok(AuthSession {
                user_id: "user-1".to_string(),
                email: Some(request.email.clone()),
                access_token: "jwt-token".to_string(),
                refresh_token: None,
                expires_at: None,
            })
        } else {
            Err(AuthError::Rejected("Invalid login credentials".to_string()))
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        if request.email == "taken@example.com" {
            return Err(AuthError::AlreadyRegistered);
        }
        self.sign_ups
            .lock()
            .expect("sign-up mutex poisoned")
            .push(request.email.clone());
        Ok(SignUpOutcome {
            user_id: Some("user-2".to_string()),
            message: SIGN_UP_SUCCESS_MESSAGE.to_string(),
            confirmation_required: true,
        })
    }
}

pub(super) fn build_service<P>(provider: P) -> (Arc<LendingService<P, MemoryAuth>>, Arc<P>)
where
    P: CompletionProvider + 'static,
{
    let provider = Arc::new(provider);
    let service = Arc::new(LendingService::new(
        provider.clone(),
        Arc::new(MemoryAuth::default()),
    ));
    (service, provider)
}

pub(super) fn router_with<P>(provider: P) -> axum::Router
where
    P: CompletionProvider + 'static,
{
    let (service, _) = build_service(provider);
    lending_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn json_request(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serialize body"),
        ))
        .expect("request builds")
}
