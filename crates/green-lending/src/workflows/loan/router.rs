use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::auth::{AuthProvider, SignInRequest, SignUpRequest};
use super::domain::EvaluationRequest;
use super::pricing::PricingRequest;
use super::provider::CompletionProvider;
use super::service::LendingService;

/// Router builder exposing HTTP endpoints for evaluation, pricing, and sign-in.
pub fn lending_router<P, A>(service: Arc<LendingService<P, A>>) -> Router
where
    P: CompletionProvider + 'static,
    A: AuthProvider + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(evaluate_handler::<P, A>))
        .route("/api/v1/pricing", post(pricing_handler::<P, A>))
        .route("/api/v1/auth/sign-in", post(sign_in_handler::<P, A>))
        .route("/api/v1/auth/sign-up", post(sign_up_handler::<P, A>))
        .with_state(service)
}

pub(crate) async fn evaluate_handler<P, A>(
    State(service): State<Arc<LendingService<P, A>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    P: CompletionProvider + 'static,
    A: AuthProvider + 'static,
{
    match service.evaluate(&request).await {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn pricing_handler<P, A>(
    State(service): State<Arc<LendingService<P, A>>>,
    axum::Json(request): axum::Json<PricingRequest>,
) -> Response
where
    P: CompletionProvider + 'static,
    A: AuthProvider + 'static,
{
    match service.price(&request) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn sign_in_handler<P, A>(
    State(service): State<Arc<LendingService<P, A>>>,
    axum::Json(request): axum::Json<SignInRequest>,
) -> Response
where
    P: CompletionProvider + 'static,
    A: AuthProvider + 'static,
{
    match service.sign_in(&request).await {
        Ok(session) => (StatusCode::OK, axum::Json(session)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.user_message(),
            });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn sign_up_handler<P, A>(
    State(service): State<Arc<LendingService<P, A>>>,
    axum::Json(request): axum::Json<SignUpRequest>,
) -> Response
where
    P: CompletionProvider + 'static,
    A: AuthProvider + 'static,
{
    match service.sign_up(&request).await {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.user_message(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}
