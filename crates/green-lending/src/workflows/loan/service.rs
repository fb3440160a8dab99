use std::sync::Arc;

use tracing::{info, warn};

use super::auth::{
    AuthError, AuthProvider, AuthSession, SignInRequest, SignUpOutcome, SignUpRequest,
};
use super::domain::{EvaluationRequest, EvaluationResult, ProfileViolation};
use super::gateway::EvaluationGateway;
use super::pricing::{self, PricingError, PricingQuote, PricingRequest};
use super::provider::CompletionProvider;

/// Service composing input validation, the evaluation gateway, pricing rules, and sign-in.
pub struct LendingService<P, A> {
    gateway: Arc<EvaluationGateway<P>>,
    auth: Arc<A>,
}

impl<P, A> LendingService<P, A>
where
    P: CompletionProvider + 'static,
    A: AuthProvider + 'static,
{
    pub fn new(provider: Arc<P>, auth: Arc<A>) -> Self {
        Self {
            gateway: Arc::new(EvaluationGateway::new(provider)),
            auth,
        }
    }

    /// Validate both profiles, then score them. Only invalid input is an error.
    pub async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, LendingServiceError> {
        request.financial.validate()?;
        request.sustainability.validate()?;

        let outcome = self
            .gateway
            .evaluate_detailed(&request.financial, &request.sustainability)
            .await;

        info!(
            decision = outcome.result.decision.label(),
            risk_band = outcome.result.risk_band().label(),
            fallback = outcome.source.is_fallback(),
            "evaluation completed"
        );

        Ok(outcome.result)
    }

    pub fn price(&self, request: &PricingRequest) -> Result<PricingQuote, LendingServiceError> {
        Ok(pricing::quote(request)?)
    }

    pub async fn sign_in(&self, request: &SignInRequest) -> Result<AuthSession, AuthError> {
        self.auth.sign_in(request).await.inspect_err(|error| {
            warn!(%error, "sign-in failed");
        })
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        self.auth.sign_up(request).await.inspect_err(|error| {
            warn!(%error, "sign-up failed");
        })
    }
}

/// Error raised by the lending service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LendingServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileViolation),
    #[error(transparent)]
    Pricing(#[from] PricingError),
}
