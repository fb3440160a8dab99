mod fallback;
mod prompt;
mod response;

pub use fallback::{
    fallback_result, FALLBACK_EXPLANATION, FALLBACK_RECOMMENDATIONS, FALLBACK_RISK_SCORE,
    FALLBACK_SUSTAINABILITY_SCORE,
};
pub use prompt::{build_prompt, response_schema};
pub use response::{parse_reply, ResponseError};

use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{EvaluationResult, FinancialProfile, SustainabilityProfile};
use super::provider::{CompletionProvider, CompletionRequest, ProviderError, JSON_MIME_TYPE};

/// Stateless bridge between the two intake profiles and the completion service.
///
/// `evaluate` never fails: anything that goes wrong downstream is logged and
/// replaced by [`fallback_result`].
pub struct EvaluationGateway<P> {
    provider: Arc<P>,
}

impl<P> EvaluationGateway<P>
where
    P: CompletionProvider + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn evaluate(
        &self,
        financial: &FinancialProfile,
        sustainability: &SustainabilityProfile,
    ) -> EvaluationResult {
        self.evaluate_detailed(financial, sustainability)
            .await
            .result
    }

    /// Same as [`evaluate`](Self::evaluate) but also reports where the result came from.
    pub async fn evaluate_detailed(
        &self,
        financial: &FinancialProfile,
        sustainability: &SustainabilityProfile,
    ) -> GatewayOutcome {
        let request = completion_request(financial, sustainability);

        match self.score(&request).await {
            Ok(result) => {
                debug!(
                    decision = result.decision.label(),
                    risk_score = result.risk_score,
                    sustainability_score = result.sustainability_score,
                    "scoring service produced evaluation"
                );
                GatewayOutcome {
                    result,
                    source: EvaluationSource::Model,
                }
            }
            Err(error) => {
                warn!(kind = error.kind(), %error, "evaluation degraded to fallback result");
                GatewayOutcome {
                    result: fallback_result(),
                    source: EvaluationSource::Fallback(error),
                }
            }
        }
    }

    async fn score(&self, request: &CompletionRequest) -> Result<EvaluationResult, GatewayError> {
        let reply = self.provider.generate(request).await?;
        let result = parse_reply(reply.as_deref())?;
        Ok(result)
    }
}

/// Prompt and schema for one evaluation.
pub fn completion_request(
    financial: &FinancialProfile,
    sustainability: &SustainabilityProfile,
) -> CompletionRequest {
    CompletionRequest {
        prompt: build_prompt(financial, sustainability),
        response_mime_type: JSON_MIME_TYPE,
        response_schema: response_schema(),
    }
}

/// Evaluation plus provenance, for logs and tests. Callers of the HTTP API only see `result`.
#[derive(Debug)]
pub struct GatewayOutcome {
    pub result: EvaluationResult,
    pub source: EvaluationSource,
}

#[derive(Debug)]
pub enum EvaluationSource {
    Model,
    Fallback(GatewayError),
}

impl EvaluationSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, EvaluationSource::Fallback(_))
    }
}

/// Why the fallback was served.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Provider(err) => err.kind(),
            GatewayError::Response(err) => err.kind(),
        }
    }
}
