//! Green loan evaluation: intake profiles, the scoring gateway with its static
//! fallback, rule-based pricing, and the identity provider used by the sign-in
//! forms.

pub mod auth;
pub mod domain;
pub mod gateway;
pub mod pricing;
pub mod provider;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthError, AuthProvider, AuthSession, SignInRequest, SignUpOutcome, SignUpRequest,
    SupabaseAuth,
};
pub use domain::{
    EvaluationRequest, EvaluationResult, FinancialProfile, LoanDecision, ProfileViolation,
    RiskBand, SustainabilityProfile, WasteManagementTier,
};
pub use gateway::{
    fallback_result, EvaluationGateway, EvaluationSource, GatewayError, GatewayOutcome,
};
pub use pricing::{PricingDecision, PricingError, PricingQuote, PricingRequest, RiskLevel};
pub use provider::{CompletionProvider, CompletionRequest, GeminiProvider, ProviderError};
pub use router::lending_router;
pub use service::{LendingService, LendingServiceError};
