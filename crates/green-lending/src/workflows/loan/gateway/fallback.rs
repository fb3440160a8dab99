use super::super::domain::{EvaluationResult, LoanDecision};

pub const FALLBACK_RISK_SCORE: f64 = 35.0;
pub const FALLBACK_SUSTAINABILITY_SCORE: f64 = 78.0;
pub const FALLBACK_EXPLANATION: &str = "The AI system is currently experiencing high load. \
A preliminary review suggests high sustainability impact but requires deeper financial verification.";
pub const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Improve debt-to-income ratio",
    "Increase renewable energy share to 60%",
    "Formalize ESG reporting framework",
];

/// Preliminary result served whenever the scoring service cannot produce one.
pub fn fallback_result() -> EvaluationResult {
    EvaluationResult {
        risk_score: FALLBACK_RISK_SCORE,
        sustainability_score: FALLBACK_SUSTAINABILITY_SCORE,
        decision: LoanDecision::UnderReview,
        ai_explanation: FALLBACK_EXPLANATION.to_string(),
        recommendations: FALLBACK_RECOMMENDATIONS
            .iter()
            .map(|item| item.to_string())
            .collect(),
    }
}
