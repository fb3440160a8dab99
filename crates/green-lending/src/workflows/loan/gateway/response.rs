use serde::Deserialize;

use super::super::domain::{EvaluationResult, LoanDecision};

/// Reply as the model sent it, before any field is trusted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvaluation {
    risk_score: Option<f64>,
    sustainability_score: Option<f64>,
    decision: Option<String>,
    ai_explanation: Option<String>,
    recommendations: Option<Vec<String>>,
}

/// Reason a model reply could not be turned into an `EvaluationResult`.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("reply is not a valid evaluation document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("reply is missing `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` must be within 0-100 (got {value})")]
    ScoreOutOfRange { field: &'static str, value: f64 },
    #[error("unrecognised decision `{0}`")]
    UnknownDecision(String),
    #[error("`{0}` is empty")]
    EmptyField(&'static str),
}

impl ResponseError {
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseError::Malformed(_) => "malformed_json",
            ResponseError::MissingField(_) => "missing_field",
            ResponseError::ScoreOutOfRange { .. } => "score_out_of_range",
            ResponseError::UnknownDecision(_) => "unknown_decision",
            ResponseError::EmptyField(_) => "empty_field",
        }
    }
}

/// Parse and validate the reply text.
///
/// A missing or blank body is read as `{}` and therefore fails on the first
/// required field rather than yielding a partially populated result.
pub fn parse_reply(text: Option<&str>) -> Result<EvaluationResult, ResponseError> {
    let body = text
        .map(str::trim)
        .filter(|body| !body.is_empty())
        .unwrap_or("{}");

    let raw: RawEvaluation = serde_json::from_str(body)?;
    raw.validate()
}

impl RawEvaluation {
    fn validate(self) -> Result<EvaluationResult, ResponseError> {
        let risk_score = score("riskScore", self.risk_score)?;
        let sustainability_score = score("sustainabilityScore", self.sustainability_score)?;

        let raw_decision = self
            .decision
            .ok_or(ResponseError::MissingField("decision"))?;
        let decision = LoanDecision::from_label(&raw_decision)
            .ok_or(ResponseError::UnknownDecision(raw_decision))?;

        let ai_explanation = self
            .ai_explanation
            .ok_or(ResponseError::MissingField("aiExplanation"))?;
        if ai_explanation.trim().is_empty() {
            return Err(ResponseError::EmptyField("aiExplanation"));
        }

        // Items are kept as sent; a blank one rejects the whole reply.
        let recommendations = self
            .recommendations
            .ok_or(ResponseError::MissingField("recommendations"))?;
        if recommendations.is_empty()
            || recommendations.iter().any(|item| item.trim().is_empty())
        {
            return Err(ResponseError::EmptyField("recommendations"));
        }

        Ok(EvaluationResult {
            risk_score,
            sustainability_score,
            decision,
            ai_explanation,
            recommendations,
        })
    }
}

fn score(field: &'static str, value: Option<f64>) -> Result<f64, ResponseError> {
    let value = value.ok_or(ResponseError::MissingField(field))?;
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ResponseError::ScoreOutOfRange { field, value })
    }
}
