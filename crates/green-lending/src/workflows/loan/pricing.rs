//! Rule-based green pricing applied to an externally estimated default probability.

use serde::{Deserialize, Serialize};

const BASE_RATE_PCT: f64 = 10.0;
const RISK_PREMIUM_FACTOR: f64 = 5.0;
const GREEN_DISCOUNT_FACTOR: f64 = 0.02;

/// Inputs to the pricing rules. Ratings are on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub default_probability: f64,
    pub renewable_usage: f64,
    pub emission_reduction: f64,
    pub waste_management: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 {
            RiskLevel::Low
        } else if probability < 0.6 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingDecision {
    #[serde(rename = "Approved with Green Incentive")]
    ApprovedWithGreenIncentive,
    Approved,
    #[serde(rename = "Conditionally Approved")]
    ConditionallyApproved,
    Rejected,
}

impl PricingDecision {
    pub fn decide(risk: RiskLevel, green_score: f64) -> Self {
        match risk {
            RiskLevel::Low if green_score > 60.0 => PricingDecision::ApprovedWithGreenIncentive,
            RiskLevel::Low => PricingDecision::Approved,
            RiskLevel::Medium if green_score > 70.0 => PricingDecision::ConditionallyApproved,
            _ => PricingDecision::Rejected,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PricingDecision::ApprovedWithGreenIncentive => "Approved with Green Incentive",
            PricingDecision::Approved => "Approved",
            PricingDecision::ConditionallyApproved => "Conditionally Approved",
            PricingDecision::Rejected => "Rejected",
        }
    }
}

/// Priced outcome. Percentages and scores are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingQuote {
    pub default_probability_pct: f64,
    pub risk_level: RiskLevel,
    pub green_score: f64,
    pub decision: PricingDecision,
    pub recommended_interest_rate_pct: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("default_probability must be between 0 and 1 (got {0})")]
    Probability(f64),
    #[error("{field} must be between 0 and 100 (got {value})")]
    Rating { field: &'static str, value: f64 },
}

impl PricingRequest {
    pub fn validate(&self) -> Result<(), PricingError> {
        let p = self.default_probability;
        if !(p.is_finite() && (0.0..=1.0).contains(&p)) {
            return Err(PricingError::Probability(p));
        }

        for (field, value) in [
            ("renewable_usage", self.renewable_usage),
            ("emission_reduction", self.emission_reduction),
            ("waste_management", self.waste_management),
        ] {
            if !(value.is_finite() && (0.0..=100.0).contains(&value)) {
                return Err(PricingError::Rating { field, value });
            }
        }

        Ok(())
    }
}

pub fn green_score(renewable_usage: f64, emission_reduction: f64, waste_management: f64) -> f64 {
    round2(renewable_usage * 0.4 + emission_reduction * 0.4 + waste_management * 0.2)
}

pub fn interest_rate(default_probability: f64, green_score: f64) -> f64 {
    round2(
        BASE_RATE_PCT + default_probability * RISK_PREMIUM_FACTOR
            - green_score * GREEN_DISCOUNT_FACTOR,
    )
}

pub fn quote(request: &PricingRequest) -> Result<PricingQuote, PricingError> {
    request.validate()?;

    let green = green_score(
        request.renewable_usage,
        request.emission_reduction,
        request.waste_management,
    );
    let risk_level = RiskLevel::from_probability(request.default_probability);

    Ok(PricingQuote {
        default_probability_pct: round2(request.default_probability * 100.0),
        risk_level,
        green_score: green,
        decision: PricingDecision::decide(risk_level, green),
        recommended_interest_rate_pct: interest_rate(request.default_probability, green),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
