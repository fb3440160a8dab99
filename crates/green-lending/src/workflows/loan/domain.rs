use serde::{Deserialize, Serialize};

/// Lowest and highest credit score accepted at intake.
pub const CREDIT_SCORE_RANGE: (u16, u16) = (300, 850);

/// Financial figures for the business applying for a green loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    pub annual_revenue: f64,
    pub credit_score: u16,
    pub existing_debt: f64,
    pub years_in_business: u16,
}

impl FinancialProfile {
    pub fn validate(&self) -> Result<(), ProfileViolation> {
        non_negative("annualRevenue", self.annual_revenue)?;
        non_negative("existingDebt", self.existing_debt)?;

        let (min, max) = CREDIT_SCORE_RANGE;
        if !(min..=max).contains(&self.credit_score) {
            return Err(ProfileViolation::CreditScore(self.credit_score));
        }

        Ok(())
    }
}

/// Sustainability figures reported alongside the financial profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityProfile {
    pub renewable_energy_usage: f64,
    pub estimated_carbon_reduction: f64,
    pub esg_compliance_score: f64,
    pub waste_management: WasteManagementTier,
}

impl SustainabilityProfile {
    pub fn validate(&self) -> Result<(), ProfileViolation> {
        percentage("renewableEnergyUsage", self.renewable_energy_usage)?;
        non_negative("estimatedCarbonReduction", self.estimated_carbon_reduction)?;
        percentage("esgComplianceScore", self.esg_compliance_score)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ProfileViolation> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProfileViolation::Negative { field, value })
    }
}

fn percentage(field: &'static str, value: f64) -> Result<(), ProfileViolation> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ProfileViolation::OutOfRange { field, value })
    }
}

/// Maturity of the applicant's waste management programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WasteManagementTier {
    #[serde(rename = "A-Elite")]
    Elite,
    #[serde(rename = "B-Advanced")]
    Advanced,
    #[serde(rename = "C-Standard")]
    Standard,
    #[serde(rename = "D-Basic")]
    Basic,
}

impl WasteManagementTier {
    pub const ALL: [WasteManagementTier; 4] = [
        WasteManagementTier::Elite,
        WasteManagementTier::Advanced,
        WasteManagementTier::Standard,
        WasteManagementTier::Basic,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            WasteManagementTier::Elite => "A-Elite",
            WasteManagementTier::Advanced => "B-Advanced",
            WasteManagementTier::Standard => "C-Standard",
            WasteManagementTier::Basic => "D-Basic",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(raw))
    }
}

/// Closed outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanDecision {
    Approved,
    #[serde(rename = "Under Review")]
    UnderReview,
    Rejected,
}

impl LoanDecision {
    pub const ALL: [LoanDecision; 3] = [
        LoanDecision::Approved,
        LoanDecision::UnderReview,
        LoanDecision::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LoanDecision::Approved => "Approved",
            LoanDecision::UnderReview => "Under Review",
            LoanDecision::Rejected => "Rejected",
        }
    }

    /// Lenient match used on model replies: surrounding whitespace and case are ignored.
    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|decision| decision.label().eq_ignore_ascii_case(raw))
    }
}

/// Scored decision returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub risk_score: f64,
    pub sustainability_score: f64,
    pub decision: LoanDecision,
    pub ai_explanation: String,
    pub recommendations: Vec<String>,
}

impl EvaluationResult {
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }
}

/// Coarse reading of the risk score shown next to the headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            RiskBand::Low
        } else if score < 60.0 {
            RiskBand::Moderate
        } else {
            RiskBand::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
        }
    }
}

/// Body of an evaluation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub financial: FinancialProfile,
    pub sustainability: SustainabilityProfile,
}

/// Input rejected before any outbound call is made.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("{field} must be a non-negative number (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be between 0 and 100 (got {value})")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("creditScore must be between 300 and 850 (got {0})")]
    CreditScore(u16),
}
