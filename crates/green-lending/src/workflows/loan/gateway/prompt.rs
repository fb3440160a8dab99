use serde_json::{json, Value};

use super::super::domain::{FinancialProfile, LoanDecision, SustainabilityProfile};

/// Render both profiles into the assessment instructions sent to the model.
///
/// Every field appears on its own line with its label and unit.
pub fn build_prompt(financial: &FinancialProfile, sustainability: &SustainabilityProfile) -> String {
    let decisions = LoanDecision::ALL
        .iter()
        .map(|decision| format!("'{}'", decision.label()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Perform a professional green loan risk and sustainability assessment.

Financial Data:
- Annual Revenue: ${annual_revenue}
- Credit Score: {credit_score}
- Existing Debt: ${existing_debt}
- Years in Business: {years_in_business}

Sustainability Data:
- Renewable Energy Usage: {renewable}%
- Carbon Reduction: {carbon} tons/year
- ESG Score: {esg}/100
- Waste Management: {waste}

Provide an evaluation including:
1. A Risk Score (0-100, where 100 is highest risk).
2. A Sustainability Score (0-100).
3. A Decision ({decisions}).
4. A concise AI Explanation for this decision.
5. A list of 3 actionable recommendations for the applicant.
",
        annual_revenue = financial.annual_revenue,
        credit_score = financial.credit_score,
        existing_debt = financial.existing_debt,
        years_in_business = financial.years_in_business,
        renewable = sustainability.renewable_energy_usage,
        carbon = sustainability.estimated_carbon_reduction,
        esg = sustainability.esg_compliance_score,
        waste = sustainability.waste_management.label(),
    )
}

/// Response schema mirroring `EvaluationResult`, in the Gemini schema dialect.
pub fn response_schema() -> Value {
    let decisions: Vec<&str> = LoanDecision::ALL.iter().map(|d| d.label()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "riskScore": { "type": "NUMBER" },
            "sustainabilityScore": { "type": "NUMBER" },
            "decision": { "type": "STRING", "enum": decisions },
            "aiExplanation": { "type": "STRING" },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": [
            "riskScore",
            "sustainabilityScore",
            "decision",
            "aiExplanation",
            "recommendations"
        ]
    })
}
