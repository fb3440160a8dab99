use clap::Args;
use green_lending::config::AppConfig;
use green_lending::error::AppError;
use green_lending::telemetry;
use green_lending::workflows::loan::{
    pricing, EvaluationGateway, EvaluationResult, FinancialProfile, GeminiProvider,
    LendingServiceError, PricingQuote, PricingRequest, SustainabilityProfile, WasteManagementTier,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Annual revenue in dollars
    #[arg(long, default_value_t = 5_000_000.0)]
    pub(crate) annual_revenue: f64,
    /// Credit score (300-850)
    #[arg(long, default_value_t = 720)]
    pub(crate) credit_score: u16,
    /// Existing debt in dollars
    #[arg(long, default_value_t = 1_200_000.0)]
    pub(crate) existing_debt: f64,
    /// Years the business has been operating
    #[arg(long, default_value_t = 8)]
    pub(crate) years_in_business: u16,
    /// Share of energy from renewable sources, in percent
    #[arg(long, default_value_t = 45.0)]
    pub(crate) renewable_energy_usage: f64,
    /// Estimated carbon reduction in tons per year
    #[arg(long, default_value_t = 250.0)]
    pub(crate) estimated_carbon_reduction: f64,
    /// ESG compliance score (0-100)
    #[arg(long, default_value_t = 68.0)]
    pub(crate) esg_compliance_score: f64,
    /// Waste management tier (A-Elite, B-Advanced, C-Standard, D-Basic)
    #[arg(long, default_value = "B-Advanced", value_parser = crate::infra::parse_waste_tier)]
    pub(crate) waste_management: WasteManagementTier,
    /// Print the result as JSON instead of a readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl EvaluateArgs {
    fn profiles(&self) -> (FinancialProfile, SustainabilityProfile) {
        (
            FinancialProfile {
                annual_revenue: self.annual_revenue,
                credit_score: self.credit_score,
                existing_debt: self.existing_debt,
                years_in_business: self.years_in_business,
            },
            SustainabilityProfile {
                renewable_energy_usage: self.renewable_energy_usage,
                estimated_carbon_reduction: self.estimated_carbon_reduction,
                esg_compliance_score: self.esg_compliance_score,
                waste_management: self.waste_management,
            },
        )
    }
}

#[derive(Args, Debug)]
pub(crate) struct PriceArgs {
    /// Estimated probability of default (0-1)
    #[arg(long)]
    pub(crate) default_probability: f64,
    /// Renewable usage rating (0-100)
    #[arg(long)]
    pub(crate) renewable: f64,
    /// Emission reduction rating (0-100)
    #[arg(long)]
    pub(crate) emission: f64,
    /// Waste management rating (0-100)
    #[arg(long)]
    pub(crate) waste: f64,
}

pub(crate) async fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    if !args.json {
        telemetry::init(&config.telemetry)?;
    }

    let (financial, sustainability) = args.profiles();
    financial
        .validate()
        .map_err(LendingServiceError::from)?;
    sustainability
        .validate()
        .map_err(LendingServiceError::from)?;

    let provider = GeminiProvider::new(&config.scoring)?;
    let gateway = EvaluationGateway::new(Arc::new(provider));
    let result = gateway.evaluate(&financial, &sustainability).await;

    let output = if args.json {
        render_json(&result)?
    } else {
        render_evaluation(&financial, &sustainability, &result)
    };
    println!("{output}");

    Ok(())
}

pub(crate) fn run_price(args: PriceArgs) -> Result<(), AppError> {
    let request = PricingRequest {
        default_probability: args.default_probability,
        renewable_usage: args.renewable,
        emission_reduction: args.emission,
        waste_management: args.waste,
    };

    let quote = pricing::quote(&request).map_err(LendingServiceError::from)?;
    println!("{}", render_quote(&quote));
    Ok(())
}

pub(crate) fn render_json(result: &EvaluationResult) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub(crate) fn render_evaluation(
    financial: &FinancialProfile,
    sustainability: &SustainabilityProfile,
    result: &EvaluationResult,
) -> String {
    let mut lines = vec![
        "Green loan evaluation".to_string(),
        format!(
            "Financial: revenue ${} | credit {} | debt ${} | {} years in business",
            financial.annual_revenue,
            financial.credit_score,
            financial.existing_debt,
            financial.years_in_business
        ),
        format!(
            "Sustainability: renewable {}% | carbon reduction {} tons/year | ESG {}/100 | waste {}",
            sustainability.renewable_energy_usage,
            sustainability.estimated_carbon_reduction,
            sustainability.esg_compliance_score,
            sustainability.waste_management.label()
        ),
        String::new(),
        format!("Decision: {}", result.decision.label()),
        format!(
            "Risk score: {} ({} default probability) | Sustainability score: {}",
            result.risk_score,
            result.risk_band().label(),
            result.sustainability_score
        ),
        format!("Explanation: {}", result.ai_explanation),
        String::new(),
        "Recommendations".to_string(),
    ];

    lines.extend(
        result
            .recommendations
            .iter()
            .enumerate()
            .map(|(index, item)| format!("{}. {}", index + 1, item)),
    );

    lines.join("\n")
}

pub(crate) fn render_quote(quote: &PricingQuote) -> String {
    [
        "Green pricing quote".to_string(),
        format!(
            "- Default probability: {:.2}% ({} risk)",
            quote.default_probability_pct,
            quote.risk_level.label()
        ),
        format!("- Green score: {:.2}", quote.green_score),
        format!("- Decision: {}", quote.decision.label()),
        format!(
            "- Recommended interest rate: {:.2}%",
            quote.recommended_interest_rate_pct
        ),
    ]
    .join("\n")
}
