use super::common::*;
use serde_json::Value;

use crate::workflows::loan::domain::WasteManagementTier;
use crate::workflows::loan::gateway::{build_prompt, completion_request, response_schema};

#[test]
fn prompt_lists_every_field_with_units() {
    let prompt = build_prompt(&financial(), &sustainability());

    for line in [
        "- Annual Revenue: $5000000",
        "- Credit Score: 720",
        "- Existing Debt: $1200000",
        "- Years in Business: 8",
        "- Renewable Energy Usage: 45%",
        "- Carbon Reduction: 250 tons/year",
        "- ESG Score: 68/100",
        "- Waste Management: B-Advanced",
    ] {
        assert!(prompt.contains(line), "prompt missing `{line}`:\n{prompt}");
    }
}

#[test]
fn prompt_keeps_fractional_values() {
    let mut sustainability = sustainability();
    sustainability.renewable_energy_usage = 12.5;
    sustainability.waste_management = WasteManagementTier::Elite;
    let mut financial = financial();
    financial.annual_revenue = 1234.56;

    let prompt = build_prompt(&financial, &sustainability);

    assert!(prompt.contains("$1234.56"));
    assert!(prompt.contains("12.5%"));
    assert!(prompt.contains("A-Elite"));
}

#[test]
fn prompt_constrains_scores_and_decision() {
    let prompt = build_prompt(&financial(), &sustainability());

    assert!(prompt.contains("Risk Score (0-100, where 100 is highest risk)"));
    assert!(prompt.contains("Sustainability Score (0-100)"));
    assert!(prompt.contains("'Approved', 'Under Review', 'Rejected'"));
    assert!(prompt.contains("3 actionable recommendations"));
}

#[test]
fn schema_requires_all_five_fields() {
    let schema = response_schema();

    let required: Vec<&str> = schema["required"]
        .as_array()
        .expect("required list")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        required,
        vec![
            "riskScore",
            "sustainabilityScore",
            "decision",
            "aiExplanation",
            "recommendations"
        ]
    );

    let properties = &schema["properties"];
    assert_eq!(properties["riskScore"]["type"], "NUMBER");
    assert_eq!(properties["sustainabilityScore"]["type"], "NUMBER");
    assert_eq!(properties["decision"]["type"], "STRING");
    assert_eq!(
        properties["decision"]["enum"],
        serde_json::json!(["Approved", "Under Review", "Rejected"])
    );
    assert_eq!(properties["aiExplanation"]["type"], "STRING");
    assert_eq!(properties["recommendations"]["type"], "ARRAY");
    assert_eq!(properties["recommendations"]["items"]["type"], "STRING");
}

#[test]
fn completion_request_is_deterministic() {
    let first = completion_request(&financial(), &sustainability());
    let second = completion_request(&financial(), &sustainability());
    assert_eq!(first, second);
}
