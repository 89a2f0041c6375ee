//! Report assembly: the ordered label/value pairs exported at step 6.
//!
//! Serialization to CSV lives in the measureup-data crate; this module only
//! decides content, order, and presentation formatting (two decimal places
//! for monetary outputs).

use rust_decimal::Decimal;

use crate::calculations::{MonetisationWorksheet, common::format_money};
use crate::models::{ValueLevel, ValueType};
use crate::resolver::ValueTable;
use crate::session::SessionState;

/// Builds the report as ordered (label, value) pairs from current session
/// state. Derived values are recomputed here, never read from a cache, so
/// the export always reflects the latest inputs.
///
/// Rows that do not apply (no Silver differentiation, no duration
/// dimension, secondary metrics at zero) are omitted entirely.
pub fn build_report(
    state: &SessionState,
    table: &ValueTable,
) -> Vec<(String, String)> {
    let resolution = state.resolve(table);
    let derived = MonetisationWorksheet::new(&resolution).calculate(&state.monetisation_input());

    let mut report: Vec<(String, String)> = Vec::new();
    let mut push = |label: String, value: String| report.push((label, value));

    push("Stakeholders".to_string(), state.stakeholders.clone());
    push("Activity".to_string(), state.activity.clone());
    push("Outcomes".to_string(), state.outcomes.clone());
    push(
        "Selected Value Name".to_string(),
        state.category.clone().unwrap_or_default(),
    );

    if state.level == ValueLevel::Silver {
        if let Some(silver) = state.silver_name.as_deref() {
            push("Silver Level".to_string(), silver.to_string());
        }
    }

    push(
        "Key".to_string(),
        resolution
            .row
            .and_then(|r| r.key.clone())
            .unwrap_or_default(),
    );
    push(
        "Description".to_string(),
        resolution
            .row
            .map(|r| r.description.clone())
            .unwrap_or_default(),
    );

    let unit1_label = match resolution.row {
        Some(row) => format!("Unit 1 ({})", row.unit1_label),
        None => "Unit 1".to_string(),
    };
    push(unit1_label, state.unit1.to_string());

    if let Some(row) = resolution.row {
        if let Some(unit2_label) = row.unit2_label.as_deref() {
            push(format!("Unit 2 ({unit2_label})"), state.unit2.to_string());
        }
    }

    push(
        "Indicator and Source".to_string(),
        state.indicator_source.clone(),
    );
    push("Impact Evidence".to_string(), state.impact_evidence.clone());
    push(
        "Impact Discount Level".to_string(),
        state.discount.as_str().to_string(),
    );
    push(
        "Impact Discount (decimal)".to_string(),
        derived.discount_fraction.to_string(),
    );
    push(
        "Base Value Per Unit (£)".to_string(),
        format_money(derived.base_value_per_unit),
    );
    push(
        "Monetised Value Per Unit (£)".to_string(),
        format_money(derived.monetised_value_per_unit),
    );
    push(
        "Total Monetised Value (£)".to_string(),
        format_money(derived.total_monetised_value),
    );
    push(
        "Type of Monetised Value".to_string(),
        state.value_type.as_str().to_string(),
    );
    push(
        format!("Total Monetised Value ({}) (£)", state.value_type.as_str()),
        format_money(derived.total_value_by_type),
    );

    if state.value_type == ValueType::Environmental {
        if let Some(kg) = derived.total_kg_co2.filter(|kg| *kg > Decimal::ZERO) {
            push("Total kg CO2".to_string(), format_money(kg));
            push(
                "Total tonnes CO2".to_string(),
                format_money(kg / Decimal::from(1000)),
            );
        }
    }

    if state.value_type == ValueType::Wellbeing {
        if let Some(wellbys) = derived.total_wellbys.filter(|w| *w > Decimal::ZERO) {
            push("Total WELLBYs".to_string(), format_money(wellbys));
        }
    }

    report
}
