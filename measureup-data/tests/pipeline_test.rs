//! Integration tests that exercise the loader against an on-disk fixture
//! file, then drive the full pipeline: load, resolve, run a session through
//! the six steps, export the report, and round-trip it.
//!
//! These complement the unit tests inside loader.rs (which all use inline
//! string literals).

use std::path::PathBuf;

use measureup_core::models::{ImpactDiscountLevel, ValueLevel, ValueType};
use measureup_core::report::build_report;
use measureup_core::resolver::ValueTable;
use measureup_core::session::{SessionState, Step};
use measureup_data::{loader, report_csv};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_values.csv")
}

fn fixture_table() -> ValueTable {
    loader::load_from_file(&fixture_path()).expect("fixture file should load without error")
}

#[test]
fn test_load_fixture_file_succeeds() {
    let table = fixture_table();

    assert_eq!(table.len(), 5);
    assert_eq!(table.categories(), vec![
        "Community garden",
        "Debt advice",
        "Flood resilience"
    ]);
}

#[test]
fn test_fixture_silver_names_exclude_sentinel() {
    let table = fixture_table();

    assert_eq!(table.silver_names("Flood resilience"), vec![
        "Coastal", "Inland"
    ]);
    assert!(table.silver_names("Debt advice").is_empty());
}

#[test]
fn test_silver_fallback_still_yields_description_and_value() {
    let table = fixture_table();

    let resolution = table.resolve("Debt advice", ValueLevel::Silver, None);

    let row = resolution.row.expect("fallback row should be present");
    assert!(resolution.silver_fallback);
    assert_eq!(row.description, "Person receiving structured debt advice");
    assert_eq!(row.bronze_value, Some(dec!(1200)));
}

#[test]
fn test_full_session_flow_and_report_round_trip() {
    let table = fixture_table();
    let mut session = SessionState::new();

    // Step 2: who and what.
    session.go_to(Step::Scope);
    session.stakeholders = "Residents of the floodplain".to_string();
    session.activity = "Installing community flood defences".to_string();
    session.outcomes = "Fewer homes flooded each winter".to_string();

    // Step 3: value match.
    session.go_to(Step::ValueMatch);
    session.select_value("Flood resilience", ValueLevel::Bronze, None);

    // Step 4: details and discount.
    session.go_to(Step::ActivityDetails);
    session.indicator_source = "Council flood register".to_string();
    session.unit1 = 10;
    session.unit2 = dec!(1);
    session.impact_evidence = "Baseline survey, 2025".to_string();
    session.discount = ImpactDiscountLevel::Medium;

    // Step 5: calculation.
    session.go_to(Step::Calculation);
    session.value_type = ValueType::Economic;

    let derived = session.derived(&table);
    assert_eq!(derived.monetised_value_per_unit, dec!(100));
    assert_eq!(derived.total_monetised_value, dec!(1000));

    // Step 6: report.
    session.go_to(Step::Report);
    let report = build_report(&session, &table);
    let csv_text = report_csv::to_csv(&report).expect("report should serialize");
    let recovered = report_csv::parse(&csv_text).expect("report should parse back");

    assert_eq!(recovered, report);
    assert!(csv_text.starts_with("Item,Value\n"));
}

#[test]
fn test_environmental_estimate_reports_carbon_totals() {
    let table = fixture_table();
    let mut session = SessionState::new();
    session.select_value("Flood resilience", ValueLevel::Bronze, None);
    session.unit1 = 10;
    session.unit2 = dec!(1);
    session.discount = ImpactDiscountLevel::Low;
    session.value_type = ValueType::Environmental;

    let derived = session.derived(&table);
    assert_eq!(derived.total_kg_co2, Some(dec!(375)));
    assert_eq!(derived.total_tonnes_co2, Some(dec!(0.375)));

    let report = build_report(&session, &table);
    let kg = report
        .iter()
        .find(|(label, _)| label == "Total kg CO2")
        .expect("carbon row should be present");
    assert_eq!(kg.1, "375.00");
}

#[test]
fn test_zero_wellby_fixture_row_is_methodology_not_applicable() {
    let table = fixture_table();
    let mut session = SessionState::new();
    session.select_value("Debt advice", ValueLevel::Bronze, None);
    session.unit1 = 5;
    session.value_type = ValueType::Wellbeing;

    let derived = session.derived(&table);

    // The fixture's WELLBY cell is exactly 0: same outcome as absent.
    assert_eq!(derived.total_wellbys, None);

    let report = build_report(&session, &table);
    assert!(!report.iter().any(|(label, _)| label == "Total WELLBYs"));
}

#[test]
fn test_start_over_resets_everything() {
    let table = fixture_table();
    let mut session = SessionState::new();
    session.go_to(Step::Report);
    session.select_value(
        "Flood resilience",
        ValueLevel::Silver,
        Some("Coastal".to_string()),
    );
    session.unit1 = 10;
    session.discount = ImpactDiscountLevel::High;

    session.reset();

    assert_eq!(session, SessionState::new());
    assert_eq!(session.step(), Step::Welcome);
    assert_eq!(session.derived(&table).total_monetised_value, dec!(0));
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let result = loader::load_from_file(std::path::Path::new("/this/path/does/not/exist.csv"));

    assert!(result.is_err());
}
