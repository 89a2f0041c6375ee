use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ValueLevel;

/// Sentinel used in the reference data's "Silver name" column to mean
/// "this value has no Silver differentiation".
pub(crate) const NO_SILVER_DIFFERENTIATION: &str = "NA";

/// One record of the reference table: a (value name, level) combination,
/// optionally differentiated further by a Silver name.
///
/// For a given (value name, level) pair, Bronze has exactly one matching
/// row; Silver may have zero, one ("NA" sentinel), or multiple rows keyed
/// by `silver_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    /// Grouping key shown to the user as the value name.
    pub value_name: String,
    pub level: ValueLevel,
    /// Sub-differentiation name; the literal "NA" sentinel is preserved
    /// as loaded. Use [`silver_differentiation`](Self::silver_differentiation)
    /// to read through the sentinel.
    pub silver_name: Option<String>,
    /// Descriptive text about what distinguishes Silver rows; informational
    /// only, never used in computation.
    pub silver_adjustment_factors: Option<String>,
    pub description: String,
    /// Name of the primary quantity (e.g. "people affected").
    pub unit1_label: String,
    /// Name of the duration/secondary multiplier. Absent when the activity
    /// has no duration dimension; unit2 is then fixed at 1.
    pub unit2_label: Option<String>,
    /// Stable identifier from the source dataset.
    pub key: Option<String>,
    /// Reference link for further reading.
    pub url: Option<String>,

    // Level-specific monetary value per unit.
    pub bronze_value: Option<Decimal>,
    pub silver_value: Option<Decimal>,

    // Per-type monetary values.
    pub fiscal: Option<Decimal>,
    pub economic: Option<Decimal>,
    pub social: Option<Decimal>,
    pub environmental: Option<Decimal>,

    pub kg_co2e_per_unit: Option<Decimal>,
    pub wellby_per_unit: Option<Decimal>,
}

impl ReferenceRow {
    /// The Silver differentiation name, reading the "NA" sentinel and empty
    /// cells both as "none".
    pub fn silver_differentiation(&self) -> Option<&str> {
        self.silver_name
            .as_deref()
            .filter(|name| *name != NO_SILVER_DIFFERENTIATION)
    }

    /// The monetary value column selected by level: Bronze value for
    /// Bronze, Silver values for Silver.
    pub fn level_value(&self, level: ValueLevel) -> Option<Decimal> {
        match level {
            ValueLevel::Bronze => self.bronze_value,
            ValueLevel::Silver => self.silver_value,
        }
    }

    /// Whether the activity has a duration dimension. Without one, unit2 is
    /// fixed at 1 and not editable.
    pub fn has_unit2_dimension(&self) -> bool {
        self.unit2_label.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn row() -> ReferenceRow {
        ReferenceRow {
            value_name: "Flood resilience".to_string(),
            level: ValueLevel::Bronze,
            silver_name: None,
            silver_adjustment_factors: None,
            description: "Household protected from flooding".to_string(),
            unit1_label: "households".to_string(),
            unit2_label: Some("years".to_string()),
            key: Some("FR-01".to_string()),
            url: None,
            bronze_value: Some(dec!(200)),
            silver_value: None,
            fiscal: Some(dec!(80)),
            economic: Some(dec!(200)),
            social: Some(dec!(50)),
            environmental: Some(dec!(30)),
            kg_co2e_per_unit: None,
            wellby_per_unit: None,
        }
    }

    #[test]
    fn silver_differentiation_reads_through_na_sentinel() {
        let mut r = row();
        r.silver_name = Some("NA".to_string());
        assert_eq!(r.silver_differentiation(), None);

        r.silver_name = Some("Coastal".to_string());
        assert_eq!(r.silver_differentiation(), Some("Coastal"));

        r.silver_name = None;
        assert_eq!(r.silver_differentiation(), None);
    }

    #[test]
    fn level_value_selects_matching_column() {
        let mut r = row();
        r.silver_value = Some(dec!(250));

        assert_eq!(r.level_value(ValueLevel::Bronze), Some(dec!(200)));
        assert_eq!(r.level_value(ValueLevel::Silver), Some(dec!(250)));
    }

    #[test]
    fn unit2_dimension_follows_label_presence() {
        let mut r = row();
        assert!(r.has_unit2_dimension());

        r.unit2_label = None;
        assert!(!r.has_unit2_dimension());
    }
}
