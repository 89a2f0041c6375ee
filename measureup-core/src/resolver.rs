//! Value resolver: turns a (category, level[, silver name]) selection into
//! the matching reference row and the applicable display-column set.

use tracing::warn;

use crate::models::{ReferenceRow, ValueLevel};

/// Reference-table columns applicable for display under a level selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayColumn {
    Key,
    Description,
    Unit1,
    Unit2,
    BronzeValue,
    SilverValues,
    Fiscal,
    Economic,
    Social,
    Environmental,
    Url,
}

/// Columns shown for a Bronze selection.
pub const BRONZE_COLUMNS: &[DisplayColumn] = &[
    DisplayColumn::Key,
    DisplayColumn::Description,
    DisplayColumn::Unit1,
    DisplayColumn::Unit2,
    DisplayColumn::BronzeValue,
    DisplayColumn::Fiscal,
    DisplayColumn::Economic,
    DisplayColumn::Social,
    DisplayColumn::Environmental,
    DisplayColumn::Url,
];

/// Columns shown for a Silver selection.
pub const SILVER_COLUMNS: &[DisplayColumn] = &[
    DisplayColumn::Key,
    DisplayColumn::Description,
    DisplayColumn::Unit1,
    DisplayColumn::Unit2,
    DisplayColumn::SilverValues,
    DisplayColumn::Fiscal,
    DisplayColumn::Economic,
    DisplayColumn::Social,
    DisplayColumn::Environmental,
];

/// The in-memory reference table. Loaded once per session and read-only
/// thereafter.
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    rows: Vec<ReferenceRow>,
}

/// Outcome of resolving a user selection against the reference table.
///
/// A `None` row is a recoverable "no row selected" state, not an error:
/// calculations over it yield zeros and the caller displays a warning.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub row: Option<&'a ReferenceRow>,
    pub level: ValueLevel,
    pub columns: &'static [DisplayColumn],
    /// Silver was requested but the category has no Silver differentiation;
    /// the bare category row is used with a note to that effect.
    pub silver_fallback: bool,
    /// Silver differentiations exist for this category but none was chosen.
    pub needs_silver_choice: bool,
}

impl ValueTable {
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct value names, sorted ascending.
    pub fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rows.iter().map(|r| r.value_name.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Distinct Silver differentiation names for a category, in table
    /// order, excluding the "NA" sentinel. An empty result means the
    /// category has no Silver differentiation.
    pub fn silver_names(
        &self,
        category: &str,
    ) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for row in self.rows.iter().filter(|r| r.value_name == category) {
            if let Some(name) = row.silver_differentiation() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }

    /// Distinct Silver adjustment factor descriptions for a category, in
    /// table order. Informational only, never used in computation.
    pub fn silver_adjustment_factors(
        &self,
        category: &str,
    ) -> Vec<String> {
        let mut factors: Vec<String> = Vec::new();
        for row in self.rows.iter().filter(|r| r.value_name == category) {
            if let Some(factor) = row.silver_adjustment_factors.as_deref() {
                if !factor.is_empty() && !factors.iter().any(|f| f == factor) {
                    factors.push(factor.to_string());
                }
            }
        }
        factors
    }

    /// Resolve a user selection to a reference row and its applicable
    /// display columns.
    ///
    /// Bronze expects exactly one matching row; Silver resolves via the
    /// chosen differentiation name, falling back to the bare category row
    /// when the category has no differentiation at all.
    pub fn resolve(
        &self,
        category: &str,
        level: ValueLevel,
        silver_name: Option<&str>,
    ) -> Resolution<'_> {
        match level {
            ValueLevel::Bronze => {
                let row = self.first_full_match(category, level, |r| {
                    r.value_name == category && r.level == ValueLevel::Bronze
                });
                Resolution {
                    row,
                    level,
                    columns: BRONZE_COLUMNS,
                    silver_fallback: false,
                    needs_silver_choice: false,
                }
            }
            ValueLevel::Silver => self.resolve_silver(category, silver_name),
        }
    }

    fn resolve_silver(
        &self,
        category: &str,
        silver_name: Option<&str>,
    ) -> Resolution<'_> {
        let names = self.silver_names(category);

        if names.is_empty() {
            // No Silver differentiation exists; show the bare category row.
            let row = self.rows.iter().find(|r| r.value_name == category);
            return Resolution {
                row,
                level: ValueLevel::Silver,
                columns: SILVER_COLUMNS,
                silver_fallback: true,
                needs_silver_choice: false,
            };
        }

        match silver_name {
            Some(chosen) => {
                let row = self.first_full_match(category, ValueLevel::Silver, |r| {
                    r.value_name == category && r.silver_name.as_deref() == Some(chosen)
                });
                Resolution {
                    row,
                    level: ValueLevel::Silver,
                    columns: SILVER_COLUMNS,
                    silver_fallback: false,
                    needs_silver_choice: false,
                }
            }
            None => Resolution {
                row: None,
                level: ValueLevel::Silver,
                columns: SILVER_COLUMNS,
                silver_fallback: false,
                needs_silver_choice: true,
            },
        }
    }

    /// First row matching a fully-specified key. More than one match is a
    /// data-integrity condition: it is logged and the first row in table
    /// order wins.
    fn first_full_match(
        &self,
        category: &str,
        level: ValueLevel,
        predicate: impl Fn(&&ReferenceRow) -> bool,
    ) -> Option<&ReferenceRow> {
        let mut matches = self.rows.iter().filter(|r| predicate(r));
        let first = matches.next();
        if matches.next().is_some() {
            warn!(
                category,
                level = level.as_str(),
                "multiple reference rows match a fully-specified key; using the first in table order"
            );
        }
        first
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn row(
        value_name: &str,
        level: ValueLevel,
        silver_name: Option<&str>,
    ) -> ReferenceRow {
        ReferenceRow {
            value_name: value_name.to_string(),
            level,
            silver_name: silver_name.map(str::to_string),
            silver_adjustment_factors: None,
            description: format!("{value_name} description"),
            unit1_label: "people".to_string(),
            unit2_label: Some("years".to_string()),
            key: None,
            url: None,
            bronze_value: Some(dec!(100)),
            silver_value: Some(dec!(150)),
            fiscal: None,
            economic: None,
            social: None,
            environmental: None,
            kg_co2e_per_unit: None,
            wellby_per_unit: None,
        }
    }

    fn table() -> ValueTable {
        ValueTable::new(vec![
            row("Flood resilience", ValueLevel::Bronze, None),
            row("Flood resilience", ValueLevel::Silver, Some("Coastal")),
            row("Flood resilience", ValueLevel::Silver, Some("Inland")),
            row("Debt advice", ValueLevel::Bronze, Some("NA")),
        ])
    }

    #[test]
    fn categories_are_distinct_and_sorted_ascending() {
        let categories = table().categories();

        assert_eq!(categories, vec!["Debt advice", "Flood resilience"]);
    }

    #[test]
    fn resolve_bronze_finds_single_row() {
        let table = table();
        let resolution = table.resolve("Flood resilience", ValueLevel::Bronze, None);

        let row = resolution.row.expect("bronze row should match");
        assert_eq!(row.level, ValueLevel::Bronze);
        assert_eq!(resolution.columns, BRONZE_COLUMNS);
        assert!(!resolution.silver_fallback);
    }

    #[test]
    fn resolve_bronze_unknown_category_yields_empty_row() {
        let table = table();
        let resolution = table.resolve("Unknown", ValueLevel::Bronze, None);

        assert!(resolution.row.is_none());
    }

    #[test]
    fn resolve_silver_with_chosen_differentiation() {
        let table = table();
        let resolution = table.resolve("Flood resilience", ValueLevel::Silver, Some("Inland"));

        let row = resolution.row.expect("silver row should match");
        assert_eq!(row.silver_name.as_deref(), Some("Inland"));
        assert_eq!(resolution.columns, SILVER_COLUMNS);
        assert!(!resolution.needs_silver_choice);
    }

    #[test]
    fn resolve_silver_without_choice_requires_one() {
        let table = table();
        let resolution = table.resolve("Flood resilience", ValueLevel::Silver, None);

        assert!(resolution.row.is_none());
        assert!(resolution.needs_silver_choice);
    }

    #[test]
    fn resolve_silver_falls_back_when_no_differentiation_exists() {
        let table = table();
        let resolution = table.resolve("Debt advice", ValueLevel::Silver, None);

        // The "NA" sentinel means no differentiation; the bare category row
        // is returned with the fallback note set.
        let row = resolution.row.expect("fallback row should match");
        assert_eq!(row.value_name, "Debt advice");
        assert!(resolution.silver_fallback);
        assert!(!resolution.needs_silver_choice);
    }

    #[test]
    fn silver_names_exclude_na_sentinel() {
        let table = table();

        assert_eq!(table.silver_names("Flood resilience"), vec![
            "Coastal", "Inland"
        ]);
        assert!(table.silver_names("Debt advice").is_empty());
    }

    #[test]
    fn silver_adjustment_factors_are_distinct_in_table_order() {
        let mut rows = vec![
            row("Flood resilience", ValueLevel::Silver, Some("Coastal")),
            row("Flood resilience", ValueLevel::Silver, Some("Inland")),
        ];
        rows[0].silver_adjustment_factors = Some("Location".to_string());
        rows[1].silver_adjustment_factors = Some("Location".to_string());
        let table = ValueTable::new(rows);

        assert_eq!(table.silver_adjustment_factors("Flood resilience"), vec![
            "Location"
        ]);
    }

    #[test]
    fn duplicate_full_match_uses_first_in_table_order() {
        let mut first = row("Flood resilience", ValueLevel::Bronze, None);
        first.bronze_value = Some(dec!(111));
        let mut second = row("Flood resilience", ValueLevel::Bronze, None);
        second.bronze_value = Some(dec!(222));
        let table = ValueTable::new(vec![first, second]);

        let resolution = table.resolve("Flood resilience", ValueLevel::Bronze, None);

        assert_eq!(resolution.row.unwrap().bronze_value, Some(dec!(111)));
    }
}
