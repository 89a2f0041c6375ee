//! Monetised-value worksheet.
//!
//! Computes the sequence of derived values for one estimate: base value per
//! unit, discount applied, totals over the entered quantities, the per-type
//! total, and the domain-specific secondary metrics (carbon, wellbeing).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use measureup_core::calculations::{MonetisationInput, MonetisationWorksheet};
//! use measureup_core::models::{ImpactDiscountLevel, ReferenceRow, ValueLevel, ValueType};
//! use measureup_core::resolver::ValueTable;
//!
//! let table = ValueTable::new(vec![ReferenceRow {
//!     value_name: "Flood resilience".to_string(),
//!     level: ValueLevel::Bronze,
//!     silver_name: None,
//!     silver_adjustment_factors: None,
//!     description: "Household protected from flooding".to_string(),
//!     unit1_label: "households".to_string(),
//!     unit2_label: Some("years".to_string()),
//!     key: None,
//!     url: None,
//!     bronze_value: Some(dec!(200)),
//!     silver_value: None,
//!     fiscal: None,
//!     economic: Some(dec!(200)),
//!     social: None,
//!     environmental: None,
//!     kg_co2e_per_unit: None,
//!     wellby_per_unit: None,
//! }]);
//!
//! let resolution = table.resolve("Flood resilience", ValueLevel::Bronze, None);
//! let input = MonetisationInput {
//!     unit1: 10,
//!     unit2: dec!(1),
//!     discount: ImpactDiscountLevel::Medium,
//!     value_type: ValueType::Economic,
//! };
//!
//! let result = MonetisationWorksheet::new(&resolution).calculate(&input);
//!
//! assert_eq!(result.monetised_value_per_unit, dec!(100));
//! assert_eq!(result.total_monetised_value, dec!(1000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ImpactDiscountLevel, ReferenceRow, ValueType};
use crate::resolver::Resolution;

/// User-entered quantities and choices for one estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetisationInput {
    /// Primary quantity (e.g. people affected). Non-negative by type.
    pub unit1: u32,

    /// Duration/secondary multiplier (e.g. fraction of a year). Ignored and
    /// treated as 1 when the resolved row has no duration dimension.
    pub unit2: Decimal,

    pub discount: ImpactDiscountLevel,

    pub value_type: ValueType,
}

/// Recoverable conditions raised during a calculation. None of these stop
/// the worksheet; the affected values default to zero or absent and the
/// caller surfaces the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalcNotice {
    /// The resolved row has no monetary value for the selected level.
    MissingValueColumn,

    /// The resolved row has no value for the selected type column.
    MissingTypeColumn(ValueType),

    /// A Wellbeing estimate was requested but the row carries no usable
    /// WELLBY figure. A present-but-zero figure means the methodology does
    /// not apply and is treated identically to an absent one.
    WellbyMethodologyNotApplicable,
}

/// Derived values for one estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetisationResult {
    pub base_value_per_unit: Decimal,

    /// The discount fraction that was applied.
    pub discount_fraction: Decimal,

    /// Base value per unit after the impact discount.
    pub monetised_value_per_unit: Decimal,

    /// Monetised value per unit multiplied out over unit 1 and unit 2.
    pub total_monetised_value: Decimal,

    /// Base value from the column selected by the value type.
    pub base_value_for_type: Decimal,

    /// Per-type base value, discounted and multiplied over both units.
    pub total_value_by_type: Decimal,

    /// Present only for Environmental estimates on rows with a CO2 figure.
    pub total_kg_co2: Option<Decimal>,
    pub total_tonnes_co2: Option<Decimal>,

    /// Present only for Wellbeing estimates on rows with a non-zero WELLBY
    /// figure.
    pub total_wellbys: Option<Decimal>,

    pub notices: Vec<CalcNotice>,
}

impl MonetisationResult {
    /// The all-zero result used when no reference row is selected. Not an
    /// error: the caller shows a "no row selected" warning and navigation
    /// continues.
    fn empty(discount_fraction: Decimal) -> Self {
        Self {
            base_value_per_unit: Decimal::ZERO,
            discount_fraction,
            monetised_value_per_unit: Decimal::ZERO,
            total_monetised_value: Decimal::ZERO,
            base_value_for_type: Decimal::ZERO,
            total_value_by_type: Decimal::ZERO,
            total_kg_co2: None,
            total_tonnes_co2: None,
            total_wellbys: None,
            notices: Vec::new(),
        }
    }
}

/// Calculator for the monetisation worksheet.
///
/// Borrows a [`Resolution`] and computes derived values from it; pure and
/// side-effect-free, so callers recompute on every read rather than caching.
#[derive(Debug, Clone)]
pub struct MonetisationWorksheet<'a> {
    resolution: &'a Resolution<'a>,
}

impl<'a> MonetisationWorksheet<'a> {
    pub fn new(resolution: &'a Resolution<'a>) -> Self {
        Self { resolution }
    }

    /// Computes the full set of derived values.
    ///
    /// Infallible: every degenerate condition (no row, missing columns,
    /// inapplicable methodology) degrades to zero/absent plus a
    /// [`CalcNotice`].
    pub fn calculate(
        &self,
        input: &MonetisationInput,
    ) -> MonetisationResult {
        let discount_fraction = input.discount.fraction();
        let retained = input.discount.retained();

        let Some(row) = self.resolution.row else {
            return MonetisationResult::empty(discount_fraction);
        };

        let mut notices = Vec::new();

        let unit1 = Decimal::from(input.unit1);
        let unit2 = self.effective_unit2(row, input.unit2);

        let base_value_per_unit = self.base_value_per_unit(row, &mut notices);
        let monetised_value_per_unit = base_value_per_unit * retained;
        let total_monetised_value = monetised_value_per_unit * unit1 * unit2;

        let base_value_for_type = self.base_value_for_type(row, input.value_type, &mut notices);
        let total_value_by_type = base_value_for_type * unit1 * unit2 * retained;

        let total_kg_co2 = self.total_kg_co2(row, input.value_type, unit1, unit2, retained);
        let total_tonnes_co2 = total_kg_co2.map(|kg| kg / Decimal::from(1000));

        let total_wellbys =
            self.total_wellbys(row, input.value_type, unit1, unit2, retained, &mut notices);

        MonetisationResult {
            base_value_per_unit,
            discount_fraction,
            monetised_value_per_unit,
            total_monetised_value,
            base_value_for_type,
            total_value_by_type,
            total_kg_co2,
            total_tonnes_co2,
            total_wellbys,
            notices,
        }
    }

    /// Unit 2 collapses to 1 when the activity has no duration dimension.
    fn effective_unit2(
        &self,
        row: &ReferenceRow,
        unit2: Decimal,
    ) -> Decimal {
        if row.has_unit2_dimension() {
            unit2
        } else {
            Decimal::ONE
        }
    }

    /// The level-selected monetary value: Bronze value for Bronze, Silver
    /// values for Silver. Absent defaults to zero with a notice.
    fn base_value_per_unit(
        &self,
        row: &ReferenceRow,
        notices: &mut Vec<CalcNotice>,
    ) -> Decimal {
        match row.level_value(self.resolution.level) {
            Some(value) => value,
            None => {
                notices.push(CalcNotice::MissingValueColumn);
                Decimal::ZERO
            }
        }
    }

    /// The per-type base value. Absent defaults to zero with a notice.
    fn base_value_for_type(
        &self,
        row: &ReferenceRow,
        value_type: ValueType,
        notices: &mut Vec<CalcNotice>,
    ) -> Decimal {
        match value_type.base_value(row) {
            Some(value) => value,
            None => {
                notices.push(CalcNotice::MissingTypeColumn(value_type));
                Decimal::ZERO
            }
        }
    }

    /// Carbon total, only for Environmental estimates on rows carrying a
    /// CO2-per-unit figure.
    fn total_kg_co2(
        &self,
        row: &ReferenceRow,
        value_type: ValueType,
        unit1: Decimal,
        unit2: Decimal,
        retained: Decimal,
    ) -> Option<Decimal> {
        if value_type != ValueType::Environmental {
            return None;
        }
        row.kg_co2e_per_unit
            .map(|per_unit| per_unit * unit1 * unit2 * retained)
    }

    /// WELLBY total, only for Wellbeing estimates on rows carrying a
    /// non-zero WELLBY-per-unit figure. A zero figure means the value was
    /// not calculated with the WELLBY methodology and is treated exactly
    /// like an absent one.
    fn total_wellbys(
        &self,
        row: &ReferenceRow,
        value_type: ValueType,
        unit1: Decimal,
        unit2: Decimal,
        retained: Decimal,
        notices: &mut Vec<CalcNotice>,
    ) -> Option<Decimal> {
        if value_type != ValueType::Wellbeing {
            return None;
        }
        match row.wellby_per_unit {
            Some(per_unit) if !per_unit.is_zero() => Some(per_unit * unit1 * unit2 * retained),
            _ => {
                notices.push(CalcNotice::WellbyMethodologyNotApplicable);
                None
            }
        }
    }
}
