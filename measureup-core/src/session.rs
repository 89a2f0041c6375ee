//! Session state for the six-step estimation wizard.
//!
//! One [`SessionState`] exists per interactive session and exclusively owns
//! every answer the user has given. Derived values are never stored:
//! [`SessionState::derived`] recomputes them from current inputs on every
//! read, so a stale result can never be displayed or exported after an
//! upstream input changed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{MonetisationInput, MonetisationResult, MonetisationWorksheet};
use crate::models::{ImpactDiscountLevel, ValueLevel, ValueType};
use crate::resolver::{BRONZE_COLUMNS, Resolution, SILVER_COLUMNS, ValueTable};

/// The ordered steps of the wizard. Transitions are explicit via
/// [`SessionState::go_to`]; nothing advances implicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Welcome,
    Scope,
    ValueMatch,
    ActivityDetails,
    Calculation,
    Report,
}

impl Step {
    pub const ALL: [Self; 6] = [
        Self::Welcome,
        Self::Scope,
        Self::ValueMatch,
        Self::ActivityDetails,
        Self::Calculation,
        Self::Report,
    ];

    /// 1-based position in the flow.
    pub fn index(&self) -> u8 {
        match self {
            Self::Welcome => 1,
            Self::Scope => 2,
            Self::ValueMatch => 3,
            Self::ActivityDetails => 4,
            Self::Calculation => 5,
            Self::Report => 6,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.index() == index)
    }

    /// The following step, if any ("Next" stops at the report).
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding step, if any ("Previous" stops at the welcome page).
    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Scope => "Stakeholders, Activity and Outcomes",
            Self::ValueMatch => "Match with MeasureUp Values",
            Self::ActivityDetails => "Activity Details and Impact Discount",
            Self::Calculation => "Calculate the Monetised Value",
            Self::Report => "Generate Report",
        }
    }

    /// Short guidance shown on the welcome page for each step.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Welcome => {
                "Estimate the monetised and non-monetised value of your activities \
                 using MeasureUp values."
            }
            Self::Scope => {
                "Describe the stakeholders affected by your activity, the activity \
                 itself, and the key changes stakeholders experience."
            }
            Self::ValueMatch => {
                "Choose the MeasureUp value that best matches your activity or your \
                 main outcome. If you are unsure which level to pick, start with Bronze."
            }
            Self::ActivityDetails => {
                "Explain how you will measure the outcome, enter how many units are \
                 affected and for how long, and estimate how much of the change would \
                 have happened anyway."
            }
            Self::Calculation => {
                "Review the monetised value of your impact and choose the type of \
                 value to report."
            }
            Self::Report => "Review and download your results.",
        }
    }
}

/// All answers for one estimation session.
///
/// Fields are grouped by the step that captures them; any step may be
/// revisited and re-mutated, and derived values always follow the current
/// inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    step: Step,

    // Step 2: who and what.
    pub stakeholders: String,
    pub activity: String,
    pub outcomes: String,

    // Step 3: value match.
    pub category: Option<String>,
    pub level: ValueLevel,
    pub silver_name: Option<String>,

    // Step 4: activity details and discount.
    pub indicator_source: String,
    pub unit1: u32,
    pub unit2: Decimal,
    pub impact_evidence: String,
    pub discount: ImpactDiscountLevel,

    // Step 5: calculation.
    pub value_type: ValueType,
}

impl SessionState {
    /// A fresh session at step 1 with the documented defaults: numeric
    /// fields 0, unit 2 at 1, textual fields empty, no discount, Economic
    /// value type, Bronze level.
    pub fn new() -> Self {
        Self {
            step: Step::Welcome,
            stakeholders: String::new(),
            activity: String::new(),
            outcomes: String::new(),
            category: None,
            level: ValueLevel::Bronze,
            silver_name: None,
            indicator_source: String::new(),
            unit1: 0,
            unit2: Decimal::ONE,
            impact_evidence: String::new(),
            discount: ImpactDiscountLevel::NoDiscount,
            value_type: ValueType::Economic,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Move to a step. Navigation never discards entered values.
    pub fn go_to(
        &mut self,
        step: Step,
    ) {
        self.step = step;
    }

    /// "Start over": atomically restores every field to its default and
    /// returns to step 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record the value-match selection. Bronze has no differentiation, so
    /// switching to it clears any previously chosen Silver name.
    pub fn select_value(
        &mut self,
        category: impl Into<String>,
        level: ValueLevel,
        silver_name: Option<String>,
    ) {
        self.category = Some(category.into());
        self.level = level;
        self.silver_name = match level {
            ValueLevel::Bronze => None,
            ValueLevel::Silver => silver_name,
        };
    }

    /// Resolve the current selection against the reference table.
    pub fn resolve<'t>(
        &self,
        table: &'t ValueTable,
    ) -> Resolution<'t> {
        match self.category.as_deref() {
            Some(category) => table.resolve(category, self.level, self.silver_name.as_deref()),
            None => Resolution {
                row: None,
                level: self.level,
                columns: match self.level {
                    ValueLevel::Bronze => BRONZE_COLUMNS,
                    ValueLevel::Silver => SILVER_COLUMNS,
                },
                silver_fallback: false,
                needs_silver_choice: false,
            },
        }
    }

    /// The engine input built from current answers.
    pub fn monetisation_input(&self) -> MonetisationInput {
        MonetisationInput {
            unit1: self.unit1,
            unit2: self.unit2,
            discount: self.discount,
            value_type: self.value_type,
        }
    }

    /// Recompute all derived values from current inputs. Called on every
    /// read instead of caching, so stale results cannot exist.
    pub fn derived(
        &self,
        table: &ValueTable,
    ) -> MonetisationResult {
        let resolution = self.resolve(table);
        MonetisationWorksheet::new(&resolution).calculate(&self.monetisation_input())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
