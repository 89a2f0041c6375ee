//! Monetisation calculations for MeasureUp estimates.
//!
//! The engine is pure: it reads a resolved reference row plus the user's
//! quantities and produces derived values, never touching session state.

pub mod common;
pub mod monetisation;

pub use monetisation::{CalcNotice, MonetisationInput, MonetisationResult, MonetisationWorksheet};
