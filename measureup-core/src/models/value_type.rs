use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ReferenceRow;

/// Which per-type monetary column an estimate reports against.
///
/// The column mapping is explicit: Economic → economic, Fiscal → fiscal,
/// Wellbeing → social, Environmental → environmental.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    #[default]
    Economic,
    Fiscal,
    Wellbeing,
    Environmental,
}

impl ValueType {
    pub const ALL: [Self; 4] = [
        Self::Economic,
        Self::Fiscal,
        Self::Wellbeing,
        Self::Environmental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economic => "Economic",
            Self::Fiscal => "Fiscal",
            Self::Wellbeing => "Wellbeing",
            Self::Environmental => "Environmental",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "economic" => Some(Self::Economic),
            "fiscal" => Some(Self::Fiscal),
            "wellbeing" => Some(Self::Wellbeing),
            "environmental" => Some(Self::Environmental),
            _ => None,
        }
    }

    /// The per-type base value of a row. Wellbeing maps to the Social
    /// column of the reference data.
    pub fn base_value(&self, row: &ReferenceRow) -> Option<Decimal> {
        match self {
            Self::Economic => row.economic,
            Self::Fiscal => row.fiscal,
            Self::Wellbeing => row.social,
            Self::Environmental => row.environmental,
        }
    }
}
