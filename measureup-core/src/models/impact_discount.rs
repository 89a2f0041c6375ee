use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Estimate of how much of the observed change would have happened anyway.
/// The fraction is removed from the raw value (attribution/deadweight).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactDiscountLevel {
    #[default]
    NoDiscount,
    Low,
    Medium,
    High,
}

impl ImpactDiscountLevel {
    pub const ALL: [Self; 4] = [Self::NoDiscount, Self::Low, Self::Medium, Self::High];

    /// Fixed discount table, no interpolation.
    pub fn fraction(&self) -> Decimal {
        match self {
            Self::NoDiscount => Decimal::ZERO,
            Self::Low => Decimal::new(25, 2),
            Self::Medium => Decimal::new(50, 2),
            Self::High => Decimal::new(75, 2),
        }
    }

    /// The complement applied to values: 1 − fraction.
    pub fn retained(&self) -> Decimal {
        Decimal::ONE - self.fraction()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoDiscount => "No discount",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "no discount" | "none" => Some(Self::NoDiscount),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn fraction_table_is_exact() {
        assert_eq!(ImpactDiscountLevel::NoDiscount.fraction(), dec!(0));
        assert_eq!(ImpactDiscountLevel::Low.fraction(), dec!(0.25));
        assert_eq!(ImpactDiscountLevel::Medium.fraction(), dec!(0.50));
        assert_eq!(ImpactDiscountLevel::High.fraction(), dec!(0.75));
    }

    #[test]
    fn retained_is_complement_of_fraction() {
        for level in ImpactDiscountLevel::ALL {
            assert_eq!(level.retained(), dec!(1) - level.fraction());
        }
    }

    #[test]
    fn parse_round_trips_display_names() {
        for level in ImpactDiscountLevel::ALL {
            assert_eq!(ImpactDiscountLevel::parse(level.as_str()), Some(level));
        }
    }

    #[test]
    fn parse_rejects_unknown_level() {
        assert_eq!(ImpactDiscountLevel::parse("Severe"), None);
    }

    #[test]
    fn default_is_no_discount() {
        assert_eq!(
            ImpactDiscountLevel::default(),
            ImpactDiscountLevel::NoDiscount
        );
    }
}
