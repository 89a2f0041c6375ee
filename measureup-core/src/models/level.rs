use serde::{Deserialize, Serialize};

/// Specificity tier of a reference value. Silver permits finer
/// differentiation via a sub-category name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueLevel {
    #[default]
    Bronze,
    Silver,
}

impl ValueLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
        }
    }

    /// Case-insensitive, whitespace-tolerant parse, matching how the
    /// reference data spells levels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bronze" => Some(Self::Bronze),
            "silver" => Some(Self::Silver),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ValueLevel::parse("bronze"), Some(ValueLevel::Bronze));
        assert_eq!(ValueLevel::parse("BRONZE"), Some(ValueLevel::Bronze));
        assert_eq!(ValueLevel::parse("Silver"), Some(ValueLevel::Silver));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(ValueLevel::parse("  Bronze "), Some(ValueLevel::Bronze));
    }

    #[test]
    fn parse_rejects_unknown_level() {
        assert_eq!(ValueLevel::parse("Gold"), None);
        assert_eq!(ValueLevel::parse(""), None);
    }

    #[test]
    fn default_is_bronze() {
        assert_eq!(ValueLevel::default(), ValueLevel::Bronze);
    }
}
