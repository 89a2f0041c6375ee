mod impact_discount;
mod level;
mod reference_row;
mod value_type;

pub use impact_discount::ImpactDiscountLevel;
pub use level::ValueLevel;
pub use reference_row::ReferenceRow;
pub use value_type::ValueType;
