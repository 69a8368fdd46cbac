// comparison operators
pub const EQ_OPERATOR: &str = "$eq";
pub const GT_OPERATOR: &str = "$gt";
pub const GTE_OPERATOR: &str = "$gte";
pub const LT_OPERATOR: &str = "$lt";
pub const LTE_OPERATOR: &str = "$lte";
pub const NE_OPERATOR: &str = "$ne";

// membership operators
pub const IN_OPERATOR: &str = "$in";
pub const NIN_OPERATOR: &str = "$nin";

// nested under a field name
pub const NOT_OPERATOR: &str = "$not";

// top-level combinators
pub const AND_OPERATOR: &str = "$and";
pub const OR_OPERATOR: &str = "$or";

// extended json wrapper keeping 64-bit integers apart from 32-bit ones
pub const NUMBER_LONG: &str = "$numberLong";
