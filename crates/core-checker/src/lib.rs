pub mod evaluator;
pub mod normalizer;
pub mod policy;
pub mod result_set;
pub mod value;

#[cfg(test)]
pub mod tests;

pub use evaluator::{ComparisonOutcome, compare, evaluate};
pub use normalizer::{canonical_decimal, canonical_row, normalize_row};
pub use policy::ComparisonPolicy;
pub use result_set::{ResultSet, Row};
pub use value::Value;
