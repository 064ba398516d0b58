pub mod transform;
pub mod serialization_utils;
pub mod units;
