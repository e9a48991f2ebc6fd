//! Foundation layer: value types and math primitives.

pub mod math;
pub mod types;
