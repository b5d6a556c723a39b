//! Nutrition reference data
//!
//! Reference-unit parsing and food guide recommendations.

pub mod food_guide;
pub mod units;

pub use food_guide::recommended_daily_servings;
pub use units::{categorize_unit, grams_for, grams_per_unit, ml_per_unit, ReferenceUnit, UnitCategory};
