//! Meal Swap Library
//!
//! Nutrient intake aggregation over logged meals and "what if I swapped this
//! ingredient" analysis.

pub mod analysis;
pub mod build_info;
pub mod config;
pub mod db;
pub mod models;
pub mod nutrition;
