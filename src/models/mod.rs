//! Data models
//!
//! Meals, logged food items, catalog foods and the value types they carry.

mod food;
mod food_guide;
mod food_item;
mod meal;
mod nutrition;
mod user;

pub use food::{Food, FoodCreate, NutrientUnit};
pub use food_guide::{FoodGroup, FoodGuideServings};
pub use food_item::FoodItem;
pub use meal::{Meal, MealCreate, MealId, MealType, TIMESTAMP_FORMAT};
pub use nutrition::Nutrition;
pub use user::{Sex, UserProfile};
