//! Data sources consumed by the engine
//!
//! The meal log and the food catalog are collaborators: the engine only
//! reads from them and translates their failures into [`SourceError`].

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Food, FoodGuideServings, Meal, Nutrition};

/// Collaborator failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("Food not found in catalog: {0}")]
    UnknownFood(String),

    #[error("No unit recorded for nutrient: {0}")]
    UnknownNutrient(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Source of logged meals
pub trait MealLog {
    /// Meals of `user_id` eaten between `start` and `end`, both inclusive
    ///
    /// Returns an empty list when nothing matches.
    fn fetch_meals(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Meal>, SourceError>;
}

/// Food name to nutrient / food guide lookup
pub trait FoodCatalog {
    /// Catalog entry for a food name
    fn food(&self, name: &str) -> Result<Food, SourceError>;

    /// Display unit of a nutrient
    fn nutrient_unit(&self, nutrient: &str) -> Result<String, SourceError>;

    /// Nutrients in a whole meal: each item's quantity times its food's
    /// per-reference-unit nutrients
    fn meal_nutrition(&self, meal: &Meal) -> Result<Nutrition, SourceError> {
        let mut total = Nutrition::zero();
        for item in meal.items() {
            total.merge(&self.food(&item.name)?.nutrition_for(item.quantity));
        }
        Ok(total)
    }

    /// Food guide servings in a whole meal
    fn meal_food_guide_servings(&self, meal: &Meal) -> Result<FoodGuideServings, SourceError> {
        let mut total = FoodGuideServings::zero();
        for item in meal.items() {
            total += self.food(&item.name)?.servings_for(item.quantity);
        }
        Ok(total)
    }
}
