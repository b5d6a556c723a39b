//! In-memory data sources
//!
//! Plain-collection implementations of [`MealLog`] and [`FoodCatalog`] for
//! embedding and tests.

use std::cell::Cell;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Food, Meal};
use super::source::{FoodCatalog, MealLog, SourceError};

/// Meal log backed by a vector
#[derive(Debug, Default)]
pub struct MemoryMealLog {
    meals: Vec<Meal>,
    fetches: Cell<usize>,
}

impl MemoryMealLog {
    pub fn new(meals: Vec<Meal>) -> Self {
        Self {
            meals,
            fetches: Cell::new(0),
        }
    }

    pub fn push(&mut self, meal: Meal) {
        self.meals.push(meal);
    }

    /// Number of `fetch_meals` calls served so far
    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl MealLog for MemoryMealLog {
    fn fetch_meals(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Meal>, SourceError> {
        self.fetches.set(self.fetches.get() + 1);

        let mut meals: Vec<Meal> = self
            .meals
            .iter()
            .filter(|m| m.user_id() == user_id && start <= m.day() && m.day() <= end)
            .cloned()
            .collect();
        meals.sort_by_key(|m| (m.logged_at(), m.id()));
        Ok(meals)
    }
}

/// Food catalog backed by hash maps
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    foods: HashMap<String, Food>,
    units: HashMap<String, String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_food(mut self, food: Food) -> Self {
        self.foods.insert(food.name.clone(), food);
        self
    }

    pub fn with_unit(mut self, nutrient: &str, unit: &str) -> Self {
        self.units.insert(nutrient.to_string(), unit.to_string());
        self
    }
}

impl FoodCatalog for MemoryCatalog {
    fn food(&self, name: &str) -> Result<Food, SourceError> {
        self.foods
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::UnknownFood(name.to_string()))
    }

    fn nutrient_unit(&self, nutrient: &str) -> Result<String, SourceError> {
        self.units
            .get(nutrient)
            .cloned()
            .ok_or_else(|| SourceError::UnknownNutrient(nutrient.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared test data: butter, beef and bread with round numbers.

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::models::{FoodGuideServings, FoodItem, MealType, Nutrition};

    pub const USER: i64 = 1;

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, 0, 0).unwrap()
    }

    pub fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_food(Food {
                id: 1,
                name: "Butter".to_string(),
                reference_unit: "5g".to_string(),
                nutrients: Nutrition::zero()
                    .with("Energy", 36.0)
                    .with("Protein", 0.04)
                    .with("Fat", 4.0),
                servings: FoodGuideServings::new(0.0, 0.0, 0.0, 0.0, 0.25),
            })
            .with_food(Food {
                id: 2,
                name: "Beef".to_string(),
                reference_unit: "55g".to_string(),
                nutrients: Nutrition::zero()
                    .with("Energy", 138.0)
                    .with("Protein", 14.0)
                    .with("Fat", 8.0),
                servings: FoodGuideServings::new(0.0, 0.0, 0.0, 0.75, 0.0),
            })
            .with_food(Food {
                id: 3,
                name: "Bread".to_string(),
                reference_unit: "35g".to_string(),
                nutrients: Nutrition::zero()
                    .with("Energy", 90.0)
                    .with("Protein", 3.0)
                    .with("Fibre", 1.0),
                servings: FoodGuideServings::new(0.0, 1.0, 0.0, 0.0, 0.0),
            })
            .with_unit("Energy", "kCal")
            .with_unit("Protein", "g")
            .with_unit("Fat", "g")
    }

    pub fn meal(id: i64, date: NaiveDate, hour: u32, meal_type: MealType, items: Vec<FoodItem>) -> Meal {
        Meal::new(id, USER, at(date, hour), meal_type, items)
    }

    pub fn butter(quantity: f64) -> FoodItem {
        FoodItem::new("Butter", quantity, "5g")
    }

    pub fn beef(quantity: f64) -> FoodItem {
        FoodItem::new("Beef", quantity, "55g")
    }

    pub fn bread(quantity: f64) -> FoodItem {
        FoodItem::new("Bread", quantity, "35g")
    }
}
