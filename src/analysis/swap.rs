//! Swap simulation
//!
//! Replays a meal window with one ingredient substituted for another and
//! reports original and modified totals side by side.
//!
//! The swap ratio is fixed once per run from the two representative items the
//! user picked and applied to every occurrence of the ingredient, whatever
//! quantity or unit an individual meal logged it with.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{FoodGuideServings, FoodItem, Meal, MealId, MealType, Nutrition};
use crate::nutrition::grams_for;
use super::aggregate::{per_day_divisor, resolve_units, DayCounter};
use super::error::{AnalysisError, AnalysisResult};
use super::source::FoodCatalog;
use super::window::DateWindow;

/// Multiplier turning a swapped quantity into the replacement quantity
///
/// A zero reference swap quantity yields 1.0.
pub fn swap_ratio(reference_swap_quantity: f64, reference_replacement_quantity: f64) -> f64 {
    if reference_swap_quantity == 0.0 {
        1.0
    } else {
        reference_replacement_quantity / reference_swap_quantity
    }
}

/// Identity of a swap analysis
///
/// Equal keys (by value, all four parts) share one cached result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisKey {
    /// Representative item of the ingredient being replaced
    pub item_to_swap: FoodItem,
    /// Representative item of the replacement
    pub replacement: FoodItem,
    pub window: DateWindow,
}

impl AnalysisKey {
    pub fn new(item_to_swap: FoodItem, replacement: FoodItem, window: DateWindow) -> Self {
        Self {
            item_to_swap,
            replacement,
            window,
        }
    }

    /// Simulation request using the representative items' own quantities
    pub fn to_request(&self) -> SwapRequest {
        SwapRequest {
            item_to_swap: self.item_to_swap.name.clone(),
            replacement: self.replacement.clone(),
            reference_swap_quantity: self.item_to_swap.quantity,
            reference_replacement_quantity: self.replacement.quantity,
        }
    }
}

/// Inputs of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub item_to_swap: String,
    pub replacement: FoodItem,
    pub reference_swap_quantity: f64,
    pub reference_replacement_quantity: f64,
}

/// A meal the swap changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangedMeal {
    pub meal_id: MealId,
    pub day: NaiveDate,
    pub meal_type: MealType,
    pub original: Meal,
    pub modified: Meal,
    pub original_nutrition: Nutrition,
    pub modified_nutrition: Nutrition,
}

/// How much food the swap moved
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwapSummary {
    /// Items replaced across all changed meals
    pub occurrences: usize,
    /// Reference units of the swapped ingredient removed
    pub swapped_quantity: f64,
    /// Reference units of the replacement added
    pub replacement_quantity: f64,
    /// Gram equivalents, when every unit involved is a weight
    pub swapped_grams: Option<f64>,
    pub replacement_grams: Option<f64>,
}

impl SwapSummary {
    fn record(&mut self, swapped: &FoodItem, replacement: &FoodItem) {
        self.occurrences += 1;
        self.swapped_quantity += swapped.quantity;
        self.replacement_quantity += replacement.quantity;
        self.swapped_grams = add_grams(self.swapped_grams, swapped);
        self.replacement_grams = add_grams(self.replacement_grams, replacement);
    }
}

fn add_grams(total: Option<f64>, item: &FoodItem) -> Option<f64> {
    Some(total? + grams_for(item.quantity, &item.unit)?)
}

/// Result of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapAnalysis {
    pub item_to_swap: String,
    pub replacement: FoodItem,
    pub swap_ratio: f64,
    pub meal_count: usize,
    pub day_count: usize,

    pub original_totals: Nutrition,
    pub modified_totals: Nutrition,
    pub original_averages: Nutrition,
    pub modified_averages: Nutrition,

    pub food_guide_original: FoodGuideServings,
    pub food_guide_modified: FoodGuideServings,
    pub food_guide_original_average: FoodGuideServings,
    pub food_guide_modified_average: FoodGuideServings,

    pub changed_meals: Vec<ChangedMeal>,
    pub summary: SwapSummary,
    /// Unit label per nutrient, blank when unknown
    pub nutrient_units: BTreeMap<String, String>,
}

impl SwapAnalysis {
    pub fn changed_meal(&self, meal_id: MealId) -> Option<&ChangedMeal> {
        self.changed_meals.iter().find(|m| m.meal_id == meal_id)
    }

    pub fn unit_for(&self, nutrient: &str) -> &str {
        self.nutrient_units.get(nutrient).map(String::as_str).unwrap_or("")
    }
}

/// Runs substitutions over a meal window
pub struct SwapSimulator<'a, C: ?Sized> {
    catalog: &'a C,
}

impl<'a, C: FoodCatalog + ?Sized> SwapSimulator<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Simulate `request` over the meals of a window
    pub fn simulate(&self, meals: &[Meal], request: &SwapRequest) -> AnalysisResult<SwapAnalysis> {
        if meals.is_empty() {
            return Err(AnalysisError::NoMeals);
        }

        let ratio = swap_ratio(
            request.reference_swap_quantity,
            request.reference_replacement_quantity,
        );
        info!(
            item = %request.item_to_swap,
            replacement = %request.replacement.name,
            ratio,
            meals = meals.len(),
            "simulating swap"
        );

        let mut days = DayCounter::default();
        let mut original_totals = Nutrition::zero();
        let mut modified_totals = Nutrition::zero();
        let mut food_guide_original = FoodGuideServings::zero();
        let mut food_guide_modified = FoodGuideServings::zero();
        let mut changed_meals = Vec::new();
        let mut summary = SwapSummary {
            swapped_grams: Some(0.0),
            replacement_grams: Some(0.0),
            ..SwapSummary::default()
        };

        for meal in meals {
            days.record(meal);

            let original_nutrition = self.catalog.meal_nutrition(meal)?;
            let original_servings = self.catalog.meal_food_guide_servings(meal)?;
            original_totals.merge(&original_nutrition);
            food_guide_original += original_servings;

            let Some(modified) =
                meal.with_substitution(&request.item_to_swap, &request.replacement, ratio)
            else {
                modified_totals.merge(&original_nutrition);
                food_guide_modified += original_servings;
                continue;
            };

            for (before, after) in meal.items().iter().zip(modified.items()) {
                if before.is_ingredient(&request.item_to_swap) {
                    summary.record(before, after);
                }
            }

            let modified_nutrition = self.catalog.meal_nutrition(&modified)?;
            modified_totals.merge(&modified_nutrition);
            food_guide_modified += self.catalog.meal_food_guide_servings(&modified)?;

            debug!(meal_id = meal.id(), day = %meal.day(), "meal changed by swap");
            changed_meals.push(ChangedMeal {
                meal_id: meal.id(),
                day: meal.day(),
                meal_type: meal.meal_type(),
                original: meal.clone(),
                modified,
                original_nutrition,
                modified_nutrition,
            });
        }

        if changed_meals.is_empty() {
            return Err(AnalysisError::NoApplicableSwaps(request.item_to_swap.clone()));
        }

        let day_count = days.day_count();
        let divisor = per_day_divisor(day_count);
        let nutrient_units = resolve_units(self.catalog, &original_totals);

        Ok(SwapAnalysis {
            item_to_swap: request.item_to_swap.clone(),
            replacement: request.replacement.clone(),
            swap_ratio: ratio,
            meal_count: days.meal_count(),
            day_count,
            original_averages: &original_totals / divisor,
            modified_averages: &modified_totals / divisor,
            original_totals,
            modified_totals,
            food_guide_original_average: food_guide_original.scale(1.0 / divisor),
            food_guide_modified_average: food_guide_modified.scale(1.0 / divisor),
            food_guide_original,
            food_guide_modified,
            changed_meals,
            summary,
            nutrient_units,
        })
    }
}
