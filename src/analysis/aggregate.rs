//! Window aggregation
//!
//! Sums nutrients and food guide servings across a meal list and counts the
//! distinct calendar days it covers. Averages are per day, never per meal.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::models::{FoodGroup, FoodGuideServings, Meal, Nutrition};
use super::error::AnalysisResult;
use super::source::FoodCatalog;
use super::window::DateWindow;

/// Distinct calendar days seen across a run of meals
#[derive(Debug, Default)]
pub struct DayCounter {
    days: BTreeSet<NaiveDate>,
    meals: usize,
}

impl DayCounter {
    pub fn record(&mut self, meal: &Meal) {
        self.days.insert(meal.day());
        self.meals += 1;
    }

    pub fn meal_count(&self) -> usize {
        self.meals
    }

    /// Days to average over: 0 for no meals, otherwise at least 1
    pub fn day_count(&self) -> usize {
        if self.meals == 0 {
            0
        } else {
            self.days.len().max(1)
        }
    }
}

/// Number of distinct calendar days the meals were eaten on
pub fn count_distinct_days(meals: &[Meal]) -> usize {
    let mut counter = DayCounter::default();
    meals.iter().for_each(|m| counter.record(m));
    counter.day_count()
}

/// Divisor for per-day averages
pub(crate) fn per_day_divisor(day_count: usize) -> f64 {
    day_count.max(1) as f64
}

/// Totals across a meal list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub nutrients: Nutrition,
    pub food_guide: FoodGuideServings,
    pub day_count: usize,
    pub meal_count: usize,
}

impl Aggregate {
    pub fn average_nutrients(&self) -> Nutrition {
        &self.nutrients / per_day_divisor(self.day_count)
    }

    pub fn average_food_guide(&self) -> FoodGuideServings {
        self.food_guide.scale(1.0 / per_day_divisor(self.day_count))
    }
}

/// Sum nutrients and servings of every meal
pub fn aggregate<C: FoodCatalog + ?Sized>(meals: &[Meal], catalog: &C) -> AnalysisResult<Aggregate> {
    let mut days = DayCounter::default();
    let mut nutrients = Nutrition::zero();
    let mut food_guide = FoodGuideServings::zero();

    for meal in meals {
        days.record(meal);
        nutrients.merge(&catalog.meal_nutrition(meal)?);
        food_guide += catalog.meal_food_guide_servings(meal)?;
    }

    Ok(Aggregate {
        nutrients,
        food_guide,
        day_count: days.day_count(),
        meal_count: days.meal_count(),
    })
}

/// Unit label for every nutrient in `nutrition`
///
/// Nutrients the catalog has no unit for get an empty label.
pub fn resolve_units<C: FoodCatalog + ?Sized>(
    catalog: &C,
    nutrition: &Nutrition,
) -> BTreeMap<String, String> {
    nutrition
        .nutrients()
        .map(|nutrient| {
            let unit = catalog.nutrient_unit(nutrient).unwrap_or_else(|e| {
                warn!(nutrient, error = %e, "unknown nutrient unit, leaving blank");
                String::new()
            });
            (nutrient.to_string(), unit)
        })
        .collect()
}

/// Plain nutrient intake over a window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeReport {
    pub window: DateWindow,
    pub meal_count: usize,
    pub day_count: usize,
    pub totals: Nutrition,
    pub averages: Nutrition,
    pub food_guide_totals: FoodGuideServings,
    pub food_guide_averages: FoodGuideServings,
    pub units: BTreeMap<String, String>,
}

impl IntakeReport {
    pub fn new(window: DateWindow, aggregate: Aggregate, units: BTreeMap<String, String>) -> Self {
        Self {
            window,
            meal_count: aggregate.meal_count,
            day_count: aggregate.day_count,
            averages: aggregate.average_nutrients(),
            food_guide_averages: aggregate.average_food_guide(),
            totals: aggregate.nutrients,
            food_guide_totals: aggregate.food_guide,
            units,
        }
    }
}

/// One food group's average intake against its daily target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentRow {
    pub group: FoodGroup,
    pub label: &'static str,
    pub average: f64,
    pub recommended: f64,
    /// None when the recommendation is zero
    pub percent_of_target: Option<f64>,
}

/// Average daily food guide servings compared with recommendations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodGuideAlignment {
    pub day_count: usize,
    pub rows: Vec<AlignmentRow>,
}

impl FoodGuideAlignment {
    pub fn new(
        average: &FoodGuideServings,
        recommended: &FoodGuideServings,
        day_count: usize,
    ) -> Self {
        let rows = FoodGroup::ALL
            .into_iter()
            .map(|group| {
                let average = average.get(group);
                let recommended = recommended.get(group);
                AlignmentRow {
                    group,
                    label: group.label(),
                    average,
                    recommended,
                    percent_of_target: (recommended != 0.0)
                        .then(|| average / recommended * 100.0),
                }
            })
            .collect();

        Self { day_count, rows }
    }

    pub fn row(&self, group: FoodGroup) -> Option<&AlignmentRow> {
        self.rows.iter().find(|r| r.group == group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::memory::fixtures::*;
    use crate::analysis::error::AnalysisError;
    use crate::analysis::source::SourceError;
    use crate::models::{FoodItem, MealType};

    #[test]
    fn test_same_day_meals_count_once() {
        let meals = vec![
            meal(1, day(2025, 7, 18), 8, MealType::Breakfast, vec![butter(1.0)]),
            meal(2, day(2025, 7, 18), 19, MealType::Dinner, vec![butter(1.0)]),
        ];
        assert_eq!(count_distinct_days(&meals), 1);
    }

    #[test]
    fn test_two_dates_count_twice() {
        let meals = vec![
            meal(1, day(2025, 7, 18), 8, MealType::Breakfast, vec![]),
            meal(2, day(2025, 7, 20), 8, MealType::Breakfast, vec![]),
        ];
        assert_eq!(count_distinct_days(&meals), 2);
        assert_eq!(count_distinct_days(&[]), 0);
    }

    #[test]
    fn test_aggregate_totals_and_averages() {
        let catalog = catalog();
        let meals = vec![
            meal(1, day(2025, 7, 18), 8, MealType::Breakfast, vec![bread(2.0), butter(1.0)]),
            meal(2, day(2025, 7, 18), 12, MealType::Lunch, vec![beef(1.0)]),
            meal(3, day(2025, 7, 19), 12, MealType::Lunch, vec![bread(1.0)]),
        ];

        let agg = aggregate(&meals, &catalog).unwrap();
        assert_eq!(agg.meal_count, 3);
        assert_eq!(agg.day_count, 2);
        // 2*90 + 36 + 138 + 90
        assert!((agg.nutrients.get("Energy") - 444.0).abs() < 1e-9);
        assert!((agg.average_nutrients().get("Energy") - 222.0).abs() < 1e-9);
        assert!((agg.food_guide.grains - 3.0).abs() < 1e-9);
        assert!((agg.average_food_guide().grains - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_propagates_unknown_food() {
        let meals = vec![meal(
            1,
            day(2025, 7, 18),
            8,
            MealType::Breakfast,
            vec![FoodItem::new("Tofu", 1.0, "100g")],
        )];
        let err = aggregate(&meals, &catalog()).unwrap_err();
        assert_eq!(err, AnalysisError::Source(SourceError::UnknownFood("Tofu".to_string())));
    }

    #[test]
    fn test_resolve_units_blanks_unknown_nutrients() {
        let nutrition = Nutrition::zero().with("Energy", 1.0).with("Fibre", 1.0);
        let units = resolve_units(&catalog(), &nutrition);
        assert_eq!(units["Energy"], "kCal");
        assert_eq!(units["Fibre"], "");
    }

    #[test]
    fn test_alignment_percent_of_target() {
        let average = FoodGuideServings::new(4.0, 7.0, 1.0, 3.0, 0.0);
        let recommended = FoodGuideServings::new(8.0, 7.0, 2.0, 0.0, 3.0);

        let alignment = FoodGuideAlignment::new(&average, &recommended, 5);
        assert_eq!(alignment.rows.len(), 5);
        assert_eq!(alignment.row(FoodGroup::VegetablesAndFruits).unwrap().percent_of_target, Some(50.0));
        assert_eq!(alignment.row(FoodGroup::Grains).unwrap().percent_of_target, Some(100.0));
        assert_eq!(alignment.row(FoodGroup::Meat).unwrap().percent_of_target, None);
        assert_eq!(alignment.row(FoodGroup::OilsAndFats).unwrap().percent_of_target, Some(0.0));
    }
}
