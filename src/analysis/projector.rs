//! Analysis projections
//!
//! Read-only views over a cached [`SwapAnalysis`]: cumulative totals, daily
//! averages or per-meal deltas, in nutrient or food guide space. Nothing is
//! recomputed from meals here.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{FoodGroup, FoodGuideServings, MealId, MealType, Nutrition};
use super::error::{AnalysisError, AnalysisResult};
use super::swap::{ChangedMeal, SwapAnalysis};

/// Deltas smaller than this are floating-point carry, not change
pub const DEFAULT_DELTA_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Cumulative,
    Average,
    PerMeal,
}

impl ViewKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cumulative" | "total" => Some(ViewKind::Cumulative),
            "average" | "daily" => Some(ViewKind::Average),
            "per_meal" | "per-meal" | "meal" => Some(ViewKind::PerMeal),
            _ => None,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewKind::Cumulative => "cumulative",
            ViewKind::Average => "average",
            ViewKind::PerMeal => "per-meal",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Nutrient,
    FoodGuide,
}

impl ChartKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nutrient" | "nutrients" => Some(ChartKind::Nutrient),
            "food_guide" | "food-guide" | "cfg" => Some(ChartKind::FoodGuide),
            _ => None,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Nutrient => "nutrient",
            ChartKind::FoodGuide => "food guide",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientRow {
    pub nutrient: String,
    pub unit: String,
    pub original: f64,
    pub modified: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodGroupRow {
    pub group: FoodGroup,
    pub label: &'static str,
    pub original: f64,
    pub modified: f64,
}

/// Relative change of a nutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PercentChange {
    Defined(f64),
    /// The original amount was zero
    Undefined,
}

impl PercentChange {
    pub fn between(original: f64, modified: f64) -> Self {
        if original == 0.0 {
            PercentChange::Undefined
        } else {
            PercentChange::Defined((modified - original) / original * 100.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientDelta {
    pub nutrient: String,
    pub unit: String,
    pub original: f64,
    pub modified: f64,
    pub delta: f64,
    pub percent_change: PercentChange,
}

/// Series key of one meal: ordered by day, then meal type, then identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MealSeriesKey {
    pub day: NaiveDate,
    pub meal_type: MealType,
    pub meal_id: MealId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealDelta {
    pub key: MealSeriesKey,
    pub changes: Vec<NutrientDelta>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "projection", content = "rows", rename_all = "snake_case")]
pub enum Projection {
    Nutrients(Vec<NutrientRow>),
    FoodGuide(Vec<FoodGroupRow>),
    PerMeal(Vec<MealDelta>),
}

/// Maps cached analyses onto display views
#[derive(Debug, Clone, Copy)]
pub struct AnalysisProjector {
    epsilon: f64,
}

impl Default for AnalysisProjector {
    fn default() -> Self {
        Self::new(DEFAULT_DELTA_EPSILON)
    }
}

impl AnalysisProjector {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn project(
        &self,
        analysis: &SwapAnalysis,
        view: ViewKind,
        chart: ChartKind,
    ) -> AnalysisResult<Projection> {
        match (view, chart) {
            (ViewKind::Cumulative, ChartKind::Nutrient) => Ok(Projection::Nutrients(
                nutrient_rows(analysis, &analysis.original_totals, &analysis.modified_totals),
            )),
            (ViewKind::Average, ChartKind::Nutrient) => Ok(Projection::Nutrients(
                nutrient_rows(analysis, &analysis.original_averages, &analysis.modified_averages),
            )),
            (ViewKind::Cumulative, ChartKind::FoodGuide) => Ok(Projection::FoodGuide(
                food_group_rows(&analysis.food_guide_original, &analysis.food_guide_modified),
            )),
            (ViewKind::Average, ChartKind::FoodGuide) => Ok(Projection::FoodGuide(food_group_rows(
                &analysis.food_guide_original_average,
                &analysis.food_guide_modified_average,
            ))),
            (ViewKind::PerMeal, ChartKind::Nutrient) => Ok(Projection::PerMeal(
                analysis
                    .changed_meals
                    .iter()
                    .map(|meal| self.meal_delta(analysis, meal))
                    .collect(),
            )),
            (ViewKind::PerMeal, ChartKind::FoodGuide) => {
                Err(AnalysisError::UnsupportedProjection { view, chart })
            }
        }
    }

    fn meal_delta(&self, analysis: &SwapAnalysis, meal: &ChangedMeal) -> MealDelta {
        let original = &meal.original_nutrition;
        let modified = &meal.modified_nutrition;

        let changes = original
            .add(modified)
            .nutrients()
            .filter_map(|nutrient| {
                let before = original.get(nutrient);
                let after = modified.get(nutrient);
                let delta = after - before;
                (delta.abs() >= self.epsilon).then(|| NutrientDelta {
                    nutrient: nutrient.to_string(),
                    unit: analysis.unit_for(nutrient).to_string(),
                    original: before,
                    modified: after,
                    delta,
                    percent_change: PercentChange::between(before, after),
                })
            })
            .collect();

        MealDelta {
            key: MealSeriesKey {
                day: meal.day,
                meal_type: meal.meal_type,
                meal_id: meal.meal_id,
            },
            changes,
        }
    }
}

fn nutrient_rows(analysis: &SwapAnalysis, original: &Nutrition, modified: &Nutrition) -> Vec<NutrientRow> {
    original
        .add(modified)
        .nutrients()
        .map(|nutrient| NutrientRow {
            nutrient: nutrient.to_string(),
            unit: analysis.unit_for(nutrient).to_string(),
            original: original.get(nutrient),
            modified: modified.get(nutrient),
        })
        .collect()
}

fn food_group_rows(original: &FoodGuideServings, modified: &FoodGuideServings) -> Vec<FoodGroupRow> {
    FoodGroup::ALL
        .into_iter()
        .map(|group| FoodGroupRow {
            group,
            label: group.label(),
            original: original.get(group),
            modified: modified.get(group),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::memory::fixtures::*;
    use crate::analysis::swap::{SwapRequest, SwapSimulator};
    use crate::models::Meal;

    fn analysis() -> SwapAnalysis {
        let meals: Vec<Meal> = vec![
            meal(1, day(2025, 7, 18), 8, MealType::Breakfast, vec![bread(1.0), butter(1.0)]),
            meal(2, day(2025, 7, 19), 8, MealType::Breakfast, vec![bread(1.0)]),
            meal(3, day(2025, 7, 20), 19, MealType::Dinner, vec![butter(2.0)]),
        ];
        SwapSimulator::new(&catalog())
            .simulate(&meals, &SwapRequest {
                item_to_swap: "Butter".to_string(),
                replacement: beef(1.0),
                reference_swap_quantity: 1.0,
                reference_replacement_quantity: 1.0,
            })
            .unwrap()
    }

    #[test]
    fn test_cumulative_and_average_nutrients() {
        let analysis = analysis();
        let projector = AnalysisProjector::default();

        let Projection::Nutrients(total_rows) = projector
            .project(&analysis, ViewKind::Cumulative, ChartKind::Nutrient)
            .unwrap()
        else {
            panic!("expected nutrient rows");
        };
        let energy = total_rows.iter().find(|r| r.nutrient == "Energy").unwrap();
        // original: 90 + 36 + 90 + 72, modified: 90 + 138 + 90 + 276
        assert!((energy.original - 288.0).abs() < 1e-9);
        assert!((energy.modified - 594.0).abs() < 1e-9);
        assert_eq!(energy.unit, "kCal");

        let Projection::Nutrients(average_rows) = projector
            .project(&analysis, ViewKind::Average, ChartKind::Nutrient)
            .unwrap()
        else {
            panic!("expected nutrient rows");
        };
        let energy = average_rows.iter().find(|r| r.nutrient == "Energy").unwrap();
        assert!((energy.modified - 198.0).abs() < 1e-9);
    }

    #[test]
    fn test_food_guide_rows_cover_every_group() {
        let analysis = analysis();
        let projection = AnalysisProjector::default()
            .project(&analysis, ViewKind::Cumulative, ChartKind::FoodGuide)
            .unwrap();

        let Projection::FoodGuide(rows) = projection else {
            panic!("expected food guide rows");
        };
        assert_eq!(rows.len(), 5);
        let meat = rows.iter().find(|r| r.group == FoodGroup::Meat).unwrap();
        assert_eq!(meat.original, 0.0);
        assert!((meat.modified - 2.25).abs() < 1e-9);
    }

    #[test]
    fn test_per_meal_food_guide_is_unsupported() {
        let result = AnalysisProjector::default().project(&analysis(), ViewKind::PerMeal, ChartKind::FoodGuide);
        assert_eq!(
            result,
            Err(AnalysisError::UnsupportedProjection {
                view: ViewKind::PerMeal,
                chart: ChartKind::FoodGuide,
            })
        );
    }

    #[test]
    fn test_per_meal_deltas() {
        let analysis = analysis();
        let Projection::PerMeal(meals) = AnalysisProjector::default()
            .project(&analysis, ViewKind::PerMeal, ChartKind::Nutrient)
            .unwrap()
        else {
            panic!("expected per-meal deltas");
        };

        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].key.meal_id, 1);
        assert_eq!(meals[1].key.meal_type, MealType::Dinner);

        let dinner_energy = meals[1].changes.iter().find(|c| c.nutrient == "Energy").unwrap();
        assert!((dinner_energy.delta - 204.0).abs() < 1e-9);
        match dinner_energy.percent_change {
            PercentChange::Defined(p) => assert!((p - 283.333_333).abs() < 1e-3),
            PercentChange::Undefined => panic!("original energy was not zero"),
        }

        // bread fibre is unchanged, so it is filtered out
        assert!(meals[0].changes.iter().all(|c| c.nutrient != "Fibre"));
    }

    #[test]
    fn test_small_deltas_are_filtered() {
        let analysis = analysis();
        let Projection::PerMeal(meals) = AnalysisProjector::new(1000.0)
            .project(&analysis, ViewKind::PerMeal, ChartKind::Nutrient)
            .unwrap()
        else {
            panic!("expected per-meal deltas");
        };
        assert!(meals.iter().all(|m| m.changes.is_empty()));
    }

    #[test]
    fn test_percent_change_undefined_from_zero() {
        assert_eq!(PercentChange::between(0.0, 5.0), PercentChange::Undefined);
        assert_eq!(PercentChange::between(4.0, 5.0), PercentChange::Defined(25.0));
    }

    #[test]
    fn test_series_keys_order_by_day_then_type() {
        let a = MealSeriesKey { day: day(2025, 7, 18), meal_type: MealType::Dinner, meal_id: 9 };
        let b = MealSeriesKey { day: day(2025, 7, 19), meal_type: MealType::Breakfast, meal_id: 1 };
        let c = MealSeriesKey { day: day(2025, 7, 19), meal_type: MealType::Lunch, meal_id: 0 };
        assert!(a < b && b < c);
    }
}
