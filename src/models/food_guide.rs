//! Food guide servings
//!
//! Serving counts across the five Canada's Food Guide groups.

use serde::{Deserialize, Serialize};

/// One of the five fixed food guide groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodGroup {
    VegetablesAndFruits,
    Grains,
    Milk,
    Meat,
    OilsAndFats,
}

impl FoodGroup {
    pub const ALL: [FoodGroup; 5] = [
        FoodGroup::VegetablesAndFruits,
        FoodGroup::Grains,
        FoodGroup::Milk,
        FoodGroup::Meat,
        FoodGroup::OilsAndFats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodGroup::VegetablesAndFruits => "vegetables_and_fruits",
            FoodGroup::Grains => "grains",
            FoodGroup::Milk => "milk",
            FoodGroup::Meat => "meat",
            FoodGroup::OilsAndFats => "oils_and_fats",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            FoodGroup::VegetablesAndFruits => "Vegetables & Fruits",
            FoodGroup::Grains => "Grain Products",
            FoodGroup::Milk => "Milk & Alternatives",
            FoodGroup::Meat => "Meat & Alternatives",
            FoodGroup::OilsAndFats => "Oils & Fats",
        }
    }
}

/// Servings per food guide group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodGuideServings {
    pub vegetables_and_fruits: f64,
    pub grains: f64,
    pub milk: f64,
    pub meat: f64,
    pub oils_and_fats: f64,
}

impl FoodGuideServings {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn new(
        vegetables_and_fruits: f64,
        grains: f64,
        milk: f64,
        meat: f64,
        oils_and_fats: f64,
    ) -> Self {
        Self {
            vegetables_and_fruits,
            grains,
            milk,
            meat,
            oils_and_fats,
        }
    }

    pub fn get(&self, group: FoodGroup) -> f64 {
        match group {
            FoodGroup::VegetablesAndFruits => self.vegetables_and_fruits,
            FoodGroup::Grains => self.grains,
            FoodGroup::Milk => self.milk,
            FoodGroup::Meat => self.meat,
            FoodGroup::OilsAndFats => self.oils_and_fats,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FoodGroup, f64)> + '_ {
        FoodGroup::ALL.into_iter().map(move |g| (g, self.get(g)))
    }

    /// Scale every group by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            vegetables_and_fruits: self.vegetables_and_fruits * multiplier,
            grains: self.grains * multiplier,
            milk: self.milk * multiplier,
            meat: self.meat * multiplier,
            oils_and_fats: self.oils_and_fats * multiplier,
        }
    }

    /// Add another set of servings to this one
    pub fn add(&self, other: &FoodGuideServings) -> Self {
        Self {
            vegetables_and_fruits: self.vegetables_and_fruits + other.vegetables_and_fruits,
            grains: self.grains + other.grains,
            milk: self.milk + other.milk,
            meat: self.meat + other.meat,
            oils_and_fats: self.oils_and_fats + other.oils_and_fats,
        }
    }
}

impl std::ops::Add for FoodGuideServings {
    type Output = FoodGuideServings;

    fn add(self, other: FoodGuideServings) -> FoodGuideServings {
        FoodGuideServings::add(&self, &other)
    }
}

impl std::ops::AddAssign for FoodGuideServings {
    fn add_assign(&mut self, other: FoodGuideServings) {
        *self = FoodGuideServings::add(self, &other);
    }
}

impl std::ops::Mul<f64> for FoodGuideServings {
    type Output = FoodGuideServings;

    fn mul(self, multiplier: f64) -> FoodGuideServings {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for FoodGuideServings {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(FoodGuideServings::zero(), |acc, s| acc + s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_scale() {
        let a = FoodGuideServings::new(1.0, 2.0, 0.5, 0.0, 1.0);
        let b = FoodGuideServings::new(0.5, 0.0, 0.5, 1.0, 0.0);

        let sum = a + b;
        assert_eq!(sum, FoodGuideServings::new(1.5, 2.0, 1.0, 1.0, 1.0));
        assert_eq!(sum.scale(2.0).grains, 4.0);
    }

    #[test]
    fn test_iter_visits_every_group_in_order() {
        let s = FoodGuideServings::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let values: Vec<f64> = s.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.get(FoodGroup::Meat), 4.0);
    }
}
