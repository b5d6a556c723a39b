//! Food Item model
//!
//! A food as logged inside a meal: a name plus a count of reference units.

use serde::{Deserialize, Serialize};

/// A logged food item
///
/// `quantity` counts reference units (two `"5g"` packs is `quantity: 2.0,
/// unit: "5g"`), the gram equivalent is resolved by the catalog. Items are
/// the same ingredient when their names match, regardless of quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    /// Whether this item is the ingredient called `name`
    pub fn is_ingredient(&self, name: &str) -> bool {
        self.name == name
    }

    /// The item that replaces this one when swapped for `replacement`
    ///
    /// Keeps this item's quantity scaled by `swap_ratio` and takes the
    /// replacement's name and unit.
    pub fn substitute(&self, replacement: &FoodItem, swap_ratio: f64) -> FoodItem {
        FoodItem {
            name: replacement.name.clone(),
            quantity: self.quantity * swap_ratio,
            unit: replacement.unit.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_ingredient_ignores_quantity() {
        let a = FoodItem::new("Butter", 20.0, "5g");
        assert!(a.is_ingredient("Butter"));
        assert!(!a.is_ingredient("butter"));
    }

    #[test]
    fn test_substitute_scales_quantity() {
        let butter = FoodItem::new("Butter", 4.0, "5g");
        let beef = FoodItem::new("Beef", 1.0, "55g");

        let swapped = butter.substitute(&beef, 0.5);
        assert_eq!(swapped, FoodItem::new("Beef", 2.0, "55g"));
    }
}
