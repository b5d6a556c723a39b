//! Reference units
//!
//! Parses reference-unit labels such as `"5g"`, `"250 ml"` or `"1 each"` and
//! converts weight units to grams.

use serde::{Deserialize, Serialize};

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    /// Weight/mass units (g, oz, lb, kg)
    Weight,
    /// Volume units (ml, tbsp, cup, etc.)
    Volume,
    /// Count/discrete units (each, piece)
    Count,
    /// Anything needing food-specific conversion (slice, scoop, pack)
    Custom,
}

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

/// Conversion factor to grams for a weight unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    match unit.trim().to_lowercase().as_str() {
        "g" | "gram" | "grams" => Some(1.0),
        "mg" | "milligram" | "milligrams" => Some(G_PER_MG),
        "kg" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "oz" | "ounce" | "ounces" => Some(G_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => Some(G_PER_LB),
        _ => None,
    }
}

/// Conversion factor to milliliters for a volume unit
pub fn ml_per_unit(unit: &str) -> Option<f64> {
    match unit.trim().to_lowercase().as_str() {
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some(1.0),
        "l" | "liter" | "liters" | "litre" | "litres" => Some(ML_PER_LITER),
        "tsp" | "teaspoon" | "teaspoons" => Some(ML_PER_TSP),
        "tbsp" | "tablespoon" | "tablespoons" => Some(ML_PER_TBSP),
        "cup" | "cups" => Some(ML_PER_CUP),
        _ => None,
    }
}

/// Determine the category of a bare unit string
pub fn categorize_unit(unit: &str) -> UnitCategory {
    if grams_per_unit(unit).is_some() {
        return UnitCategory::Weight;
    }
    if ml_per_unit(unit).is_some() {
        return UnitCategory::Volume;
    }

    match unit.trim().to_lowercase().as_str() {
        "each" | "piece" | "pieces" | "item" | "items" | "count" | "unit" | "units" => {
            UnitCategory::Count
        }
        _ => UnitCategory::Custom,
    }
}

/// A parsed reference-unit label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceUnit {
    /// Leading amount, 1 when the label has none ("tbsp")
    pub amount: f64,
    /// Unit part of the label, lowercased
    pub base_unit: String,
    pub category: UnitCategory,
}

impl ReferenceUnit {
    /// Parse a label such as "5g", "55 g", "250ml" or "slice"
    ///
    /// Returns `None` for an empty label or a label with no unit part.
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(split);

        let base_unit = unit.trim().to_lowercase();
        if base_unit.is_empty() {
            return None;
        }

        let amount = if number.is_empty() {
            1.0
        } else {
            number.parse::<f64>().ok()?
        };

        let category = categorize_unit(&base_unit);
        Some(Self {
            amount,
            base_unit,
            category,
        })
    }

    /// Gram equivalent of one reference unit, for weight units only
    pub fn grams(&self) -> Option<f64> {
        grams_per_unit(&self.base_unit).map(|factor| self.amount * factor)
    }

    /// Milliliter equivalent of one reference unit, for volume units only
    pub fn milliliters(&self) -> Option<f64> {
        ml_per_unit(&self.base_unit).map(|factor| self.amount * factor)
    }
}

/// Gram equivalent of `quantity` reference units labelled `label`
pub fn grams_for(quantity: f64, label: &str) -> Option<f64> {
    ReferenceUnit::parse(label)
        .and_then(|unit| unit.grams())
        .map(|grams| grams * quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_units() {
        assert_eq!(categorize_unit("g"), UnitCategory::Weight);
        assert_eq!(categorize_unit("oz"), UnitCategory::Weight);
        assert_eq!(categorize_unit("tbsp"), UnitCategory::Volume);
        assert_eq!(categorize_unit("each"), UnitCategory::Count);
        assert_eq!(categorize_unit("slice"), UnitCategory::Custom);
    }

    #[test]
    fn test_parse_compact_weight_label() {
        let unit = ReferenceUnit::parse("55g").unwrap();
        assert_eq!(unit.amount, 55.0);
        assert_eq!(unit.base_unit, "g");
        assert_eq!(unit.category, UnitCategory::Weight);
        assert_eq!(unit.grams(), Some(55.0));
    }

    #[test]
    fn test_parse_spaced_and_bare_labels() {
        let volume = ReferenceUnit::parse("250 ml").unwrap();
        assert_eq!(volume.milliliters(), Some(250.0));
        assert_eq!(volume.grams(), None);

        let slice = ReferenceUnit::parse("slice").unwrap();
        assert_eq!(slice.amount, 1.0);
        assert_eq!(slice.category, UnitCategory::Custom);
    }

    #[test]
    fn test_parse_rejects_missing_unit() {
        assert!(ReferenceUnit::parse("").is_none());
        assert!(ReferenceUnit::parse("12").is_none());
        assert!(ReferenceUnit::parse("1.2.3g").is_none());
    }

    #[test]
    fn test_grams_for_quantity() {
        assert_eq!(grams_for(20.0, "5g"), Some(100.0));
        assert_eq!(grams_for(20.0, "55g"), Some(1100.0));
        assert_eq!(grams_for(2.0, "1 each"), None);
    }
}
