//! Shared nutrition data structure
//!
//! Nutrient name to amount map used for foods, meals and window totals.
//! Units are resolved separately through the food catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Nutrient amounts keyed by nutrient name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nutrition(BTreeMap<String, f64>);

impl Nutrition {
    /// Create an empty Nutrition (every nutrient reads as zero)
    pub fn zero() -> Self {
        Self::default()
    }

    /// Amount of a nutrient, zero when absent
    pub fn get(&self, nutrient: &str) -> f64 {
        self.0.get(nutrient).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, nutrient: impl Into<String>, amount: f64) {
        self.0.insert(nutrient.into(), amount);
    }

    pub fn with(mut self, nutrient: impl Into<String>, amount: f64) -> Self {
        self.set(nutrient, amount);
        self
    }

    pub fn nutrients(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scale every nutrient value by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v * multiplier))
                .collect(),
        )
    }

    /// Add another nutrition to this one, summing per nutrient
    pub fn add(&self, other: &Nutrition) -> Self {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }

    /// Merge another nutrition into this one in place
    pub fn merge(&mut self, other: &Nutrition) {
        for (nutrient, amount) in &other.0 {
            *self.0.entry(nutrient.clone()).or_insert(0.0) += amount;
        }
    }

    /// True when both maps carry the same nutrients within `epsilon`
    pub fn approx_eq(&self, other: &Nutrition, epsilon: f64) -> bool {
        self.0
            .keys()
            .chain(other.0.keys())
            .all(|k| (self.get(k) - other.get(k)).abs() <= epsilon)
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(mut self, other: Nutrition) -> Nutrition {
        self.merge(&other);
        self
    }
}

impl std::ops::AddAssign<&Nutrition> for Nutrition {
    fn add_assign(&mut self, other: &Nutrition) {
        self.merge(other);
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::ops::Div<f64> for &Nutrition {
    type Output = Nutrition;

    fn div(self, divisor: f64) -> Nutrition {
        self.scale(1.0 / divisor)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Nutrition {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
