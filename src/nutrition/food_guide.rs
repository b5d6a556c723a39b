//! Canada's Food Guide recommendations
//!
//! Recommended daily servings per food group by age and sex. Where the guide
//! gives a range the upper bound is used.

use crate::models::{FoodGuideServings, Sex};

/// Recommended oils & fats servings (tablespoons of unsaturated fat) for every age
pub const OILS_AND_FATS_SERVINGS: f64 = 3.0;

/// Recommended daily servings for a person of `age` years and `sex`
///
/// Ages below two use the toddler row.
pub fn recommended_daily_servings(age: u32, sex: Sex) -> FoodGuideServings {
    let (vegetables_and_fruits, grains, milk, meat) = match (age, sex) {
        (0..=3, _) => (4.0, 3.0, 2.0, 1.0),
        (4..=8, _) => (5.0, 4.0, 2.0, 1.0),
        (9..=13, _) => (6.0, 6.0, 4.0, 2.0),
        (14..=18, Sex::Female) => (7.0, 6.0, 4.0, 2.0),
        (14..=18, Sex::Male) => (8.0, 7.0, 4.0, 3.0),
        (19..=50, Sex::Female) => (8.0, 7.0, 2.0, 2.0),
        (19..=50, Sex::Male) => (10.0, 8.0, 2.0, 3.0),
        (_, Sex::Female) => (7.0, 6.0, 3.0, 2.0),
        (_, Sex::Male) => (7.0, 7.0, 3.0, 3.0),
    };

    FoodGuideServings {
        vegetables_and_fruits,
        grains,
        milk,
        meat,
        oils_and_fats: OILS_AND_FATS_SERVINGS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adult_rows_differ_by_sex() {
        let female = recommended_daily_servings(30, Sex::Female);
        let male = recommended_daily_servings(30, Sex::Male);
        assert_eq!(female.vegetables_and_fruits, 8.0);
        assert_eq!(male.vegetables_and_fruits, 10.0);
        assert_eq!(female.milk, male.milk);
    }

    #[test]
    fn test_age_boundaries() {
        assert_eq!(recommended_daily_servings(8, Sex::Male).grains, 4.0);
        assert_eq!(recommended_daily_servings(9, Sex::Male).grains, 6.0);
        assert_eq!(recommended_daily_servings(50, Sex::Female).milk, 2.0);
        assert_eq!(recommended_daily_servings(51, Sex::Female).milk, 3.0);
        assert_eq!(recommended_daily_servings(1, Sex::Female).meat, 1.0);
    }

    #[test]
    fn test_oils_constant_for_everyone() {
        for age in [2, 10, 16, 40, 80] {
            assert_eq!(
                recommended_daily_servings(age, Sex::Male).oils_and_fats,
                OILS_AND_FATS_SERVINGS
            );
        }
    }
}
