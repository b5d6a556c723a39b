//! Demo data set
//!
//! A small catalog and three logged meals around a Butter to Beef swap: two
//! meals fall inside 2025-07-15..2025-07-22, a third on 2025-07-23.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::models::{
    Food, FoodCreate, FoodGuideServings, FoodItem, Meal, MealCreate, MealType, NutrientUnit,
    Nutrition, Sex, UserProfile,
};
use super::connection::{DbError, DbResult};

const UNITS: &[(&str, &str)] = &[
    ("Energy", "kCal"),
    ("Protein", "g"),
    ("Fat", "g"),
    ("Carbohydrate", "g"),
    ("Calcium", "mg"),
];

fn foods() -> Vec<FoodCreate> {
    vec![
        FoodCreate {
            name: "Butter".to_string(),
            reference_unit: "5g".to_string(),
            nutrients: Nutrition::zero()
                .with("Energy", 36.0)
                .with("Protein", 0.04)
                .with("Fat", 4.05),
            servings: FoodGuideServings::new(0.0, 0.0, 0.0, 0.0, 1.0),
        },
        FoodCreate {
            name: "Beef".to_string(),
            reference_unit: "55g".to_string(),
            nutrients: Nutrition::zero()
                .with("Energy", 138.0)
                .with("Protein", 14.5)
                .with("Fat", 8.7),
            servings: FoodGuideServings::new(0.0, 0.0, 0.0, 0.75, 0.0),
        },
        FoodCreate {
            name: "Whole wheat bread".to_string(),
            reference_unit: "35g".to_string(),
            nutrients: Nutrition::zero()
                .with("Energy", 90.0)
                .with("Protein", 3.6)
                .with("Carbohydrate", 16.8),
            servings: FoodGuideServings::new(0.0, 1.0, 0.0, 0.0, 0.0),
        },
        FoodCreate {
            name: "Milk 2%".to_string(),
            reference_unit: "250ml".to_string(),
            nutrients: Nutrition::zero()
                .with("Energy", 129.0)
                .with("Protein", 8.7)
                .with("Fat", 5.0)
                .with("Carbohydrate", 12.4)
                .with("Calcium", 305.0),
            servings: FoodGuideServings::new(0.0, 0.0, 1.0, 0.0, 0.0),
        },
        FoodCreate {
            name: "Apple".to_string(),
            reference_unit: "1 each".to_string(),
            nutrients: Nutrition::zero()
                .with("Energy", 95.0)
                .with("Protein", 0.5)
                .with("Carbohydrate", 25.0),
            servings: FoodGuideServings::new(1.0, 0.0, 0.0, 0.0, 0.0),
        },
    ]
}

fn meals(user_id: i64) -> DbResult<Vec<MealCreate>> {
    let at = |date: (i32, u32, u32), hour: u32| {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .ok_or_else(|| DbError::InvalidValue {
                column: "meals.logged_at",
                value: format!("{:?} {}:00", date, hour),
            })
    };
    let butter = || FoodItem::new("Butter", 20.0, "5g");

    Ok(vec![
        MealCreate {
            user_id,
            logged_at: at((2025, 7, 18), 8)?,
            meal_type: MealType::Breakfast,
            items: vec![
                FoodItem::new("Whole wheat bread", 2.0, "35g"),
                butter(),
                FoodItem::new("Milk 2%", 1.0, "250ml"),
            ],
        },
        MealCreate {
            user_id,
            logged_at: at((2025, 7, 20), 18)?,
            meal_type: MealType::Dinner,
            items: vec![butter(), FoodItem::new("Apple", 1.0, "1 each")],
        },
        MealCreate {
            user_id,
            logged_at: at((2025, 7, 23), 12)?,
            meal_type: MealType::Lunch,
            items: vec![FoodItem::new("Whole wheat bread", 2.0, "35g"), butter()],
        },
    ])
}

/// Load the demo user, catalog and meals; returns the new user
pub fn seed_demo_data(conn: &Connection) -> DbResult<UserProfile> {
    for (nutrient, unit) in UNITS {
        NutrientUnit::set(conn, nutrient, unit)?;
    }
    for food in foods() {
        Food::create(conn, &food)?;
    }

    let user = UserProfile::create(conn, "Demo", 45, Sex::Male)?;
    for meal in meals(user.id)? {
        Meal::log(conn, &meal)?;
    }

    Ok(user)
}
