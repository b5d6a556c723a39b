//! SQLite-backed data sources
//!
//! Adapts the pooled database to the engine's [`MealLog`] and
//! [`FoodCatalog`] traits.

use chrono::NaiveDate;

use crate::analysis::{FoodCatalog, MealLog, SourceError};
use crate::models::{Food, Meal, NutrientUnit};
use super::connection::{Database, DbError};

impl From<DbError> for SourceError {
    fn from(e: DbError) -> Self {
        SourceError::Storage(e.to_string())
    }
}

/// Meal log stored in the `meals` / `meal_items` tables
#[derive(Clone)]
pub struct SqliteMealLog {
    db: Database,
}

impl SqliteMealLog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl MealLog for SqliteMealLog {
    fn fetch_meals(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Meal>, SourceError> {
        let meals = self
            .db
            .with_conn(|conn| Meal::list_in_range(conn, user_id, start, end))?;
        Ok(meals)
    }
}

/// Food catalog stored in the `foods` / `nutrients` tables
#[derive(Clone)]
pub struct SqliteFoodCatalog {
    db: Database,
}

impl SqliteFoodCatalog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl FoodCatalog for SqliteFoodCatalog {
    fn food(&self, name: &str) -> Result<Food, SourceError> {
        self.db
            .with_conn(|conn| Food::get_by_name(conn, name))?
            .ok_or_else(|| SourceError::UnknownFood(name.to_string()))
    }

    fn nutrient_unit(&self, nutrient: &str) -> Result<String, SourceError> {
        self.db
            .with_conn(|conn| NutrientUnit::get(conn, nutrient))?
            .ok_or_else(|| SourceError::UnknownNutrient(nutrient.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::db::migrations::run_migrations;
    use crate::models::{FoodCreate, FoodGuideServings, FoodItem, MealCreate, MealType, Nutrition, Sex, UserProfile};

    fn setup() -> (Database, i64) {
        let db = Database::in_memory().unwrap();
        let user_id = db
            .with_conn(|conn| {
                run_migrations(conn)?;
                NutrientUnit::set(conn, "Energy", "kCal")?;
                Food::create(
                    conn,
                    &FoodCreate {
                        name: "Butter".to_string(),
                        reference_unit: "5g".to_string(),
                        nutrients: Nutrition::zero().with("Energy", 36.0).with("Fat", 4.0),
                        servings: FoodGuideServings::new(0.0, 0.0, 0.0, 0.0, 0.25),
                    },
                )?;
                Ok(UserProfile::create(conn, "Sam", 40, Sex::Female)?.id)
            })
            .unwrap();
        (db, user_id)
    }

    fn log_meal(db: &Database, user_id: i64, logged_at: &str) {
        db.with_conn(|conn| {
            Meal::log(
                conn,
                &MealCreate {
                    user_id,
                    logged_at: NaiveDateTime::parse_from_str(logged_at, "%Y-%m-%dT%H:%M:%S").unwrap(),
                    meal_type: MealType::Lunch,
                    items: vec![FoodItem::new("Butter", 2.0, "5g")],
                },
            )
        })
        .unwrap();
    }

    #[test]
    fn test_meal_log_reads_inclusive_range() {
        let (db, user_id) = setup();
        log_meal(&db, user_id, "2025-07-15T23:59:00");
        log_meal(&db, user_id, "2025-07-23T00:01:00");

        let log = SqliteMealLog::new(db);
        let start = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();

        let meals = log.fetch_meals(user_id, start, end).unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].items(), &[FoodItem::new("Butter", 2.0, "5g")]);
    }

    #[test]
    fn test_catalog_lookups() {
        let (db, _) = setup();
        let catalog = SqliteFoodCatalog::new(db);

        assert_eq!(catalog.food("Butter").unwrap().reference_unit, "5g");
        assert_eq!(catalog.nutrient_unit("Energy").unwrap(), "kCal");
        assert_eq!(
            catalog.food("Ghee"),
            Err(SourceError::UnknownFood("Ghee".to_string()))
        );
        assert_eq!(
            catalog.nutrient_unit("Fat"),
            Err(SourceError::UnknownNutrient("Fat".to_string()))
        );
    }

    #[test]
    fn test_storage_failure_maps_to_source_error() {
        // no migrations: the tables are missing
        let catalog = SqliteFoodCatalog::new(Database::in_memory().unwrap());
        assert!(matches!(catalog.food("Butter"), Err(SourceError::Storage(_))));
    }
}
