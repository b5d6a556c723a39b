//! Food model
//!
//! Catalog entry for a food: nutrient amounts and food guide servings per
//! reference unit, plus the nutrient unit table.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::{FoodGuideServings, Nutrition};

/// A catalog food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    /// Reference unit label, e.g. "5g"
    pub reference_unit: String,
    /// Nutrients in one reference unit
    pub nutrients: Nutrition,
    /// Food guide servings in one reference unit
    pub servings: FoodGuideServings,
}

/// Data for adding a food to the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCreate {
    pub name: String,
    pub reference_unit: String,
    pub nutrients: Nutrition,
    #[serde(default)]
    pub servings: FoodGuideServings,
}

impl Food {
    /// Nutrients in `quantity` reference units
    pub fn nutrition_for(&self, quantity: f64) -> Nutrition {
        self.nutrients.scale(quantity)
    }

    /// Food guide servings in `quantity` reference units
    pub fn servings_for(&self, quantity: f64) -> FoodGuideServings {
        self.servings.scale(quantity)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            reference_unit: row.get("reference_unit")?,
            nutrients: Nutrition::zero(),
            servings: FoodGuideServings {
                vegetables_and_fruits: row.get("vegetables_and_fruits")?,
                grains: row.get("grains")?,
                milk: row.get("milk")?,
                meat: row.get("meat")?,
                oils_and_fats: row.get("oils_and_fats")?,
            },
        })
    }

    fn load_nutrients(conn: &Connection, food_id: i64) -> DbResult<Nutrition> {
        let mut stmt =
            conn.prepare("SELECT nutrient, amount FROM food_nutrients WHERE food_id = ?1")?;

        let nutrients = stmt
            .query_map([food_id], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
            .collect::<Result<Nutrition, _>>()?;

        Ok(nutrients)
    }

    /// Insert a new food into the catalog
    pub fn create(conn: &Connection, data: &FoodCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO foods (
                name, reference_unit,
                vegetables_and_fruits, grains, milk, meat, oils_and_fats
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                data.name,
                data.reference_unit,
                data.servings.vegetables_and_fruits,
                data.servings.grains,
                data.servings.milk,
                data.servings.meat,
                data.servings.oils_and_fats,
            ],
        )?;

        let id = conn.last_insert_rowid();
        for (nutrient, amount) in data.nutrients.iter() {
            conn.execute(
                "INSERT INTO food_nutrients (food_id, nutrient, amount) VALUES (?1, ?2, ?3)",
                params![id, nutrient, amount],
            )?;
        }

        Self::get_by_name(conn, &data.name)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a food by its exact name
    pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM foods WHERE name = ?1")?;

        let result = stmt.query_row([name], Self::from_row);
        match result {
            Ok(mut food) => {
                food.nutrients = Self::load_nutrients(conn, food.id)?;
                Ok(Some(food))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Count foods in the catalog
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM foods", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Nutrient unit table
pub struct NutrientUnit;

impl NutrientUnit {
    /// Set or update the display unit of a nutrient (upsert)
    pub fn set(conn: &Connection, nutrient: &str, unit: &str) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO nutrients (name, unit) VALUES (?1, ?2)
            ON CONFLICT(name) DO UPDATE SET unit = excluded.unit
            "#,
            params![nutrient, unit],
        )?;
        Ok(())
    }

    pub fn get(conn: &Connection, nutrient: &str) -> DbResult<Option<String>> {
        let unit = conn
            .query_row(
                "SELECT unit FROM nutrients WHERE name = ?1",
                [nutrient],
                |row| row.get(0),
            )
            .optional()?;
        Ok(unit)
    }
}
