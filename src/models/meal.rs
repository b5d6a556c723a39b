//! Meal model
//!
//! A logged meal: when it was eaten, its type and its ordered food items.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::FoodItem;

/// Meal identity
pub type MealId = i64;

/// Storage format for `logged_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Meal type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

/// A logged meal
///
/// Meals are immutable values: a swapped meal is a new `Meal` sharing the
/// original's identity and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    id: MealId,
    user_id: i64,
    logged_at: NaiveDateTime,
    meal_type: MealType,
    items: Vec<FoodItem>,
}

/// Data for logging a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCreate {
    pub user_id: i64,
    pub logged_at: NaiveDateTime,
    pub meal_type: MealType,
    pub items: Vec<FoodItem>,
}

impl Meal {
    pub fn new(
        id: MealId,
        user_id: i64,
        logged_at: NaiveDateTime,
        meal_type: MealType,
        items: Vec<FoodItem>,
    ) -> Self {
        Self {
            id,
            user_id,
            logged_at,
            meal_type,
            items,
        }
    }

    pub fn id(&self) -> MealId {
        self.id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn logged_at(&self) -> NaiveDateTime {
        self.logged_at
    }

    /// Calendar day the meal was eaten on
    pub fn day(&self) -> NaiveDate {
        self.logged_at.date()
    }

    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn contains_ingredient(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.is_ingredient(name))
    }

    /// The meal with every `name` item replaced by `replacement`
    ///
    /// Returns `None` when the meal does not contain the ingredient.
    pub fn with_substitution(
        &self,
        name: &str,
        replacement: &FoodItem,
        swap_ratio: f64,
    ) -> Option<Meal> {
        if !self.contains_ingredient(name) {
            return None;
        }

        let items = self
            .items
            .iter()
            .map(|item| {
                if item.is_ingredient(name) {
                    item.substitute(replacement, swap_ratio)
                } else {
                    item.clone()
                }
            })
            .collect();

        Some(Meal { items, ..self.clone() })
    }

    fn from_row(row: &Row) -> rusqlite::Result<(MealId, i64, String, String)> {
        Ok((
            row.get("id")?,
            row.get("user_id")?,
            row.get("logged_at")?,
            row.get("meal_type")?,
        ))
    }

    fn hydrate(conn: &Connection, raw: (MealId, i64, String, String)) -> DbResult<Self> {
        let (id, user_id, logged_at, meal_type) = raw;

        let logged_at = NaiveDateTime::parse_from_str(&logged_at, TIMESTAMP_FORMAT)
            .map_err(|_| DbError::InvalidValue {
                column: "meals.logged_at",
                value: logged_at.clone(),
            })?;
        let meal_type = MealType::parse(&meal_type).ok_or_else(|| DbError::InvalidValue {
            column: "meals.meal_type",
            value: meal_type.clone(),
        })?;

        Ok(Self {
            id,
            user_id,
            logged_at,
            meal_type,
            items: Self::load_items(conn, id)?,
        })
    }

    fn load_items(conn: &Connection, meal_id: MealId) -> DbResult<Vec<FoodItem>> {
        let mut stmt = conn.prepare(
            "SELECT food_name, quantity, unit FROM meal_items WHERE meal_id = ?1 ORDER BY position",
        )?;

        let items = stmt
            .query_map([meal_id], |row| {
                Ok(FoodItem {
                    name: row.get(0)?,
                    quantity: row.get(1)?,
                    unit: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Log a new meal with its items
    pub fn log(conn: &Connection, data: &MealCreate) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO meals (user_id, logged_at, meal_type) VALUES (?1, ?2, ?3)",
            params![
                data.user_id,
                data.logged_at.format(TIMESTAMP_FORMAT).to_string(),
                data.meal_type.as_str(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        for (position, item) in data.items.iter().enumerate() {
            conn.execute(
                r#"
                INSERT INTO meal_items (meal_id, position, food_name, quantity, unit)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![id, position as i64, item.name, item.quantity, item.unit],
            )?;
        }

        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a meal by ID
    pub fn get_by_id(conn: &Connection, id: MealId) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meals WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(raw) => Ok(Some(Self::hydrate(conn, raw)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Meals of a user eaten between `start` and `end`, both days inclusive
    pub fn list_in_range(
        conn: &Connection,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM meals
            WHERE user_id = ?1 AND substr(logged_at, 1, 10) BETWEEN ?2 AND ?3
            ORDER BY logged_at, id
            "#,
        )?;

        let raws = stmt
            .query_map(
                params![
                    user_id,
                    start.format("%Y-%m-%d").to_string(),
                    end.format("%Y-%m-%d").to_string(),
                ],
                Self::from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        raws.into_iter().map(|raw| Self::hydrate(conn, raw)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{Sex, UserProfile};

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{}T{}", date, time), TIMESTAMP_FORMAT).unwrap()
    }

    fn setup() -> (Connection, i64) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let user = UserProfile::create(&conn, "Tester", 34, Sex::Female).unwrap();
        (conn, user.id)
    }

    #[test]
    fn test_day_ignores_time_of_day() {
        let breakfast = Meal::new(1, 1, at("2025-07-18", "07:00:00"), MealType::Breakfast, vec![]);
        let dinner = Meal::new(2, 1, at("2025-07-18", "23:59:59"), MealType::Dinner, vec![]);
        assert_eq!(breakfast.day(), dinner.day());
    }

    #[test]
    fn test_with_substitution_replaces_every_match() {
        let meal = Meal::new(
            7,
            1,
            at("2025-07-18", "12:00:00"),
            MealType::Lunch,
            vec![
                FoodItem::new("Butter", 2.0, "5g"),
                FoodItem::new("Bread", 1.0, "35g"),
                FoodItem::new("Butter", 1.0, "5g"),
            ],
        );
        let beef = FoodItem::new("Beef", 1.0, "55g");

        let swapped = meal.with_substitution("Butter", &beef, 3.0).unwrap();
        assert_eq!(swapped.id(), 7);
        assert_eq!(swapped.items()[0], FoodItem::new("Beef", 6.0, "55g"));
        assert_eq!(swapped.items()[1], FoodItem::new("Bread", 1.0, "35g"));
        assert_eq!(swapped.items()[2], FoodItem::new("Beef", 3.0, "55g"));
        // original untouched
        assert_eq!(meal.items()[0].name, "Butter");
    }

    #[test]
    fn test_with_substitution_absent_ingredient() {
        let meal = Meal::new(1, 1, at("2025-07-18", "12:00:00"), MealType::Lunch, vec![
            FoodItem::new("Bread", 1.0, "35g"),
        ]);
        assert!(meal.with_substitution("Butter", &FoodItem::new("Beef", 1.0, "55g"), 1.0).is_none());
    }

    #[test]
    fn test_log_and_list_in_range_is_inclusive() {
        let (conn, user_id) = setup();

        for (date, meal_type) in [
            ("2025-07-14", MealType::Lunch),
            ("2025-07-15", MealType::Breakfast),
            ("2025-07-22", MealType::Dinner),
            ("2025-07-23", MealType::Snack),
        ] {
            Meal::log(&conn, &MealCreate {
                user_id,
                logged_at: at(date, "23:30:00"),
                meal_type,
                items: vec![FoodItem::new("Butter", 20.0, "5g")],
            })
            .unwrap();
        }

        let start = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();
        let meals = Meal::list_in_range(&conn, user_id, start, end).unwrap();

        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].meal_type(), MealType::Breakfast);
        assert_eq!(meals[1].day(), end);
        assert_eq!(meals[1].items(), &[FoodItem::new("Butter", 20.0, "5g")]);
    }

    #[test]
    fn test_list_in_range_filters_by_user() {
        let (conn, user_id) = setup();
        let other = UserProfile::create(&conn, "Other", 40, Sex::Male).unwrap();

        Meal::log(&conn, &MealCreate {
            user_id: other.id,
            logged_at: at("2025-07-18", "12:00:00"),
            meal_type: MealType::Lunch,
            items: vec![],
        })
        .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 7, 18).unwrap();
        assert!(Meal::list_in_range(&conn, user_id, day, day).unwrap().is_empty());
    }
}
