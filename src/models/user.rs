//! User profile model
//!
//! The person whose meals are analysed.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::nutrition::recommended_daily_servings;
use super::FoodGuideServings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "female" | "f" => Some(Sex::Female),
            "male" | "m" => Some(Sex::Male),
            _ => None,
        }
    }
}

/// A user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub sex: Sex,
}

impl UserProfile {
    /// Food guide servings this user should eat per day
    pub fn recommended_daily_servings(&self) -> FoodGuideServings {
        recommended_daily_servings(self.age, self.sex)
    }

    fn from_row(row: &Row) -> rusqlite::Result<(i64, String, u32, String)> {
        Ok((row.get("id")?, row.get("name")?, row.get("age")?, row.get("sex")?))
    }

    /// Create a new user
    pub fn create(conn: &Connection, name: &str, age: u32, sex: Sex) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO users (name, age, sex) VALUES (?1, ?2, ?3)",
            params![name, age, sex.as_str()],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a user by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok((id, name, age, sex)) => {
                let sex = Sex::parse(&sex).ok_or(DbError::InvalidValue {
                    column: "users.sex",
                    value: sex,
                })?;
                Ok(Some(Self { id, name, age, sex }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
