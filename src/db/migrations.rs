//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!(version = 1, "applied schema migration");
    }

    Ok(())
}

/// Highest applied migration, 0 for a fresh database
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- USERS
        -- Profile data driving food guide targets
        -- ============================================
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            sex TEXT NOT NULL CHECK(sex IN ('female', 'male')),
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- NUTRIENTS
        -- Display unit for each tracked nutrient
        -- ============================================
        CREATE TABLE nutrients (
            name TEXT PRIMARY KEY,
            unit TEXT NOT NULL
        );

        -- ============================================
        -- FOODS
        -- Values are per reference unit (e.g. one "5g" pack)
        -- ============================================
        CREATE TABLE foods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            reference_unit TEXT NOT NULL,

            vegetables_and_fruits REAL NOT NULL DEFAULT 0,
            grains REAL NOT NULL DEFAULT 0,
            milk REAL NOT NULL DEFAULT 0,
            meat REAL NOT NULL DEFAULT 0,
            oils_and_fats REAL NOT NULL DEFAULT 0,

            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE food_nutrients (
            food_id INTEGER NOT NULL REFERENCES foods(id) ON DELETE CASCADE,
            nutrient TEXT NOT NULL,
            amount REAL NOT NULL,
            PRIMARY KEY (food_id, nutrient)
        );

        -- ============================================
        -- MEALS
        -- ============================================
        CREATE TABLE meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            logged_at TEXT NOT NULL,             -- "2025-07-18T08:30:00"
            meal_type TEXT NOT NULL CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'snack')),
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meals_user_logged ON meals(user_id, logged_at);

        CREATE TABLE meal_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            meal_id INTEGER NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            food_name TEXT NOT NULL,
            quantity REAL NOT NULL,              -- count of reference units
            unit TEXT NOT NULL
        );

        CREATE INDEX idx_meal_items_meal ON meal_items(meal_id, position);
        "#,
    )?;

    Ok(())
}
