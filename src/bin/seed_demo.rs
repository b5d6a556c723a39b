//! Utility to load the demo catalog and meals into the database

use mealswap::config::{self, Settings};
use mealswap::db::{migrations, seed_demo_data, Database};
use mealswap::models::Food;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::init_tracing()?;

    let settings = Settings::from_env()?;
    println!("Database path: {}", settings.database_path.display());
    if let Some(parent) = settings.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&settings.database_path)?;
    database.with_conn(|conn| {
        migrations::run_migrations(conn)?;
        Ok(())
    })?;

    database.with_transaction(|tx| {
        let foods = Food::count(tx)?;
        if foods > 0 {
            println!("Catalog already holds {} foods, nothing to do", foods);
            return Ok(());
        }

        let user = seed_demo_data(tx)?;
        println!("Demo data loaded:");
        println!("  User: {} (id {})", user.name, user.id);
        println!("  Try: mealswap --user {} swap Butter 20 5g Beef 20 55g --from 2025-07-15 --to 2025-07-22", user.id);
        Ok(())
    })?;

    Ok(())
}
