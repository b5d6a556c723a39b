//! Meal Swap CLI
//!
//! Prints intake, food guide and swap analyses for a logged user as JSON.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use mealswap::analysis::{AnalysisProjector, AnalysisSession, ChartKind, DateWindow, ViewKind};
use mealswap::build_info;
use mealswap::config::{self, Settings};
use mealswap::db::{migrations, Database, SqliteFoodCatalog, SqliteMealLog};
use mealswap::models::{FoodItem, UserProfile};

/// Meal Swap: nutrient intake and "what if I swapped this" analysis.
#[derive(Parser, Debug)]
#[command(name = "mealswap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// User whose meals are analysed.
    #[arg(short, long, default_value_t = 1, global = true)]
    user: i64,

    #[command(subcommand)]
    command: Command,
}

/// Date range; an omitted bound means all logged history on that side.
#[derive(Args, Debug, Clone, Copy, PartialEq)]
struct WindowArgs {
    /// First day included (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day included (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl WindowArgs {
    fn window(&self) -> DateWindow {
        DateWindow {
            start: self.from,
            end: self.to,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Nutrient totals and daily averages.
    Intake {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Average daily food guide servings against recommendations.
    Guide {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Simulate replacing one ingredient with another.
    Swap {
        /// Ingredient to replace.
        item: String,
        /// Representative quantity of the ingredient.
        quantity: f64,
        /// Reference unit of the ingredient, e.g. 5g.
        unit: String,
        /// Replacement food.
        replacement: String,
        /// Quantity of the replacement matching the representative quantity.
        replacement_quantity: f64,
        /// Reference unit of the replacement.
        replacement_unit: String,

        #[command(flatten)]
        window: WindowArgs,

        /// Project the analysis: cumulative, average or per-meal.
        #[arg(long, value_parser = parse_view)]
        view: Option<ViewKind>,

        /// Chart space for --view: nutrient or food-guide.
        #[arg(long, value_parser = parse_chart, requires = "view")]
        chart: Option<ChartKind>,
    },
}

fn parse_view(s: &str) -> Result<ViewKind, String> {
    ViewKind::parse(s).ok_or_else(|| format!("unknown view '{}'", s))
}

fn parse_chart(s: &str) -> Result<ChartKind, String> {
    ChartKind::parse(s).ok_or_else(|| format!("unknown chart '{}'", s))
}

fn run(cli: Cli, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %settings.database_path.display(), "opening database");
    let database = Database::new(&settings.database_path)?;

    let user = database.with_conn(|conn| {
        migrations::run_migrations(conn)?;
        UserProfile::get_by_id(conn, cli.user)
    })?;
    let user = user.ok_or_else(|| format!("no user with id {}", cli.user))?;

    let mut session = AnalysisSession::new(
        SqliteMealLog::new(database.clone()),
        SqliteFoodCatalog::new(database),
        user,
    )
    .with_projector(AnalysisProjector::new(settings.delta_epsilon));

    let json = match cli.command {
        Command::Intake { window } => {
            serde_json::to_string_pretty(&*session.intake_report(&window.window())?)?
        }
        Command::Guide { window } => {
            serde_json::to_string_pretty(&session.food_guide_alignment(&window.window())?)?
        }
        Command::Swap {
            item,
            quantity,
            unit,
            replacement,
            replacement_quantity,
            replacement_unit,
            window,
            view,
            chart,
        } => {
            let item_to_swap = FoodItem::new(item, quantity, unit);
            let replacement = FoodItem::new(replacement, replacement_quantity, replacement_unit);
            match view {
                Some(view) => serde_json::to_string_pretty(&session.project_swap(
                    item_to_swap,
                    replacement,
                    window.window(),
                    view,
                    chart.unwrap_or(ChartKind::Nutrient),
                )?)?,
                None => serde_json::to_string_pretty(
                    &*session.analyze_swap(item_to_swap, replacement, window.window())?,
                )?,
            }
        }
    };

    println!("{}", json);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    config::init_tracing()?;
    build_info::print_startup_banner();

    let settings = Settings::from_env()?;
    if let Some(parent) = settings.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    run(cli, &settings)
}
