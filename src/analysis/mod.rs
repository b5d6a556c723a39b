//! Swap analysis engine
//!
//! Meal window caching, window aggregation, swap simulation and projection
//! of cached results onto display views.

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod meal_window;
pub mod memory;
pub mod projector;
pub mod session;
pub mod source;
pub mod swap;
pub mod window;

pub use aggregate::{aggregate, count_distinct_days, Aggregate, AlignmentRow, FoodGuideAlignment, IntakeReport};
pub use cache::{AnalysisCache, IntakeCache, SwapAnalysisCache, WindowKey};
pub use error::{AnalysisError, AnalysisResult};
pub use meal_window::MealWindowCache;
pub use memory::{MemoryCatalog, MemoryMealLog};
pub use projector::{
    AnalysisProjector, ChartKind, FoodGroupRow, MealDelta, MealSeriesKey, NutrientDelta, NutrientRow,
    PercentChange, Projection, ViewKind, DEFAULT_DELTA_EPSILON,
};
pub use session::AnalysisSession;
pub use source::{FoodCatalog, MealLog, SourceError};
pub use swap::{swap_ratio, AnalysisKey, ChangedMeal, SwapAnalysis, SwapRequest, SwapSimulator, SwapSummary};
pub use window::DateWindow;
