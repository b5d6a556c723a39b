//! Analysis errors

use chrono::NaiveDate;
use thiserror::Error;

use super::projector::{ChartKind, ViewKind};
use super::source::SourceError;

/// Typed failures surfaced to callers of the analysis engine
///
/// None of these leave a partial cache entry behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("No meals logged in the selected date range")]
    NoMeals,

    #[error("'{0}' does not appear in any meal in the selected date range")]
    NoApplicableSwaps(String),

    #[error("The {view} view has no {chart} projection")]
    UnsupportedProjection { view: ViewKind, chart: ChartKind },

    #[error("Data source error: {0}")]
    Source(#[from] SourceError),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
