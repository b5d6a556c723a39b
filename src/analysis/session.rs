//! Analysis session
//!
//! Owns the data sources, the active user and every cache for one interactive
//! session. All operations take `&mut self`; there is no shared state.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::{FoodItem, Meal, UserProfile};
use super::aggregate::{aggregate, resolve_units, FoodGuideAlignment, IntakeReport};
use super::cache::{IntakeCache, SwapAnalysisCache, WindowKey};
use super::error::{AnalysisError, AnalysisResult};
use super::meal_window::MealWindowCache;
use super::projector::{AnalysisProjector, ChartKind, Projection, ViewKind};
use super::source::{FoodCatalog, MealLog};
use super::swap::{AnalysisKey, SwapAnalysis, SwapSimulator};
use super::window::DateWindow;

pub struct AnalysisSession<L, C> {
    meal_log: L,
    catalog: C,
    user: UserProfile,
    meal_window: MealWindowCache,
    intake: IntakeCache,
    swaps: SwapAnalysisCache,
    projector: AnalysisProjector,
}

impl<L: MealLog, C: FoodCatalog> AnalysisSession<L, C> {
    pub fn new(meal_log: L, catalog: C, user: UserProfile) -> Self {
        Self {
            meal_log,
            catalog,
            user,
            meal_window: MealWindowCache::new(),
            intake: IntakeCache::new(),
            swaps: SwapAnalysisCache::new(),
            projector: AnalysisProjector::default(),
        }
    }

    pub fn with_projector(mut self, projector: AnalysisProjector) -> Self {
        self.projector = projector;
        self
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn meal_log(&self) -> &L {
        &self.meal_log
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Meals of the active user inside `window`
    pub fn meals(&mut self, window: &DateWindow) -> AnalysisResult<Arc<[Meal]>> {
        self.meal_window.get(&self.meal_log, self.user.id, window)
    }

    /// Nutrient and food guide intake over `window`
    ///
    /// Cached per meal snapshot: the report is recomputed only after the
    /// underlying meal window was refetched or invalidated.
    pub fn intake_report(&mut self, window: &DateWindow) -> AnalysisResult<Arc<IntakeReport>> {
        let meals = self.meal_window.get(&self.meal_log, self.user.id, window)?;
        let key = WindowKey {
            user_id: self.user.id,
            window: *window,
            generation: self.meal_window.generation(),
        };

        let catalog = &self.catalog;
        self.intake.get_or_try_compute(key, |key| {
            if meals.is_empty() {
                return Err(AnalysisError::NoMeals);
            }
            let totals = aggregate(&meals, catalog)?;
            let units = resolve_units(catalog, &totals.nutrients);
            Ok(IntakeReport::new(key.window, totals, units))
        })
    }

    /// Average daily servings against the active user's recommendations
    pub fn food_guide_alignment(&mut self, window: &DateWindow) -> AnalysisResult<FoodGuideAlignment> {
        let report = self.intake_report(window)?;
        Ok(FoodGuideAlignment::new(
            &report.food_guide_averages,
            &self.user.recommended_daily_servings(),
            report.day_count,
        ))
    }

    /// Swap analysis for the given representative items, computed at most
    /// once per key
    pub fn analyze_swap(
        &mut self,
        item_to_swap: FoodItem,
        replacement: FoodItem,
        window: DateWindow,
    ) -> AnalysisResult<Arc<SwapAnalysis>> {
        window.validate()?;

        let key = AnalysisKey::new(item_to_swap, replacement, window);
        let meal_log = &self.meal_log;
        let catalog = &self.catalog;
        let user_id = self.user.id;
        let meal_window = &mut self.meal_window;

        self.swaps.get_or_try_compute(key, |key| {
            let meals = meal_window.get(meal_log, user_id, &key.window)?;
            SwapSimulator::new(catalog).simulate(&meals, &key.to_request())
        })
    }

    /// Project the swap analysis for a key onto a view
    ///
    /// Switching views of the same swap reuses the cached analysis.
    pub fn project_swap(
        &mut self,
        item_to_swap: FoodItem,
        replacement: FoodItem,
        window: DateWindow,
        view: ViewKind,
        chart: ChartKind,
    ) -> AnalysisResult<Projection> {
        let analysis = self.analyze_swap(item_to_swap, replacement, window)?;
        self.projector.project(&analysis, view, chart)
    }

    /// A meal was logged for `user_id` on `day`
    ///
    /// Drops every cached result whose window covers that day. Returns true
    /// when anything was dropped.
    pub fn meal_logged(&mut self, user_id: i64, day: NaiveDate) -> bool {
        let window_dropped = self.meal_window.meal_logged(user_id, day);

        let swap_dropped = user_id == self.user.id
            && self.swaps.key().is_some_and(|key| key.window.contains(day));
        if swap_dropped {
            debug!(user_id, %day, "new meal inside cached swap window");
            self.swaps.invalidate();
        }

        window_dropped || swap_dropped
    }

    /// The user left the swap workflow
    pub fn leave_swap_analysis(&mut self) {
        self.swaps.invalidate();
    }

    /// Make `user` the active user, dropping everything cached for the last one
    pub fn switch_user(&mut self, user: UserProfile) {
        info!(from = self.user.id, to = user.id, "switching user");
        self.user = user;
        self.clear_all();
    }

    pub fn clear_all(&mut self) {
        self.meal_window.invalidate();
        self.intake.invalidate();
        self.swaps.invalidate();
    }

    /// Simulator runs so far
    pub fn swap_computations(&self) -> u64 {
        self.swaps.computations()
    }

    /// Intake report computations so far
    pub fn intake_computations(&self) -> u64 {
        self.intake.computations()
    }

    /// Whether an analysis for this key is held
    pub fn has_swap_analysis(&self, key: &AnalysisKey) -> bool {
        self.swaps.is_valid(key)
    }
}
