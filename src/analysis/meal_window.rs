//! Meal window cache
//!
//! Holds the meals of one (user, window) pair. Any other request replaces the
//! snapshot wholesale and advances the snapshot generation; caches derived
//! from a snapshot key on that generation, so replacing it is what
//! invalidates them.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::Meal;
use super::error::AnalysisResult;
use super::source::MealLog;
use super::window::DateWindow;

#[derive(Debug)]
struct Snapshot {
    user_id: i64,
    window: DateWindow,
    meals: Arc<[Meal]>,
}

#[derive(Debug, Default)]
pub struct MealWindowCache {
    snapshot: Option<Snapshot>,
    generation: u64,
}

impl MealWindowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request for (user, window) would be served from the snapshot
    pub fn is_valid(&self, user_id: i64, window: &DateWindow) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| s.user_id == user_id && s.window == *window)
    }

    /// Meals of `user_id` inside `window`
    ///
    /// A reversed window is rejected before the cache is looked at. An empty
    /// result is cached like any other.
    pub fn get<L: MealLog + ?Sized>(
        &mut self,
        meal_log: &L,
        user_id: i64,
        window: &DateWindow,
    ) -> AnalysisResult<Arc<[Meal]>> {
        window.validate()?;

        if let Some(snapshot) = self.snapshot.as_ref() {
            if snapshot.user_id == user_id && snapshot.window == *window {
                debug!(user_id, %window, "meal window cache hit");
                return Ok(Arc::clone(&snapshot.meals));
            }
        }

        let (start, end) = window.bounds();
        let meals: Arc<[Meal]> = meal_log.fetch_meals(user_id, start, end)?.into();
        info!(user_id, %window, meals = meals.len(), "fetched meal window");

        self.snapshot = Some(Snapshot {
            user_id,
            window: *window,
            meals: Arc::clone(&meals),
        });
        self.generation += 1;

        Ok(meals)
    }

    /// Snapshot generation, advanced every time the snapshot is replaced or dropped
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn invalidate(&mut self) {
        self.snapshot = None;
        self.generation += 1;
    }

    /// Drop the snapshot if a meal logged on `day` belongs to it
    ///
    /// Returns true when the snapshot was dropped.
    pub fn meal_logged(&mut self, user_id: i64, day: NaiveDate) -> bool {
        let covered = self
            .snapshot
            .as_ref()
            .is_some_and(|s| s.user_id == user_id && s.window.contains(day));

        if covered {
            debug!(user_id, %day, "new meal inside cached window");
            self.invalidate();
        }
        covered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::error::AnalysisError;
    use crate::analysis::memory::fixtures::*;
    use crate::analysis::memory::MemoryMealLog;
    use crate::models::MealType;

    fn log() -> MemoryMealLog {
        MemoryMealLog::new(vec![
            meal(1, day(2025, 7, 18), 8, MealType::Breakfast, vec![butter(20.0)]),
            meal(2, day(2025, 7, 20), 12, MealType::Lunch, vec![butter(20.0)]),
            meal(3, day(2025, 7, 23), 18, MealType::Dinner, vec![butter(20.0)]),
        ])
    }

    #[test]
    fn test_same_request_is_served_from_snapshot() {
        let log = log();
        let mut cache = MealWindowCache::new();
        let window = DateWindow::between(day(2025, 7, 15), day(2025, 7, 22));

        let first = cache.get(&log, USER, &window).unwrap();
        let second = cache.get(&log, USER, &window).unwrap();

        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(log.fetches(), 1);
        assert_eq!(cache.generation(), 1);
    }

    #[test]
    fn test_changed_window_replaces_snapshot() {
        let log = log();
        let mut cache = MealWindowCache::new();

        cache
            .get(&log, USER, &DateWindow::between(day(2025, 7, 15), day(2025, 7, 22)))
            .unwrap();
        let all = cache.get(&log, USER, &DateWindow::all_time()).unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(log.fetches(), 2);
        assert_eq!(cache.generation(), 2);
        assert!(cache.is_valid(USER, &DateWindow::all_time()));
        assert!(!cache.is_valid(USER + 1, &DateWindow::all_time()));
    }

    #[test]
    fn test_empty_window_is_cached() {
        let log = log();
        let mut cache = MealWindowCache::new();
        let window = DateWindow::between(day(2024, 1, 1), day(2024, 1, 31));

        assert!(cache.get(&log, USER, &window).unwrap().is_empty());
        assert!(cache.get(&log, USER, &window).unwrap().is_empty());
        assert_eq!(log.fetches(), 1);
    }

    #[test]
    fn test_invalid_range_leaves_snapshot_alone() {
        let log = log();
        let mut cache = MealWindowCache::new();
        let window = DateWindow::all_time();
        cache.get(&log, USER, &window).unwrap();

        let reversed = DateWindow::between(day(2025, 7, 22), day(2025, 7, 15));
        assert!(matches!(
            cache.get(&log, USER, &reversed),
            Err(AnalysisError::InvalidRange { .. })
        ));
        assert!(cache.is_valid(USER, &window));
        assert_eq!(cache.generation(), 1);
        assert_eq!(log.fetches(), 1);
    }

    #[test]
    fn test_meal_logged_inside_window_drops_snapshot() {
        let log = log();
        let mut cache = MealWindowCache::new();
        let window = DateWindow::between(day(2025, 7, 15), day(2025, 7, 22));
        cache.get(&log, USER, &window).unwrap();

        assert!(!cache.meal_logged(USER, day(2025, 7, 30)));
        assert!(cache.is_valid(USER, &window));

        assert!(cache.meal_logged(USER, day(2025, 7, 19)));
        assert!(!cache.is_valid(USER, &window));
        assert_eq!(cache.generation(), 2);
    }

    #[test]
    fn test_refetch_after_meal_logged_sees_new_meal() {
        let mut log = log();
        let mut cache = MealWindowCache::new();
        let window = DateWindow::between(day(2025, 7, 15), day(2025, 7, 22));
        assert_eq!(cache.get(&log, USER, &window).unwrap().len(), 2);

        log.push(meal(4, day(2025, 7, 19), 12, MealType::Lunch, vec![bread(1.0)]));
        assert!(cache.meal_logged(USER, day(2025, 7, 19)));

        let meals = cache.get(&log, USER, &window).unwrap();
        let ids: Vec<i64> = meals.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![1, 4, 2]);
        assert_eq!(log.fetches(), 2);
    }
}
