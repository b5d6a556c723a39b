//! Single-entry analysis caches
//!
//! One generic holder backs both the plain intake report and the swap
//! analysis. Each keeps at most one `(key, result)` pair; a lookup with any
//! other key is a miss.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::aggregate::IntakeReport;
use super::swap::{AnalysisKey, SwapAnalysis};
use super::window::DateWindow;

/// Key of the plain intake report
///
/// `generation` is the meal window snapshot the report was computed from, so
/// replacing the snapshot makes every older report stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowKey {
    pub user_id: i64,
    pub window: DateWindow,
    pub generation: u64,
}

#[derive(Debug)]
pub struct AnalysisCache<K, V> {
    entry: Option<(K, Arc<V>)>,
    computations: u64,
}

/// Intake report cache
pub type IntakeCache = AnalysisCache<WindowKey, IntakeReport>;

/// Swap analysis cache
pub type SwapAnalysisCache = AnalysisCache<AnalysisKey, SwapAnalysis>;

impl<K, V> Default for AnalysisCache<K, V> {
    fn default() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq + std::fmt::Debug, V> AnalysisCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A result is held and was computed for `key`
    pub fn is_valid(&self, key: &K) -> bool {
        self.entry.as_ref().is_some_and(|(held, _)| held == key)
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        match &self.entry {
            Some((held, value)) if held == key => Some(Arc::clone(value)),
            _ => None,
        }
    }

    /// Key of the held result
    pub fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(key, _)| key)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of times `compute` has run
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Held result for `key`, computing and storing it on a miss
    ///
    /// A miss clears the stale entry first; a failed computation is returned
    /// as is and leaves the cache empty.
    pub fn get_or_try_compute<E, F>(&mut self, key: K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(hit) = self.get(&key) {
            debug!(?key, "analysis cache hit");
            return Ok(hit);
        }

        debug!(?key, "analysis cache miss");
        self.entry = None;
        self.computations += 1;

        let value = Arc::new(compute(&key)?);
        self.entry = Some((key, Arc::clone(&value)));
        Ok(value)
    }
}
