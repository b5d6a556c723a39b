//! Runtime configuration
//!
//! Everything is read from the environment:
//! - `MEALSWAP_DATABASE_PATH`: SQLite file (default `<project>/data/mealswap.db`)
//! - `MEALSWAP_DELTA_EPSILON`: smallest per-meal change worth reporting
//! - `RUST_LOG`: log filter, on top of a `mealswap=info` default

use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::analysis::DEFAULT_DELTA_EPSILON;

pub const DATABASE_PATH_VAR: &str = "MEALSWAP_DATABASE_PATH";
pub const DELTA_EPSILON_VAR: &str = "MEALSWAP_DELTA_EPSILON";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_path: PathBuf,
    pub delta_epsilon: f64,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build settings from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup(DATABASE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let delta_epsilon = match lookup(DELTA_EPSILON_VAR) {
            Some(value) => match value.trim().parse::<f64>() {
                Ok(eps) if eps >= 0.0 && eps.is_finite() => eps,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: DELTA_EPSILON_VAR,
                        value,
                    })
                }
            },
            None => DEFAULT_DELTA_EPSILON,
        };

        Ok(Self {
            database_path,
            delta_epsilon,
        })
    }
}

/// `data/mealswap.db` under the project root
///
/// Binaries run from `target/debug` or `target/release` resolve to the
/// project root two levels up.
pub fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(root) = path.parent().and_then(|target| target.parent()) {
            path = root.to_path_buf();
        }
    }

    path.push("data");
    path.push("mealswap.db");
    path
}

/// Install the stderr log subscriber
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mealswap=info".parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
