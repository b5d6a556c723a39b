//! Build information
//!
//! Compile-time build number and timestamp embedded by `build.rs`.

use serde::Serialize;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: &str = match option_env!("MEALSWAP_BUILD_NUMBER") {
    Some(s) => s,
    None => "0",
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("MEALSWAP_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build metadata attached to CLI reports
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER.parse().unwrap_or(0),
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    /// Lines of the startup banner
    pub fn banner(&self) -> Vec<String> {
        let rule = "=".repeat(47);
        vec![
            rule.clone(),
            "  Meal Swap Analysis".to_string(),
            format!("  Version: {} | Build: {}", self.version, self.build_number),
            format!("  Compiled: {}", self.build_timestamp),
            rule,
        ]
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    for line in BuildInfo::current().banner() {
        eprintln!("{}", line);
    }
}
