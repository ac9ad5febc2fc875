//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the default
//! attendance rules from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::analysis::ShiftCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::EarlyLeavePolicy;
use crate::report::HighlightThresholds;

use super::types::{CalendarConfig, PolicyConfig, ResolvedRules, RulesConfig};

/// Loads and provides access to the default attendance rules.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── calendar.yaml   # Shift periods and holidays
/// └── policy.yaml     # Early-leave policy and report thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("{} shift periods", loader.calendar().periods().len());
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    raw: RulesConfig,
    rules: ResolvedRules,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing
    /// - Either file contains invalid YAML
    /// - A shift period ends before it starts
    ///
    /// An unreadable holiday list is only a warning; see
    /// [`warnings`](Self::warnings).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let calendar = Self::load_yaml::<CalendarConfig>(&path.join("calendar.yaml"))?;
        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;

        let raw = RulesConfig::from_files(calendar, policy);
        let rules = raw.resolve()?;

        for warning in &rules.warnings {
            warn!(path = %path.display(), warning = %warning, "Configuration warning");
        }
        info!(
            path = %path.display(),
            periods = rules.calendar.periods().len(),
            holidays = rules.calendar.holidays().len(),
            "Loaded attendance configuration"
        );

        Ok(Self { raw, rules })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// The rules as read from disk.
    pub fn raw(&self) -> &RulesConfig {
        &self.raw
    }

    /// The validated rules.
    pub fn rules(&self) -> &ResolvedRules {
        &self.rules
    }

    /// The configured shift calendar.
    pub fn calendar(&self) -> &ShiftCalendar {
        &self.rules.calendar
    }

    /// The configured early-leave policy.
    pub fn early_leave(&self) -> EarlyLeavePolicy {
        self.rules.early_leave
    }

    /// The configured highlight thresholds.
    pub fn thresholds(&self) -> &HighlightThresholds {
        &self.rules.thresholds
    }

    /// Warnings raised while loading (e.g. an unreadable holiday list).
    pub fn warnings(&self) -> &[String] {
        &self.rules.warnings
    }
}
