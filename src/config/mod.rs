//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the default shift calendar, holidays, early-leave policy
//! and report thresholds from YAML files. The same rule set can also arrive
//! inline with an API request as a [`RulesConfig`].
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Early-leave policy: {:?}", config.early_leave());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CalendarConfig, PolicyConfig, ResolvedRules, RulesConfig};
