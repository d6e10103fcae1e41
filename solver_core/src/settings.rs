//! # Settings
//!
//! Caller preferences for presentation layers: display locale, default angle
//! unit, whether to print step traces, output format and log verbosity.
//! Solvers themselves never read settings; callers pass the relevant values
//! (a locale formatter, an angle unit) explicitly.
//!
//! Settings are parsed from JSON text; reading the file is left to the
//! caller. Every field has a default, so a partial document (or `{}`) is
//! valid.
//!
//! ```rust
//! use solver_core::settings::Settings;
//! use solver_core::locale::Locale;
//!
//! let settings = Settings::from_json(r#"{ "locale": "de" }"#).unwrap();
//! assert_eq!(settings.locale, Locale::De);
//! assert!(settings.show_steps);
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::locale::Locale;
use crate::solvers::trigonometry::AngleUnit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language used for formatted dates
    pub locale: Locale,

    /// Unit assumed for angle inputs when none is given
    pub angle_unit: AngleUnit,

    /// Print the step trace next to the result
    pub show_steps: bool,

    /// Emit the result record as JSON
    pub json_output: bool,

    /// One of off, error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            locale: Locale::default(),
            angle_unit: AngleUnit::default(),
            show_steps: true,
            json_output: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CalcError::settings_error("<inline>", format!("Invalid JSON: {}", e)))?;
        settings.validate("<inline>")?;
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::settings_error("<inline>", e.to_string()))
    }

    /// The configured log level.
    pub fn level_filter(&self) -> CalcResult<LevelFilter> {
        self.log_level.trim().parse::<LevelFilter>().map_err(|_| {
            CalcError::settings_error(
                "log_level",
                format!("'{}' is not one of off, error, warn, info, debug, trace", self.log_level),
            )
        })
    }

    fn validate(&self, path: &str) -> CalcResult<()> {
        self.level_filter().map(|_| ()).map_err(|e| match e {
            CalcError::SettingsError { reason, .. } => CalcError::settings_error(path, reason),
            other => other,
        })
    }
}
