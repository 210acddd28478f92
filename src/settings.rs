//! Support for configuration options

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schedule::{ProjectionOptions, DEFAULT_HORIZON_MONTHS};
use crate::status::{ASSET_DUE_SOON_DAYS, CALENDAR_DUE_SOON_DAYS};
use crate::tasks::DEFAULT_RECENT_COMPLETIONS;

/// Where the REST API is expected when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
/// Overrides [`Settings::api_url`]
pub const API_URL_ENV_VAR: &str = "UPKEEP_API_URL";
/// The bearer token to use against the API
pub const TOKEN_ENV_VAR: &str = "UPKEEP_TOKEN";

/// Options of the app.
///
/// Keys that are missing from a settings file take their default value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub api_url: String,
    /// The local copy of the assets
    pub cache_file: PathBuf,
    /// "Due soon" window of asset cards
    pub asset_due_soon_days: i64,
    /// "Due soon" window of calendar events
    pub calendar_due_soon_days: i64,
    /// How far ahead the calendar is populated
    pub horizon_months: u32,
    /// How many past completions the dashboard shows
    pub recent_completions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_file: PathBuf::from("upkeep_cache.json"),
            asset_due_soon_days: ASSET_DUE_SOON_DAYS,
            calendar_due_soon_days: CALENDAR_DUE_SOON_DAYS,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            recent_completions: DEFAULT_RECENT_COMPLETIONS,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| format!("Unable to open file {:?}: {}", path, err))?;
        let settings: Self = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply the overrides that are set in the environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
            log::debug!("Using API URL from {}", API_URL_ENV_VAR);
            self.api_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.asset_due_soon_days < 0 || self.calendar_due_soon_days < 0 {
            return Err("Due soon windows must not be negative".into());
        }
        Ok(())
    }

    pub fn projection_options(&self) -> ProjectionOptions {
        ProjectionOptions {
            horizon_months: self.horizon_months,
            due_soon_days: self.calendar_due_soon_days,
        }
    }
}

/// The API token from the environment, if any
pub fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR).ok()
        .filter(|token| token.trim().is_empty() == false)
}
