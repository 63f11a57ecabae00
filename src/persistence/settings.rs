use std::{
    path::Path,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    get_data_file_path,
    load_json_or_default,
    save_json,
};
use crate::{
    analysis::DEFAULT_MAX_DEPTH,
    anki::DEFAULT_ANKI_CONNECT_URL,
    core::TagDifficultyError,
    report::DEFAULT_CHART_LIMIT,
};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub anki_connect_url: String,
    pub max_depth: usize,
    pub chart_limit: usize,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            anki_connect_url: DEFAULT_ANKI_CONNECT_URL.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            chart_limit: DEFAULT_CHART_LIMIT,
            request_timeout_secs: 120,
        }
    }
}

impl Settings {
    /// Settings from the app data directory, or defaults.
    pub fn load() -> Self {
        Self::load_from(&get_data_file_path(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), TagDifficultyError> {
        self.validate()?;
        save_json(self, path)
    }

    pub fn validate(&self) -> Result<(), TagDifficultyError> {
        if self.anki_connect_url.trim().is_empty() {
            return Err(TagDifficultyError::Settings("AnkiConnect URL is empty".to_string()));
        }
        if self.max_depth == 0 {
            return Err(TagDifficultyError::Settings("max_depth must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(TagDifficultyError::Settings(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
