use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};
use crate::models::{ReasonPolicy, DEFAULT_REASON_POLICY};
use crate::processor::ProcessOptions;
use crate::validators::{PhoneRules, DEFAULT_COUNTRY_CODE, MAX_PHONE_DIGITS, MIN_PHONE_DIGITS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
    #[serde(default = "default_min_phone_digits")]
    pub min_phone_digits: usize,
    #[serde(default = "default_max_phone_digits")]
    pub max_phone_digits: usize,
    #[serde(default = "default_reason_policy")]
    pub reason_policy: ReasonPolicy,
    /// Where output files go; defaults to the input file's directory.
    #[serde(default)]
    pub output_dir: Option<String>,
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn default_min_phone_digits() -> usize {
    MIN_PHONE_DIGITS
}

fn default_max_phone_digits() -> usize {
    MAX_PHONE_DIGITS
}

fn default_reason_policy() -> ReasonPolicy {
    DEFAULT_REASON_POLICY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_country_code: default_country_code(),
            min_phone_digits: default_min_phone_digits(),
            max_phone_digits: default_max_phone_digits(),
            reason_policy: default_reason_policy(),
            output_dir: None,
        }
    }
}

impl Settings {
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            phone_rules: PhoneRules {
                default_country_code: self.default_country_code.clone(),
                min_digits: self.min_phone_digits,
                max_digits: self.max_phone_digits,
            },
            reason_policy: self.reason_policy,
        }
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.as_deref().map(shellexpand_path).map(PathBuf::from)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("debt-import")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match parse_settings(&content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring settings file: {e}");
            Settings::default()
        }
    }
}

fn parse_settings(content: &str) -> Result<Settings> {
    let settings: Settings =
        serde_json::from_str(content).map_err(|e| ImportError::Settings(e.to_string()))?;
    if settings.min_phone_digits > settings.max_phone_digits {
        return Err(ImportError::Settings(format!(
            "min_phone_digits ({}) exceeds max_phone_digits ({})",
            settings.min_phone_digits, settings.max_phone_digits
        )));
    }
    Ok(settings)
}

/// Expand a leading `~` to the user's home directory.
pub fn shellexpand_path(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.display());
        }
    }
    path.to_string()
}
