#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

use crate::adapters::LocalStore;
use crate::core::frontend::{FrontendSettings, DEFAULT_GUEST_CHAT_LIMIT, DEFAULT_HISTORY_LIMIT};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Values given on the command line; they win over the TOML file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub state_dir: Option<String>,
}

/// Effective configuration after merging flags, the TOML file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub state_dir: String,
    pub guest_chat_limit: u32,
    pub history_limit: u32,
}

impl Settings {
    pub fn resolve(overrides: SettingsOverrides, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            api_url: overrides
                .api_url
                .or(file.api.base_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout_seconds: overrides
                .timeout_seconds
                .or(file.api.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            state_dir: overrides
                .state_dir
                .or(file.state.dir)
                .unwrap_or_else(|| LocalStore::default_dir().to_string_lossy().into_owned()),
            guest_chat_limit: file.chat.guest_limit.unwrap_or(DEFAULT_GUEST_CHAT_LIMIT),
            history_limit: file.activity.limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn frontend(&self) -> FrontendSettings {
        FrontendSettings {
            guest_chat_limit: self.guest_chat_limit,
            history_limit: self.history_limit,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_url)?;
        validate_positive_number("timeout", self.timeout_seconds, 1)?;
        validate_path("state_dir", &self.state_dir)?;
        validate_positive_number("chat.guest_limit", self.guest_chat_limit, 1)?;
        validate_positive_number("activity.limit", self.history_limit, 1)?;
        Ok(())
    }
}
