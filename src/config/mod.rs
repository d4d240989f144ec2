//! Configuration loading and management

mod dispatch;
mod io;
mod numbers;
mod settings;
mod shared;

pub use dispatch::{DispatchMode, DispatchSettings, WHATSAPP_BUSINESS_PACKAGE, WHATSAPP_PACKAGE};
pub use numbers::NumberRules;
pub use settings::{DEFAULT_MESSAGE, Settings};
pub use shared::SharedSettings;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Dispatcher settings
    #[serde(default)]
    pub dispatch: DispatchSettings,

    /// Caller number normalization
    #[serde(default)]
    pub numbers: NumberRules,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(content).with_context(|| "Failed to parse config")?;
        config.settings.fill_blank_message();
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).with_context(|| "Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.settings.service_enabled);
        assert_eq!(config.settings.custom_message, DEFAULT_MESSAGE);
        assert_eq!(config.dispatch.mode, DispatchMode::Notify);
        assert_eq!(
            config.dispatch.package_preference,
            vec![WHATSAPP_PACKAGE, WHATSAPP_BUSINESS_PACKAGE]
        );
        assert_eq!(config.numbers.country_code, "57");
    }

    #[test]
    fn test_blank_message_replaced_with_default() {
        let config = Config::from_toml("[settings]\ncustom_message = \"  \"\n").unwrap();
        assert_eq!(config.settings.custom_message, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
[settings]
service_enabled = false
selected_line_id = 2

[dispatch]
mode = "open"
installed_packages = ["com.whatsapp.w4b"]

[numbers]
country_code = "52"
"#;
        let config = Config::from_toml(toml).unwrap();
        assert!(!config.settings.service_enabled);
        assert_eq!(config.settings.selected_line_id, Some(2));
        assert_eq!(config.dispatch.mode, DispatchMode::Open);
        assert_eq!(config.dispatch.installed_packages, vec!["com.whatsapp.w4b"]);
        assert!(config.dispatch.notifications_enabled);
        assert_eq!(config.numbers.country_code, "52");
        assert_eq!(config.numbers.local_length, 10);
    }

    #[test]
    fn test_invalid_mode_is_an_error() {
        assert!(Config::from_toml("[dispatch]\nmode = \"sms\"\n").is_err());
    }
}
