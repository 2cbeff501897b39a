//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "app": { "demoMode": false, "currencySymbol": "₹" }
//! }
//! ```
//! Keys this crate does not know about are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Environment override for demo mode (CI, screenshots)
pub const DEMO_MODE_ENV: &str = "MARKETPLACE_DEMO_MODE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency_symbol: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Marketplace configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing or unreadable settings file yields defaults.
    /// `MARKETPLACE_DEMO_MODE` wins over the file for demo mode.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let demo_mode = parse_bool_env(std::env::var(DEMO_MODE_ENV).ok().as_deref())
            .unwrap_or(raw.app.demo_mode);

        let currency_symbol = raw
            .app
            .currency_symbol
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string());

        Ok(Self {
            demo_mode,
            currency_symbol,
        })
    }

    /// Save config, keeping any settings we don't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let mut settings = read_settings(data_dir)?;

        settings.app.demo_mode = self.demo_mode;
        settings.app.currency_symbol = if self.currency_symbol == DEFAULT_CURRENCY_SYMBOL {
            None
        } else {
            Some(self.currency_symbol.clone())
        };

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join("settings.json"), content)?;
        Ok(())
    }

    /// Database file for the current mode
    pub fn db_filename(&self) -> &'static str {
        if self.demo_mode {
            "demo.duckdb"
        } else {
            "marketplace.duckdb"
        }
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }

    /// Price as shown to the user, e.g. "₹19.99"
    pub fn format_price(&self, display_price: &str) -> String {
        format!("{}{}", self.currency_symbol, display_price)
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

fn parse_bool_env(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true" | "1" | "yes" | "TRUE" | "YES") => Some(true),
        Some("false" | "0" | "no" | "FALSE" | "NO") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.format_price("10.00"), "₹10.00");
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"app": {"theme": "dark", "currencySymbol": "$"}, "window": {"width": 1100}}"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        assert_eq!(config.currency_symbol, "$");
        config.enable_demo_mode();
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("settings.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(saved["app"]["theme"], "dark");
        assert_eq!(saved["app"]["demoMode"], true);
        assert_eq!(saved["app"]["currencySymbol"], "$");
        assert_eq!(saved["window"]["width"], 1100);
    }

    #[test]
    fn test_malformed_settings_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.currency_symbol, DEFAULT_CURRENCY_SYMBOL);
    }

    #[test]
    fn test_db_filename_follows_demo_mode() {
        let mut config = Config::default();
        assert_eq!(config.db_filename(), "marketplace.duckdb");
        config.enable_demo_mode();
        assert_eq!(config.db_filename(), "demo.duckdb");
    }

    #[test]
    fn test_parse_bool_env() {
        assert_eq!(parse_bool_env(Some("yes")), Some(true));
        assert_eq!(parse_bool_env(Some("0")), Some(false));
        assert_eq!(parse_bool_env(Some("maybe")), None);
        assert_eq!(parse_bool_env(None), None);
    }
}
