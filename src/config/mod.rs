//! # Configuration Management Module
//!
//! Centralized configuration for the bot with defaults, validation and
//! environment overrides.
//!
//! ## Configuration Structure
//!
//! - [`BotConfig`] - game settings (display name, administrators, map size)
//! - [`TelegramConfig`] - Bot API credentials and polling behaviour
//! - [`StorageConfig`] - where player records live
//! - [`LoggingConfig`] - log level and log files
//!
//! ## Configuration File Format
//!
//! ```toml
//! [bot]
//! name = "Legendary Empire"
//! admins = ["123456789"]
//! grid_size = 10
//!
//! [telegram]
//! token = ""
//! api_base = "https://api.telegram.org"
//! poll_timeout_seconds = 30
//! request_timeout_seconds = 10
//!
//! [storage]
//! data_dir = "./data"
//!
//! [logging]
//! level = "info"
//! file = "empirebot.log"
//! ```
//!
//! ## Environment Integration
//!
//! Precedence: environment > config file > defaults.
//!
//! - `BOT_TOKEN` replaces `telegram.token`
//! - `ADMIN_ID` replaces `bot.admins` (comma-separated for several admins)

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::game::DEFAULT_GRID_SIZE;

pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_ADMIN_ID: &str = "ADMIN_ID";

/// Largest map side; a 10×10 map is already 100 inline buttons.
pub const MAX_GRID_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub name: String,
    /// Identities allowed to run admin commands.
    #[serde(default)]
    pub admins: Vec<String>,
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Legendary Empire".to_string(),
            admins: Vec::new(),
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot credential. Usually supplied through `BOT_TOKEN` rather than the file.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Long-poll wait passed to `getUpdates`.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: u64,
    /// Extra client-side allowance on top of the poll wait.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: default_api_base(),
            poll_timeout_seconds: default_poll_timeout(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Optional override for the sled database path; defaults to `<data_dir>/players`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<String>,
}

impl StorageConfig {
    pub fn player_db_path(&self) -> PathBuf {
        match &self.db_path {
            Some(p) => PathBuf::from(p),
            None => Path::new(&self.data_dir).join("players"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            db_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    #[serde(default)]
    pub security_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("empirebot.log".to_string()),
            security_file: Some("empirebot-security.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Parsed level, falling back to `Info` for unknown strings.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file and apply environment overrides.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.apply_env_overrides(|k| std::env::var(k).ok());
        Ok(config)
    }

    /// Like [`Config::load`] but a missing file yields defaults (plus environment).
    /// A file that exists but does not parse is still an error.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if fs::try_exists(path).await.unwrap_or(false) {
            return Self::load(path).await;
        }
        let mut config = Config::default();
        config.apply_env_overrides(|k| std::env::var(k).ok());
        Ok(config)
    }

    /// Apply `BOT_TOKEN` / `ADMIN_ID` using the supplied lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_BOT_TOKEN) {
            let token = token.trim();
            if !token.is_empty() {
                self.telegram.token = token.to_string();
            }
        }
        if let Some(admins) = lookup(ENV_ADMIN_ID) {
            let parsed: Vec<String> = admins
                .split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
            if !parsed.is_empty() {
                self.bot.admins = parsed;
            }
        }
    }

    /// Check values that would otherwise fail later at runtime.
    /// `require_token` is set when the bot is about to talk to the transport.
    pub fn validate(&self, require_token: bool) -> Result<()> {
        if require_token && self.telegram.token.trim().is_empty() {
            bail!("No bot token configured (set {} or telegram.token)", ENV_BOT_TOKEN);
        }
        if self.bot.grid_size == 0 || self.bot.grid_size > MAX_GRID_SIZE {
            bail!(
                "bot.grid_size must be between 1 and {} (got {})",
                MAX_GRID_SIZE,
                self.bot.grid_size
            );
        }
        if self.bot.admins.iter().any(|a| a.trim().is_empty()) {
            bail!("bot.admins contains an empty identity");
        }
        if self.telegram.poll_timeout_seconds == 0 {
            bail!("telegram.poll_timeout_seconds must be at least 1");
        }
        Ok(())
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_are_valid_without_token() {
        let config = Config::default();
        assert_eq!(config.bot.grid_size, 10);
        assert!(config.validate(false).is_ok());
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn env_overrides_token_and_admins() {
        let mut config = Config::default();
        config.bot.admins = vec!["1".into()];
        config.apply_env_overrides(env(&[("BOT_TOKEN", " 123:abc "), ("ADMIN_ID", "99, 100,")]));
        assert_eq!(config.telegram.token, "123:abc");
        assert_eq!(config.bot.admins, vec!["99".to_string(), "100".to_string()]);
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn blank_env_values_do_not_clobber_file_values() {
        let mut config = Config::default();
        config.telegram.token = "file-token".into();
        config.bot.admins = vec!["5".into()];
        config.apply_env_overrides(env(&[("BOT_TOKEN", "  "), ("ADMIN_ID", " , ")]));
        assert_eq!(config.telegram.token, "file-token");
        assert_eq!(config.bot.admins, vec!["5".to_string()]);
    }

    #[test]
    fn grid_size_bounds() {
        let mut config = Config::default();
        config.bot.grid_size = 0;
        assert!(config.validate(false).is_err());
        config.bot.grid_size = 11;
        assert!(config.validate(false).is_err());
        config.bot.grid_size = 4;
        assert!(config.validate(false).is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [bot]
            name = "Test Empire"
            admins = ["99"]

            [storage]
            data_dir = "/tmp/empire"
            "#,
        )
        .expect("parse");
        assert_eq!(config.bot.grid_size, 10);
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
        assert_eq!(
            config.storage.player_db_path(),
            PathBuf::from("/tmp/empire/players")
        );
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn default_config_serializes() {
        let text = toml::to_string_pretty(&Config::default()).expect("toml");
        let back: Config = toml::from_str(&text).expect("parse back");
        assert_eq!(back.bot.name, "Legendary Empire");
        assert_eq!(back.storage.data_dir, "./data");
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        let config = Config::load_or_default(path.to_str().unwrap())
            .await
            .expect("defaults");
        assert_eq!(config.bot.grid_size, 10);
    }
}
