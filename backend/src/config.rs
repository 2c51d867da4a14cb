//! Application configuration.
//!
//! Loaded from an optional YAML file with sane defaults; provider
//! credentials left blank put the matching notifier into dry-run mode,
//! so a fresh checkout runs without any secrets.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the config file; falls back to salon.yaml
const CONFIG_PATH_ENV: &str = "SALON_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "salon.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Passcode for the admin dashboard; admin login is disabled while empty
    pub admin_passcode: String,
    pub email: EmailConfig,
    pub sms: SmsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "sqlite:salon.db".to_string(),
            admin_passcode: String::new(),
            email: EmailConfig::default(),
            sms: SmsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    /// Salon inbox that receives contact form messages
    pub notify_email: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_email: String::new(),
            notify_email: String::new(),
        }
    }
}

impl EmailConfig {
    /// Live sending needs the feature flag plus full SMTP credentials
    pub fn is_live(&self) -> bool {
        self.enabled
            && !self.username.is_empty()
            && !self.password.is_empty()
            && !self.from_email.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsConfig {
    pub enabled: bool,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

impl SmsConfig {
    /// Live sending needs the feature flag plus full Twilio credentials
    pub fn is_live(&self) -> bool {
        self.enabled
            && !self.account_sid.is_empty()
            && !self.auth_token.is_empty()
            && !self.from_number.is_empty()
    }
}

impl AppConfig {
    /// Load configuration from the file named by `SALON_CONFIG` (default
    /// `salon.yaml`); a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = Path::new(&path);

        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            log::info!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        // Secrets may come from the environment instead of the file
        if let Ok(passcode) = std::env::var("SALON_ADMIN_PASSCODE") {
            config.admin_passcode = passcode;
        }

        Ok(config)
    }

    /// Parse configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
