//! # Estimator Configuration
//!
//! Company details, share link settings and estimate defaults.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     FIELDFIX_BASE_URL=https://quote.example.kr                          │
//! │     FIELDFIX_LANGUAGE=ko                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/fieldfix-estimator/estimator.toml (Linux)                 │
//! │     ~/Library/Application Support/kr.FieldFix.fieldfix-estimator/ (mac) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [company]
//! name = "부성티케이 (BUSUNG TK)"
//! short_name = "부성TK"
//! phone = "02-1234-5678"
//! email = "contact@busungtk.com"
//! website = "www.busungtk.com"
//!
//! [share]
//! base_url = "https://quote.busungtk.com"
//! lifetime_days = 30
//!
//! [estimate]
//! language = "ko"
//! validity_days = 30
//! catalog_path = "/etc/fieldfix/catalog.toml"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use fieldfix_core::share::DEFAULT_SHARE_LINK_DAYS;
use fieldfix_core::validation::validate_email;
use fieldfix_core::MessageLanguage;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Company
// =============================================================================

/// The service company, shown in email subjects and footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// Full legal name for the footer.
    #[serde(default = "default_company_name")]
    pub name: String,

    /// Short name used in the email subject tag.
    #[serde(default = "default_company_short_name")]
    pub short_name: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub website: Option<String>,
}

fn default_company_name() -> String {
    "FieldFix".to_string()
}

fn default_company_short_name() -> String {
    "FieldFix".to_string()
}

impl Default for CompanyConfig {
    fn default() -> Self {
        CompanyConfig {
            name: default_company_name(),
            short_name: default_company_short_name(),
            phone: None,
            email: None,
            website: None,
        }
    }
}

// =============================================================================
// Share Links
// =============================================================================

/// Share link settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSettings {
    /// Public site root that serves `/share/{token}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How long a link stays valid.
    #[serde(default = "default_lifetime_days")]
    pub lifetime_days: i64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_lifetime_days() -> i64 {
    DEFAULT_SHARE_LINK_DAYS
}

impl Default for ShareSettings {
    fn default() -> Self {
        ShareSettings {
            base_url: default_base_url(),
            lifetime_days: default_lifetime_days(),
        }
    }
}

impl ShareSettings {
    /// Full URL for a token, without doubled slashes.
    pub fn url_for(&self, token: &str) -> String {
        format!("{}/share/{}", self.base_url.trim_end_matches('/'), token)
    }
}

// =============================================================================
// Estimate Settings
// =============================================================================

/// Estimate defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateSettings {
    /// Language of validation messages returned to callers.
    #[serde(default)]
    pub language: MessageLanguage,

    /// Days an estimate stays valid after it is created. `None` leaves the
    /// validity date off the estimate and the email.
    #[serde(default = "default_validity_days")]
    pub validity_days: Option<i64>,

    /// Rate catalog file. The built-in catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_validity_days() -> Option<i64> {
    Some(30)
}

impl Default for EstimateSettings {
    fn default() -> Self {
        EstimateSettings {
            language: MessageLanguage::default(),
            validity_days: default_validity_days(),
            catalog_path: None,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete estimator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default)]
    pub company: CompanyConfig,

    #[serde(default)]
    pub share: ShareSettings,

    #[serde(default)]
    pub estimate: EstimateSettings,
}

impl EstimatorConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (estimator.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading estimator config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load estimator config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Estimator config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.share.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "share.base_url must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.share.lifetime_days <= 0 {
            return Err(ConfigError::Invalid(
                "share.lifetime_days must be greater than 0".into(),
            ));
        }

        if let Some(days) = self.estimate.validity_days {
            if days <= 0 {
                return Err(ConfigError::Invalid(
                    "estimate.validity_days must be greater than 0".into(),
                ));
            }
        }

        if let Some(email) = &self.company.email {
            validate_email(email)
                .map_err(|e| ConfigError::Invalid(format!("company.email: {}", e)))?;
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`EstimatorConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FIELDFIX_BASE_URL") {
            debug!(url = %url, "Overriding share base URL from environment");
            self.share.base_url = url;
        }

        if let Some(days) = lookup("FIELDFIX_SHARE_DAYS") {
            match days.parse::<i64>() {
                Ok(d) => self.share.lifetime_days = d,
                Err(_) => warn!(value = %days, "Ignoring non-numeric FIELDFIX_SHARE_DAYS"),
            }
        }

        if let Some(language) = lookup("FIELDFIX_LANGUAGE") {
            match language.parse() {
                Ok(parsed) => self.estimate.language = parsed,
                Err(e) => warn!(value = %language, "Ignoring FIELDFIX_LANGUAGE: {}", e),
            }
        }

        if let Some(path) = lookup("FIELDFIX_CATALOG_PATH") {
            self.estimate.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("FIELDFIX_COMPANY_NAME") {
            self.company.name = name;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("kr", "FieldFix", "fieldfix-estimator")
            .map(|dirs| dirs.config_dir().join("estimator.toml"))
    }

    /// Share link lifetime as a `Duration`.
    pub fn share_lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.share.lifetime_days)
    }
}
