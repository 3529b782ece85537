//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use hv_api::{Credentials, HarvestClient};
use hv_core::{ReportSettings, SettingsError};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Account subdomain (`{account}.harvestapp.com`).
    pub account: Option<String>,

    /// Login email.
    pub username: Option<String>,

    pub password: Option<String>,

    /// Overrides the account URL, mainly for testing.
    pub base_url: Option<String>,

    /// IANA zone used to decide what "today" is. Defaults to the system zone.
    pub time_zone: Option<String>,

    /// First day of the week (`monday`, `sun`, or 0-6 with 0 = Sunday).
    pub start_of_week: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("account", &self.account)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("time_zone", &self.time_zone)
            .field("start_of_week", &self.start_of_week)
            .finish()
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (HV_*)
        figment = figment.merge(Env::prefixed("HV_"));

        figment.extract()
    }

    /// Builds API credentials, failing on the first missing field.
    pub fn credentials(&self) -> Result<Credentials> {
        let account = required(self.account.as_deref(), "account")?;
        let username = required(self.username.as_deref(), "username")?;
        let password = required(self.password.as_deref(), "password")?;
        Ok(Credentials::new(account, username, password)?)
    }

    /// Builds the HTTP client for the configured account.
    pub fn client(&self) -> Result<HarvestClient> {
        let credentials = self.credentials()?;
        let client = match &self.base_url {
            Some(url) => HarvestClient::with_base_url(credentials, url.as_str()),
            None => HarvestClient::new(credentials),
        };
        client.context("failed to create API client")
    }

    pub fn report_settings(&self) -> Result<ReportSettings, SettingsError> {
        ReportSettings::parse(self.start_of_week.as_deref(), self.time_zone.as_deref())
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("missing `{field}` in configuration"))
}

/// Returns the platform-specific config directory for hv.
///
/// On Linux: `~/.config/hv`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hv"))
}
