//! Startup settings read from the environment (and `.env` when present)

use coinchart_core::{Error, Result};
use coinchart_networking::ClientConfig;
use std::time::Duration;

pub const ENV_API_BASE: &str = "COINCHART_API_BASE";
pub const ENV_DEFAULT_COIN: &str = "COINCHART_DEFAULT_COIN";
pub const ENV_TIMEOUT_SECS: &str = "COINCHART_TIMEOUT_SECS";
pub const ENV_MARKETS_PER_PAGE: &str = "COINCHART_MARKETS_PER_PAGE";
pub const ENV_DARK_MODE: &str = "COINCHART_DARK_MODE";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base: String,
    pub default_coin: String,
    pub timeout: Duration,
    pub markets_per_page: u32,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            api_base: client.base_url,
            default_coin: "bitcoin".to_string(),
            timeout: client.timeout,
            markets_per_page: client.per_page,
            dark_mode: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(base) = get(ENV_API_BASE) {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(Error::ConfigError(format!(
                    "{} must be an http(s) URL, got '{}'",
                    ENV_API_BASE, base
                )));
            }
            settings.api_base = base;
        }

        if let Some(coin) = get(ENV_DEFAULT_COIN) {
            settings.default_coin = coin.to_lowercase();
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = parse(ENV_TIMEOUT_SECS, &secs)?;
            if secs == 0 {
                return Err(Error::ConfigError(format!("{} must be positive", ENV_TIMEOUT_SECS)));
            }
            settings.timeout = Duration::from_secs(secs);
        }

        if let Some(per_page) = get(ENV_MARKETS_PER_PAGE) {
            let per_page: u32 = parse(ENV_MARKETS_PER_PAGE, &per_page)?;
            if !(1..=250).contains(&per_page) {
                return Err(Error::ConfigError(format!(
                    "{} must be between 1 and 250, got {}",
                    ENV_MARKETS_PER_PAGE, per_page
                )));
            }
            settings.markets_per_page = per_page;
        }

        if let Some(dark) = get(ENV_DARK_MODE) {
            settings.dark_mode = parse_bool(ENV_DARK_MODE, &dark)?;
        }

        Ok(settings)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base.clone(),
            timeout: self.timeout,
            per_page: self.markets_per_page,
            ..ClientConfig::default()
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::ConfigError(format!("invalid value for {}: '{}'", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::ConfigError(format!("invalid value for {}: '{}'", key, value))),
    }
}
