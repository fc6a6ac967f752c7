use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{OsrsError, Result};
use crate::fetcher::{DEFAULT_BUY_LIMITS_URL, DEFAULT_HISCORES_BASE_URL, DEFAULT_MARKET_SUMMARY_URL};
use crate::storage::DEFAULT_DATABASE_URL;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub hiscores_base_url: String,
    pub market_summary_url: String,
    pub buy_limits_url: String,
    /// `None` disables the on-disk feed cache.
    pub database_url: Option<String>,
    pub cache_ttl: Duration,
    pub request_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hiscores_base_url: DEFAULT_HISCORES_BASE_URL.to_string(),
            market_summary_url: DEFAULT_MARKET_SUMMARY_URL.to_string(),
            buy_limits_url: DEFAULT_BUY_LIMITS_URL.to_string(),
            database_url: Some(DEFAULT_DATABASE_URL.to_string()),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            hiscores_base_url: lookup("HISCORES_BASE_URL").unwrap_or(defaults.hiscores_base_url),
            market_summary_url: lookup("MARKET_SUMMARY_URL").unwrap_or(defaults.market_summary_url),
            buy_limits_url: lookup("BUY_LIMITS_URL").unwrap_or(defaults.buy_limits_url),
            database_url: lookup("DATABASE_URL").or(defaults.database_url),
            cache_ttl: parse_var(&lookup, "CACHE_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            request_delay: parse_var(&lookup, "REQUEST_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_delay),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| OsrsError::ConfigError(format!("{} has invalid value '{}'", key, raw)))
        })
        .transpose()
}
