//! Configuration loading and validation.
//!
//! Every setting comes from an environment variable with a default.
//! Unparseable numbers fall back to the default; [`Config::validate`] then
//! checks ranges and reports every problem at once.

use std::time::Duration;

use crate::error::{StatusError, StatusResult};

pub const DEFAULT_API_BASE_URL: &str = "https://www.f5cloudstatus.com/api/v2";
pub const DEFAULT_SCRAPER_BASE_URL: &str = "https://www.f5cloudstatus.com";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub headless: bool,
    /// Use the browser when the API fails.
    pub fallback_enabled: bool,
}

/// Per-entity cache TTLs, in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub ttl_status_ms: u64,
    pub ttl_components_ms: u64,
    pub ttl_incidents_ms: u64,
    pub ttl_maintenance_ms: u64,
    pub sweep_interval_ms: u64,
}

impl CacheConfig {
    pub fn ttl_status(&self) -> Duration {
        Duration::from_millis(self.ttl_status_ms)
    }

    pub fn ttl_components(&self) -> Duration {
        Duration::from_millis(self.ttl_components_ms)
    }

    pub fn ttl_incidents(&self) -> Duration {
        Duration::from_millis(self.ttl_incidents_ms)
    }

    pub fn ttl_maintenance(&self) -> Duration {
        Duration::from_millis(self.ttl_maintenance_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub scraper: ScraperConfig,
    pub cache: CacheConfig,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                timeout_ms: 10_000,
                retry_attempts: 3,
                retry_delay_ms: 1_000,
            },
            scraper: ScraperConfig {
                base_url: DEFAULT_SCRAPER_BASE_URL.to_string(),
                timeout_ms: 30_000,
                headless: true,
                fallback_enabled: true,
            },
            cache: CacheConfig {
                ttl_status_ms: 30_000,
                ttl_components_ms: 60_000,
                ttl_incidents_ms: 120_000,
                ttl_maintenance_ms: 300_000,
                sweep_interval_ms: 60_000,
            },
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let string = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let number = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        Self {
            api: ApiConfig {
                base_url: string("API_BASE_URL", &defaults.api.base_url),
                timeout_ms: number("API_TIMEOUT", defaults.api.timeout_ms),
                retry_attempts: lookup("API_RETRY_ATTEMPTS")
                    .and_then(|v| v.trim().parse::<u32>().ok())
                    .unwrap_or(defaults.api.retry_attempts),
                retry_delay_ms: number("API_RETRY_DELAY", defaults.api.retry_delay_ms),
            },
            scraper: ScraperConfig {
                base_url: string("SCRAPER_BASE_URL", &defaults.scraper.base_url),
                timeout_ms: number("SCRAPER_TIMEOUT", defaults.scraper.timeout_ms),
                headless: flag("SCRAPER_HEADLESS", defaults.scraper.headless),
                fallback_enabled: flag("SCRAPER_FALLBACK", defaults.scraper.fallback_enabled),
            },
            cache: CacheConfig {
                ttl_status_ms: number("CACHE_TTL_STATUS", defaults.cache.ttl_status_ms),
                ttl_components_ms: number(
                    "CACHE_TTL_COMPONENTS",
                    defaults.cache.ttl_components_ms,
                ),
                ttl_incidents_ms: number("CACHE_TTL_INCIDENTS", defaults.cache.ttl_incidents_ms),
                ttl_maintenance_ms: number(
                    "CACHE_TTL_MAINTENANCE",
                    defaults.cache.ttl_maintenance_ms,
                ),
                sweep_interval_ms: number(
                    "CACHE_SWEEP_INTERVAL",
                    defaults.cache.sweep_interval_ms,
                ),
            },
            log_level: string("LOG_LEVEL", &defaults.log_level).to_lowercase(),
        }
    }

    /// Check URLs and ranges, collecting every problem found.
    pub fn validate(&self) -> StatusResult<()> {
        let mut errors = Vec::new();

        if url::Url::parse(&self.api.base_url).is_err() {
            errors.push(format!("Invalid API_BASE_URL: {}", self.api.base_url));
        }
        if url::Url::parse(&self.scraper.base_url).is_err() {
            errors.push(format!("Invalid SCRAPER_BASE_URL: {}", self.scraper.base_url));
        }

        let positive = [
            ("API_TIMEOUT", self.api.timeout_ms),
            ("SCRAPER_TIMEOUT", self.scraper.timeout_ms),
            ("CACHE_TTL_STATUS", self.cache.ttl_status_ms),
            ("CACHE_TTL_COMPONENTS", self.cache.ttl_components_ms),
            ("CACHE_TTL_INCIDENTS", self.cache.ttl_incidents_ms),
            ("CACHE_TTL_MAINTENANCE", self.cache.ttl_maintenance_ms),
            ("CACHE_SWEEP_INTERVAL", self.cache.sweep_interval_ms),
        ];
        for (name, value) in positive {
            if value == 0 {
                errors.push(format!("{name} must be positive"));
            }
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            errors.push(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StatusError::Configuration(errors))
        }
    }
}
