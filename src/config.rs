use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use crate::models::Interval;

pub const DEFAULT_BASE_URL: &str = "https://api.coincap.io/v2";
pub const DEFAULT_RELAY_PREFIX: &str = "https://corsproxy.io/?";
pub const DEFAULT_ASSET_LIMIT: NonZeroU32 = match NonZeroU32::new(20) {
    Some(limit) => limit,
    None => unreachable!(),
};
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for [`crate::services::asset_provider::AssetDataProvider`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Prepended to the full upstream URL for the fallback attempt.
    /// `None` disables the relay hop.
    pub relay_prefix: Option<String>,
    /// Replace terminal failures with synthetic data instead of erroring.
    pub degrade_on_failure: bool,
    pub default_limit: NonZeroU32,
    pub default_interval: Interval,
    /// Applied to each transport attempt separately.
    pub request_timeout: Duration,
    /// Fixed seed for synthetic history; entropy when unset.
    pub synthetic_seed: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            relay_prefix: Some(DEFAULT_RELAY_PREFIX.to_string()),
            degrade_on_failure: true,
            default_limit: DEFAULT_ASSET_LIMIT,
            default_interval: Interval::D1,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            synthetic_seed: None,
        }
    }
}

impl ProviderConfig {
    /// Strict variant: one direct attempt, errors propagate.
    pub fn strict() -> Self {
        Self {
            relay_prefix: None,
            degrade_on_failure: false,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_relay_prefix(mut self, relay_prefix: Option<String>) -> Self {
        self.relay_prefix = relay_prefix;
        self
    }

    pub fn with_degrade_on_failure(mut self, degrade: bool) -> Self {
        self.degrade_on_failure = degrade;
        self
    }

    pub fn with_default_limit(mut self, limit: NonZeroU32) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_default_interval(mut self, interval: Interval) -> Self {
        self.default_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_synthetic_seed(mut self, seed: u64) -> Self {
        self.synthetic_seed = Some(seed);
        self
    }

    /// Build from environment variables (after loading `.env`), falling back
    /// to defaults for anything missing or unparseable.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(base_url) = env::var("COINCAP_BASE_URL") {
            config = config.with_base_url(base_url);
        }

        if let Ok(prefix) = env::var("COINCAP_RELAY_PREFIX") {
            config.relay_prefix = if prefix.trim().is_empty() {
                None
            } else {
                Some(prefix)
            };
        }

        if let Some(degrade) = parse_env::<bool>("TRACKER_DEGRADE_ON_FAILURE") {
            config.degrade_on_failure = degrade;
        }

        if let Some(limit) = parse_env::<NonZeroU32>("TRACKER_ASSET_LIMIT") {
            config.default_limit = limit;
        }

        if let Ok(interval) = env::var("TRACKER_HISTORY_INTERVAL") {
            config.default_interval = interval_from_text(&interval);
        }

        if let Some(secs) = parse_env::<u64>("TRACKER_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }

        config.synthetic_seed = parse_env::<u64>("TRACKER_SYNTHETIC_SEED");

        config
    }
}

fn interval_from_text(raw: &str) -> Interval {
    raw.trim().parse().unwrap_or_default()
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: '{}'", key, raw);
            None
        }
    }
}
