//! Cache configuration.
//!
//! Controls the document cache and the lightweight game projection via the
//! `[cache]` table of `arcadia.toml`.

use std::time::Duration;

use serde::Deserialize;

/// Default time-to-live for cached documents (five minutes).
pub const DEFAULT_TTL_MS: u64 = 300_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum age of a cached document, measured from its last successful load.
    pub ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            ttl_ms: settings.ttl.as_millis().try_into().unwrap_or(u64::MAX),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}
