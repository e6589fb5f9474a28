//! Document cache.
//!
//! Parsed JSON documents are kept in memory for a fixed time-to-live measured
//! from their last successful load. A second slot holds the lightweight game
//! projection derived from `games.json`; both are dropped together by
//! [`DocumentCache::clear`].
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! ttl_ms = 300000
//! ```
//!
//! Each process owns its own cache. A save on one instance becomes visible to
//! other instances only once their entries expire, so cross-instance staleness
//! is bounded by the TTL.

mod config;
mod store;

pub use config::{CacheConfig, DEFAULT_TTL_MS};
pub use store::DocumentCache;
