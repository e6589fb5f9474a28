//! Arcadia: a server-rendered browser-games portal.
//!
//! Content lives in JSON documents on local disk. Reads go through a TTL cache
//! that falls back to compiled-in defaults, and every page carries SEO metadata
//! plus Schema.org JSON-LD generated from the site's SEO settings.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
