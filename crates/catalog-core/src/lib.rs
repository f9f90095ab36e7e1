//! Series Catalog Core Library
//!
//! This crate provides the catalog logic of a video series browser that
//! either uses manually registered data or scrapes Apache-style directory
//! indexes on a remote file host.
//!
//! # Features
//! - Parse directory index pages into entry names
//! - Resolve a series or season into seasons, episodes or quality tabs
//! - Load a catalog document and swap it in atomically
//! - Build and read navigation URLs between pages
//! - Rate-limited HTTP client with retries

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod nav;
pub mod parser;
pub mod playback;
pub mod resolver;
pub mod types;
pub mod view;

// Re-export main types for convenience
pub use catalog::{CatalogSnapshot, CatalogStore};
pub use client::{CatalogClient, ClientConfig, RateLimiter};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use messages::{EmptyState, Locale, Message};
pub use nav::NavTarget;
pub use playback::EpisodePage;
pub use resolver::CatalogResolver;
pub use types::{Episode, ManualEntry, Quality, Series};
pub use view::{Action, Entry, EpisodeList, QualityTabs, SeasonList, SeasonPage, SeriesPage};
