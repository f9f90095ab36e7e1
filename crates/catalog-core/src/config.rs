//! Catalog configuration
//!
//! Deserializable from any serde format; missing fields take their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::ClientConfig;
use crate::error::Result;
use crate::messages::Locale;

/// Remote file host serving the directory indexes
pub const DEFAULT_ORIGIN: &str = "http://dl40.zedschibebinm3.sbs/";

/// Base URL the navigation pages live under
pub const DEFAULT_SITE_BASE: &str = "http://localhost/";

/// Wait for the catalog document before showing the seeded catalog
pub const DEFAULT_GRACE_MS: u64 = 2000;

/// Configuration for browsing a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Origin that series ids are resolved against
    pub origin: String,
    /// Base URL for navigation links
    pub site_base: String,
    /// Catalog document overriding the seeded series and manual entries
    pub catalog_url: Option<String>,
    /// Grace wait for the catalog document in milliseconds
    pub grace_ms: u64,
    /// Language of user-visible messages
    pub locale: Locale,
    /// HTTP client settings
    pub client: ClientConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            site_base: DEFAULT_SITE_BASE.to_string(),
            catalog_url: None,
            grace_ms: DEFAULT_GRACE_MS,
            locale: Locale::default(),
            client: ClientConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Grace wait as a duration
    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    /// Parsed site base, always ending in `/` so pages join under it
    pub fn site_base_url(&self) -> Result<Url> {
        Ok(Url::parse(&with_trailing_slash(&self.site_base))?)
    }

    /// Origin, always ending in `/`
    pub fn origin(&self) -> String {
        with_trailing_slash(&self.origin)
    }
}

pub(crate) fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
