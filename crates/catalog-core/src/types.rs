//! Data types for the catalog
//!
//! This module contains the catalog data model as it appears in the catalog
//! document. All types implement Serialize and Deserialize for JSON
//! compatibility with that document.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CatalogError;

/// A browsable series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Path-like key, also the directory under the remote origin
    pub id: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Cover image URL
    #[serde(default)]
    pub cover: String,
}

impl Series {
    /// Title to show, falling back to the id when no title is set
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// A manually registered episode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Display identifier (e.g. "E01")
    #[serde(default)]
    pub id: String,
    /// Playback or download URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl Episode {
    /// Label for lists; unnamed episodes show as "Episode"
    pub fn label(&self) -> &str {
        if self.id.is_empty() {
            "Episode"
        } else {
            &self.id
        }
    }

    /// Source URL, if one is set and non-empty
    pub fn source(&self) -> Option<&str> {
        self.src.as_deref().filter(|s| !s.is_empty())
    }
}

/// Manual override for one series
///
/// Either `episodes` (flat per season) or `episodes_by_quality` (per season,
/// then per quality key) may be filled; quality data wins when it has any
/// recognized non-empty tier.
///
/// Fields that are `null` or of the wrong shape decode as empty, so one
/// sloppy field never costs the series its manual entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManualEntry {
    /// Season identifiers in display order
    #[serde(deserialize_with = "or_default")]
    pub seasons: Vec<String>,
    /// Episodes per season, no quality concept
    #[serde(deserialize_with = "episode_lists")]
    pub episodes: BTreeMap<String, Vec<Episode>>,
    /// Episodes per season and quality key
    #[serde(deserialize_with = "episode_lists_by_quality")]
    pub episodes_by_quality: BTreeMap<String, BTreeMap<String, Vec<Episode>>>,
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Map of key to episode list; each list decodes on its own
fn lists_of(value: Value) -> BTreeMap<String, Vec<Episode>> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, list)| (key, serde_json::from_value(list).unwrap_or_default()))
            .collect(),
        _ => BTreeMap::new(),
    }
}

fn episode_lists<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<Episode>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lists_of(Value::deserialize(deserializer)?))
}

fn episode_lists_by_quality<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, BTreeMap<String, Vec<Episode>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(season, tiers)| (season, lists_of(tiers)))
            .collect(),
        _ => BTreeMap::new(),
    })
}

impl ManualEntry {
    /// Recognized, non-empty quality tiers of a season in priority order
    pub fn quality_tiers(&self, season_id: &str) -> Vec<(Quality, Vec<Episode>)> {
        let Some(by_quality) = self.episodes_by_quality.get(season_id) else {
            return Vec::new();
        };

        Quality::PRIORITY
            .iter()
            .filter_map(|q| {
                by_quality
                    .get(q.key())
                    .filter(|eps| !eps.is_empty())
                    .map(|eps| (*q, eps.clone()))
            })
            .collect()
    }

    /// Flat episode list of a season, empty if none is registered
    pub fn flat_episodes(&self, season_id: &str) -> &[Episode] {
        self.episodes
            .get(season_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Quality tier of manually registered episodes
///
/// Declaration order is the tab priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    Dub,
    /// Subtitle files, downloadable but not playable
    Sub,
}

impl Quality {
    /// Tab priority order
    pub const PRIORITY: [Quality; 5] = [
        Quality::P1080,
        Quality::P720,
        Quality::P480,
        Quality::Dub,
        Quality::Sub,
    ];

    /// Tier selected when tabs are first shown
    pub const DEFAULT: Quality = Quality::P1080;

    /// Key used in the catalog document
    pub fn key(self) -> &'static str {
        match self {
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::Dub => "Dub",
            Quality::Sub => "Sub",
        }
    }

    /// Whether entries of this tier can be played
    pub fn is_playable(self) -> bool {
        self != Quality::Sub
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Quality {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quality::PRIORITY
            .into_iter()
            .find(|q| q.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::InvalidValue(format!("unknown quality {s:?}")))
    }
}
