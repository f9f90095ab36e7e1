//! Navigation between catalog pages
//!
//! Pages exchange the series, season, episode and playback source through
//! URL query parameters. Values are passed through unchanged, only encoded.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Series list page
pub const SERIES_PAGE: &str = "series.html";
/// Season list / episode list page
pub const SEASON_PAGE: &str = "season.html";
/// Playback page
pub const EPISODE_PAGE: &str = "episode.html";

/// Where a link leads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum NavTarget {
    /// All series
    SeriesList,
    /// Seasons of a series
    Series { series: String },
    /// Episodes of a season
    Season { series: String, season: String },
    /// Playback of one file
    Episode {
        series: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        season: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        episode: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
    },
}

impl NavTarget {
    /// Link to the seasons of `series`
    pub fn series(series: &str) -> Self {
        NavTarget::Series {
            series: series.to_string(),
        }
    }

    /// Link to the episodes of `season`
    pub fn season(series: &str, season: &str) -> Self {
        NavTarget::Season {
            series: series.to_string(),
            season: season.to_string(),
        }
    }

    /// Link to the playback page; empty parts are left out of the URL
    pub fn episode(series: &str, season: &str, episode: &str, src: &str) -> Self {
        NavTarget::Episode {
            series: series.to_string(),
            season: non_empty(season),
            episode: non_empty(episode),
            src: non_empty(src),
        }
    }

    /// Build the page URL relative to `base`
    ///
    /// # Examples
    /// ```
    /// use catalog_core::nav::NavTarget;
    /// use url::Url;
    ///
    /// let base = Url::parse("http://localhost/site/").unwrap();
    /// let url = NavTarget::season("Serie3/Show", "S 01").to_url(&base).unwrap();
    /// assert_eq!(url.as_str(), "http://localhost/site/season.html?series=Serie3%2FShow&season=S+01");
    /// ```
    pub fn to_url(&self, base: &Url) -> Result<Url> {
        let url = match self {
            NavTarget::SeriesList => base.join(SERIES_PAGE)?,
            NavTarget::Series { series } => {
                let mut url = base.join(SEASON_PAGE)?;
                url.query_pairs_mut().append_pair("series", series);
                url
            }
            NavTarget::Season { series, season } => {
                let mut url = base.join(SEASON_PAGE)?;
                url.query_pairs_mut()
                    .append_pair("series", series)
                    .append_pair("season", season);
                url
            }
            NavTarget::Episode {
                series,
                season,
                episode,
                src,
            } => {
                let mut url = base.join(EPISODE_PAGE)?;
                {
                    let mut query = url.query_pairs_mut();
                    query.append_pair("series", series);
                    if let Some(season) = season {
                        query.append_pair("season", season);
                    }
                    if let Some(episode) = episode {
                        query.append_pair("episode", episode);
                    }
                    if let Some(src) = src {
                        query.append_pair("src", src);
                    }
                }
                url
            }
        };
        Ok(url)
    }

    /// Read a target back from a page URL
    ///
    /// Returns `None` for unknown pages and for season pages without a
    /// series. A season page without a season is the series' season list.
    pub fn from_url(url: &Url) -> Option<Self> {
        let page = url.path_segments()?.next_back()?;
        let param = |name: &str| -> Option<String> {
            url.query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty())
        };

        match page {
            SERIES_PAGE => Some(NavTarget::SeriesList),
            SEASON_PAGE => {
                let series = param("series")?;
                Some(match param("season") {
                    Some(season) => NavTarget::Season { series, season },
                    None => NavTarget::Series { series },
                })
            }
            EPISODE_PAGE => Some(NavTarget::Episode {
                series: param("series").unwrap_or_default(),
                season: param("season"),
                episode: param("episode"),
                src: param("src"),
            }),
            _ => None,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
