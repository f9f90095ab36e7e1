//! Catalog resolution
//!
//! Decides for a series (and optionally a season) whether the manual entry or
//! the remote directory index is the source, and turns that source into a
//! [`SeasonPage`]. Fetches run one after another; failures of the main
//! listing become an empty state instead of an error.

use std::future::Future;

use tracing::{debug, warn};

use crate::client::CatalogClient;
use crate::catalog::CatalogSnapshot;
use crate::config::with_trailing_slash;
use crate::error::{CatalogError, Result};
use crate::messages::EmptyState;
use crate::parser::{is_folder, is_trailer, is_video};
use crate::types::ManualEntry;
use crate::view::{EpisodeList, Entry, QualityTabs, SeasonLink, SeasonList, SeasonPage, Trailer};

/// Quality folders probed inside a season directory without root videos
pub const EPISODE_TIERS: [&str; 2] = ["720p", "480p"];

/// Try `candidates` in order and return the first one whose probe yields a
/// non-empty list, together with that list.
///
/// A failed probe counts as empty and the next candidate is tried.
///
/// # Examples
/// ```
/// use catalog_core::resolver::first_non_empty;
///
/// # tokio_test_block(async {
/// let hit = first_non_empty(&["720p", "480p"], |tier| async move {
///     Ok::<_, catalog_core::CatalogError>(if tier == "480p" { vec![1] } else { vec![] })
/// })
/// .await;
/// assert_eq!(hit, Some(("480p", vec![1])));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
pub async fn first_non_empty<C, T, F, Fut>(candidates: &[C], mut probe: F) -> Option<(C, Vec<T>)>
where
    C: Copy + std::fmt::Debug,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    for &candidate in candidates {
        match probe(candidate).await {
            Ok(items) if !items.is_empty() => return Some((candidate, items)),
            Ok(_) => debug!(?candidate, "candidate empty"),
            Err(err) => debug!(?candidate, error = %err, "candidate failed"),
        }
    }
    None
}

/// Resolves series and seasons against a catalog snapshot and the remote
/// origin.
///
/// # Example
/// ```no_run
/// use catalog_core::{CatalogClient, CatalogResolver, CatalogSnapshot};
///
/// # async fn example() -> Result<(), catalog_core::CatalogError> {
/// let resolver = CatalogResolver::new(CatalogClient::new()?, "http://files.example/");
/// let snapshot = CatalogSnapshot::seeded();
/// let page = resolver.resolve(&snapshot, "Serie3/Show", Some("S01")).await?;
/// # Ok(())
/// # }
/// ```
pub struct CatalogResolver {
    client: CatalogClient,
    origin: String,
}

impl CatalogResolver {
    /// Create a resolver for series directories under `origin`
    pub fn new(client: CatalogClient, origin: impl AsRef<str>) -> Self {
        Self {
            client,
            origin: with_trailing_slash(origin.as_ref()),
        }
    }

    /// Directory of a series; the id is used verbatim as a path
    pub fn series_url(&self, series_id: &str) -> String {
        format!("{}{}/", self.origin, series_id.trim_matches('/'))
    }

    /// Directory of a season; the season id is encoded as one segment
    pub fn season_url(&self, series_id: &str, season_id: &str) -> String {
        format!(
            "{}{}/",
            self.series_url(series_id),
            urlencoding::encode(season_id)
        )
    }

    /// Resolve what the season page shows for `series_id` and `season_id`.
    ///
    /// A manual entry for the series is used exclusively; otherwise the
    /// remote directory index is scraped. An empty `season_id` is the same as
    /// none.
    ///
    /// # Errors
    /// - `CatalogError::InvalidId` if `series_id` is empty
    ///
    /// Fetch failures never surface as errors.
    pub async fn resolve(
        &self,
        snapshot: &CatalogSnapshot,
        series_id: &str,
        season_id: Option<&str>,
    ) -> Result<SeasonPage> {
        if series_id.trim_matches('/').is_empty() {
            return Err(CatalogError::InvalidId(series_id.to_string()));
        }
        let season_id = season_id.filter(|s| !s.is_empty());

        let page = match (snapshot.manual(series_id), season_id) {
            (Some(manual), None) => self.manual_seasons(series_id, manual).await,
            (Some(manual), Some(season)) => manual_episodes(series_id, season, manual),
            (None, None) => self.remote_seasons(series_id).await,
            (None, Some(season)) => self.remote_episodes(series_id, season).await,
        };
        Ok(page)
    }

    async fn manual_seasons(&self, series_id: &str, manual: &ManualEntry) -> SeasonPage {
        if manual.seasons.is_empty() {
            return SeasonPage::empty(EmptyState::NoSeasonsRegistered);
        }

        let seasons = manual
            .seasons
            .iter()
            .map(|season| SeasonLink::new(series_id, season))
            .collect();

        // The trailer still lives on the remote origin
        let trailer = self.probe_trailer(series_id).await;

        SeasonPage::Seasons(SeasonList {
            seasons,
            trailer,
            standalone: Vec::new(),
        })
    }

    async fn remote_seasons(&self, series_id: &str) -> SeasonPage {
        let series_url = self.series_url(series_id);
        let items = match self.client.list_directory(&series_url).await {
            Ok(items) => items,
            Err(err) => {
                warn!(url = %series_url, error = %err, "failed to list series directory");
                return SeasonPage::empty(EmptyState::FetchFailed);
            }
        };

        let folders: Vec<&String> = items.iter().filter(|h| is_folder(h)).collect();
        let videos: Vec<&String> = items.iter().filter(|h| is_video(h)).collect();
        if folders.is_empty() && videos.is_empty() {
            return SeasonPage::empty(EmptyState::NothingFound);
        }

        let trailer = items
            .iter()
            .find(|h| is_trailer(h))
            .map(|file| Trailer::new(series_id, &series_url, file));

        SeasonPage::Seasons(SeasonList {
            seasons: folders
                .iter()
                .map(|folder| SeasonLink::from_folder(series_id, folder))
                .collect(),
            trailer,
            standalone: videos
                .iter()
                .filter(|file| !is_trailer_name(file))
                .map(|file| Entry::remote_video(series_id, "", &series_url, file))
                .collect(),
        })
    }

    async fn remote_episodes(&self, series_id: &str, season_id: &str) -> SeasonPage {
        let season_url = self.season_url(series_id, season_id);
        let items = match self.client.list_directory(&season_url).await {
            Ok(items) => items,
            Err(err) => {
                warn!(url = %season_url, error = %err, "failed to list season directory");
                return SeasonPage::empty(EmptyState::FetchFailed);
            }
        };

        let mut base = season_url.clone();
        let mut episodes = videos_of(items);

        if episodes.is_empty() {
            let probed = first_non_empty(&EPISODE_TIERS, |tier| {
                let url = format!("{season_url}{tier}/");
                async move { self.client.list_directory(&url).await.map(videos_of) }
            })
            .await;

            if let Some((tier, files)) = probed {
                debug!(tier, "episodes found in quality folder");
                base = format!("{season_url}{tier}/");
                episodes = files;
            }
        }

        if episodes.is_empty() {
            return SeasonPage::empty(EmptyState::NoEpisodesFound);
        }

        SeasonPage::Episodes {
            list: EpisodeList::remote(series_id, season_id, &base, &episodes),
        }
    }

    /// Best-effort lookup of a trailer in the series root
    async fn probe_trailer(&self, series_id: &str) -> Option<Trailer> {
        let series_url = self.series_url(series_id);
        match self.client.list_directory(&series_url).await {
            Ok(items) => items
                .iter()
                .find(|h| is_trailer(h))
                .map(|file| Trailer::new(series_id, &series_url, file)),
            Err(err) => {
                debug!(url = %series_url, error = %err, "trailer probe failed");
                None
            }
        }
    }
}

fn manual_episodes(series_id: &str, season_id: &str, manual: &ManualEntry) -> SeasonPage {
    if let Some(tabs) = QualityTabs::new(series_id, season_id, manual.quality_tiers(season_id)) {
        return SeasonPage::Tabbed(tabs);
    }

    SeasonPage::Episodes {
        list: EpisodeList::manual(series_id, season_id, manual.flat_episodes(season_id), true),
    }
}

fn videos_of(items: Vec<String>) -> Vec<String> {
    items.into_iter().filter(|h| is_video(h)).collect()
}

/// Root videos with "trailer" anywhere in the name are not standalone entries
fn is_trailer_name(file: &str) -> bool {
    file.to_ascii_lowercase().contains("trailer")
}
