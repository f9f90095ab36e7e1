//! Rendering plans produced by the resolver
//!
//! These types describe what a page shows, independent of how a frontend
//! draws it. All of them serialize to JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::messages::EmptyState;
use crate::nav::NavTarget;
use crate::parser::{episode_id, folder_name};
use crate::types::{Episode, Quality, Series};

/// Something the user can do with an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Open the playback page
    Play { target: NavTarget },
    /// Open the file directly
    Download { href: String, subtitle: bool },
}

/// One row of a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub label: String,
    pub actions: Vec<Action>,
}

impl Entry {
    /// Playback target, if the entry can be played
    pub fn play_target(&self) -> Option<&NavTarget> {
        self.actions.iter().find_map(|action| match action {
            Action::Play { target } => Some(target),
            Action::Download { .. } => None,
        })
    }

    /// Whether this entry has a download action
    pub fn has_download(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, Action::Download { .. }))
    }

    /// Row for a file found in a remote directory
    pub fn remote_video(series: &str, season: &str, base: &str, file: &str) -> Self {
        let id = episode_id(file);
        let src = format!("{base}{file}");
        Entry {
            actions: vec![Action::Play {
                target: NavTarget::episode(series, season, &id, &src),
            }],
            label: id,
        }
    }

    /// Row for a manually registered episode; non-playable tiers only
    /// offer a download
    pub fn manual_episode(series: &str, season: &str, episode: &Episode, playable: bool) -> Self {
        let mut actions = Vec::new();
        if let Some(src) = episode.source() {
            if playable {
                actions.push(Action::Play {
                    target: NavTarget::episode(series, season, episode.label(), src),
                });
            }
            actions.push(Action::Download {
                href: src.to_string(),
                subtitle: !playable,
            });
        }
        Entry {
            label: episode.label().to_string(),
            actions,
        }
    }
}

/// The trailer row shown under a season list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trailer {
    pub src: String,
    pub play: NavTarget,
}

impl Trailer {
    /// Trailer `file` found in the series directory `series_url`
    pub fn new(series: &str, series_url: &str, file: &str) -> Self {
        let src = format!("{series_url}{file}");
        Trailer {
            play: NavTarget::episode(series, "", "Trailer", &src),
            src,
        }
    }
}

/// Link to a season
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonLink {
    pub id: String,
    pub target: NavTarget,
}

impl SeasonLink {
    pub fn new(series: &str, season: &str) -> Self {
        SeasonLink {
            id: season.to_string(),
            target: NavTarget::season(series, season),
        }
    }

    /// Link for a folder entry of a directory index
    pub fn from_folder(series: &str, folder: &str) -> Self {
        Self::new(series, &folder_name(folder))
    }
}

/// Season list of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonList {
    pub seasons: Vec<SeasonLink>,
    /// Trailer row, shown after the seasons
    pub trailer: Option<Trailer>,
    /// Videos at the series root that are not the trailer
    pub standalone: Vec<Entry>,
}

/// Episodes of a season, or why there are none
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EpisodeList {
    Items {
        /// "Play episode 1" shortcut
        play_first: Option<NavTarget>,
        entries: Vec<Entry>,
    },
    Empty { state: EmptyState },
}

impl EpisodeList {
    /// List of manually registered episodes
    pub fn manual(series: &str, season: &str, episodes: &[Episode], playable: bool) -> Self {
        let Some(first) = episodes.first() else {
            return EpisodeList::Empty {
                state: EmptyState::NoEpisodesRegistered,
            };
        };

        let play_first = if playable {
            first.source().map(|src| {
                let id = if first.id.is_empty() { "E01" } else { first.id.as_str() };
                NavTarget::episode(series, season, id, src)
            })
        } else {
            None
        };

        EpisodeList::Items {
            play_first,
            entries: episodes
                .iter()
                .map(|episode| Entry::manual_episode(series, season, episode, playable))
                .collect(),
        }
    }

    /// List of files found under `base`
    pub fn remote(series: &str, season: &str, base: &str, files: &[String]) -> Self {
        let entries: Vec<Entry> = files
            .iter()
            .map(|file| Entry::remote_video(series, season, base, file))
            .collect();

        match entries.first().and_then(Entry::play_target).cloned() {
            Some(first) => EpisodeList::Items {
                play_first: Some(first),
                entries,
            },
            None => EpisodeList::Empty {
                state: EmptyState::NoEpisodesFound,
            },
        }
    }

    /// Rows of the list, empty for an empty state
    pub fn entries(&self) -> &[Entry] {
        match self {
            EpisodeList::Items { entries, .. } => entries,
            EpisodeList::Empty { .. } => &[],
        }
    }
}

/// Episode list split into quality tabs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityTabs {
    /// Tabs in priority order, only non-empty tiers
    pub tabs: Vec<Quality>,
    pub selected: Quality,
    /// List for the selected tab
    pub list: EpisodeList,
    #[serde(skip)]
    tiers: BTreeMap<Quality, Vec<Episode>>,
    #[serde(skip)]
    series: String,
    #[serde(skip)]
    season: String,
}

impl QualityTabs {
    /// Tabs over `tiers`, `None` when every tier is empty
    pub fn new(series: &str, season: &str, tiers: Vec<(Quality, Vec<Episode>)>) -> Option<Self> {
        let tiers: BTreeMap<Quality, Vec<Episode>> = tiers
            .into_iter()
            .filter(|(_, episodes)| !episodes.is_empty())
            .collect();
        if tiers.is_empty() {
            return None;
        }

        let mut tabs = QualityTabs {
            tabs: tiers.keys().copied().collect(),
            selected: Quality::DEFAULT,
            list: EpisodeList::Empty {
                state: EmptyState::NoEpisodesRegistered,
            },
            tiers,
            series: series.to_string(),
            season: season.to_string(),
        };
        tabs.select(Quality::DEFAULT);
        Some(tabs)
    }

    /// Switch to `quality` and rebuild the list for it
    pub fn select(&mut self, quality: Quality) {
        self.selected = quality;
        let episodes = self.tiers.get(&quality).map(Vec::as_slice).unwrap_or_default();
        self.list = EpisodeList::manual(&self.series, &self.season, episodes, quality.is_playable());
    }
}

/// What the season page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum SeasonPage {
    Seasons(SeasonList),
    Episodes { list: EpisodeList },
    Tabbed(QualityTabs),
    Empty { state: EmptyState },
}

impl SeasonPage {
    pub fn empty(state: EmptyState) -> Self {
        SeasonPage::Empty { state }
    }
}

/// A card on the series list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesCard {
    pub title: String,
    pub cover: String,
    pub target: NavTarget,
}

impl From<&Series> for SeriesCard {
    fn from(series: &Series) -> Self {
        SeriesCard {
            title: series.display_title().to_string(),
            cover: series.cover.clone(),
            target: NavTarget::series(&series.id),
        }
    }
}

/// What the series list page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum SeriesPage {
    Cards { cards: Vec<SeriesCard> },
    Empty { state: EmptyState },
}

impl SeriesPage {
    pub fn from_series(series: &[Series]) -> Self {
        if series.is_empty() {
            SeriesPage::Empty {
                state: EmptyState::NoSeriesRegistered,
            }
        } else {
            SeriesPage::Cards {
                cards: series.iter().map(SeriesCard::from).collect(),
            }
        }
    }
}
