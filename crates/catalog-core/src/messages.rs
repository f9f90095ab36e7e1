//! User-visible strings
//!
//! Every string a frontend shows comes from [`Message`], rendered in the
//! configured [`Locale`]. Persian is the catalog's home language.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Persian (right-to-left)
    #[default]
    Fa,
    /// English
    En,
}

impl FromStr for Locale {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fa" | "fa-ir" => Ok(Locale::Fa),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(CatalogError::InvalidValue(format!("unknown locale {other:?}"))),
        }
    }
}

/// Reason a page shows an empty-state message instead of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The catalog has no series at all
    NoSeriesRegistered,
    /// Manual entry without seasons
    NoSeasonsRegistered,
    /// Manual season (or quality tier) without episodes
    NoEpisodesRegistered,
    /// Remote series directory without folders or videos
    NothingFound,
    /// Remote season directory and its quality folders without videos
    NoEpisodesFound,
    /// The directory index could not be fetched or read
    FetchFailed,
}

/// A localizable message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<'a> {
    Empty(EmptyState),
    SeasonsHeading,
    EpisodesHeading(&'a str),
    SeasonLabel(&'a str),
    Trailer,
    Play,
    Download,
    DownloadSubtitle,
    PlayFirstEpisode,
    OpenDirectLink,
}

impl Message<'_> {
    /// Render the message in `locale`
    pub fn text(&self, locale: Locale) -> String {
        match locale {
            Locale::Fa => self.fa(),
            Locale::En => self.en(),
        }
    }

    fn fa(&self) -> String {
        match self {
            Message::Empty(state) => match state {
                EmptyState::NoSeriesRegistered => "فعلاً سریالی ثبت نشده.",
                EmptyState::NoSeasonsRegistered => "فصلی ثبت نشده.",
                EmptyState::NoEpisodesRegistered => "قسمتی ثبت نشده.",
                EmptyState::NothingFound => "موردی پیدا نشد.",
                EmptyState::NoEpisodesFound => "قسمتی یافت نشد.",
                EmptyState::FetchFailed => "خطا در دریافت اطلاعات.",
            }
            .to_string(),
            Message::SeasonsHeading => "فصل‌ها".to_string(),
            Message::EpisodesHeading(season) => format!("قسمت‌ها - {season}"),
            Message::SeasonLabel(season) => format!("فصل {season}"),
            Message::Trailer => "تریلر".to_string(),
            Message::Play => "پخش".to_string(),
            Message::Download => "دانلود".to_string(),
            Message::DownloadSubtitle => "دانلود زیرنویس".to_string(),
            Message::PlayFirstEpisode => "پخش آنلاین قسمت ۱".to_string(),
            Message::OpenDirectLink => "باز کردن لینک مستقیم ویدیو".to_string(),
        }
    }

    fn en(&self) -> String {
        match self {
            Message::Empty(state) => match state {
                EmptyState::NoSeriesRegistered => "No series registered yet.",
                EmptyState::NoSeasonsRegistered => "No seasons registered.",
                EmptyState::NoEpisodesRegistered => "No episodes registered.",
                EmptyState::NothingFound => "Nothing found.",
                EmptyState::NoEpisodesFound => "No episodes found.",
                EmptyState::FetchFailed => "Failed to fetch data.",
            }
            .to_string(),
            Message::SeasonsHeading => "Seasons".to_string(),
            Message::EpisodesHeading(season) => format!("Episodes - {season}"),
            Message::SeasonLabel(season) => format!("Season {season}"),
            Message::Trailer => "Trailer".to_string(),
            Message::Play => "Play".to_string(),
            Message::Download => "Download".to_string(),
            Message::DownloadSubtitle => "Download subtitle".to_string(),
            Message::PlayFirstEpisode => "Play episode 1 online".to_string(),
            Message::OpenDirectLink => "Open direct video link".to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Fa => "fa",
            Locale::En => "en",
        })
    }
}
