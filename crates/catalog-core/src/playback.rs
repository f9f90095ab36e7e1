//! Episode page model
//!
//! The playback page only passes its parameters through: a title built from
//! the series, season and episode, the source to play, and a direct link
//! offered once playback fails.

use serde::Serialize;
use url::Url;

use crate::nav::NavTarget;

/// Direct link shown when the player cannot play the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectLink {
    pub href: String,
}

/// State of the episode page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodePage {
    /// Non-empty parts of series / season / episode
    pub title: Option<String>,
    pub src: Option<String>,
    fallback: Option<DirectLink>,
}

impl EpisodePage {
    pub fn new(series: &str, season: Option<&str>, episode: Option<&str>, src: Option<&str>) -> Self {
        let parts: Vec<&str> = [Some(series), season, episode]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        Self {
            title: (!parts.is_empty()).then(|| parts.join(" / ")),
            src: src.filter(|s| !s.is_empty()).map(str::to_string),
            fallback: None,
        }
    }

    /// Page for a playback target; other targets have no episode page
    pub fn from_target(target: &NavTarget) -> Option<Self> {
        match target {
            NavTarget::Episode {
                series,
                season,
                episode,
                src,
            } => Some(Self::new(
                series,
                season.as_deref(),
                episode.as_deref(),
                src.as_deref(),
            )),
            _ => None,
        }
    }

    /// Page for an `episode.html` URL
    pub fn from_url(url: &Url) -> Option<Self> {
        NavTarget::from_url(url).as_ref().and_then(Self::from_target)
    }

    /// The player reported an error; offer the source as a direct link.
    ///
    /// Only the first report creates the link. Without a source there is
    /// nothing to link to.
    pub fn playback_failed(&mut self) -> Option<&DirectLink> {
        if self.fallback.is_none() {
            self.fallback = self.src.clone().map(|href| DirectLink { href });
        }
        self.fallback.as_ref()
    }

    /// Direct link, once playback has failed
    pub fn fallback(&self) -> Option<&DirectLink> {
        self.fallback.as_ref()
    }
}
