//! Plain-text rendering of catalog pages

use std::fmt::Write;

use anyhow::Result;
use catalog_core::view::{SeasonLink, Trailer};
use catalog_core::{
    Action, EmptyState, Entry, EpisodeList, EpisodePage, Locale, Message, NavTarget, QualityTabs,
    SeasonList, SeasonPage, SeriesPage,
};
use url::Url;

pub struct Renderer {
    locale: Locale,
    base: Url,
}

impl Renderer {
    pub fn new(locale: Locale, base: Url) -> Self {
        Self { locale, base }
    }

    fn text(&self, message: Message<'_>) -> String {
        message.text(self.locale)
    }

    fn link(&self, target: &NavTarget) -> Result<String> {
        Ok(target.to_url(&self.base)?.to_string())
    }

    fn empty(&self, state: EmptyState) -> String {
        format!("{}\n", self.text(Message::Empty(state)))
    }

    pub fn series_page(&self, page: &SeriesPage) -> Result<String> {
        let cards = match page {
            SeriesPage::Cards { cards } => cards,
            SeriesPage::Empty { state } => return Ok(self.empty(*state)),
        };

        let mut out = String::new();
        for card in cards {
            writeln!(out, "{}  {}", card.title, self.link(&card.target)?)?;
            if !card.cover.is_empty() {
                writeln!(out, "    {}", card.cover)?;
            }
        }
        Ok(out)
    }

    /// Season page; `season` picks the heading
    pub fn season_page(&self, page: &SeasonPage, season: Option<&str>) -> Result<String> {
        let mut out = String::new();
        let heading = match season {
            Some(season) => Message::EpisodesHeading(season),
            None => Message::SeasonsHeading,
        };
        writeln!(out, "== {} ==", self.text(heading))?;

        match page {
            SeasonPage::Seasons(list) => self.season_list(&mut out, list)?,
            SeasonPage::Episodes { list } => self.episode_list(&mut out, list)?,
            SeasonPage::Tabbed(tabs) => self.quality_tabs(&mut out, tabs)?,
            SeasonPage::Empty { state } => out.push_str(&self.empty(*state)),
        }
        Ok(out)
    }

    fn season_list(&self, out: &mut String, list: &SeasonList) -> Result<()> {
        for SeasonLink { id, target } in &list.seasons {
            writeln!(out, "- {}  {}", self.text(Message::SeasonLabel(id)), self.link(target)?)?;
        }
        if let Some(trailer) = &list.trailer {
            self.trailer(out, trailer)?;
        }
        for entry in &list.standalone {
            self.entry(out, entry)?;
        }
        Ok(())
    }

    fn trailer(&self, out: &mut String, trailer: &Trailer) -> Result<()> {
        writeln!(
            out,
            "* {}  {}: {}  {}: {}",
            self.text(Message::Trailer),
            self.text(Message::Play),
            self.link(&trailer.play)?,
            self.text(Message::Download),
            trailer.src
        )?;
        Ok(())
    }

    fn quality_tabs(&self, out: &mut String, tabs: &QualityTabs) -> Result<()> {
        let line: Vec<String> = tabs
            .tabs
            .iter()
            .map(|q| {
                if *q == tabs.selected {
                    format!("[{q}]")
                } else {
                    q.to_string()
                }
            })
            .collect();
        writeln!(out, "{}", line.join(" | "))?;
        self.episode_list(out, &tabs.list)
    }

    fn episode_list(&self, out: &mut String, list: &EpisodeList) -> Result<()> {
        match list {
            EpisodeList::Empty { state } => out.push_str(&self.empty(*state)),
            EpisodeList::Items { play_first, entries } => {
                if let Some(first) = play_first {
                    writeln!(out, "> {}  {}", self.text(Message::PlayFirstEpisode), self.link(first)?)?;
                }
                for entry in entries {
                    self.entry(out, entry)?;
                }
            }
        }
        Ok(())
    }

    fn entry(&self, out: &mut String, entry: &Entry) -> Result<()> {
        write!(out, "- {}", entry.label)?;
        for action in &entry.actions {
            match action {
                Action::Play { target } => {
                    write!(out, "  {}: {}", self.text(Message::Play), self.link(target)?)?
                }
                Action::Download { href, subtitle } => {
                    let label = if *subtitle {
                        Message::DownloadSubtitle
                    } else {
                        Message::Download
                    };
                    write!(out, "  {}: {}", self.text(label), href)?
                }
            }
        }
        out.push('\n');
        Ok(())
    }

    pub fn episode_page(&self, page: &EpisodePage) -> Result<String> {
        let mut out = String::new();
        if let Some(title) = &page.title {
            writeln!(out, "== {title} ==")?;
        }
        if let Some(src) = &page.src {
            writeln!(out, "{}: {}", self.text(Message::Play), src)?;
        }
        if let Some(link) = page.fallback() {
            writeln!(out, "{}: {}", self.text(Message::OpenDirectLink), link.href)?;
        }
        Ok(out)
    }
}
