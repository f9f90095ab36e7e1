use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use catalog_core::{
    CatalogClient, CatalogConfig, CatalogResolver, CatalogStore, EpisodePage, NavTarget,
    SeasonPage,
};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use url::Url;

mod cli;
mod config;
mod render;

use cli::{Cli, Command};
use render::Renderer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load(&cli)?;
    debug!(?config, "configuration loaded");

    let renderer = Renderer::new(config.locale, config.site_base_url()?);
    let output = match cli.command {
        Command::Series => {
            let client = CatalogClient::with_config(config.client.clone())?;
            let store = load_catalog(&config, &client).await;
            let page = store
                .series_page(&client, config.catalog_url.as_deref())
                .await;
            render_or_json(cli.json, &page, |p| renderer.series_page(p))?
        }
        Command::Browse {
            series,
            season,
            quality,
        } => {
            let client = CatalogClient::with_config(config.client.clone())?;
            let store = load_catalog(&config, &client).await;
            let resolver = CatalogResolver::new(client, config.origin());

            let mut page = resolver
                .resolve(&store.snapshot(), &series, season.as_deref())
                .await?;
            if let (Some(quality), SeasonPage::Tabbed(tabs)) = (quality, &mut page) {
                tabs.select(quality);
            }
            render_or_json(cli.json, &page, |p| {
                renderer.season_page(p, season.as_deref().filter(|s| !s.is_empty()))
            })?
        }
        Command::Link {
            series,
            season,
            episode,
            src,
        } => {
            let target = link_target(&series, season, episode, src);
            let url = target.to_url(&config.site_base_url()?)?;
            if cli.json {
                serde_json::to_string_pretty(&target)? + "\n"
            } else {
                format!("{url}\n")
            }
        }
        Command::Episode { url, fallback } => {
            let url = Url::parse(&url).with_context(|| format!("invalid episode URL {url}"))?;
            let mut page = EpisodePage::from_url(&url)
                .with_context(|| format!("{url} is not an episode page"))?;
            if fallback {
                page.playback_failed();
            }
            render_or_json(cli.json, &page, |p| renderer.episode_page(p))?
        }
    };

    io::stdout().write_all(output.as_bytes())?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}

/// Seeded catalog, overridden by the catalog document if it arrives in time
async fn load_catalog(config: &CatalogConfig, client: &CatalogClient) -> Arc<CatalogStore> {
    let store = Arc::new(CatalogStore::default());
    if let Some(url) = &config.catalog_url {
        let snapshot = store
            .load_with_grace(client.clone(), url.clone(), config.grace())
            .await;
        info!(series = snapshot.series().len(), "catalog ready");
    }
    store
}

/// Most specific page the arguments describe
fn link_target(
    series: &str,
    season: Option<String>,
    episode: Option<String>,
    src: Option<String>,
) -> NavTarget {
    let season = season.unwrap_or_default();
    if episode.is_some() || src.is_some() {
        return NavTarget::episode(
            series,
            &season,
            episode.as_deref().unwrap_or_default(),
            src.as_deref().unwrap_or_default(),
        );
    }
    if season.is_empty() {
        NavTarget::series(series)
    } else {
        NavTarget::season(series, &season)
    }
}

fn render_or_json<T, F>(json: bool, page: &T, render: F) -> Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> Result<String>,
{
    if json {
        Ok(serde_json::to_string_pretty(page)? + "\n")
    } else {
        render(page)
    }
}
