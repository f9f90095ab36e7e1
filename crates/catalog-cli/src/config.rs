use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_core::CatalogConfig;

use crate::cli::Cli;

const CONFIG_ENV_KEY: &str = "CATALOG_CONFIG";

/// Configuration from file (if any) with command-line overrides applied
pub fn load(cli: &Cli) -> Result<CatalogConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| env::var_os(CONFIG_ENV_KEY).map(PathBuf::from));

    let mut config = match path {
        Some(path) => read_file(&path)?,
        None => CatalogConfig::default(),
    };

    if let Some(origin) = &cli.origin {
        config.origin = origin.clone();
    }
    if let Some(url) = &cli.catalog_url {
        config.catalog_url = Some(url.clone());
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    Ok(config)
}

fn read_file(path: &Path) -> Result<CatalogConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&content).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse(content: &str) -> Result<CatalogConfig> {
    Ok(toml::from_str(content)?)
}
