use std::path::PathBuf;

use catalog_core::{Locale, Quality};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse video series from a catalog document or a remote directory index")]
pub struct Cli {
    /// TOML configuration file (falls back to $CATALOG_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Remote origin that series ids are resolved against
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Catalog document overriding the seeded catalog
    #[arg(long, global = true)]
    pub catalog_url: Option<String>,

    /// Message language (fa, en)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Print the page as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all series
    Series,

    /// Show the seasons of a series, or the episodes of one season
    Browse {
        /// Series id, e.g. "Serie3/A.Cruel.Love.The.Ruth.Ellis.Story"
        series: String,

        /// Season id
        #[arg(long)]
        season: Option<String>,

        /// Quality tab to show when the season has quality tiers
        #[arg(long)]
        quality: Option<Quality>,
    },

    /// Print the page URL for a series, season or episode
    Link {
        series: String,

        #[arg(long)]
        season: Option<String>,

        #[arg(long)]
        episode: Option<String>,

        /// Playback source
        #[arg(long)]
        src: Option<String>,
    },

    /// Show the playback page for an episode page URL
    Episode {
        /// Full episode.html URL
        url: String,

        /// Show the direct link offered when the player cannot play the source
        #[arg(long)]
        fallback: bool,
    },
}
