//! Parsers for directory index pages and the file names they contain
//!
//! - `listing`: Extract entry names from an Apache-style index page
//! - `filename`: Classify entries (folders, videos, trailers) and derive ids

pub mod filename;
pub mod listing;

// Re-export main parsing functions
pub use filename::{episode_id, folder_name, is_folder, is_trailer, is_video};
pub use listing::parse_directory_listing;
