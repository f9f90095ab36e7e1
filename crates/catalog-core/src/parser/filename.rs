//! File name rules for directory entries
//!
//! Classifies raw index entries and derives display identifiers from them.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex_lite::Regex;

static MP4_EXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.mp4$").expect("valid regex"));
static TRAILER_EXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|mkv)$").expect("valid regex"));
static TRAILER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)trailer").expect("valid regex"));

/// Whether an entry is a folder (trailing `/`).
pub fn is_folder(entry: &str) -> bool {
    entry.ends_with('/')
}

/// Whether an entry is a playable episode file (`.mp4`, any case).
pub fn is_video(entry: &str) -> bool {
    MP4_EXT.is_match(entry)
}

/// Whether an entry is a trailer: name contains "trailer" and it ends in
/// `.mp4` or `.mkv`, both case-insensitive.
///
/// # Examples
/// ```
/// use catalog_core::parser::is_trailer;
///
/// assert!(is_trailer("Show.TRAILER.mkv"));
/// assert!(!is_trailer("Trailer.srt"));
/// ```
pub fn is_trailer(entry: &str) -> bool {
    TRAILER_NAME.is_match(entry) && TRAILER_EXT.is_match(entry)
}

/// Season identifier for a folder entry: trailing `/` removed and
/// percent-escapes decoded, so the id survives one round of URL encoding.
pub fn folder_name(entry: &str) -> String {
    decode(entry.trim_end_matches('/')).into_owned()
}

/// Display identifier of an episode file: `.mp4` removed and
/// percent-escapes decoded.
///
/// # Examples
/// ```
/// use catalog_core::parser::episode_id;
///
/// assert_eq!(episode_id("E01.mp4"), "E01");
/// assert_eq!(episode_id("Episode%2002.MP4"), "Episode 02");
/// ```
pub fn episode_id(file: &str) -> String {
    decode(&MP4_EXT.replace(file, "")).into_owned()
}

fn decode(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}
