//! Directory index parser
//!
//! Parses HTML from Apache `mod_autoindex`-style pages (and anything that
//! lists children as anchors) into the raw entry names.

use scraper::{Html, Selector};

/// Parse entry names from a directory index page.
///
/// Takes the `href` of every anchor in document order, drops anchors without
/// an href, strips the query string and discards the parent (`../`) and root
/// (`/`) links. Column-sort links such as `?C=N;O=D` reduce to nothing and are
/// dropped too. No deduplication and no sorting: the order is whatever the
/// index server emitted.
///
/// Folders keep their trailing `/`.
///
/// # Examples
/// ```
/// use catalog_core::parser::parse_directory_listing;
///
/// let html = r#"<a href="../">Parent</a><a href="S01/">S01/</a><a href="E01.mp4?dl=1">E01</a>"#;
/// assert_eq!(parse_directory_listing(html), vec!["S01/", "E01.mp4"]);
/// ```
pub fn parse_directory_listing(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(strip_query)
        .filter(|href| !href.is_empty() && *href != "/" && *href != "../")
        .map(str::to_string)
        .collect()
}

/// Drop everything from the first `?`.
fn strip_query(href: &str) -> &str {
    href.split('?').next().unwrap_or(href)
}
