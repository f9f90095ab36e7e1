//! Catalog snapshots and the store that swaps them
//!
//! A [`CatalogSnapshot`] is immutable. The [`CatalogStore`] hands out the
//! current snapshot as an `Arc` and replaces it atomically when the catalog
//! document arrives, so a page always resolves against one consistent
//! catalog.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::CatalogClient;
use crate::error::Result;
use crate::types::{ManualEntry, Series};
use crate::view::SeriesPage;

/// One consistent view of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    series: Vec<Series>,
    manual: HashMap<String, ManualEntry>,
}

impl CatalogSnapshot {
    pub fn new(series: Vec<Series>, manual: HashMap<String, ManualEntry>) -> Self {
        Self { series, manual }
    }

    /// Catalog shipped with the browser, used until a document overrides it
    pub fn seeded() -> Self {
        Self::new(
            vec![Series {
                id: "Serie3/A.Cruel.Love.The.Ruth.Ellis.Story".to_string(),
                title: "A Cruel Love: The Ruth Ellis Story".to_string(),
                cover: "assets/images%20(1).jpg".to_string(),
            }],
            HashMap::new(),
        )
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Manual entry of a series, if one is registered
    pub fn manual(&self, series_id: &str) -> Option<&ManualEntry> {
        self.manual.get(series_id)
    }

    /// Apply a catalog document on top of this snapshot.
    ///
    /// `series` replaces the series list when it is an array of series,
    /// `manual` replaces the manual entries when it is an object. Each field
    /// is applied on its own; a malformed field leaves the current value in
    /// place. Manual entries decode one by one and only an entry that is not
    /// an object is dropped.
    pub fn overridden_by(&self, document: &Value) -> Self {
        let mut next = self.clone();

        if let Some(series) = document.get("series").filter(|v| v.is_array()) {
            match serde_json::from_value::<Vec<Series>>(series.clone()) {
                Ok(series) => {
                    info!(count = series.len(), "catalog document replaced series");
                    next.series = series;
                }
                Err(err) => warn!(error = %err, "ignoring malformed series in catalog document"),
            }
        }

        if let Some(manual) = document.get("manual").and_then(Value::as_object) {
            let mut entries = HashMap::with_capacity(manual.len());
            for (id, entry) in manual {
                match serde_json::from_value::<ManualEntry>(entry.clone()) {
                    Ok(entry) => {
                        entries.insert(id.clone(), entry);
                    }
                    Err(err) => warn!(series = %id, error = %err, "ignoring malformed manual entry"),
                }
            }
            info!(count = entries.len(), "catalog document replaced manual entries");
            next.manual = entries;
        }

        next
    }
}

/// Fetch the catalog document, bypassing caches
pub async fn fetch_document(client: &CatalogClient, url: &str) -> Result<Value> {
    let body = client.fetch_fresh(url).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Holder of the current catalog snapshot
pub struct CatalogStore {
    current: watch::Sender<Arc<CatalogSnapshot>>,
}

impl CatalogStore {
    pub fn new(seed: CatalogSnapshot) -> Self {
        let (current, _) = watch::channel(Arc::new(seed));
        Self { current }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.borrow().clone()
    }

    /// Receiver that observes every swap
    pub fn subscribe(&self) -> watch::Receiver<Arc<CatalogSnapshot>> {
        self.current.subscribe()
    }

    /// Swap in a new snapshot
    pub fn replace(&self, snapshot: CatalogSnapshot) {
        self.current.send_replace(Arc::new(snapshot));
    }

    /// Apply a catalog document to whatever snapshot is current, in one step
    pub fn apply(&self, document: &Value) -> Arc<CatalogSnapshot> {
        let mut applied = None;
        self.current.send_modify(|current| {
            let next = Arc::new(current.overridden_by(document));
            applied = Some(Arc::clone(&next));
            *current = next;
        });
        applied.unwrap_or_else(|| self.snapshot())
    }

    /// Fetch the catalog document and apply it to the current snapshot.
    ///
    /// The document is applied to the snapshot current when the fetch
    /// completes, so overlapping refreshes never drop a swap made meanwhile.
    pub async fn refresh(&self, client: &CatalogClient, url: &str) -> Result<Arc<CatalogSnapshot>> {
        let document = fetch_document(client, url).await?;
        Ok(self.apply(&document))
    }

    /// Start loading the catalog document and wait at most `grace` for it.
    ///
    /// Returns whatever snapshot is current when the wait ends. A load that
    /// outlives the grace period keeps running and swaps the snapshot when it
    /// completes. Load failures leave the current snapshot in place.
    pub async fn load_with_grace(
        self: &Arc<Self>,
        client: CatalogClient,
        url: String,
        grace: Duration,
    ) -> Arc<CatalogSnapshot> {
        let store = Arc::clone(self);
        let load = tokio::spawn(async move {
            if let Err(err) = store.refresh(&client, &url).await {
                debug!(url = %url, error = %err, "catalog document not applied");
            }
        });

        if tokio::time::timeout(grace, load).await.is_err() {
            debug!(?grace, "catalog document still loading, using current catalog");
        }
        self.snapshot()
    }

    /// Series list page.
    ///
    /// When the current snapshot has no series and a document URL is known,
    /// the document is fetched once more before giving up.
    pub async fn series_page(&self, client: &CatalogClient, catalog_url: Option<&str>) -> SeriesPage {
        let snapshot = self.snapshot();
        if !snapshot.series().is_empty() {
            return SeriesPage::from_series(snapshot.series());
        }

        if let Some(url) = catalog_url {
            match self.refresh(client, url).await {
                Ok(snapshot) => return SeriesPage::from_series(snapshot.series()),
                Err(err) => warn!(url, error = %err, "catalog document retry failed"),
            }
        }

        SeriesPage::from_series(&[])
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(CatalogSnapshot::seeded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seeded_snapshot() {
        let snapshot = CatalogSnapshot::seeded();
        assert_eq!(snapshot.series().len(), 1);
        assert_eq!(
            snapshot.series()[0].id,
            "Serie3/A.Cruel.Love.The.Ruth.Ellis.Story"
        );
        assert!(snapshot.manual("Serie3/A.Cruel.Love.The.Ruth.Ellis.Story").is_none());
    }

    #[test]
    fn test_document_overrides_both_fields() {
        let document = json!({
            "series": [{"id": "Serie1/Show", "title": "Show", "cover": "c.jpg"}],
            "manual": {"Serie1/Show": {"seasons": ["S01"]}}
        });
        let next = CatalogSnapshot::seeded().overridden_by(&document);
        assert_eq!(next.series().len(), 1);
        assert_eq!(next.series()[0].id, "Serie1/Show");
        assert_eq!(next.manual("Serie1/Show").unwrap().seasons, vec!["S01"]);
    }

    #[test]
    fn test_document_fields_apply_independently() {
        let document = json!({
            "series": "not a list",
            "manual": {"Serie3/A.Cruel.Love.The.Ruth.Ellis.Story": {"seasons": []}}
        });
        let seeded = CatalogSnapshot::seeded();
        let next = seeded.overridden_by(&document);
        assert_eq!(next.series(), seeded.series());
        assert!(next.manual("Serie3/A.Cruel.Love.The.Ruth.Ellis.Story").is_some());
    }

    #[test]
    fn test_malformed_series_items_keep_current() {
        let document = json!({"series": [{"title": "missing id"}]});
        let seeded = CatalogSnapshot::seeded();
        assert_eq!(seeded.overridden_by(&document), seeded);
    }

    #[test]
    fn test_bad_manual_entry_keeps_the_others() {
        let document = json!({
            "manual": {
                "Good/Show": {"seasons": ["S01"], "episodes": {"S01": [{"id": "E01", "src": "http://h/E01.mp4"}]}},
                "Other/Show": {"seasons": null},
                "Broken/Show": 42
            }
        });
        let next = CatalogSnapshot::seeded().overridden_by(&document);

        let good = next.manual("Good/Show").unwrap();
        assert_eq!(good.seasons, vec!["S01"]);
        assert_eq!(good.flat_episodes("S01").len(), 1);
        // Null fields decode as empty; the series stays manual
        assert!(next.manual("Other/Show").unwrap().seasons.is_empty());
        assert!(next.manual("Broken/Show").is_none());
    }

    #[test]
    fn test_apply_builds_on_latest_snapshot() {
        let store = CatalogStore::new(CatalogSnapshot::default());
        let mut manual = HashMap::new();
        manual.insert("Serie1/Show".to_string(), ManualEntry::default());
        store.replace(CatalogSnapshot::new(Vec::new(), manual));

        let applied = store.apply(&json!({"series": [{"id": "Serie2/Other"}]}));

        assert_eq!(applied, store.snapshot());
        assert_eq!(applied.series().len(), 1);
        assert!(applied.manual("Serie1/Show").is_some());
    }

    #[test]
    fn test_empty_document_changes_nothing() {
        let seeded = CatalogSnapshot::seeded();
        assert_eq!(seeded.overridden_by(&json!({})), seeded);
        assert_eq!(seeded.overridden_by(&json!([1, 2])), seeded);
    }

    #[test]
    fn test_store_swaps_atomically() {
        let store = CatalogStore::default();
        let before = store.snapshot();
        let mut rx = store.subscribe();

        store.replace(CatalogSnapshot::default());

        assert!(rx.has_changed().unwrap());
        assert!(store.snapshot().series().is_empty());
        // Readers holding the old snapshot still see it whole
        assert_eq!(before.series().len(), 1);
    }
}
