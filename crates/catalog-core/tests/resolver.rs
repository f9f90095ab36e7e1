mod common;

use std::collections::HashMap;

use catalog_core::view::Trailer;
use catalog_core::{
    CatalogResolver, CatalogSnapshot, EmptyState, EpisodeList, ManualEntry, NavTarget, Quality,
    SeasonPage, Series,
};
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{fast_client, mount_index, requested_paths};

fn resolver(server: &MockServer) -> CatalogResolver {
    CatalogResolver::new(fast_client(), server.uri())
}

fn manual_snapshot(series_id: &str, entry: serde_json::Value) -> CatalogSnapshot {
    let entry: ManualEntry = serde_json::from_value(entry).unwrap();
    let mut manual = HashMap::new();
    manual.insert(series_id.to_string(), entry);
    CatalogSnapshot::new(
        vec![Series {
            id: series_id.to_string(),
            title: "Show".to_string(),
            cover: String::new(),
        }],
        manual,
    )
}

fn remote_snapshot() -> CatalogSnapshot {
    CatalogSnapshot::default()
}

fn episode_list(page: SeasonPage) -> EpisodeList {
    match page {
        SeasonPage::Episodes { list } => list,
        other => panic!("expected an episode list, got {other:?}"),
    }
}

#[tokio::test]
async fn manual_season_list_only_probes_trailer() {
    let server = MockServer::start().await;
    mount_index(&server, "/Serie3/Show/", &["S09/", "Show.Trailer.mkv", "E01.mp4"]).await;

    let snapshot = manual_snapshot("Serie3/Show", json!({"seasons": ["S01", "S02"]}));
    let page = resolver(&server)
        .resolve(&snapshot, "Serie3/Show", None)
        .await
        .unwrap();

    let SeasonPage::Seasons(list) = page else {
        panic!("expected seasons");
    };
    let ids: Vec<&str> = list.seasons.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["S01", "S02"]);
    assert_eq!(list.seasons[0].target, NavTarget::season("Serie3/Show", "S01"));
    assert!(list.standalone.is_empty());

    let expected_src = format!("{}/Serie3/Show/Show.Trailer.mkv", server.uri());
    assert_eq!(
        list.trailer,
        Some(Trailer {
            src: expected_src.clone(),
            play: NavTarget::episode("Serie3/Show", "", "Trailer", &expected_src),
        })
    );

    assert_eq!(requested_paths(&server).await, vec!["/Serie3/Show/"]);
}

#[tokio::test]
async fn manual_trailer_probe_failure_is_silent() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let snapshot = manual_snapshot("Show", json!({"seasons": ["S01"]}));
    let page = resolver(&server).resolve(&snapshot, "Show", None).await.unwrap();

    let SeasonPage::Seasons(list) = page else {
        panic!("expected seasons");
    };
    assert_eq!(list.seasons.len(), 1);
    assert!(list.trailer.is_none());
}

#[tokio::test]
async fn manual_without_seasons_is_empty_and_silent() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let snapshot = manual_snapshot("Show", json!({"seasons": []}));
    let page = resolver(&server).resolve(&snapshot, "Show", None).await.unwrap();

    assert_eq!(page, SeasonPage::empty(EmptyState::NoSeasonsRegistered));
}

#[tokio::test]
async fn manual_season_never_touches_remote() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let snapshot = manual_snapshot(
        "Show",
        json!({
            "seasons": ["S01"],
            "episodesByQuality": {"S01": {
                "Sub": [{"id": "E01", "src": "http://cdn/sub/E01.srt"}],
                "720p": [{"id": "E01", "src": "http://cdn/720/E01.mp4"}],
                "1080p": [{"id": "E01", "src": "http://cdn/1080/E01.mp4"},
                          {"id": "E02", "src": "http://cdn/1080/E02.mp4"}],
                "480p": []
            }}
        }),
    );
    let page = resolver(&server)
        .resolve(&snapshot, "Show", Some("S01"))
        .await
        .unwrap();

    let SeasonPage::Tabbed(mut tabs) = page else {
        panic!("expected quality tabs");
    };
    assert_eq!(tabs.tabs, vec![Quality::P1080, Quality::P720, Quality::Sub]);
    assert_eq!(tabs.selected, Quality::P1080);
    match &tabs.list {
        EpisodeList::Items { play_first, entries } => {
            assert_eq!(
                play_first,
                &Some(NavTarget::episode("Show", "S01", "E01", "http://cdn/1080/E01.mp4"))
            );
            assert_eq!(entries.len(), 2);
        }
        other => panic!("unexpected {other:?}"),
    }

    tabs.select(Quality::Sub);
    match &tabs.list {
        EpisodeList::Items { play_first, entries } => {
            assert!(play_first.is_none());
            for entry in entries {
                assert!(entry.play_target().is_none());
                assert!(entry.has_download());
            }
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn manual_flat_episodes_when_no_quality_data() {
    let server = MockServer::start().await;
    let snapshot = manual_snapshot(
        "Show",
        json!({
            "seasons": ["S01"],
            "episodes": {"S01": [{"id": "E01", "src": "http://cdn/E01.mp4"}]}
        }),
    );
    let list = episode_list(
        resolver(&server)
            .resolve(&snapshot, "Show", Some("S01"))
            .await
            .unwrap(),
    );
    assert_eq!(list.entries().len(), 1);
    assert_eq!(
        list.entries()[0].play_target(),
        Some(&NavTarget::episode("Show", "S01", "E01", "http://cdn/E01.mp4"))
    );
    assert!(requested_paths(&server).await.is_empty());
}

#[tokio::test]
async fn manual_missing_season_is_empty() {
    let server = MockServer::start().await;
    let snapshot = manual_snapshot("Show", json!({"seasons": ["S01"]}));
    let list = episode_list(
        resolver(&server)
            .resolve(&snapshot, "Show", Some("S02"))
            .await
            .unwrap(),
    );
    assert_eq!(
        list,
        EpisodeList::Empty {
            state: EmptyState::NoEpisodesRegistered
        }
    );
}

#[tokio::test]
async fn remote_series_lists_folders_trailer_and_videos() {
    let server = MockServer::start().await;
    mount_index(
        &server,
        "/Serie3/Show/",
        &["S01/", "S02/", "Trailer.mp4", "Special.mp4", "notes.txt"],
    )
    .await;

    let page = resolver(&server)
        .resolve(&remote_snapshot(), "Serie3/Show", None)
        .await
        .unwrap();

    let SeasonPage::Seasons(list) = page else {
        panic!("expected seasons");
    };
    let ids: Vec<&str> = list.seasons.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["S01", "S02"]);

    let base = format!("{}/Serie3/Show/", server.uri());
    assert_eq!(list.trailer.unwrap().src, format!("{base}Trailer.mp4"));

    assert_eq!(list.standalone.len(), 1);
    assert_eq!(list.standalone[0].label, "Special");
    assert_eq!(
        list.standalone[0].play_target(),
        Some(&NavTarget::episode("Serie3/Show", "", "Special", &format!("{base}Special.mp4")))
    );

    // The root listing is reused for the trailer
    assert_eq!(requested_paths(&server).await, vec!["/Serie3/Show/"]);
}

#[tokio::test]
async fn remote_empty_series_is_one_empty_state() {
    let server = MockServer::start().await;
    mount_index(&server, "/Show/", &["readme.txt"]).await;

    let page = resolver(&server)
        .resolve(&remote_snapshot(), "Show", None)
        .await
        .unwrap();

    assert_eq!(page, SeasonPage::empty(EmptyState::NothingFound));
    assert_eq!(requested_paths(&server).await.len(), 1);
}

#[tokio::test]
async fn remote_series_fetch_failure_is_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let page = resolver(&server)
        .resolve(&remote_snapshot(), "Show", None)
        .await
        .unwrap();

    assert_eq!(page, SeasonPage::empty(EmptyState::FetchFailed));
}

#[tokio::test]
async fn remote_season_root_videos() {
    let server = MockServer::start().await;
    mount_index(&server, "/Show/S01/", &["E01.mp4", "E02.MP4", "720p/"]).await;

    let list = episode_list(
        resolver(&server)
            .resolve(&remote_snapshot(), "Show", Some("S01"))
            .await
            .unwrap(),
    );

    let base = format!("{}/Show/S01/", server.uri());
    let labels: Vec<&str> = list.entries().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["E01", "E02"]);
    match &list {
        EpisodeList::Items { play_first, .. } => assert_eq!(
            play_first,
            &Some(NavTarget::episode("Show", "S01", "E01", &format!("{base}E01.mp4")))
        ),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(requested_paths(&server).await, vec!["/Show/S01/"]);
}

#[tokio::test]
async fn remote_season_falls_back_to_720p() {
    let server = MockServer::start().await;
    mount_index(&server, "/Show/S01/", &["720p/", "480p/"]).await;
    mount_index(&server, "/Show/S01/720p/", &["E01.mp4"]).await;
    mount_index(&server, "/Show/S01/480p/", &["E01.mp4"]).await;

    let list = episode_list(
        resolver(&server)
            .resolve(&remote_snapshot(), "Show", Some("S01"))
            .await
            .unwrap(),
    );

    assert_eq!(
        list.entries()[0].play_target(),
        Some(&NavTarget::episode(
            "Show",
            "S01",
            "E01",
            &format!("{}/Show/S01/720p/E01.mp4", server.uri())
        ))
    );
    // 480p is never probed once 720p has episodes
    assert_eq!(
        requested_paths(&server).await,
        vec!["/Show/S01/", "/Show/S01/720p/"]
    );
}

#[tokio::test]
async fn remote_season_falls_back_to_480p() {
    let server = MockServer::start().await;
    mount_index(&server, "/Show/S01/", &["720p/", "480p/"]).await;
    mount_index(&server, "/Show/S01/720p/", &["notes.txt"]).await;
    mount_index(&server, "/Show/S01/480p/", &["E01.mp4", "E02.mp4"]).await;

    let list = episode_list(
        resolver(&server)
            .resolve(&remote_snapshot(), "Show", Some("S01"))
            .await
            .unwrap(),
    );

    assert_eq!(list.entries().len(), 2);
    assert_eq!(
        list.entries()[1].play_target(),
        Some(&NavTarget::episode(
            "Show",
            "S01",
            "E02",
            &format!("{}/Show/S01/480p/E02.mp4", server.uri())
        ))
    );
}

#[tokio::test]
async fn remote_season_tier_failure_tries_next() {
    let server = MockServer::start().await;
    mount_index(&server, "/Show/S01/", &[]).await;
    Mock::given(path("/Show/S01/720p/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_index(&server, "/Show/S01/480p/", &["E01.mp4"]).await;

    let list = episode_list(
        resolver(&server)
            .resolve(&remote_snapshot(), "Show", Some("S01"))
            .await
            .unwrap(),
    );
    assert_eq!(list.entries().len(), 1);
}

#[tokio::test]
async fn remote_season_without_any_tier_is_empty() {
    let server = MockServer::start().await;
    mount_index(&server, "/Show/S01/", &["720p/"]).await;
    mount_index(&server, "/Show/S01/720p/", &[]).await;
    mount_index(&server, "/Show/S01/480p/", &[]).await;

    let page = resolver(&server)
        .resolve(&remote_snapshot(), "Show", Some("S01"))
        .await
        .unwrap();

    assert_eq!(page, SeasonPage::empty(EmptyState::NoEpisodesFound));
}

#[tokio::test]
async fn remote_season_id_is_encoded() {
    let server = MockServer::start().await;
    mount_index(&server, "/Show/Season%201/", &["E01.mp4"]).await;

    let list = episode_list(
        resolver(&server)
            .resolve(&remote_snapshot(), "Show", Some("Season 1"))
            .await
            .unwrap(),
    );
    assert_eq!(list.entries()[0].label, "E01");
}

#[tokio::test]
async fn manual_entry_with_null_seasons_stays_manual() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let snapshot = CatalogSnapshot::default().overridden_by(&json!({
        "manual": {
            "Good/Show": {"seasons": ["S01"]},
            "Other/Show": {"seasons": null}
        }
    }));
    let page = resolver(&server)
        .resolve(&snapshot, "Other/Show", None)
        .await
        .unwrap();

    assert_eq!(page, SeasonPage::empty(EmptyState::NoSeasonsRegistered));
    assert!(snapshot.manual("Good/Show").is_some());
}
