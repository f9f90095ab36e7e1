//! Shared fixtures for the HTTP-backed tests

#![allow(dead_code)]

use catalog_core::{CatalogClient, ClientConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client that does not throttle or retry
pub fn fast_client() -> CatalogClient {
    CatalogClient::with_config(ClientConfig {
        requests_per_second: 1000.0,
        timeout_secs: 5,
        max_retries: 0,
        retry_base_delay_ms: 1,
    })
    .unwrap()
}

/// Apache-style index page listing `hrefs`
pub fn index_page(title: &str, hrefs: &[&str]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|h| format!("<a href=\"{h}\">{h}</a>    2024-01-01 10:00  -\n"))
        .collect();
    format!(
        "<html><head><title>Index of {title}</title></head><body>\
         <h1>Index of {title}</h1><pre>\
         <a href=\"?C=N;O=D\">Name</a> <a href=\"?C=M;O=A\">Last modified</a>\n<hr>\
         <a href=\"../\">Parent Directory</a>\n{rows}<hr></pre></body></html>"
    )
}

/// Serve an index page at `dir`
pub async fn mount_index(server: &MockServer, dir: &str, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(dir))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_page(dir, hrefs)))
        .mount(server)
        .await;
}

/// Paths of every request the server saw, in order
pub async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}
