//! Integration tests for the HTTP surface.
//!
//! Each test starts the real axum server on an auto-assigned port with a
//! canned [`PageFetcher`], then talks to it over HTTP with reqwest.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mcmod_api::config::ApiConfig;
use mcmod_api::server::{ApiServer, ErrorPayload};
use mcmod_search::{PageFetcher, SearchError};
use serde_json::Value;

const PAGE: &str = r#"<html><body>
<div class="search-result-list">
  <div class="result-item">
    <div class="head">[IC2] 工业时代2 (Industrial Craft 2)</div>
    <div class="body">工业时代2</div>
    <span class="info"><a href="//center.mcmod.cn/class/2.html">link</a><span class="value">模组</span><span class="value">2025-02-12</span></span>
  </div>
  <div class="result-item">
    <div class="head">[GT] 格雷科技 (GregTech)</div>
    <div class="body">格雷科技</div>
    <span class="info"><a href="//www.mcmod.cn/class/300.html">link</a><span class="value">模组</span><span class="value">2025-02-10</span></span>
  </div>
</div>
</body></html>"#;

enum Reply {
    Page(&'static str),
    Fail,
    Stall,
}

struct CannedFetcher {
    reply: Reply,
    urls: std::sync::Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl CannedFetcher {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            urls: std::sync::Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }
}

impl PageFetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_owned());
        match self.reply {
            Reply::Page(page) => Ok(page.to_owned()),
            Reply::Fail => Err(SearchError::Http("connection refused".into())),
            Reply::Stall => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(String::new())
            }
        }
    }
}

fn test_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.server.port = 0;
    config.server.public_base_url = "http://api.test/".into();
    config.search.timeout_seconds = 30;
    config
}

async fn start(fetcher: Arc<CannedFetcher>, config: ApiConfig) -> ApiServer {
    ApiServer::start(&config, fetcher).await.unwrap()
}

fn url(server: &ApiServer, query: &str) -> String {
    format!("http://{}/{query}", server.addr())
}

#[tokio::test]
async fn search_returns_best_and_others() {
    let fetcher = CannedFetcher::new(Reply::Page(PAGE));
    let server = start(Arc::clone(&fetcher), test_config()).await;

    let response = reqwest::get(url(&server, "?key=IC2")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(response.headers()["access-control-allow-methods"], "GET");

    let text = response.text().await.unwrap();
    // Unicode and slashes are written as-is.
    assert!(text.contains("工业时代2"));
    assert!(text.contains("https://www.mcmod.cn/class/2.html"));

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["search_term"], "IC2");
    assert_eq!(body["total_results"], 2);
    assert_eq!(body["best_result"]["address"], "https://www.mcmod.cn/class/2.html");
    assert_eq!(body["best_result"]["score"], 195.0);
    assert_eq!(body["best_result"]["data"]["abbr"], "IC2");
    assert_eq!(body["best_result"]["data"]["sub_name"], "Industrial Craft 2");
    assert_eq!(body["other_results"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["other_results"][0]["address"],
        "https://www.mcmod.cn/class/300.html"
    );

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
}

#[tokio::test]
async fn key_is_trimmed_before_searching() {
    let fetcher = CannedFetcher::new(Reply::Page(PAGE));
    let server = start(Arc::clone(&fetcher), test_config()).await;

    let body: Value = reqwest::get(url(&server, "?key=%20%20IC2%20"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["search_term"], "IC2");

    let urls = fetcher.urls.lock().unwrap().clone();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].ends_with("/s?key=IC2"));
}

#[tokio::test]
async fn repeated_key_searches_last_value() {
    let fetcher = CannedFetcher::new(Reply::Page(PAGE));
    let server = start(Arc::clone(&fetcher), test_config()).await;

    let response = reqwest::get(url(&server, "?key=IC2&key=GT")).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["search_term"], "GT");

    let urls = fetcher.urls.lock().unwrap().clone();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].ends_with("/s?key=GT"));
}

#[tokio::test]
async fn missing_key_returns_documentation() {
    let fetcher = CannedFetcher::new(Reply::Page(PAGE));
    let server = start(Arc::clone(&fetcher), test_config()).await;

    let response = reqwest::get(url(&server, "")).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "MCMod 搜索 API");
    assert_eq!(body["base_url"], "http://api.test/");
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_key_is_bad_request() {
    let fetcher = CannedFetcher::new(Reply::Page(PAGE));
    let server = start(Arc::clone(&fetcher), test_config()).await;

    for query in ["?key=", "?key=%20%20"] {
        let response = reqwest::get(url(&server, query)).await.unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let body: ErrorPayload = response.json().await.unwrap();
        assert_eq!(
            body,
            ErrorPayload {
                error: "Empty search key".into(),
                code: 400
            }
        );
    }
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_failure_is_empty_success() {
    let fetcher = CannedFetcher::new(Reply::Fail);
    let server = start(fetcher, test_config()).await;

    let response = reqwest::get(url(&server, "?key=IC2")).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["total_results"], 0);
    assert!(body["best_result"].is_null());
    assert_eq!(body["other_results"], serde_json::json!([]));
}

#[tokio::test]
async fn request_deadline_is_internal_error() {
    let fetcher = CannedFetcher::new(Reply::Stall);
    let mut config = test_config();
    config.server.request_timeout_seconds = 1;
    let server = start(fetcher, config).await;

    let started = std::time::Instant::now();
    let response = reqwest::get(url(&server, "?key=IC2")).await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(response.status(), 500);
    let body: ErrorPayload = response.json().await.unwrap();
    assert_eq!(body.code, 500);
    assert!(body.error.starts_with("Internal server error:"));
    assert!(body.error.contains("deadline"));
}

#[tokio::test]
async fn non_get_methods_are_rejected() {
    let fetcher = CannedFetcher::new(Reply::Page(PAGE));
    let server = start(fetcher, test_config()).await;

    let response = reqwest::Client::new()
        .post(url(&server, "?key=IC2"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn invalid_config_refuses_to_start() {
    let fetcher = CannedFetcher::new(Reply::Page(PAGE));
    let mut config = test_config();
    config.search.base_url = "nowhere".into();
    assert!(ApiServer::start(&config, fetcher).await.is_err());
}
