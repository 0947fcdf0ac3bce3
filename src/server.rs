//! HTTP surface for the search engine.
//!
//! ## Endpoints
//!
//! - `GET /`: API documentation
//! - `GET /?key={term}`: search mcmod.cn for `term`
//!
//! Every response is pretty-printed UTF-8 JSON with permissive CORS headers.
//! A blank `key` is a 400; any failure inside the search is a 500. An
//! unreachable upstream is not a failure: it yields an empty result set.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use mcmod_search::pipeline::{SearchRequest, run_search};
use mcmod_search::{PageFetcher, SearchConfig, SearchError, SearchResponse};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::ApiConfig;
use crate::docs::api_docs;
use crate::error::ApiError;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Query parameter carrying the search term.
const KEY_PARAM: &str = "key";

/// The search term in a parsed query string. A repeated `key` resolves to
/// its last value; no `key` at all means "show the documentation".
pub fn search_key(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .rev()
        .find(|(name, _)| name == KEY_PARAM)
        .map(|(_, value)| value.as_str())
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human-readable message.
    pub error: String,
    /// HTTP status code, repeated in the body.
    pub code: u16,
}

impl From<&ApiError> for ErrorPayload {
    fn from(err: &ApiError) -> Self {
        let code = err.status_code();
        let error = match err {
            ApiError::BadRequest(message) => message.clone(),
            other => format!("Internal server error: {other}"),
        };
        Self { error, code }
    }
}

struct AppState<F> {
    docs_base_url: String,
    request_timeout: Duration,
    search: SearchConfig,
    fetcher: Arc<F>,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            docs_base_url: self.docs_base_url.clone(),
            request_timeout: self.request_timeout,
            search: self.search.clone(),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

/// Build the service router.
pub fn router<F: PageFetcher + 'static>(config: &ApiConfig, fetcher: Arc<F>) -> Router {
    let state = AppState {
        docs_base_url: config.server.public_base_url.clone(),
        request_timeout: Duration::from_secs(config.server.request_timeout_seconds),
        search: config.search.to_search_config(),
        fetcher,
    };

    Router::new()
        .route("/", get(handle_root::<F>))
        .with_state(state)
}

/// The running HTTP service.
pub struct ApiServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ApiServer {
    /// Start serving on `{config.server.host}:{config.server.port}`
    /// (port `0` auto-assigns) in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the TCP listener
    /// cannot bind.
    pub async fn start<F: PageFetcher + 'static>(
        config: &ApiConfig,
        fetcher: Arc<F>,
    ) -> crate::error::Result<Self> {
        config.validate()?;
        let app = router(config, fetcher);

        let bind_addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ApiError::Server(format!("bind to {bind_addr} failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ApiError::Server(format!("failed to get local addr: {e}")))?;

        info!("mcmod-api listening on http://{addr}/");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("mcmod-api server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// `GET /`: documentation without `key`, search with it.
async fn handle_root<F: PageFetcher + 'static>(
    State(state): State<AppState<F>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return error_response(&ApiError::BadRequest(rejection.body_text())),
    };

    let Some(key) = search_key(&params) else {
        return json_response(StatusCode::OK, &api_docs(&state.docs_base_url));
    };

    match search(&state, key).await {
        Ok(response) => {
            tracing::debug!(
                total = response.total_results,
                found = response.best_result.is_some(),
                "search served"
            );
            json_response(StatusCode::OK, &response)
        }
        Err(err) => {
            if err.status_code() >= 500 {
                tracing::error!(error = %err, "search request failed");
            }
            error_response(&err)
        }
    }
}

/// Validate `key` and run the search under the request deadline.
async fn search<F: PageFetcher>(
    state: &AppState<F>,
    key: &str,
) -> Result<SearchResponse, ApiError> {
    let term = key.trim();
    if term.is_empty() {
        return Err(ApiError::BadRequest("Empty search key".into()));
    }

    let cancel = CancellationToken::new();
    let request = SearchRequest::with_cancel(term, cancel.clone());

    let outcome = tokio::select! {
        result = run_search(&request, &state.search, state.fetcher.as_ref()) => result,
        _ = tokio::time::sleep(state.request_timeout) => {
            cancel.cancel();
            Err(SearchError::Timeout(format!(
                "request exceeded {}s deadline",
                state.request_timeout.as_secs()
            )))
        }
    };
    Ok(outcome?)
}

fn error_response(err: &ApiError) -> Response {
    let payload = ErrorPayload::from(err);
    let status =
        StatusCode::from_u16(payload.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, &payload)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string_pretty(body) {
        Ok(body) => with_headers(status, body),
        Err(e) => {
            let err = ApiError::from(e);
            tracing::error!(error = %err, "response serialization failed");
            let payload = ErrorPayload::from(&err);
            let body = serde_json::to_string_pretty(&payload).unwrap_or_default();
            with_headers(StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    }
}

fn with_headers(status: StatusCode, body: String) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, JSON_CONTENT_TYPE),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET"),
        ],
        body,
    )
        .into_response()
}
