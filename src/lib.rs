//! mcmod-api: HTTP search API for MC百科 (mcmod.cn).
//!
//! Wraps the [`mcmod_search`] engine in a small JSON service:
//! `GET /?key=IC2` returns the best-matching mod page plus up to four
//! ranked alternatives; `GET /` returns the API documentation.
//!
//! # Architecture
//!
//! - **config**: TOML configuration for the listener and the upstream site
//! - **server**: axum router, request validation, deadlines, CORS headers
//! - **docs**: static documentation payload
//! - **mcmod_search**: fetch, extraction, scoring and ranking

pub mod config;
pub mod docs;
pub mod error;
pub mod server;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use server::{ApiServer, router};
