//! # rebrick
//!
//! A Rust client library for the [Rebrickable v3 API](https://rebrickable.com/api/v3/docs/).
//!
//! The client exposes typed convenience methods for the whole catalog
//! (`lego/…`) and user-collection (`users/…`) endpoint families, and routes
//! every call through one request engine that:
//! - caches successful responses in memory with a per-entry TTL,
//! - attaches the `Authorization: Key …` header on every request,
//! - lazily exchanges username/password for a session token, at most once,
//! - classifies application-level errors (a payload carrying a `detail`
//!   field) separately from transport failures.
//!
//! Only transport failures surface as `Err`. An API-level rejection (not
//! found, invalid credentials) is logged through the `log` facade and
//! returned as `Ok(None)`, so one failed lookup never aborts a caller
//! that is iterating a collection.
//!
//! ## Example
//!
//! ```no_run
//! use rebrick::{Config, Rebrick, SetFilter};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Rebrick::new(Config::new("your-api-key"))?;
//!
//! // Catalog lookups need only the API key.
//! if let Some(color) = client.lego().get_color(4).await? {
//!     println!("color 4 is {}", color.name);
//! }
//!
//! let falcon_sets = SetFilter::builder().search("millennium falcon").build();
//! if let Some(page) = client.lego().get_sets(&falcon_sets).await? {
//!     println!("{} sets found", page.count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## User-scoped endpoints
//!
//! ```no_run
//! use rebrick::{Config, PageOptions, Rebrick};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::new("your-api-key").with_login("brickfan", "hunter2");
//! let client = Rebrick::new(config)?;
//!
//! // Login happens implicitly on the first user-scoped call; the session
//! // token is then reused for the rest of the client's lifetime.
//! if let Some(lists) = client.users().get_part_lists(&PageOptions::default()).await? {
//!     for list in lists.results {
//!         println!("{} ({} parts)", list.name, list.num_parts.unwrap_or(0));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Caching
//!
//! Responses are cached per logical request (method, path, query, body)
//! for [`DEFAULT_CACHE_TTL_SECONDS`](rebrick_common::DEFAULT_CACHE_TTL_SECONDS)
//! by default; identical calls within the TTL are answered from memory
//! without a network dispatch. Error responses are never cached. The cache
//! key excludes the credentials: identical public queries share one cached
//! answer.

use std::sync::Arc;

use serde_json::Value;

mod auth;
mod cache;
mod engine;
pub mod error;
mod fingerprint;
pub mod lego;
pub mod users;

pub use error::ClientError;
pub use lego::LegoApi;
pub use reqwest::Method;
pub use users::UsersApi;

pub use rebrick_common::*;

use crate::engine::{ApiOutcome, RequestEngine};

/// Top-level client for the Rebrickable API.
///
/// Construction builds the shared request engine (HTTP transport,
/// credential state, response cache) once; the endpoint groups returned by
/// [`lego`](Self::lego) and [`users`](Self::users) all dispatch through it,
/// so they share one cache and one login.
pub struct Rebrick {
    engine: Arc<RequestEngine>,
    lego: LegoApi,
    users: UsersApi,
}

impl Rebrick {
    /// Create a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the base URL cannot be
    /// parsed, or [`ClientError::Network`] if the HTTP transport cannot be
    /// initialized.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let engine = Arc::new(RequestEngine::new(&config)?);
        Ok(Self {
            lego: LegoApi::new(Arc::clone(&engine)),
            users: UsersApi::new(Arc::clone(&engine)),
            engine,
        })
    }

    /// Catalog endpoints (`lego/…`).
    #[must_use]
    pub const fn lego(&self) -> &LegoApi {
        &self.lego
    }

    /// User-collection endpoints (`users/…`).
    #[must_use]
    pub const fn users(&self) -> &UsersApi {
        &self.users
    }

    /// Issue a raw request against an arbitrary endpoint path.
    ///
    /// Escape hatch for endpoints without a typed wrapper and for
    /// following the fully-qualified pagination URLs found in
    /// [`Page::next`](rebrick_common::Page). The path may be bare
    /// (`lego/sets`) or share the client's base URL; both forms hit the
    /// same cache entry. `Ok(None)` signals an API-level rejection.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Params,
    ) -> Result<Option<Value>, ClientError> {
        match self.engine.request(method, path, query, None).await? {
            ApiOutcome::Success(payload) => Ok(Some(payload)),
            ApiOutcome::Rejected { .. } => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_raw_request_returns_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lego/colors/"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 0, "next": null, "previous": null, "results": []
            })))
            .mount(&server)
            .await;

        let client = Rebrick::new(Config::new("test-key").with_base_url(server.uri())).unwrap();
        let mut query = Params::new();
        query.insert("page".to_string(), "2".to_string());

        let payload = client
            .request(Method::GET, "lego/colors", &query)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payload["count"], 0);
    }

    #[tokio::test]
    async fn test_raw_request_sentinel_on_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lego/colors/999/"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Not found."})),
            )
            .mount(&server)
            .await;

        let client = Rebrick::new(Config::new("test-key").with_base_url(server.uri())).unwrap();
        let payload = client
            .request(Method::GET, "lego/colors/999", &Params::new())
            .await
            .unwrap();
        assert!(payload.is_none());
    }
}
