//! The request engine: the single chokepoint for every endpoint call.
//!
//! Orchestrates fingerprint → cache lookup → authenticated dispatch →
//! response classification → cache write. Endpoint method groups hold a
//! shared reference to one engine and contain no logic of their own.

use std::time::Duration;

use log::{debug, error, warn};
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use rebrick_common::{Config, DEFAULT_BASE_URL, Params};

use crate::auth::Credentials;
use crate::cache::ResponseCache;
use crate::error::ClientError;
use crate::fingerprint::Fingerprint;

/// Outcome of a dispatched request.
///
/// `Rejected` is an application-level error: the API answered with a
/// payload carrying a `detail` field, regardless of HTTP status. Endpoint
/// methods translate it into their `Ok(None)` sentinel; only
/// transport-class failures abort a call with `Err`.
#[derive(Debug, Clone)]
pub(crate) enum ApiOutcome {
    /// Parsed JSON payload of a non-error response.
    Success(Value),
    /// The API reported an application-level error.
    Rejected {
        /// Contents of the payload's `detail` field.
        detail: String,
    },
}

/// Shared per-client state: HTTP transport, base URL, credentials, cache.
pub(crate) struct RequestEngine {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    cache: ResponseCache,
    ttl: Duration,
}

impl RequestEngine {
    pub(crate) fn new(config: &Config) -> Result<Self, ClientError> {
        let raw = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        // Stored with a trailing slash so Url::join treats it as a directory.
        let base_url = Url::parse(&format!("{}/", raw.trim_end_matches('/')))
            .map_err(|err| ClientError::Configuration(format!("invalid base URL '{raw}': {err}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            credentials: Credentials::from_config(config),
            cache: ResponseCache::new(config.cache_capacity),
            ttl: Duration::from_secs(config.cache_ttl_seconds),
        })
    }

    pub(crate) const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Issue a request, consulting the response cache first.
    ///
    /// When `body` is present the request is form-encoded and `query` is
    /// folded into the form instead of the URL. Successful payloads are
    /// cached under the request fingerprint; payloads carrying a `detail`
    /// field are logged and returned as [`ApiOutcome::Rejected`] without
    /// touching the cache, so the next identical call dispatches again.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Params,
        body: Option<&Params>,
    ) -> Result<ApiOutcome, ClientError> {
        let endpoint = self.normalize(path);
        let key = Fingerprint::new(&method, &endpoint, query, body).digest()?;

        if let Some(payload) = self.cache.get(&key).await {
            debug!("cache hit for {method} {endpoint}");
            return Ok(ApiOutcome::Success(payload));
        }

        let url = self.endpoint_url(&endpoint, if body.is_some() { None } else { Some(query) })?;
        let mut request = self.http.request(method, url.clone()).header(
            AUTHORIZATION,
            format!("Key {}", self.credentials.api_key().expose_secret()),
        );
        if let Some(body) = body {
            let mut form = query.clone();
            form.extend(body.iter().map(|(k, v)| (k.clone(), v.clone())));
            request = request.form(&form);
        }

        let response = request.send().await?;
        let text = response.text().await?;
        let payload: Value = serde_json::from_str(&text)?;

        if let Some(detail) = payload.get("detail") {
            let detail = detail
                .as_str()
                .map_or_else(|| detail.to_string(), ToOwned::to_owned);
            // The form body is never logged; it can carry a password.
            error!("API error: {detail} (url: {url}, query: {query:?})");
            return Ok(ApiOutcome::Rejected { detail });
        }

        self.cache.set(key, payload.clone(), self.ttl).await;
        Ok(ApiOutcome::Success(payload))
    }

    /// GET an endpoint and deserialize the payload.
    ///
    /// `Ok(None)` is the sentinel for an API-level rejection.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Params,
    ) -> Result<Option<T>, ClientError> {
        match self.request(Method::GET, path, &query, None).await? {
            ApiOutcome::Success(payload) => Ok(Some(serde_json::from_value(payload)?)),
            ApiOutcome::Rejected { .. } => Ok(None),
        }
    }

    /// The session token, running the token exchange at most once.
    ///
    /// Fast path: a token already held (from construction or an earlier
    /// exchange) is returned as-is, which makes this safe to call
    /// unconditionally as a precondition of every user-scoped endpoint.
    /// Otherwise the exchange posts `username`/`password` to the token
    /// endpoint under the login gate, so concurrent callers cannot race
    /// into parallel exchanges. A rejection (e.g. invalid credentials)
    /// yields `Ok(None)` and leaves the state untouched, so the next call
    /// re-attempts the exchange.
    pub(crate) async fn session_token(&self) -> Result<Option<String>, ClientError> {
        if let Some(token) = self.credentials.session_token() {
            return Ok(Some(token));
        }

        let _guard = self.credentials.login_gate().lock().await;
        // A racing caller may have finished the exchange while we waited.
        if let Some(token) = self.credentials.session_token() {
            return Ok(Some(token));
        }

        let Some((username, password)) = self.credentials.login_pair() else {
            return Err(ClientError::Configuration(
                "a username and password are required to obtain a session token".to_string(),
            ));
        };

        let mut form = Params::new();
        form.insert("username".to_string(), username);
        form.insert("password".to_string(), password.expose_secret().to_string());

        match self
            .request(Method::POST, "users/_token", &Params::new(), Some(&form))
            .await?
        {
            ApiOutcome::Success(payload) => {
                let token = payload
                    .get("user_token")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        ClientError::InvalidResponse(
                            "token response missing user_token".to_string(),
                        )
                    })?
                    .to_string();
                self.credentials.store_token(token.clone());
                Ok(Some(token))
            }
            ApiOutcome::Rejected { detail } => {
                warn!("login rejected: {detail}");
                Ok(None)
            }
        }
    }

    /// Strip the engine's base-URL prefix and surrounding slashes, so the
    /// fully-qualified and bare forms of a path share one cache key.
    fn normalize(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        path.strip_prefix(base)
            .unwrap_or(path)
            .trim_matches('/')
            .to_string()
    }

    /// Build the outbound URL. The remote API requires a trailing slash on
    /// every endpoint. Query values that are empty strings are omitted
    /// from the URL (they still count towards the fingerprint).
    fn endpoint_url(&self, endpoint: &str, query: Option<&Params>) -> Result<Url, ClientError> {
        let mut url = self.base_url.join(&format!("{endpoint}/")).map_err(|err| {
            ClientError::Configuration(format!("invalid endpoint path '{endpoint}': {err}"))
        })?;
        if let Some(query) = query {
            let pairs: Vec<_> = query.iter().filter(|(_, v)| !v.is_empty()).collect();
            if !pairs.is_empty() {
                let mut serializer = url.query_pairs_mut();
                for (key, value) in pairs {
                    serializer.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn engine_for(server: &MockServer) -> RequestEngine {
        let config = Config::new("test-key").with_base_url(server.uri());
        RequestEngine::new(&config).unwrap()
    }

    #[test]
    fn test_normalize_strips_base_url_prefix() {
        let config = Config::new("test-key").with_base_url("https://rebrickable.com/api/v3");
        let engine = RequestEngine::new(&config).unwrap();

        assert_eq!(
            engine.normalize("https://rebrickable.com/api/v3/lego/sets"),
            "lego/sets"
        );
        assert_eq!(engine.normalize("lego/sets"), "lego/sets");
        assert_eq!(engine.normalize("/lego/sets/"), "lego/sets");
    }

    #[test]
    fn test_endpoint_url_omits_empty_values() {
        let config = Config::new("test-key").with_base_url("https://rebrickable.com/api/v3");
        let engine = RequestEngine::new(&config).unwrap();

        let mut query = Params::new();
        query.insert("page".to_string(), "2".to_string());
        query.insert("search".to_string(), String::new());

        let url = engine.endpoint_url("lego/sets", Some(&query)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://rebrickable.com/api/v3/lego/sets/?page=2"
        );

        let bare = engine.endpoint_url("lego/sets", Some(&Params::new())).unwrap();
        assert_eq!(bare.as_str(), "https://rebrickable.com/api/v3/lego/sets/");
    }

    #[tokio::test]
    async fn test_cache_hit_suppresses_second_dispatch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lego/colors/4/"))
            .and(header("authorization", "Key test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 4, "name": "Red"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let engine = engine_for(&server);
        let first = engine
            .request(Method::GET, "lego/colors/4", &Params::new(), None)
            .await
            .unwrap();
        let second = engine
            .request(Method::GET, "lego/colors/4", &Params::new(), None)
            .await
            .unwrap();

        let (ApiOutcome::Success(a), ApiOutcome::Success(b)) = (first, second) else {
            panic!("expected two successful outcomes");
        };
        assert_eq!(a, b);
        assert_eq!(a["name"], "Red");
    }

    #[tokio::test]
    async fn test_rejected_response_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lego/sets/0-1/"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Not found."})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let engine = engine_for(&server);
        for _ in 0..2 {
            let outcome = engine
                .request(Method::GET, "lego/sets/0-1", &Params::new(), None)
                .await
                .unwrap();
            let ApiOutcome::Rejected { detail } = outcome else {
                panic!("expected a rejection");
            };
            assert_eq!(detail, "Not found.");
        }
    }

    #[tokio::test]
    async fn test_full_and_bare_paths_share_one_cache_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lego/sets/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let engine = engine_for(&server);
        let full = format!("{}/lego/sets", server.uri());
        engine
            .request(Method::GET, &full, &Params::new(), None)
            .await
            .unwrap();
        engine
            .request(Method::GET, "lego/sets", &Params::new(), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_query_parameters_reach_the_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lego/sets/"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let engine = engine_for(&server);
        let mut query = Params::new();
        query.insert("page".to_string(), "2".to_string());
        let outcome = engine
            .request(Method::GET, "lego/sets", &query, None)
            .await
            .unwrap();
        assert!(matches!(outcome, ApiOutcome::Success(_)));
    }

    #[tokio::test]
    async fn test_body_folds_query_into_the_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/_token/"))
            .and(body_string_contains("username=brickfan"))
            .and(body_string_contains("password=hunter2"))
            .and(body_string_contains("grant=full"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"user_token": "t0k"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let engine = engine_for(&server);
        let mut query = Params::new();
        query.insert("grant".to_string(), "full".to_string());
        let mut body = Params::new();
        body.insert("username".to_string(), "brickfan".to_string());
        body.insert("password".to_string(), "hunter2".to_string());

        let outcome = engine
            .request(Method::POST, "users/_token", &query, Some(&body))
            .await
            .unwrap();
        let ApiOutcome::Success(payload) = outcome else {
            panic!("expected a successful outcome");
        };
        assert_eq!(payload["user_token"], "t0k");
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_a_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lego/colors/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let engine = engine_for(&server);
        let err = engine
            .request(Method::GET, "lego/colors", &Params::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_network_error() {
        // Nothing listens on this port.
        let config = Config::new("test-key").with_base_url("http://127.0.0.1:9");
        let engine = RequestEngine::new(&config).unwrap();

        let err = engine
            .request(Method::GET, "lego/colors", &Params::new(), None)
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
