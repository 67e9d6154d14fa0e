//! Client configuration for the Rebrickable API.
//!
//! A [`Config`] carries the API key (required on every request), the
//! optional user credentials for one of the two authentication modes, and
//! the knobs of the response cache. Secrets are stored with the `secrecy`
//! crate so they cannot leak through `Debug` or serialization.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Base URL of the Rebrickable v3 API.
pub const DEFAULT_BASE_URL: &str = "https://rebrickable.com/api/v3";

/// Default time-to-live for cached responses, in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;

/// Default maximum number of cached responses held at once.
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;

/// Configuration for a Rebrickable client.
///
/// The API key is mandatory. User-scoped endpoints additionally need either
/// a pre-existing session token ([`Config::with_session_token`]) or a
/// username/password pair ([`Config::with_login`]) that the client exchanges
/// for a token on first use. A session token supplied here always takes
/// precedence: the client will never run a password login over it.
///
/// # Examples
///
/// ```
/// use rebrick_common::Config;
///
/// let config = Config::new("your-api-key")
///     .with_login("brickfan", "hunter2")
///     .with_timeout(30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API key sent as `Authorization: Key <apiKey>` on every request.
    ///
    /// Will not be serialized to prevent accidental exposure.
    #[serde(skip_serializing)]
    pub api_key: SecretString,
    /// Optional custom base URL for API requests.
    ///
    /// Override this for testing against a mock server.
    pub base_url: Option<String>,
    /// Username for password login or paired with a session token.
    pub username: Option<String>,
    /// Password for the token exchange (stored securely).
    ///
    /// Will not be serialized to prevent accidental exposure.
    #[serde(skip_serializing, default)]
    pub password: Option<SecretString>,
    /// Pre-existing session token for user-scoped endpoints.
    pub session_token: Option<String>,
    /// Request timeout in seconds. `None` leaves the transport default.
    pub timeout_seconds: Option<u64>,
    /// Time-to-live for cached responses, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Maximum number of responses the cache holds at once.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

const fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECONDS
}

const fn default_cache_capacity() -> u64 {
    DEFAULT_CACHE_CAPACITY
}

impl Config {
    /// Creates a new configuration with the given API key.
    ///
    /// All optional fields are initialized to their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebrick_common::Config;
    ///
    /// let config = Config::new("your-api-key");
    /// ```
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into().into()),
            base_url: None,
            username: None,
            password: None,
            session_token: None,
            timeout_seconds: None,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Sets a custom base URL for API requests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets a username/password pair for the token exchange.
    ///
    /// The password is stored securely using `SecretString`.
    #[must_use]
    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::new(password.into().into()));
        self
    }

    /// Sets a pre-existing session token.
    ///
    /// A client constructed with a session token is already logged in;
    /// password login becomes a no-op and never overwrites this token.
    #[must_use]
    pub fn with_session_token(
        mut self,
        username: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.session_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Sets the time-to-live for cached responses.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl_seconds: u64) -> Self {
        self.cache_ttl_seconds = ttl_seconds;
        self
    }

    /// Sets the maximum number of responses held in the cache.
    #[must_use]
    pub const fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }
}
