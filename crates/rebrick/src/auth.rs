//! Credential state shared by every request of a client.
//!
//! Holds the immutable API key plus the lazily populated session token and
//! the username/password pair feeding the token exchange. Reads go through
//! `std` locks that are never held across an await; the async `login_gate`
//! serializes token exchanges so concurrent user-scoped calls attempt at
//! most one.

use std::sync::{PoisonError, RwLock};

use secrecy::SecretString;
use tokio::sync::Mutex;

use rebrick_common::Config;

#[derive(Debug)]
pub(crate) struct Credentials {
    api_key: SecretString,
    username: RwLock<Option<String>>,
    password: RwLock<Option<SecretString>>,
    session_token: RwLock<Option<String>>,
    login_gate: Mutex<()>,
}

impl Credentials {
    pub(crate) fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            username: RwLock::new(config.username.clone()),
            password: RwLock::new(config.password.clone()),
            session_token: RwLock::new(config.session_token.clone()),
            login_gate: Mutex::new(()),
        }
    }

    /// The API key sent with every request.
    pub(crate) const fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// The session token currently held, if any.
    pub(crate) fn session_token(&self) -> Option<String> {
        self.session_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store a freshly exchanged session token.
    ///
    /// A token already present wins: a pre-existing token (supplied at
    /// construction or stored by a racing login) is never overwritten.
    pub(crate) fn store_token(&self, token: String) {
        let mut guard = self
            .session_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if guard.is_none() {
            *guard = Some(token);
        }
    }

    /// Fill in username/password, keeping any values already present.
    pub(crate) fn fill_login(&self, username: &str, password: &str) {
        let mut user_guard = self.username.write().unwrap_or_else(PoisonError::into_inner);
        if user_guard.is_none() {
            *user_guard = Some(username.to_string());
        }
        drop(user_guard);

        let mut pass_guard = self.password.write().unwrap_or_else(PoisonError::into_inner);
        if pass_guard.is_none() {
            *pass_guard = Some(SecretString::new(password.to_string().into()));
        }
    }

    /// The username/password pair for the token exchange, if complete.
    pub(crate) fn login_pair(&self) -> Option<(String, SecretString)> {
        let username = self
            .username
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;
        let password = self
            .password
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;
        Some((username, password))
    }

    /// Gate serializing token exchanges.
    pub(crate) const fn login_gate(&self) -> &Mutex<()> {
        &self.login_gate
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_pre_supplied_token_is_never_overwritten() {
        let config = Config::new("key").with_session_token("user", "original");
        let credentials = Credentials::from_config(&config);

        credentials.store_token("fresh".to_string());
        assert_eq!(credentials.session_token().as_deref(), Some("original"));
    }

    #[test]
    fn test_store_token_populates_empty_state() {
        let credentials = Credentials::from_config(&Config::new("key"));
        assert!(credentials.session_token().is_none());

        credentials.store_token("fresh".to_string());
        assert_eq!(credentials.session_token().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_fill_login_keeps_constructed_values() {
        let config = Config::new("key").with_login("user", "pass");
        let credentials = Credentials::from_config(&config);

        credentials.fill_login("other", "other-pass");
        let (username, _) = credentials.login_pair().unwrap();
        assert_eq!(username, "user");
    }

    #[test]
    fn test_login_pair_requires_both_values() {
        let credentials = Credentials::from_config(&Config::new("key"));
        assert!(credentials.login_pair().is_none());

        credentials.fill_login("user", "pass");
        assert!(credentials.login_pair().is_some());
    }
}
