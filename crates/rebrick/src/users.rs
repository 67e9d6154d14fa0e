//! User-collection endpoints under `users/`.
//!
//! Most of these are scoped to the authenticated user: they embed the
//! session token in the path, so each method first runs the login
//! precondition through the shared engine. When no token can be obtained
//! (the token endpoint rejected the credentials) the method returns the
//! `Ok(None)` sentinel and the next call re-attempts the exchange. The
//! badge endpoints are site-wide and need no token.

use std::sync::Arc;

use rebrick_common::{
    Badge, Build, ColorUsage, ColorUsageMap, LostPart, Minifig, Page, PageOptions, Params,
    PartList, Profile, SetList, SetListEntry, ToQuery, UserPart,
};

use crate::engine::RequestEngine;
use crate::error::ClientError;

/// The `users/` endpoint family: the authenticated user's collection.
///
/// Obtained from [`Rebrick::users`](crate::Rebrick::users).
pub struct UsersApi {
    engine: Arc<RequestEngine>,
}

impl UsersApi {
    pub(crate) const fn new(engine: Arc<RequestEngine>) -> Self {
        Self { engine }
    }

    /// Log in to the API, exchanging the configured username/password for
    /// a session token.
    ///
    /// Idempotent: once a token is held (from an earlier call or supplied
    /// at construction) this is a no-op. Returns `Ok(false)` when the
    /// token endpoint rejected the credentials; a later call re-attempts
    /// the exchange.
    ///
    /// Calling this up front is optional: every user-scoped method runs
    /// the same precondition itself.
    pub async fn login(&self) -> Result<bool, ClientError> {
        Ok(self.engine.session_token().await?.is_some())
    }

    /// Log in with credentials supplied now instead of at construction.
    ///
    /// Values already present on the client (from the configuration) win
    /// over the arguments; a pre-existing session token short-circuits the
    /// exchange entirely.
    pub async fn login_with(&self, username: &str, password: &str) -> Result<bool, ClientError> {
        self.engine.credentials().fill_login(username, password);
        self.login().await
    }

    /// The session token currently held, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.engine.credentials().session_token()
    }

    /// Path under the authenticated user, or `None` when login failed.
    async fn user_path(&self, suffix: &str) -> Result<Option<String>, ClientError> {
        Ok(self
            .engine
            .session_token()
            .await?
            .map(|token| format!("users/{token}/{suffix}")))
    }

    /// Get all parts in the user's part lists and in the sets of their
    /// set lists.
    ///
    /// This call is resource intensive on the server side; avoid calling
    /// it more often than the cache TTL.
    pub async fn get_all_parts(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<UserPart>>, ClientError> {
        let Some(path) = self.user_path("allparts").await? else {
            return Ok(None);
        };
        self.engine.get(&path, options.to_query()).await
    }

    /// Find out how many parts the user needs to build the specified set.
    pub async fn get_build(&self, set_num: &str) -> Result<Option<Build>, ClientError> {
        let Some(path) = self.user_path(&format!("build/{set_num}")).await? else {
            return Ok(None);
        };
        self.engine.get(&path, Params::new()).await
    }

    /// Get all lost parts from the user's collection.
    pub async fn get_lost_parts(&self) -> Result<Option<Page<LostPart>>, ClientError> {
        let Some(path) = self.user_path("lost_parts").await? else {
            return Ok(None);
        };
        self.engine.get(&path, Params::new()).await
    }

    /// Get all minifigs in the sets of the user's set lists.
    pub async fn get_minifigs(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<Minifig>>, ClientError> {
        let Some(path) = self.user_path("minifigs").await? else {
            return Ok(None);
        };
        self.engine.get(&path, options.to_query()).await
    }

    /// Get all of the user's part lists.
    pub async fn get_part_lists(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<PartList>>, ClientError> {
        let Some(path) = self.user_path("partlists").await? else {
            return Ok(None);
        };
        self.engine.get(&path, options.to_query()).await
    }

    /// Get details about a specific part list.
    pub async fn get_part_list(&self, list_id: u64) -> Result<Option<PartList>, ClientError> {
        let Some(path) = self.user_path(&format!("partlists/{list_id}")).await? else {
            return Ok(None);
        };
        self.engine.get(&path, Params::new()).await
    }

    /// Get all parts in a specific part list.
    pub async fn get_part_list_parts(
        &self,
        list_id: u64,
        options: &PageOptions,
    ) -> Result<Option<Page<UserPart>>, ClientError> {
        let Some(path) = self.user_path(&format!("partlists/{list_id}/parts")).await? else {
            return Ok(None);
        };
        self.engine.get(&path, options.to_query()).await
    }

    /// Get all parts in all of the user's part lists.
    pub async fn get_parts(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<UserPart>>, ClientError> {
        let Some(path) = self.user_path("parts").await? else {
            return Ok(None);
        };
        self.engine.get(&path, options.to_query()).await
    }

    /// Get the authenticated user's profile.
    pub async fn get_profile(&self) -> Result<Option<Profile>, ClientError> {
        let Some(path) = self.user_path("profile").await? else {
            return Ok(None);
        };
        self.engine.get(&path, Params::new()).await
    }

    /// Get all of the user's set lists.
    pub async fn get_set_lists(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<SetList>>, ClientError> {
        let Some(path) = self.user_path("setlists").await? else {
            return Ok(None);
        };
        self.engine.get(&path, options.to_query()).await
    }

    /// Get details about a specific set list.
    pub async fn get_set_list(&self, list_id: u64) -> Result<Option<SetList>, ClientError> {
        let Some(path) = self.user_path(&format!("setlists/{list_id}")).await? else {
            return Ok(None);
        };
        self.engine.get(&path, Params::new()).await
    }

    /// Get all sets in a specific set list.
    pub async fn get_set_list_sets(
        &self,
        list_id: u64,
        options: &PageOptions,
    ) -> Result<Option<Page<SetListEntry>>, ClientError> {
        let Some(path) = self.user_path(&format!("setlists/{list_id}/sets")).await? else {
            return Ok(None);
        };
        self.engine.get(&path, options.to_query()).await
    }

    /// Get details about a specific set in a set list.
    pub async fn get_set_list_set(
        &self,
        list_id: u64,
        set_num: &str,
    ) -> Result<Option<SetListEntry>, ClientError> {
        let Some(path) = self
            .user_path(&format!("setlists/{list_id}/sets/{set_num}"))
            .await?
        else {
            return Ok(None);
        };
        self.engine.get(&path, Params::new()).await
    }

    /// Get all sets in the user's collection.
    pub async fn get_sets(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<SetListEntry>>, ClientError> {
        let Some(path) = self.user_path("sets").await? else {
            return Ok(None);
        };
        self.engine.get(&path, options.to_query()).await
    }

    /// Get details about a specific set in the user's collection.
    pub async fn get_set(&self, set_num: &str) -> Result<Option<SetListEntry>, ClientError> {
        let Some(path) = self.user_path(&format!("sets/{set_num}")).await? else {
            return Ok(None);
        };
        self.engine.get(&path, Params::new()).await
    }

    /// Get all available badges.
    ///
    /// Site-wide data; no session token required.
    pub async fn get_badges(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<Badge>>, ClientError> {
        self.engine.get("users/badges", options.to_query()).await
    }

    /// Get details about a specific badge.
    pub async fn get_badge(&self, badge_id: u64) -> Result<Option<Badge>, ClientError> {
        self.engine
            .get(&format!("users/badges/{badge_id}"), Params::new())
            .await
    }

    /// Aggregate the colors used across all of the user's part lists.
    ///
    /// Walks every part list and sums part quantities per color name. Part
    /// lists whose parts cannot be fetched are skipped.
    pub async fn get_all_colors_from_part_lists(
        &self,
    ) -> Result<Option<ColorUsageMap>, ClientError> {
        let Some(lists) = self.get_part_lists(&PageOptions::default()).await? else {
            return Ok(None);
        };

        let mut colors = ColorUsageMap::new();
        for list in lists.results {
            let Some(parts) = self
                .get_part_list_parts(list.id, &PageOptions::sized(500))
                .await?
            else {
                continue;
            };
            for part in parts.results {
                let entry = colors
                    .entry(part.color.name.clone())
                    .or_insert_with(|| ColorUsage {
                        color: part.color.clone(),
                        count: 0,
                    });
                entry.count += u64::from(part.quantity);
            }
        }
        Ok(Some(colors))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rebrick_common::Config;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::Rebrick;

    use super::*;

    fn token_success(server_token: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"user_token": server_token}))
    }

    fn empty_page() -> serde_json::Value {
        serde_json::json!({"count": 0, "next": null, "previous": null, "results": []})
    }

    #[tokio::test]
    async fn test_login_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/_token/"))
            .and(body_string_contains("username=brickfan"))
            .respond_with(token_success("t0k"))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::new("test-key")
            .with_base_url(server.uri())
            .with_login("brickfan", "hunter2");
        let client = Rebrick::new(config).unwrap();

        assert!(client.users().login().await.unwrap());
        assert!(client.users().login().await.unwrap());
        assert_eq!(client.users().token().as_deref(), Some("t0k"));
    }

    #[tokio::test]
    async fn test_pre_supplied_token_skips_the_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/_token/"))
            .respond_with(token_success("fresh"))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/pre-t0k/partlists/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
            .mount(&server)
            .await;

        let config = Config::new("test-key")
            .with_base_url(server.uri())
            .with_session_token("brickfan", "pre-t0k")
            .with_login("brickfan", "hunter2");
        let client = Rebrick::new(config).unwrap();

        assert!(client.users().login().await.unwrap());
        let lists = client
            .users()
            .get_part_lists(&PageOptions::default())
            .await
            .unwrap();
        assert!(lists.is_some());
        assert_eq!(client.users().token().as_deref(), Some("pre-t0k"));
    }

    #[tokio::test]
    async fn test_rejected_login_is_reattempted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/_token/"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"detail": "Invalid credentials"})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let config = Config::new("test-key")
            .with_base_url(server.uri())
            .with_login("brickfan", "wrong");
        let client = Rebrick::new(config).unwrap();

        assert!(!client.users().login().await.unwrap());
        assert!(client.users().token().is_none());
        // The failed exchange is not cached and not remembered: the next
        // user-scoped call runs it again.
        assert!(client.users().get_profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_without_credentials_is_a_configuration_error() {
        let server = MockServer::start().await;
        let client = Rebrick::new(Config::new("test-key").with_base_url(server.uri())).unwrap();

        let err = client.users().login().await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_login_with_supplies_missing_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/_token/"))
            .and(body_string_contains("username=late"))
            .and(body_string_contains("password=pass"))
            .respond_with(token_success("t0k"))
            .expect(1)
            .mount(&server)
            .await;

        let client = Rebrick::new(Config::new("test-key").with_base_url(server.uri())).unwrap();
        assert!(client.users().login_with("late", "pass").await.unwrap());
    }

    #[tokio::test]
    async fn test_color_aggregation_across_part_lists() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/_token/"))
            .respond_with(token_success("t0k"))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/users/t0k/partlists/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {"id": 1, "name": "Bricks", "is_buildable": true, "num_parts": 5},
                    {"id": 2, "name": "Plates", "is_buildable": true, "num_parts": 1}
                ]
            })))
            .mount(&server)
            .await;

        let red = serde_json::json!({"id": 4, "name": "Red", "rgb": "C91A09", "is_trans": false});
        let blue = serde_json::json!({"id": 1, "name": "Blue", "rgb": "0055BF", "is_trans": false});
        Mock::given(method("GET"))
            .and(path("/users/t0k/partlists/1/parts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {"quantity": 3, "part": {"part_num": "3001", "name": "Brick 2 x 4"}, "color": red.clone()},
                    {"quantity": 2, "part": {"part_num": "3020", "name": "Plate 2 x 4"}, "color": blue}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/t0k/partlists/2/parts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "next": null,
                "previous": null,
                "results": [
                    {"quantity": 1, "part": {"part_num": "3001", "name": "Brick 2 x 4"}, "color": red}
                ]
            })))
            .mount(&server)
            .await;

        let config = Config::new("test-key")
            .with_base_url(server.uri())
            .with_login("brickfan", "hunter2");
        let client = Rebrick::new(config).unwrap();

        let colors = client
            .users()
            .get_all_colors_from_part_lists()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors["Red"].count, 4);
        assert_eq!(colors["Red"].color.id, 4);
        assert_eq!(colors["Blue"].count, 2);
    }
}
