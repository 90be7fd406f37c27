//! The authenticated user session: profile, token, and the favorites and
//! own-stories subsets.

use chrono::{DateTime, Utc};

use crate::api::{ApiClient, AuthSession};
use crate::error::ApiError;
use crate::models::{Story, UserRecord};

/// An authenticated session. Created by signup, login, or credential
/// restore; dropped on logout.
///
/// The token is private: it is never empty for a live session and only the
/// data layer should put it on the wire.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub favorites: Vec<Story>,
    pub own_stories: Vec<Story>,
    token: String,
}

impl User {
    fn from_record(record: UserRecord, token: String) -> Result<Self, ApiError> {
        if token.is_empty() {
            return Err(ApiError::Decode("service issued an empty token".into()));
        }
        Ok(Self {
            username: record.username,
            name: record.name,
            created_at: record.created_at,
            favorites: record.favorites,
            own_stories: record.stories,
            token,
        })
    }

    fn from_auth(session: AuthSession) -> Result<Self, ApiError> {
        Self::from_record(session.user, session.token)
    }

    /// Register a new account and open a session for it.
    pub async fn signup(
        client: &ApiClient,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, ApiError> {
        let session = client.signup(username, password, name).await?;
        Self::from_auth(session)
    }

    /// Authenticate an existing account.
    pub async fn login(
        client: &ApiClient,
        username: &str,
        password: &str,
    ) -> Result<Self, ApiError> {
        let session = client.login(username, password).await?;
        Self::from_auth(session)
    }

    /// Re-establish a session from a previously stored token.
    ///
    /// Best effort by contract: every failure (expired token, unknown user,
    /// network) maps to `None` so a stale credential can never block
    /// startup. The cause is only logged.
    pub async fn restore(client: &ApiClient, token: &str, username: &str) -> Option<Self> {
        if token.is_empty() || username.is_empty() {
            return None;
        }
        match client.get_user(token, username).await {
            Ok(record) => match Self::from_record(record, token.to_string()) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::debug!(%err, "stored credential produced an unusable session");
                    None
                }
            },
            Err(err) => {
                tracing::debug!(%username, %err, "session restore failed");
                None
            }
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Mark a story as a favorite.
    ///
    /// Confirmed-first, same policy as story add/remove: the service call
    /// happens before any local mutation, so a failure leaves the subset
    /// untouched. Adding an existing favorite is idempotent.
    pub async fn add_favorite(&mut self, client: &ApiClient, story: &Story) -> Result<(), ApiError> {
        client
            .add_favorite(&self.token, &self.username, &story.story_id)
            .await?;
        if !self.is_favorite(story) {
            self.favorites.push(story.clone());
        }
        Ok(())
    }

    /// Remove a story from the favorites subset, confirmed-first.
    pub async fn remove_favorite(
        &mut self,
        client: &ApiClient,
        story: &Story,
    ) -> Result<(), ApiError> {
        client
            .remove_favorite(&self.token, &self.username, &story.story_id)
            .await?;
        self.favorites.retain(|s| s.story_id != story.story_id);
        Ok(())
    }

    /// Membership test against the favorites subset, by id.
    pub fn is_favorite(&self, story: &Story) -> bool {
        self.favorites.iter().any(|s| s.story_id == story.story_id)
    }

    /// Record a freshly confirmed submission among this user's own stories.
    pub(crate) fn record_own_story(&mut self, story: Story) {
        if !self.own_stories.iter().any(|s| s.story_id == story.story_id) {
            self.own_stories.insert(0, story);
        }
    }

    /// Drop a deleted story from both subsets. Part of the deletion
    /// consistency rule; never called on its own.
    pub(crate) fn forget_story(&mut self, story_id: &str) {
        self.favorites.retain(|s| s.story_id != story_id);
        self.own_stories.retain(|s| s.story_id != story_id);
    }
}
