//! Application state: the single owner of the current session and story
//! list, with an explicit lifecycle (startup, login/signup, logout) instead
//! of ambient globals. View code receives it by reference and maps user
//! actions onto its methods, nothing more.

use std::collections::HashSet;
use std::fmt;
use std::io;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Story, StoryDraft};
use crate::session::{CredentialStore, Credentials};
use crate::stories::StoryList;
use crate::user::User;

/// Mutating operations the duplicate-request guard distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Submit,
    Delete,
    Favorite,
    Unfavorite,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Submit => "submit",
            Operation::Delete => "delete",
            Operation::Favorite => "favorite",
            Operation::Unfavorite => "unfavorite",
        };
        f.write_str(name)
    }
}

/// Rejects a second identical request while the first is still in flight,
/// keyed by operation + target id. Double-clicking submit twice gets one
/// network call and one `DuplicateRequest` error, not two submissions.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    active: HashSet<(Operation, String)>,
}

impl InFlightGuard {
    pub fn begin(&mut self, operation: Operation, target: &str) -> Result<(), ApiError> {
        if !self.active.insert((operation, target.to_string())) {
            return Err(ApiError::DuplicateRequest {
                operation: operation.to_string(),
                target: target.to_string(),
            });
        }
        Ok(())
    }

    pub fn finish(&mut self, operation: Operation, target: &str) {
        self.active.remove(&(operation, target.to_string()));
    }
}

/// Owns the current session and the current story list for the whole
/// process. Created once at startup; the user slot is replaced on login and
/// cleared on logout.
pub struct AppState {
    pub client: ApiClient,
    pub stories: StoryList,
    pub user: Option<User>,
    store: CredentialStore,
    guard: InFlightGuard,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            client: ApiClient::new(config.base_url.clone()),
            stories: StoryList::default(),
            user: None,
            store: CredentialStore::new(config.session_file.clone()),
            guard: InFlightGuard::default(),
        }
    }

    /// Page-load equivalent: try to restore a remembered session, then fetch
    /// the story list. A failed restore is silent by contract; a failed
    /// fetch propagates.
    pub async fn startup(&mut self) -> Result<(), ApiError> {
        if let Some(credentials) = self.store.load() {
            self.user =
                User::restore(&self.client, &credentials.token, &credentials.username).await;
            if self.user.is_none() {
                tracing::warn!("stored session could not be restored; continuing logged out");
            }
        }
        self.stories = StoryList::fetch(&self.client).await?;
        Ok(())
    }

    /// Authenticate and persist the credential pair for later restoration.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User, ApiError> {
        let user = User::login(&self.client, username, password).await?;
        self.persist(&user);
        Ok(self.user.insert(user))
    }

    /// Register a new account, then behave exactly like login.
    pub async fn signup(
        &mut self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<&User, ApiError> {
        let user = User::signup(&self.client, username, password, name).await?;
        self.persist(&user);
        Ok(self.user.insert(user))
    }

    /// End the session and discard the persisted credential so a later
    /// startup cannot resurrect it.
    pub fn logout(&mut self) -> io::Result<()> {
        self.user = None;
        self.store.clear()
    }

    /// Submit a draft story. Requires a session; guarded against double
    /// submission of the same title while the first request is in flight.
    pub async fn submit(&mut self, draft: &StoryDraft) -> Result<Story, ApiError> {
        self.require_user()?;
        self.guard.begin(Operation::Submit, &draft.title)?;
        let result = match self.user.as_mut() {
            Some(user) => self.stories.add_story(&self.client, user, draft).await,
            None => Err(not_logged_in()),
        };
        self.guard.finish(Operation::Submit, &draft.title);
        result
    }

    /// Delete one of the session user's stories by id.
    pub async fn delete(&mut self, story_id: &str) -> Result<(), ApiError> {
        self.require_user()?;
        self.guard.begin(Operation::Delete, story_id)?;
        let result = match self.user.as_mut() {
            Some(user) => {
                self.stories
                    .remove_story(&self.client, user, story_id)
                    .await
            }
            None => Err(not_logged_in()),
        };
        self.guard.finish(Operation::Delete, story_id);
        result
    }

    /// Favorite a story from the current list by id.
    pub async fn favorite(&mut self, story_id: &str) -> Result<Story, ApiError> {
        self.toggle_favorite(Operation::Favorite, story_id).await
    }

    /// Remove a story from the session user's favorites by id.
    pub async fn unfavorite(&mut self, story_id: &str) -> Result<Story, ApiError> {
        self.toggle_favorite(Operation::Unfavorite, story_id).await
    }

    async fn toggle_favorite(
        &mut self,
        operation: Operation,
        story_id: &str,
    ) -> Result<Story, ApiError> {
        self.require_user()?;
        let story = self
            .stories
            .find(story_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("no story with id '{story_id}'")))?;
        self.guard.begin(operation, story_id)?;
        let result = match self.user.as_mut() {
            Some(user) if operation == Operation::Favorite => {
                user.add_favorite(&self.client, &story).await
            }
            Some(user) => user.remove_favorite(&self.client, &story).await,
            None => Err(not_logged_in()),
        };
        self.guard.finish(operation, story_id);
        result.map(|()| story)
    }

    fn require_user(&self) -> Result<&User, ApiError> {
        self.user.as_ref().ok_or_else(not_logged_in)
    }

    fn persist(&self, user: &User) {
        let credentials = Credentials {
            token: user.token().to_string(),
            username: user.username.clone(),
        };
        if let Err(err) = self.store.save(&credentials) {
            // The session still works for this invocation; only restoration
            // next time is lost.
            tracing::warn!(path = %self.store.path().display(), %err, "could not persist session");
        }
    }
}

fn not_logged_in() -> ApiError {
    ApiError::Authorization("no active session; login first".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_rejects_duplicate_and_releases_on_finish() {
        let mut guard = InFlightGuard::default();
        guard.begin(Operation::Delete, "1").unwrap();
        assert!(matches!(
            guard.begin(Operation::Delete, "1"),
            Err(ApiError::DuplicateRequest { .. })
        ));
        guard.finish(Operation::Delete, "1");
        guard.begin(Operation::Delete, "1").unwrap();
    }

    #[test]
    fn guard_keys_on_operation_and_target() {
        let mut guard = InFlightGuard::default();
        guard.begin(Operation::Favorite, "1").unwrap();
        // Same target, different operation: allowed.
        guard.begin(Operation::Unfavorite, "1").unwrap();
        // Same operation, different target: allowed.
        guard.begin(Operation::Favorite, "2").unwrap();
    }
}
