//! Remote service client: HTTP/JSON calls against the story API.
//!
//! One method per endpoint, no retry, no batching. Mutating calls carry the
//! session token in the request body exactly as the service expects it;
//! profile lookup passes it as a query parameter.

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::models::{Story, StoryDraft, UserRecord};

/// Public instance of the story service.
pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

/// Successful signup/login payload: the profile plus an issued token.
#[derive(Deserialize, Debug)]
pub struct AuthSession {
    pub user: UserRecord,
    pub token: String,
}

#[derive(Deserialize)]
struct StoriesResponse {
    stories: Vec<Story>,
}

#[derive(Deserialize)]
struct StoryResponse {
    story: Story,
}

#[derive(Deserialize)]
struct UserResponse {
    user: UserRecord,
}

/// Which error a rejected credential maps to. Signup/login failures are
/// authentication errors; everything else carries a session token and a
/// rejection means the token was bad.
#[derive(Clone, Copy)]
enum AuthKind {
    Credentials,
    Token,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /stories — the full current story set, service order preserved.
    pub async fn get_stories(&self) -> Result<Vec<Story>, ApiError> {
        let res = self
            .http
            .get(format!("{}/stories", self.base_url))
            .send()
            .await?;
        let res = ensure_ok(res, AuthKind::Token).await?;
        let body: StoriesResponse = read_json(res).await?;
        Ok(body.stories)
    }

    /// POST /stories — submit a draft; returns the story the service built.
    pub async fn create_story(&self, token: &str, draft: &StoryDraft) -> Result<Story, ApiError> {
        let res = self
            .http
            .post(format!("{}/stories", self.base_url))
            .json(&json!({ "token": token, "story": draft }))
            .send()
            .await?;
        let res = ensure_ok(res, AuthKind::Token).await?;
        let body: StoryResponse = read_json(res).await?;
        Ok(body.story)
    }

    /// DELETE /stories/{id} — remove a story this token's user owns.
    pub async fn delete_story(&self, token: &str, story_id: &str) -> Result<(), ApiError> {
        let res = self
            .http
            .delete(format!("{}/stories/{}", self.base_url, story_id))
            .json(&json!({ "token": token }))
            .send()
            .await?;
        ensure_ok(res, AuthKind::Token).await?;
        Ok(())
    }

    /// POST /signup — register a new account.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthSession, ApiError> {
        let res = self
            .http
            .post(format!("{}/signup", self.base_url))
            .json(&json!({
                "user": { "username": username, "password": password, "name": name }
            }))
            .send()
            .await?;
        let res = ensure_ok(res, AuthKind::Credentials).await?;
        read_json(res).await
    }

    /// POST /login — authenticate an existing account.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, ApiError> {
        let res = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&json!({
                "user": { "username": username, "password": password }
            }))
            .send()
            .await?;
        let res = ensure_ok(res, AuthKind::Credentials).await?;
        read_json(res).await
    }

    /// GET /users/{username} — profile lookup, token as proof of authorization.
    pub async fn get_user(&self, token: &str, username: &str) -> Result<UserRecord, ApiError> {
        let res = self
            .http
            .get(format!("{}/users/{}", self.base_url, username))
            .query(&[("token", token)])
            .send()
            .await?;
        let res = ensure_ok(res, AuthKind::Token).await?;
        let body: UserResponse = read_json(res).await?;
        Ok(body.user)
    }

    /// POST /users/{username}/favorites/{id} — mark a story as a favorite.
    pub async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let res = self
            .http
            .post(self.favorite_url(username, story_id))
            .json(&json!({ "token": token }))
            .send()
            .await?;
        ensure_ok(res, AuthKind::Token).await?;
        Ok(())
    }

    /// DELETE /users/{username}/favorites/{id} — unmark a favorite.
    pub async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let res = self
            .http
            .delete(self.favorite_url(username, story_id))
            .json(&json!({ "token": token }))
            .send()
            .await?;
        ensure_ok(res, AuthKind::Token).await?;
        Ok(())
    }

    fn favorite_url(&self, username: &str, story_id: &str) -> String {
        format!("{}/users/{}/favorites/{}", self.base_url, username, story_id)
    }
}

/// Map a non-success status onto the error taxonomy. The body text, when
/// readable, becomes the error message.
async fn ensure_ok(res: Response, auth: AuthKind) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = res.text().await.unwrap_or_default();
    tracing::debug!(%status, %message, "service rejected request");
    match (status.as_u16(), auth) {
        (401 | 403, AuthKind::Credentials) => Err(ApiError::Authentication),
        (401 | 403, AuthKind::Token) => Err(ApiError::Authorization(message)),
        (404, _) => Err(ApiError::NotFound(message)),
        (code, _) => Err(ApiError::Unexpected {
            status: code,
            message,
        }),
    }
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    res.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e)
        }
    })
}
