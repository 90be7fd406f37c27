//! Domain types shared across the client: stories, drafts, and the user
//! profile record as the service reports it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// One submitted story, exactly as the service returns it.
///
/// Identity is `story_id`, assigned by the service and stable for the story's
/// lifetime. Instances are built from API payloads and never mutated in
/// place; collections drop them by id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Host component of the story's URL, parsed on demand.
    ///
    /// Display-only best effort: a malformed URL is a parse error here, not
    /// an invariant violation of the Story itself.
    pub fn host_name(&self) -> Result<String, url::ParseError> {
        let parsed = Url::parse(&self.url)?;
        parsed
            .host_str()
            .map(str::to_owned)
            .ok_or(url::ParseError::EmptyHost)
    }
}

/// Fields a user supplies when submitting a new story.
#[derive(Serialize, Debug, Clone)]
pub struct StoryDraft {
    pub title: String,
    pub author: String,
    pub url: String,
}

/// User profile as reported by the service on signup/login/lookup.
///
/// `stories` is the service's name for the stories this user submitted.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<Story>,
    #[serde(default)]
    pub stories: Vec<Story>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(url: &str) -> Story {
        Story {
            story_id: "s1".to_string(),
            title: "Test".to_string(),
            author: "Author".to_string(),
            url: url.to_string(),
            username: "poster".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn host_name_returns_host_component() {
        let s = story("https://example.com/a/b?x=1");
        assert_eq!(s.host_name().unwrap(), "example.com");
    }

    #[test]
    fn host_name_handles_port_and_path() {
        let s = story("http://news.ycombinator.com/item?id=1");
        assert_eq!(s.host_name().unwrap(), "news.ycombinator.com");
    }

    #[test]
    fn host_name_fails_on_malformed_url() {
        let s = story("not a url");
        assert!(s.host_name().is_err());
    }

    #[test]
    fn story_deserializes_from_service_payload() {
        let raw = serde_json::json!({
            "storyId": "abc",
            "title": "Hello",
            "author": "Ann",
            "url": "https://example.com",
            "username": "ann",
            "createdAt": "2024-01-15T08:30:00.000Z"
        });
        let story: Story = serde_json::from_value(raw).unwrap();
        assert_eq!(story.story_id, "abc");
        assert_eq!(story.username, "ann");
    }

    #[test]
    fn user_record_defaults_missing_subsets_to_empty() {
        let raw = serde_json::json!({
            "username": "ann",
            "name": "Ann",
            "createdAt": "2024-01-15T08:30:00.000Z"
        });
        let record: UserRecord = serde_json::from_value(raw).unwrap();
        assert!(record.favorites.is_empty());
        assert!(record.stories.is_empty());
    }
}
