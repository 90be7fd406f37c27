//! The in-memory story collection and its mutation rules.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Story, StoryDraft};
use crate::user::User;

/// Ordered story collection, newest first. No two entries share an id.
///
/// Populated wholesale by [`StoryList::fetch`]; grows only at the head on a
/// confirmed submission and shrinks only by id on a confirmed deletion.
#[derive(Debug, Default)]
pub struct StoryList {
    pub stories: Vec<Story>,
}

impl StoryList {
    /// Fetch the full current story set from the service.
    ///
    /// Service order (newest first) is preserved as-is. Failure propagates;
    /// there is no retry.
    pub async fn fetch(client: &ApiClient) -> Result<Self, ApiError> {
        let stories = client.get_stories().await?;
        tracing::debug!(count = stories.len(), "fetched story list");
        Ok(Self { stories })
    }

    /// Submit a draft and, once the service confirms it, insert the
    /// resulting story at the head of the list and record it among the
    /// user's own stories.
    ///
    /// Confirmed-first: on any failure the list and the user are unchanged.
    pub async fn add_story(
        &mut self,
        client: &ApiClient,
        user: &mut User,
        draft: &StoryDraft,
    ) -> Result<Story, ApiError> {
        let story = client.create_story(user.token(), draft).await?;
        self.stories.insert(0, story.clone());
        user.record_own_story(story.clone());
        Ok(story)
    }

    /// Delete a story by id, then drop it from the list and from the user's
    /// favorites and own-stories subsets in the same logical operation.
    ///
    /// The remote call is always attempted, even when the id is absent
    /// locally (the local removal is then a no-op). On failure nothing local
    /// changes.
    pub async fn remove_story(
        &mut self,
        client: &ApiClient,
        user: &mut User,
        story_id: &str,
    ) -> Result<(), ApiError> {
        client.delete_story(user.token(), story_id).await?;
        self.stories.retain(|s| s.story_id != story_id);
        user.forget_story(story_id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Look up a story by id.
    pub fn find(&self, story_id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.story_id == story_id)
    }
}
