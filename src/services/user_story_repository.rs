use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::badge::Badge;
use crate::domain::identifier::DocumentId;
use crate::domain::user_story::{Moscow, Priority, UserStory};
use crate::services::entity_store::{EntityStore, StoreError, USER_STORIES};

/// Typed CRUD and queries over the `user_stories` collection.
///
/// Setting or clearing `sprintId` does not cascade into the owning sprint's
/// story list; callers edit both sides of the reference.
pub struct UserStoryRepository<'a> {
    store: &'a dyn EntityStore,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct UserStoryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    code: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "acceptanceCriteria")]
    acceptance_criteria: Option<String>,
    priority: Option<String>,
    moscow: Option<String>,
    #[serde(rename = "storyPoints")]
    story_points: Option<u32>,
    #[serde(rename = "sprintId")]
    sprint_id: Option<String>,
    badge: Option<String>,
}

impl<'a> UserStoryRepository<'a> {
    pub fn new(store: &'a dyn EntityStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, story: &UserStory) -> Result<DocumentId, StoreError> {
        self.store.create(USER_STORIES, story_to_doc(story)?).await
    }

    pub async fn get(&self, id: &DocumentId) -> Result<UserStory, StoreError> {
        let doc = self.store.get(USER_STORIES, id).await?;
        story_from_doc(doc)
    }

    pub async fn get_all(&self) -> Result<Vec<UserStory>, StoreError> {
        let docs = self.store.list(USER_STORIES).await?;
        docs.into_iter().map(story_from_doc).collect()
    }

    pub async fn update(&self, id: &DocumentId, patch: Value) -> Result<(), StoreError> {
        self.store.update(USER_STORIES, id, patch).await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        self.store.delete(USER_STORIES, id).await
    }

    pub async fn query_by_sprint_id(
        &self,
        sprint_id: &DocumentId,
    ) -> Result<Vec<UserStory>, StoreError> {
        let docs = self
            .store
            .query(
                USER_STORIES,
                "sprintId",
                Value::String(sprint_id.as_str().to_string()),
            )
            .await?;
        docs.into_iter().map(story_from_doc).collect()
    }

    pub async fn query_by_moscow(&self, bucket: Moscow) -> Result<Vec<UserStory>, StoreError> {
        let docs = self
            .store
            .query(
                USER_STORIES,
                "moscow",
                Value::String(bucket.as_str().to_string()),
            )
            .await?;
        docs.into_iter().map(story_from_doc).collect()
    }

    pub async fn set_badge(
        &self,
        id: &DocumentId,
        badge: Option<Badge>,
    ) -> Result<(), StoreError> {
        let value = badge.map(|badge| badge.as_str());
        self.update(id, serde_json::json!({ "badge": value })).await
    }

    pub async fn set_sprint_id(
        &self,
        id: &DocumentId,
        sprint_id: Option<&DocumentId>,
    ) -> Result<(), StoreError> {
        let value = sprint_id.map(DocumentId::as_str);
        self.update(id, serde_json::json!({ "sprintId": value }))
            .await
    }
}

fn story_from_doc(doc: Value) -> Result<UserStory, StoreError> {
    let record: UserStoryRecord = serde_json::from_value(doc).map_err(|_| StoreError::Parse)?;

    let mut story = UserStory::new();
    story.id = record.id.map(DocumentId::new);
    story.code = record.code;
    story.title = record.title;
    story.description = record.description;
    story.acceptance_criteria = record.acceptance_criteria;
    story.priority = match record.priority.as_deref() {
        None => None,
        Some(value) => Some(Priority::parse(value).ok_or(StoreError::Parse)?),
    };
    story.moscow = match record.moscow.as_deref() {
        None => None,
        Some(value) => Some(Moscow::parse(value).ok_or(StoreError::Parse)?),
    };
    story.story_points = record.story_points;
    story.sprint_id = record.sprint_id.map(DocumentId::new);
    story.badge = match record.badge.as_deref() {
        None => None,
        Some(value) => Some(Badge::parse(value).ok_or(StoreError::Parse)?),
    };
    Ok(story)
}

fn story_to_doc(story: &UserStory) -> Result<Value, StoreError> {
    let record = UserStoryRecord {
        id: None,
        code: story.code.clone(),
        title: story.title.clone(),
        description: story.description.clone(),
        acceptance_criteria: story.acceptance_criteria.clone(),
        priority: story.priority.map(|value| value.as_str().to_string()),
        moscow: story.moscow.map(|value| value.as_str().to_string()),
        story_points: story.story_points,
        sprint_id: story.sprint_id.as_ref().map(|id| id.as_str().to_string()),
        badge: story.badge.map(|value| value.as_str().to_string()),
    };
    serde_json::to_value(record).map_err(|_| StoreError::Parse)
}
