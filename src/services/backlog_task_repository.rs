use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::backlog_task::{BacklogTask, TaskStatus};
use crate::domain::badge::Badge;
use crate::domain::identifier::DocumentId;
use crate::domain::user_story::Priority;
use crate::services::entity_store::{BACKLOG_TASKS, EntityStore, StoreError};

/// Typed CRUD and queries over the `backlog_tasks` collection.
pub struct BacklogTaskRepository<'a> {
    store: &'a dyn EntityStore,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct TaskRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    #[serde(rename = "storyPoints")]
    story_points: Option<u32>,
    status: Option<String>,
    #[serde(rename = "userStoryIds")]
    user_story_ids: Vec<String>,
    badge: Option<String>,
}

impl<'a> BacklogTaskRepository<'a> {
    pub fn new(store: &'a dyn EntityStore) -> Self {
        Self { store }
    }

    /// A task cannot be created without a title and a priority;
    /// `user_story_ids` may be empty.
    pub async fn create(&self, task: &BacklogTask) -> Result<DocumentId, StoreError> {
        if task.title.is_none() {
            return Err(StoreError::Other("task requires a title".to_string()));
        }
        if task.priority.is_none() {
            return Err(StoreError::Other("task requires a priority".to_string()));
        }
        self.store.create(BACKLOG_TASKS, task_to_doc(task)?).await
    }

    pub async fn get(&self, id: &DocumentId) -> Result<BacklogTask, StoreError> {
        let doc = self.store.get(BACKLOG_TASKS, id).await?;
        task_from_doc(doc)
    }

    pub async fn get_all(&self) -> Result<Vec<BacklogTask>, StoreError> {
        let docs = self.store.list(BACKLOG_TASKS).await?;
        docs.into_iter().map(task_from_doc).collect()
    }

    pub async fn update(&self, id: &DocumentId, patch: Value) -> Result<(), StoreError> {
        self.store.update(BACKLOG_TASKS, id, patch).await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        self.store.delete(BACKLOG_TASKS, id).await
    }

    pub async fn query_by_user_story_id(
        &self,
        story_id: &DocumentId,
    ) -> Result<Vec<BacklogTask>, StoreError> {
        let docs = self
            .store
            .query(
                BACKLOG_TASKS,
                "userStoryIds",
                Value::String(story_id.as_str().to_string()),
            )
            .await?;
        docs.into_iter().map(task_from_doc).collect()
    }

    pub async fn set_badge(
        &self,
        id: &DocumentId,
        badge: Option<Badge>,
    ) -> Result<(), StoreError> {
        let value = badge.map(|badge| badge.as_str());
        self.update(id, serde_json::json!({ "badge": value })).await
    }
}

fn task_from_doc(doc: Value) -> Result<BacklogTask, StoreError> {
    let record: TaskRecord = serde_json::from_value(doc).map_err(|_| StoreError::Parse)?;

    let mut task = BacklogTask::new();
    task.id = record.id.map(DocumentId::new);
    task.title = record.title;
    task.description = record.description;
    task.priority = match record.priority.as_deref() {
        None => None,
        Some(value) => Some(Priority::parse(value).ok_or(StoreError::Parse)?),
    };
    task.story_points = record.story_points;
    task.status = match record.status.as_deref() {
        None => TaskStatus::default(),
        Some(value) => TaskStatus::parse(value).ok_or(StoreError::Parse)?,
    };
    task.user_story_ids = record.user_story_ids.into_iter().map(DocumentId::new).collect();
    task.badge = match record.badge.as_deref() {
        None => None,
        Some(value) => Some(Badge::parse(value).ok_or(StoreError::Parse)?),
    };
    Ok(task)
}

fn task_to_doc(task: &BacklogTask) -> Result<Value, StoreError> {
    let record = TaskRecord {
        id: None,
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority.map(|value| value.as_str().to_string()),
        story_points: task.story_points,
        status: Some(task.status.as_str().to_string()),
        user_story_ids: task
            .user_story_ids
            .iter()
            .map(|id| id.as_str().to_string())
            .collect(),
        badge: task.badge.map(|value| value.as_str().to_string()),
    };
    serde_json::to_value(record).map_err(|_| StoreError::Parse)
}
