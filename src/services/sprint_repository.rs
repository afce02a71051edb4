use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::identifier::DocumentId;
use crate::domain::sprint::{Sprint, SprintStatus};
use crate::services::entity_store::{EntityStore, SPRINTS, StoreError};

/// Typed CRUD over the `sprints` collection. Writing a sprint never touches
/// user stories or tasks; cross-entity upkeep is the badge routines' job.
pub struct SprintRepository<'a> {
    store: &'a dyn EntityStore,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct SprintRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    title: Option<String>,
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
    #[serde(rename = "userStoryIds")]
    user_story_ids: Vec<String>,
    status: Option<String>,
    velocity: Option<f32>,
}

impl<'a> SprintRepository<'a> {
    pub fn new(store: &'a dyn EntityStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, sprint: &Sprint) -> Result<DocumentId, StoreError> {
        self.store.create(SPRINTS, sprint_to_doc(sprint)?).await
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Sprint, StoreError> {
        let doc = self.store.get(SPRINTS, id).await?;
        sprint_from_doc(doc)
    }

    pub async fn get_all(&self) -> Result<Vec<Sprint>, StoreError> {
        let docs = self.store.list(SPRINTS).await?;
        docs.into_iter().map(sprint_from_doc).collect()
    }

    /// Partial merge. Date ordering is validated at the edge, not here.
    pub async fn update(&self, id: &DocumentId, patch: Value) -> Result<(), StoreError> {
        self.store.update(SPRINTS, id, patch).await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        self.store.delete(SPRINTS, id).await
    }

    pub async fn set_user_story_ids(
        &self,
        id: &DocumentId,
        story_ids: &[DocumentId],
    ) -> Result<(), StoreError> {
        let ids: Vec<&str> = story_ids.iter().map(DocumentId::as_str).collect();
        self.update(id, serde_json::json!({ "userStoryIds": ids }))
            .await
    }

    pub async fn set_status(&self, id: &DocumentId, status: SprintStatus) -> Result<(), StoreError> {
        self.update(id, serde_json::json!({ "status": status.as_str() }))
            .await
    }
}

fn sprint_from_doc(doc: Value) -> Result<Sprint, StoreError> {
    let record: SprintRecord = serde_json::from_value(doc).map_err(|_| StoreError::Parse)?;

    let mut sprint = Sprint::new();
    sprint.id = record.id.map(DocumentId::new);
    sprint.title = record.title;
    sprint.start_date = parse_date_opt(record.start_date.as_deref())?;
    sprint.end_date = parse_date_opt(record.end_date.as_deref())?;
    sprint.user_story_ids = record.user_story_ids.into_iter().map(DocumentId::new).collect();
    sprint.status = match record.status.as_deref() {
        None => SprintStatus::default(),
        Some(value) => SprintStatus::parse(value).ok_or(StoreError::Parse)?,
    };
    sprint.velocity = record.velocity;
    Ok(sprint)
}

fn sprint_to_doc(sprint: &Sprint) -> Result<Value, StoreError> {
    let record = SprintRecord {
        id: None,
        title: sprint.title.clone(),
        start_date: sprint.start_date.map(|date| date.format("%Y-%m-%d").to_string()),
        end_date: sprint.end_date.map(|date| date.format("%Y-%m-%d").to_string()),
        user_story_ids: sprint
            .user_story_ids
            .iter()
            .map(|id| id.as_str().to_string())
            .collect(),
        status: Some(sprint.status.as_str().to_string()),
        velocity: sprint.velocity,
    };
    serde_json::to_value(record).map_err(|_| StoreError::Parse)
}

fn parse_date_opt(value: Option<&str>) -> Result<Option<NaiveDate>, StoreError> {
    let Some(text) = value else {
        return Ok(None);
    };
    let date = if let Some((date_part, _)) = text.split_once('T') {
        date_part
    } else {
        text
    };
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| StoreError::Parse)
}
