use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::identifier::DocumentId;
use crate::services::entity_store::{EntityStore, StoreError};

/// In-memory document store used as the test backend. Documents live in
/// insertion order per collection; `update` merges object fields at the
/// root, and a `null` patch value overwrites the field rather than removing
/// the key, matching the remote store's merge semantics.
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, Vec<(String, Value)>>>,
    next_id: Mutex<u64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Inserts a document under an explicit identifier, so tests can refer
    /// to seeded data by readable ids.
    pub fn seed(&self, collection: &str, id: &str, mut doc: Value) {
        if let Some(fields) = doc.as_object_mut() {
            fields.insert("id".to_string(), Value::String(id.to_string()));
        }
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id.to_string(), doc));
    }

    fn mint_id(&self, collection: &str) -> String {
        let mut next_id = self.next_id.lock().unwrap();
        let id = format!("{collection}-{next_id}");
        *next_id += 1;
        id
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn create(&self, collection: &str, mut doc: Value) -> Result<DocumentId, StoreError> {
        if !doc.is_object() {
            return Err(StoreError::Parse);
        }
        let id = self.mint_id(collection);
        doc.as_object_mut()
            .unwrap()
            .insert("id".to_string(), Value::String(id.clone()));

        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), doc));
        Ok(DocumentId::new(id))
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> Result<Value, StoreError> {
        let collections = self.collections.lock().unwrap();
        collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id.as_str()))
            .map(|(_, doc)| doc.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        patch: Value,
    ) -> Result<(), StoreError> {
        let Some(patch_fields) = patch.as_object() else {
            return Err(StoreError::Parse);
        };

        let mut collections = self.collections.lock().unwrap();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id.as_str()))
            .map(|(_, doc)| doc)
            .ok_or(StoreError::NotFound)?;

        let fields = doc.as_object_mut().ok_or(StoreError::Parse)?;
        for (key, value) in patch_fields {
            fields.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections
            .get_mut(collection)
            .ok_or(StoreError::NotFound)?;
        let before = docs.len();
        docs.retain(|(doc_id, _)| doc_id != id.as_str());
        if docs.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.lock().unwrap();
        let docs = collections.get(collection).cloned().unwrap_or_default();
        Ok(docs
            .into_iter()
            .filter(|(_, doc)| field_matches(doc.get(field), &value))
            .map(|(_, doc)| doc)
            .collect())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
            .unwrap_or_default())
    }
}

fn field_matches(field: Option<&Value>, value: &Value) -> bool {
    match field {
        Some(Value::Array(items)) => items.contains(value),
        Some(other) => other == value,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let first = store.create("sprints", json!({ "title": "A" })).await.unwrap();
        let second = store.create("sprints", json!({ "title": "B" })).await.unwrap();
        assert_eq!(first.as_str(), "sprints-1");
        assert_eq!(second.as_str(), "sprints-2");

        let doc = store.get("sprints", &first).await.unwrap();
        assert_eq!(doc["id"], "sprints-1");
        assert_eq!(doc["title"], "A");
    }

    #[tokio::test]
    async fn update_merges_and_keeps_null_values() {
        let store = InMemoryStore::new();
        store.seed("user_stories", "us-1", json!({ "title": "A", "badge": "sprint" }));
        let id = DocumentId::new("us-1");

        store
            .update("user_stories", &id, json!({ "badge": null, "storyPoints": 5 }))
            .await
            .unwrap();

        let doc = store.get("user_stories", &id).await.unwrap();
        assert_eq!(doc["badge"], Value::Null);
        assert_eq!(doc["storyPoints"], 5);
        assert_eq!(doc["title"], "A");
    }

    #[tokio::test]
    async fn query_matches_scalars_and_list_membership() {
        let store = InMemoryStore::new();
        store.seed("backlog_tasks", "t-1", json!({ "userStoryIds": ["us-1", "us-2"] }));
        store.seed("backlog_tasks", "t-2", json!({ "userStoryIds": ["us-3"] }));
        store.seed("user_stories", "us-1", json!({ "sprintId": "sp-1" }));

        let by_story = store
            .query("backlog_tasks", "userStoryIds", json!("us-2"))
            .await
            .unwrap();
        assert_eq!(by_story.len(), 1);
        assert_eq!(by_story[0]["id"], "t-1");

        let by_sprint = store
            .query("user_stories", "sprintId", json!("sp-1"))
            .await
            .unwrap();
        assert_eq!(by_sprint.len(), 1);

        let none = store
            .query("user_stories", "sprintId", json!("sp-9"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn get_and_delete_report_missing_documents() {
        let store = InMemoryStore::new();
        let id = DocumentId::new("sp-9");
        assert!(matches!(
            store.get("sprints", &id).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.delete("sprints", &id).await,
            Err(StoreError::NotFound)
        ));
    }
}
