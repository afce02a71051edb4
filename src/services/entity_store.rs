use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::identifier::DocumentId;

pub const SPRINTS: &str = "sprints";
pub const USER_STORIES: &str = "user_stories";
pub const BACKLOG_TASKS: &str = "backlog_tasks";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,
    #[error("connection error")]
    Connection,
    #[error("parse error")]
    Parse,
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Other(String),
}

/// Boundary to the document database. Collections hold raw JSON documents;
/// `update` is a partial merge at the document root and last writer wins.
/// No cross-document transactions.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn create(&self, collection: &str, doc: Value) -> Result<DocumentId, StoreError>;

    async fn get(&self, collection: &str, id: &DocumentId) -> Result<Value, StoreError>;

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        patch: Value,
    ) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError>;

    /// Equality query over a single top-level field. For list-valued fields
    /// a document matches when the list contains the value.
    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Value>, StoreError>;

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError>;
}
