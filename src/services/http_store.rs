use std::env;
use std::fs;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::identifier::DocumentId;
use crate::services::access::Role;
use crate::services::entity_store::{EntityStore, StoreError};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub base_url: String,
    pub role: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            role: "admin".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(filepath)
            .map_err(|err| StoreError::Other(format!("failed to read store config: {err}")))?;
        let config: StoreConfig =
            serde_yaml::from_str(&contents).map_err(|_| StoreError::Parse)?;
        Ok(config)
    }

    pub fn role(&self) -> Result<Role, StoreError> {
        Role::parse(&self.role)
            .ok_or_else(|| StoreError::Other(format!("unknown role: {}", self.role)))
    }
}

#[derive(Debug, Clone)]
pub struct AuthData {
    pub username: String,
    pub api_token: String,
}

impl AuthData {
    pub fn from_env() -> Result<Self, StoreError> {
        let username = env::var("COCKPIT_USERNAME").ok();
        let api_token = env::var("COCKPIT_API_TOKEN").ok();
        match (username, api_token) {
            (Some(username), Some(api_token)) => Ok(Self {
                username,
                api_token,
            }),
            _ => Err(StoreError::Unauthorized),
        }
    }
}

/// REST client for the document store. One collection per URL segment,
/// partial updates via PATCH, equality queries as `field`/`value` query
/// parameters with a `nextPageToken` pagination envelope.
pub struct HttpStoreClient {
    config: StoreConfig,
    auth: AuthData,
    client: Client,
}

impl HttpStoreClient {
    pub fn new(config: StoreConfig, auth: AuthData) -> Result<Self, StoreError> {
        if config.base_url.is_empty() {
            return Err(StoreError::Other(
                "store config is missing base_url".to_string(),
            ));
        }

        Ok(Self {
            config,
            auth,
            client: Client::new(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{collection}", self.config.base_url)
    }

    fn document_url(&self, collection: &str, id: &DocumentId) -> String {
        format!("{}/collections/{collection}/{id}", self.config.base_url)
    }

    async fn send_json(&self, request: reqwest::RequestBuilder) -> Result<Value, StoreError> {
        let response = request
            .basic_auth(
                self.auth.username.clone(),
                Some(self.auth.api_token.clone()),
            )
            .send()
            .await
            .map_err(|_| StoreError::Connection)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(StoreError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound);
        }
        if !status.is_success() {
            return Err(StoreError::Connection);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        response
            .json::<Value>()
            .await
            .map_err(|_| StoreError::Parse)
    }

    async fn fetch_documents(
        &self,
        collection: &str,
        query: Option<(&str, &Value)>,
    ) -> Result<Vec<Value>, StoreError> {
        let url = self.collection_url(collection);
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some((field, value)) = query {
            params.push(("field".to_string(), field.to_string()));
            params.push(("value".to_string(), query_param_value(value)));
        }

        let mut documents = Vec::new();
        let mut last_page_token: Option<String> = None;

        loop {
            let payload = self
                .send_json(self.client.get(&url).query(&params))
                .await?;

            let page = payload
                .get("documents")
                .and_then(|value| value.as_array())
                .ok_or(StoreError::Parse)?;
            documents.extend(page.iter().cloned());

            match payload.get("nextPageToken").and_then(|value| value.as_str()) {
                Some(token) => {
                    if last_page_token.as_deref() == Some(token) {
                        break;
                    }
                    last_page_token = Some(token.to_string());
                    params.retain(|(name, _)| name != "pageToken");
                    params.push(("pageToken".to_string(), token.to_string()));
                }
                None => break,
            }
        }

        Ok(documents)
    }
}

fn query_param_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl EntityStore for HttpStoreClient {
    async fn create(&self, collection: &str, doc: Value) -> Result<DocumentId, StoreError> {
        let url = self.collection_url(collection);
        let payload = self.send_json(self.client.post(&url).json(&doc)).await?;
        let id = payload
            .get("id")
            .and_then(|value| value.as_str())
            .ok_or(StoreError::Parse)?;
        Ok(DocumentId::new(id))
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> Result<Value, StoreError> {
        let url = self.document_url(collection, id);
        self.send_json(self.client.get(&url)).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        patch: Value,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        self.send_json(self.client.patch(&url).json(&patch)).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        self.send_json(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Value>, StoreError> {
        self.fetch_documents(collection, Some((field, &value))).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        self.fetch_documents(collection, None).await
    }
}
