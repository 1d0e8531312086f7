//! Implements MemoryPort over `/api/memories/*`.

use super::response::{connectivity, decode, expect_success};
use crate::domain::{DomainError, Memory, MemoryPage, MemoryQuery, MemoryUpdate, NewMemory};
use crate::ports::MemoryPort;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Deserialize)]
struct MemoryEnvelope {
    memory: Memory,
}

/// Memory vault client. Shares the session client's cookie jar.
pub struct HttpMemoryClient {
    client: Client,
    base_url: String,
}

impl HttpMemoryClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/memories/", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/api/memories/{}", self.base_url, id)
    }
}

#[async_trait]
impl MemoryPort for HttpMemoryClient {
    async fn list(&self, query: &MemoryQuery) -> Result<MemoryPage, DomainError> {
        let response = self
            .client
            .get(self.collection_url())
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(connectivity)?;
        let page: MemoryPage = decode(response, "Failed to retrieve memories").await?;
        debug!(
            page = page.pagination.page,
            count = page.memories.len(),
            total = page.pagination.total,
            "fetched memories"
        );
        Ok(page)
    }

    async fn get(&self, id: i64) -> Result<Memory, DomainError> {
        let response = self
            .client
            .get(self.item_url(id))
            .send()
            .await
            .map_err(connectivity)?;
        let envelope: MemoryEnvelope = decode(response, "Failed to retrieve memory").await?;
        Ok(envelope.memory)
    }

    async fn create(&self, memory: &NewMemory) -> Result<Memory, DomainError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(memory)
            .send()
            .await
            .map_err(connectivity)?;
        let envelope: MemoryEnvelope = decode(response, "Failed to create memory").await?;
        info!(memory_id = envelope.memory.id, "memory created");
        Ok(envelope.memory)
    }

    async fn update(&self, id: i64, changes: &MemoryUpdate) -> Result<Memory, DomainError> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(changes)
            .send()
            .await
            .map_err(connectivity)?;
        let envelope: MemoryEnvelope = decode(response, "Failed to update memory").await?;
        info!(memory_id = id, "memory updated");
        Ok(envelope.memory)
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(connectivity)?;
        expect_success(response, "Failed to delete memory").await?;
        info!(memory_id = id, "memory deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::build_client;
    use crate::domain::MemoryType;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str) -> HttpMemoryClient {
        HttpMemoryClient::new(build_client(Duration::from_secs(5)).unwrap(), uri)
    }

    fn memory_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("memory {id}"),
            "content": "body",
            "memory_type": "learning",
            "tags": ["rust"],
            "importance_level": 3,
            "is_encrypted": false,
            "media_url": null,
            "created_at": "2024-01-15T10:00:00.123456",
            "updated_at": "2024-01-15T10:00:00.123456",
            "last_accessed": null,
            "user_id": 1
        })
    }

    #[tokio::test]
    async fn test_list_sends_filters_and_decodes_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/memories/"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "12"))
            .and(query_param("search", "rust"))
            .and(query_param("type", "learning"))
            .and(query_param("importance", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "memories": [memory_json(1), memory_json(2)],
                "pagination": {
                    "page": 2, "pages": 3, "per_page": 12, "total": 30,
                    "has_next": true, "has_prev": true
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = MemoryQuery {
            page: 2,
            search: Some("rust".into()),
            memory_type: Some(MemoryType::Learning),
            importance: Some(3),
            ..Default::default()
        };
        let page = client_for(&server.uri()).list(&query).await.unwrap();
        assert_eq!(page.memories.len(), 2);
        assert_eq!(page.memories[0].memory_type, MemoryType::Learning);
        assert_eq!(page.pagination.total, 30);
        assert!(page.pagination.has_next);
    }

    #[tokio::test]
    async fn test_create_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/memories/"))
            .and(body_json(json!({
                "title": "memory 5",
                "content": "body",
                "memory_type": "learning",
                "importance_level": 3,
                "tags": ["rust"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Memory created successfully",
                "memory": memory_json(5)
            })))
            .mount(&server)
            .await;

        let body = NewMemory {
            title: "memory 5".into(),
            content: "body".into(),
            memory_type: MemoryType::Learning,
            importance_level: 3,
            tags: vec!["rust".into()],
        };
        let created = client_for(&server.uri()).create(&body).await.unwrap();
        assert_eq!(created.id, 5);
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/memories/5"))
            .and(body_json(json!({"title": "renamed"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"memory": memory_json(5)})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let changes = MemoryUpdate {
            title: Some("renamed".into()),
            ..Default::default()
        };
        client_for(&server.uri()).update(5, &changes).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_memory_is_remote_404() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/memories/9"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Memory not found"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/memories/9"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Memory not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let expected = DomainError::Remote {
            status: 404,
            message: "Memory not found".into(),
        };
        assert_eq!(client.delete(9).await.unwrap_err(), expected);
        assert_eq!(client.get(9).await.unwrap_err(), expected);
    }
}
