//! Memory records and read-only retrieval queries

use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::query;
use crate::database::PostgresPool;
use crate::error::Result;

/// A memory entry
///
/// Created and mutated outside this crate; retrieval only reads. A row
/// without an embedding is reachable only through lexical search.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Memory {
    /// Unique memory ID
    pub id: Uuid,
    /// User ID who owns this memory
    pub user_id: String,
    /// Main content of the memory
    pub content: String,
    /// Classification label, opaque to this crate
    pub category: String,
    /// Importance score used for ranking
    pub importance: f32,
    /// Opaque structured payload, passed through unmodified
    pub metadata: Value,
    /// Tags, passed through unmodified
    pub tags: Vec<String>,
    /// Stored embedding vector, if one was generated
    #[serde(skip)]
    pub embedding: Option<Vector>,
    /// When the memory was created
    pub created_at: DateTime<Utc>,
}

impl Memory {
    /// Create a new memory
    pub fn new(user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Memory {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            content: content.into(),
            category: "general".to_string(),
            importance: 0.0,
            metadata: Value::Null,
            tags: Vec::new(),
            embedding: None,
            created_at: Utc::now(),
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the importance
    pub fn with_importance(mut self, importance: f32) -> Self {
        self.importance = importance;
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the metadata payload
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the embedding vector
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(Vector::from(embedding));
        self
    }
}

/// Read-only memory store backed by PostgreSQL + pgvector
#[derive(Clone)]
pub struct MemoryStore {
    pg_pool: PostgresPool,
}

impl MemoryStore {
    /// Create a store over an injected pool
    pub fn new(pg_pool: PostgresPool) -> Self {
        MemoryStore { pg_pool }
    }

    /// Create a store over the process-wide shared pool (lazy, see
    /// [`crate::database::pool`])
    pub async fn shared() -> Result<Self> {
        Ok(MemoryStore::new(crate::database::pool().await?.clone()))
    }

    /// Search memories by semantic similarity using pgvector.
    ///
    /// Returns each matching memory with its similarity score
    /// (`1 - cosine_distance`), closest first. Only rows with a similarity
    /// strictly greater than `threshold` are returned.
    pub async fn search_semantic(
        &self,
        user_id: &str,
        query_embedding: Vec<f32>,
        limit: usize,
        threshold: f32,
    ) -> Result<Vec<(Memory, f32)>> {
        let embedding = Vector::from(query_embedding);

        #[derive(FromRow)]
        struct MemoryWithScore {
            id: Uuid,
            user_id: String,
            content: String,
            category: String,
            importance: f32,
            metadata: Value,
            tags: Vec<String>,
            embedding: Option<Vector>,
            created_at: DateTime<Utc>,
            similarity: f32,
        }

        let results: Vec<MemoryWithScore> = sqlx::query_as(query::SEMANTIC_SEARCH_SQL)
            .bind(&embedding)
            .bind(user_id)
            .bind(threshold)
            .bind(limit as i64)
            .fetch_all(&self.pg_pool)
            .await?;

        Ok(results
            .into_iter()
            .map(|r| {
                (
                    Memory {
                        id: r.id,
                        user_id: r.user_id,
                        content: r.content,
                        category: r.category,
                        importance: r.importance,
                        metadata: r.metadata,
                        tags: r.tags,
                        embedding: r.embedding,
                        created_at: r.created_at,
                    },
                    r.similarity,
                )
            })
            .collect())
    }

    /// Search memories by case-insensitive substring match on content.
    ///
    /// An empty query matches all of the user's memories. Results are ranked
    /// by importance, then recency.
    pub async fn search_lexical(
        &self,
        user_id: &str,
        query_text: &str,
        limit: usize,
    ) -> Result<Vec<Memory>> {
        let memories: Vec<Memory> = sqlx::query_as(query::LEXICAL_SEARCH_SQL)
            .bind(user_id)
            .bind(query::like_pattern(query_text))
            .bind(limit as i64)
            .fetch_all(&self.pg_pool)
            .await?;

        Ok(memories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_creation() {
        let memory = Memory::new("user123", "Test content")
            .with_category("note")
            .with_importance(0.8)
            .with_tags(vec!["test".to_string()]);

        assert_eq!(memory.user_id, "user123");
        assert_eq!(memory.content, "Test content");
        assert_eq!(memory.category, "note");
        assert_eq!(memory.importance, 0.8);
        assert_eq!(memory.tags, vec!["test"]);
        assert!(memory.embedding.is_none());
    }

    #[test]
    fn test_memory_importance_is_not_clamped() {
        // Importance has no fixed range; ranking only needs a total order.
        let memory = Memory::new("user", "content").with_importance(9.0);
        assert_eq!(memory.importance, 9.0);
    }

    #[test]
    fn test_memory_with_embedding() {
        let memory = Memory::new("user", "content").with_embedding(vec![0.1, 0.2, 0.3]);
        assert_eq!(memory.embedding.unwrap().to_vec(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_memory_metadata_passthrough() {
        let metadata = serde_json::json!({ "source": "chat", "pinned": true });
        let memory = Memory::new("user", "content").with_metadata(metadata.clone());
        assert_eq!(memory.metadata, metadata);
    }
}
